//! Per-day objects log (CSV) reshaped into parallel chart series

use csv::{ReaderBuilder, StringRecord, Trim};

use super::error::Result;

pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const DETECTED_COLUMN: &str = "DetectedObjects";
pub const VIOLATING_COLUMN: &str = "ViolatingObjects";
pub const ENV_SCORE_COLUMN: &str = "EnvironmentScore";

/// Objects log as four parallel sequences, one entry per CSV row in file order.
///
/// Numeric cells that are empty or unparseable are stored as `NaN`, so every
/// sequence always has the same length as `timestamps`.
#[derive(Debug, Clone, Default)]
pub struct LogSeries {
    pub timestamps: Vec<String>,
    pub detected: Vec<f64>,
    pub violating: Vec<f64>,
    pub env_score: Vec<f64>,
}

impl LogSeries {
    /// Parse the CSV body returned by the storage host
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);
        let timestamp_idx = column(TIMESTAMP_COLUMN);
        let detected_idx = column(DETECTED_COLUMN);
        let violating_idx = column(VIOLATING_COLUMN);
        let env_score_idx = column(ENV_SCORE_COLUMN);

        let mut series = Self::default();
        for record in reader.records() {
            let record = record?;
            series.timestamps.push(
                timestamp_idx
                    .and_then(|i| record.get(i))
                    .unwrap_or_default()
                    .to_string(),
            );
            series.detected.push(numeric_cell(&record, detected_idx));
            series.violating.push(numeric_cell(&record, violating_idx));
            series.env_score.push(numeric_cell(&record, env_score_idx));
        }

        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Most recent row, if any
    pub fn latest(&self) -> Option<(&str, f64, f64, f64)> {
        let last = self.len().checked_sub(1)?;
        Some((
            self.timestamps[last].as_str(),
            self.detected[last],
            self.violating[last],
            self.env_score[last],
        ))
    }
}

fn numeric_cell(record: &StringRecord, idx: Option<usize>) -> f64 {
    idx.and_then(|i| record.get(i))
        .and_then(|cell| cell.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "Timestamp,DetectedObjects,ViolatingObjects,EnvironmentScore\n\
        2024-03-09 08:00:00,4,1,0.75\n\
        2024-03-09 08:00:05,6,2,0.5\n\
        2024-03-09 08:00:10,3,0,1.0\n";

    #[test]
    fn test_parse_produces_parallel_series_in_row_order() {
        let series = LogSeries::parse(LOG).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.timestamps.len(), 3);
        assert_eq!(series.detected, vec![4.0, 6.0, 3.0]);
        assert_eq!(series.violating, vec![1.0, 2.0, 0.0]);
        assert_eq!(series.env_score, vec![0.75, 0.5, 1.0]);
        assert_eq!(series.timestamps[0], "2024-03-09 08:00:00");
        assert_eq!(series.timestamps[2], "2024-03-09 08:00:10");
    }

    #[test]
    fn test_header_only_log_is_empty() {
        let series =
            LogSeries::parse("Timestamp,DetectedObjects,ViolatingObjects,EnvironmentScore\n")
                .unwrap();
        assert!(series.is_empty());
        assert!(series.latest().is_none());
    }

    #[test]
    fn test_columns_are_matched_by_name() {
        let log = "EnvironmentScore,Timestamp,ViolatingObjects,DetectedObjects\n0.9,t0,1,5\n";
        let series = LogSeries::parse(log).unwrap();
        assert_eq!(series.timestamps, vec!["t0".to_string()]);
        assert_eq!(series.detected, vec![5.0]);
        assert_eq!(series.violating, vec![1.0]);
        assert_eq!(series.env_score, vec![0.9]);
    }

    #[test]
    fn test_bad_cells_keep_sequences_aligned() {
        let log = "Timestamp,DetectedObjects,ViolatingObjects\nt0,x,1\nt1,2\n";
        let series = LogSeries::parse(log).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.detected.len(), 2);
        assert_eq!(series.violating.len(), 2);
        assert_eq!(series.env_score.len(), 2);
        assert!(series.detected[0].is_nan());
        assert_eq!(series.detected[1], 2.0);
        assert!(series.violating[1].is_nan());
        assert!(series.env_score.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_latest_returns_last_row() {
        let series = LogSeries::parse(LOG).unwrap();
        let (ts, detected, violating, score) = series.latest().unwrap();
        assert_eq!(ts, "2024-03-09 08:00:10");
        assert_eq!((detected, violating, score), (3.0, 0.0, 1.0));
    }
}
