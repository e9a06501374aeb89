//! Charts panel - objects log plotted over the day
//!
//! Starts polling the log once the camera list is known. Two figures are
//! rebuilt whenever a new log is applied: pedestrian counts, and the
//! environment score.

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::info;

use crate::api::poller::LogPoller;
use crate::api::{Camera, LogSeries, MonitorClient};
use crate::themes::Theme;
use crate::ui::{Panel, PanelStyle};
use crate::widgets::chart::{LineChart, Series};

pub const PEDESTRIANS_TITLE: &str = "Plotting log data Physical Distancing";
pub const ENV_SCORE_TITLE: &str = "Plotting log data Physical Distancing - Environment Score";

/// A titled chart
pub struct ChartFigure {
    pub title: &'static str,
    pub chart: LineChart,
}

/// Detected and violating pedestrian counts
pub fn pedestrians_figure(data: &LogSeries, theme: &Theme) -> ChartFigure {
    let mut chart = with_time_axis(data);
    chart.add_series(Series::new("Detected Pedestrians", theme.info, data.detected.clone()).filled());
    chart.add_series(
        Series::new("Detected Pedestrians In Unsafe Area", theme.error, data.violating.clone()).filled(),
    );
    ChartFigure {
        title: PEDESTRIANS_TITLE,
        chart,
    }
}

/// Environment score
pub fn env_score_figure(data: &LogSeries, theme: &Theme) -> ChartFigure {
    let mut chart = with_time_axis(data);
    chart.add_series(Series::new("Environment Score", theme.success, data.env_score.clone()).filled());
    ChartFigure {
        title: ENV_SCORE_TITLE,
        chart,
    }
}

fn with_time_axis(data: &LogSeries) -> LineChart {
    match (data.timestamps.first(), data.timestamps.last()) {
        (Some(first), Some(last)) => LineChart::new().with_x_labels(short_time(first), short_time(last)),
        _ => LineChart::new(),
    }
}

/// Time-of-day part of a log timestamp (`2024-03-09 08:00:05` -> `08:00:05`)
fn short_time(timestamp: &str) -> &str {
    timestamp
        .rsplit(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(timestamp)
}

/// Charts panel
pub struct ChartsView {
    client: MonitorClient,
    poll_interval: Duration,
    theme: Theme,
    poller: Option<LogPoller>,
    data: Option<LogSeries>,
    figures: Option<(ChartFigure, ChartFigure)>,
    last_update: Option<DateTime<Local>>,
}

impl ChartsView {
    pub fn new(client: MonitorClient, poll_interval: Duration, theme: Theme) -> Self {
        Self {
            client,
            poll_interval,
            theme,
            poller: None,
            data: None,
            figures: None,
            last_update: None,
        }
    }

    pub fn data(&self) -> Option<&LogSeries> {
        self.data.as_ref()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    /// Store a new log and rebuild both figures
    pub fn set_data(&mut self, data: LogSeries) {
        self.figures = Some((
            pedestrians_figure(&data, &self.theme),
            env_score_figure(&data, &self.theme),
        ));
        self.data = Some(data);
        self.last_update = Some(Local::now());
    }

    /// Fetch the log now, on top of the regular schedule
    pub fn refresh(&self) {
        if let Some(ref poller) = self.poller {
            poller.refresh();
        }
    }

    fn render_figure(figure: &ChartFigure, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.height < 2 {
            return;
        }
        Paragraph::new(figure.title)
            .style(Style::default().fg(theme.text_primary).bold())
            .alignment(Alignment::Center)
            .render(Rect { height: 1, ..area }, buf);
        let plot_area = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        figure.chart.render(plot_area, buf, theme);
    }
}

impl super::ViewTrait for ChartsView {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) -> Result<()> {
        let mut panel = Panel::new(theme).title("Charts");
        if let Some(updated) = self.last_update {
            panel = panel
                .style(PanelStyle::Live)
                .subtitle(format!("[r] Refresh  updated {}", updated.format("%H:%M:%S")));
        }
        let block = panel.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Nothing until the first log has been applied
        let Some((pedestrians, env_score)) = &self.figures else {
            return Ok(());
        };

        // Width follows the container on every render
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        Self::render_figure(pedestrians, halves[0], frame.buffer_mut(), theme);
        Self::render_figure(env_score, halves[1], frame.buffer_mut(), theme);

        Ok(())
    }

    fn set_cameras(&mut self, cameras: &[Camera]) {
        if cameras.is_empty() {
            return;
        }
        info!(
            "Polling objects log for camera {} every {:?}",
            cameras[0].id, self.poll_interval
        );
        // Replacing the poller drops (and stops) any previous one
        self.poller = Some(LogPoller::start(
            self.client.clone(),
            cameras.to_vec(),
            self.poll_interval,
        ));
    }

    fn tick(&mut self) {
        if let Some(data) = self.poller.as_mut().and_then(LogPoller::poll) {
            self.set_data(data);
        }
    }

    fn handle_key(&mut self, key: KeyCode) -> Result<super::ViewAction> {
        if key == KeyCode::Char('r') {
            self.refresh();
            return Ok(super::ViewAction::Handled);
        }
        Ok(super::ViewAction::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::ViewTrait;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOG: &str = "Timestamp,DetectedObjects,ViolatingObjects,EnvironmentScore\n\
        2024-03-09 08:00:00,4,1,0.75\n\
        2024-03-09 08:00:05,6,2,0.5\n";

    fn view(interval: Duration) -> ChartsView {
        ChartsView::new(MonitorClient::new("http://unused"), interval, Theme::default())
    }

    fn screen(view: &mut ChartsView, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                view.render(f, area, &theme).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_short_time() {
        assert_eq!(short_time("2024-03-09 08:00:05"), "08:00:05");
        assert_eq!(short_time("2024-03-09T08:00:05"), "08:00:05");
        assert_eq!(short_time("08:00:05"), "08:00:05");
    }

    #[test]
    fn test_figures_follow_data() {
        let data = LogSeries::parse(LOG).unwrap();
        let theme = Theme::default();

        let pedestrians = pedestrians_figure(&data, &theme);
        assert_eq!(pedestrians.title, PEDESTRIANS_TITLE);
        assert_eq!(pedestrians.chart.series.len(), 2);
        assert_eq!(pedestrians.chart.series[0].data, vec![4.0, 6.0]);
        assert_eq!(pedestrians.chart.series[1].data, vec![1.0, 2.0]);
        assert!(pedestrians.chart.series.iter().all(|s| s.fill));
        assert_eq!(
            pedestrians.chart.x_labels,
            Some(("08:00:00".to_string(), "08:00:05".to_string()))
        );

        let score = env_score_figure(&data, &theme);
        assert_eq!(score.chart.series.len(), 1);
        assert_eq!(score.chart.series[0].label, "Environment Score");
        assert_eq!(score.chart.series[0].data, vec![0.75, 0.5]);
    }

    #[test]
    fn test_renders_nothing_before_data() {
        let mut charts = view(Duration::from_secs(15));
        let text = screen(&mut charts, 100, 30);
        assert!(text.contains("Charts"));
        assert!(!text.contains(PEDESTRIANS_TITLE));
        assert!(!charts.is_polling());
    }

    #[test]
    fn test_renders_both_charts_with_data() {
        let mut charts = view(Duration::from_secs(15));
        charts.set_data(LogSeries::parse(LOG).unwrap());
        let text = screen(&mut charts, 100, 30);
        assert!(text.contains(PEDESTRIANS_TITLE));
        assert!(text.contains(ENV_SCORE_TITLE));
        assert!(text.contains("[r] Refresh"));
        assert!(charts.last_update().is_some());

        // Same data, narrower container
        let narrow = screen(&mut charts, 70, 30);
        assert!(narrow.contains("Detected Pedestrians"));
    }

    #[test]
    fn test_refresh_without_cameras_is_noop() {
        let mut charts = view(Duration::from_secs(15));
        charts.refresh();
        charts.tick();
        assert!(charts.data().is_none());
    }

    #[tokio::test]
    async fn test_cameras_start_polling_and_data_arrives() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/static/data/cam/objects_log/.+\.csv$"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LOG))
            .mount(&server)
            .await;

        let mut charts = view(Duration::from_secs(3600));
        charts.set_cameras(&[Camera {
            id: "cam".to_string(),
            storage_host: server.uri(),
            streams: Vec::new(),
        }]);
        assert!(charts.is_polling());

        for _ in 0..100 {
            charts.tick();
            if charts.data().is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let data = charts.data().expect("log should have been applied");
        assert_eq!(data.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_poll_keeps_previous_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut charts = view(Duration::from_secs(3600));
        charts.set_data(LogSeries::parse(LOG).unwrap());
        charts.set_cameras(&[Camera {
            id: "cam".to_string(),
            storage_host: server.uri(),
            streams: Vec::new(),
        }]);

        tokio::time::sleep(Duration::from_millis(200)).await;
        charts.tick();
        assert_eq!(charts.data().map(LogSeries::len), Some(2));
        assert!(!server.received_requests().await.unwrap().is_empty());
    }
}
