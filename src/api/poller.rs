//! Objects-log poller
//!
//! A timer task fetches the day's log on start and every `interval` after
//! that; `refresh` asks for one extra fetch. Each fetch runs in its own task
//! and reports back over a channel tagged with a sequence number, and only
//! results newer than the last applied one are handed to the view.
//!
//! Dropping the poller aborts the timer. Fetches already in flight are left
//! to finish and their results are discarded with the channel.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::client::{objects_log_url, MonitorClient};
use super::error::Result;
use super::objects_log::LogSeries;
use super::types::Camera;

/// Result of one fetch
#[derive(Debug)]
pub struct PollUpdate {
    pub seq: u64,
    pub url: String,
    pub result: Result<LogSeries>,
}

/// Handle to a running poll loop
pub struct LogPoller {
    refresh_tx: mpsc::UnboundedSender<()>,
    updates: mpsc::UnboundedReceiver<PollUpdate>,
    timer: JoinHandle<()>,
    last_applied: u64,
}

impl LogPoller {
    /// Spawn the poll loop for the first camera of `cameras`
    pub fn start(client: MonitorClient, cameras: Vec<Camera>, interval: Duration) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let (update_tx, updates) = mpsc::unbounded_channel();
        let timer = tokio::spawn(poll_loop(client, cameras, interval, refresh_rx, update_tx));

        Self {
            refresh_tx,
            updates,
            timer,
            last_applied: 0,
        }
    }

    /// Request one fetch outside the regular schedule
    pub fn refresh(&self) {
        if self.refresh_tx.send(()).is_err() {
            warn!("Refresh requested but the poll loop has stopped");
        }
    }

    /// Drain finished fetches; returns the newest log that should replace
    /// the current one, if any
    pub fn poll(&mut self) -> Option<LogSeries> {
        let mut newest = None;
        while let Ok(update) = self.updates.try_recv() {
            if let Some(series) = self.accept(update) {
                newest = Some(series);
            }
        }
        newest
    }

    /// Apply one fetch result. Failures and out-of-order responses yield `None`.
    fn accept(&mut self, update: PollUpdate) -> Option<LogSeries> {
        match update.result {
            Ok(series) if update.seq > self.last_applied => {
                debug!("Applied objects log #{} ({} rows)", update.seq, series.len());
                self.last_applied = update.seq;
                Some(series)
            }
            Ok(_) => {
                debug!(
                    "Discarded stale objects log #{} (already showing #{})",
                    update.seq, self.last_applied
                );
                None
            }
            Err(e) => {
                warn!("Objects log fetch #{} from {} failed: {}", update.seq, update.url, e);
                None
            }
        }
    }
}

impl Drop for LogPoller {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

async fn poll_loop(
    client: MonitorClient,
    cameras: Vec<Camera>,
    interval: Duration,
    mut refresh_rx: mpsc::UnboundedReceiver<()>,
    update_tx: mpsc::UnboundedSender<PollUpdate>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut seq: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            request = refresh_rx.recv() => {
                if request.is_none() {
                    break;
                }
            }
        }

        let Some(url) = objects_log_url(&cameras, Utc::now()) else {
            continue;
        };
        seq += 1;

        let client = client.clone();
        let update_tx = update_tx.clone();
        tokio::spawn(async move {
            let result = client.get_objects_log(&url).await;
            // The receiver is gone once the view is unmounted
            let _ = update_tx.send(PollUpdate { seq, url, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use wiremock::matchers::{header, method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOG: &str = "Timestamp,DetectedObjects,ViolatingObjects,EnvironmentScore\nt0,2,1,0.5\n";

    fn cameras(host: &str) -> Vec<Camera> {
        vec![Camera {
            id: "default".to_string(),
            storage_host: host.to_string(),
            streams: Vec::new(),
        }]
    }

    async fn log_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/static/data/default/objects_log/\d{4}-\d{2}-\d{2}\.csv$"))
            .and(header("cache-control", "no-store"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LOG))
            .mount(&server)
            .await;
        server
    }

    async fn wait_for_update(poller: &mut LogPoller) -> LogSeries {
        for _ in 0..100 {
            if let Some(series) = poller.poll() {
                return series;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("no objects log update arrived");
    }

    fn series(rows: usize) -> LogSeries {
        LogSeries {
            timestamps: vec!["t".to_string(); rows],
            detected: vec![1.0; rows],
            violating: vec![0.0; rows],
            env_score: vec![0.5; rows],
        }
    }

    #[tokio::test]
    async fn test_fetches_immediately_on_start() {
        let server = log_server().await;
        let mut poller = LogPoller::start(
            MonitorClient::new("http://unused"),
            cameras(&server.uri()),
            Duration::from_secs(3600),
        );

        let series = wait_for_update(&mut poller).await;
        assert_eq!(series.len(), 1);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_triggers_exactly_one_more_fetch_of_same_url() {
        let server = log_server().await;
        let mut poller = LogPoller::start(
            MonitorClient::new("http://unused"),
            cameras(&server.uri()),
            Duration::from_secs(3600),
        );
        wait_for_update(&mut poller).await;

        poller.refresh();
        wait_for_update(&mut poller).await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url.path(), requests[1].url.path());
    }

    #[tokio::test]
    async fn test_drop_stops_polling() {
        let server = log_server().await;
        let mut poller = LogPoller::start(
            MonitorClient::new("http://unused"),
            cameras(&server.uri()),
            Duration::from_millis(50),
        );
        wait_for_update(&mut poller).await;
        drop(poller);

        // Let fetches spawned before the drop land
        tokio::time::sleep(Duration::from_millis(100)).await;
        let after_drop = server.received_requests().await.unwrap().len();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(server.received_requests().await.unwrap().len(), after_drop);
    }

    #[tokio::test]
    async fn test_no_cameras_means_no_fetch() {
        let server = log_server().await;
        let mut poller = LogPoller::start(
            MonitorClient::new(server.uri()),
            Vec::new(),
            Duration::from_millis(20),
        );
        poller.refresh();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(poller.poll().is_none());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_does_not_replace_newer_data() {
        let mut poller = LogPoller::start(
            MonitorClient::new("http://unused"),
            Vec::new(),
            Duration::from_secs(3600),
        );

        let newer = poller.accept(PollUpdate {
            seq: 2,
            url: "u".to_string(),
            result: Ok(series(5)),
        });
        assert_eq!(newer.map(|s| s.len()), Some(5));

        let stale = poller.accept(PollUpdate {
            seq: 1,
            url: "u".to_string(),
            result: Ok(series(3)),
        });
        assert!(stale.is_none());

        let latest = poller.accept(PollUpdate {
            seq: 3,
            url: "u".to_string(),
            result: Ok(series(7)),
        });
        assert_eq!(latest.map(|s| s.len()), Some(7));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_data() {
        let mut poller = LogPoller::start(
            MonitorClient::new("http://unused"),
            Vec::new(),
            Duration::from_secs(3600),
        );
        let failed = poller.accept(PollUpdate {
            seq: 1,
            url: "u".to_string(),
            result: Err(ApiError::Status {
                url: "u".to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            }),
        });
        assert!(failed.is_none());
        assert_eq!(poller.last_applied, 0);
    }
}
