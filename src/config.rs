//! Runtime configuration from environment variables
//!
//! All functions fall back to sensible defaults when env vars are not set.
//! `Settings::from_env` snapshots them once at start-up.

use std::path::PathBuf;
use std::time::Duration;

/// Default chart poll interval in seconds
pub const DEFAULT_POLL_SECS: u64 = 15;

/// Backend base URL serving `/api/cameras`. Override with `LIVE_MONITOR_API_URL`.
pub fn api_url() -> String {
    std::env::var("LIVE_MONITOR_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
}

/// Objects-log poll interval. Override with `LIVE_MONITOR_POLL_SECS`.
pub fn poll_interval() -> Duration {
    let secs = std::env::var("LIVE_MONITOR_POLL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&s| s > 0)
        .unwrap_or(DEFAULT_POLL_SECS);
    Duration::from_secs(secs)
}

/// Development mode. `LIVE_MONITOR_ENV=development` turns it on; debug
/// builds default to development when the variable is unset.
pub fn development_mode() -> bool {
    match std::env::var("LIVE_MONITOR_ENV") {
        Ok(env) => env.eq_ignore_ascii_case("development"),
        Err(_) => cfg!(debug_assertions),
    }
}

/// External video player command. Override with `LIVE_MONITOR_PLAYER`.
pub fn player_command() -> String {
    std::env::var("LIVE_MONITOR_PLAYER").unwrap_or_else(|_| "mpv".to_string())
}

/// Launch the player as soon as a stream URL is known.
/// Override with `LIVE_MONITOR_AUTOPLAY=false`.
pub fn autoplay() -> bool {
    std::env::var("LIVE_MONITOR_AUTOPLAY")
        .map(|v| parse_bool(&v).unwrap_or(true))
        .unwrap_or(true)
}

/// Tracing output file (stdout belongs to the TUI).
/// Override with `LIVE_MONITOR_LOG_FILE`.
pub fn log_file() -> PathBuf {
    std::env::var("LIVE_MONITOR_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("live-monitor.log"))
}

/// Color theme name (`dark` or `light`). Override with `LIVE_MONITOR_THEME`.
pub fn theme_name() -> String {
    std::env::var("LIVE_MONITOR_THEME").unwrap_or_else(|_| "dark".to_string())
}

/// Accent color override as `#rrggbb`, from `LIVE_MONITOR_ACCENT`.
pub fn accent_color() -> Option<String> {
    std::env::var("LIVE_MONITOR_ACCENT").ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Snapshot of the runtime configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub poll_interval: Duration,
    pub development: bool,
    pub player_command: String,
    pub autoplay: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            api_url: api_url(),
            poll_interval: poll_interval(),
            development: development_mode(),
            player_command: player_command(),
            autoplay: autoplay(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            development: false,
            player_command: "mpv".to_string(),
            autoplay: false,
        }
    }
}
