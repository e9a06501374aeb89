//! Live Monitor - terminal dashboard for a physical-distancing camera
//!
//! Entry point for the dashboard application.

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs::File;
use std::io;
use std::sync::Mutex;

mod api;
mod app;
mod config;
mod launcher;
mod themes;
mod ui;
mod views;
mod widgets;

use app::App;
use config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (stdout belongs to the TUI)
    let log_path = config::log_file();
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let settings = Settings::from_env();
    tracing::info!("Settings: {:?}", settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Create and run app
    let mut app = App::new(settings);
    let result = app.run().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}
