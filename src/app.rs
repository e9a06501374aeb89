//! Main application structure and event loop
//!
//! The root fetches the camera list once on mount and hands it to the
//! panels; everything else is per-panel state.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Camera, MonitorClient};
use crate::config::Settings;
use crate::themes::Theme;
use crate::ui::{HelpOverlay, StatusBar};
use crate::views::{charts::ChartsView, status::StatusView, stream::StreamView, ViewAction, ViewTrait};

/// Terminal width at which the top row splits into two columns
pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;

/// Panel areas for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveLayout {
    pub camera_feed: Rect,
    pub status: Option<Rect>,
    pub birds_view: Rect,
    pub charts: Rect,
    pub status_bar: Rect,
}

impl LiveLayout {
    /// Responsive grid: camera feed 7/12 beside a 5/12 column holding the
    /// status table and bird's view on wide terminals, everything stacked
    /// on narrow ones. Charts take the remaining height.
    pub fn compute(area: Rect, show_status: bool) -> Self {
        let [body, status_bar] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let status_height = if show_status { 5 } else { 0 };
        let feed_height = 8;

        if area.width >= WIDE_LAYOUT_MIN_WIDTH {
            let top_height = feed_height.max(status_height + 6);
            let [top, charts] =
                Layout::vertical([Constraint::Length(top_height), Constraint::Min(0)]).areas(body);
            let [camera_feed, side] =
                Layout::horizontal([Constraint::Ratio(7, 12), Constraint::Ratio(5, 12)]).areas(top);
            let [status, birds_view] =
                Layout::vertical([Constraint::Length(status_height), Constraint::Min(0)]).areas(side);

            Self {
                camera_feed,
                status: show_status.then_some(status),
                birds_view,
                charts,
                status_bar,
            }
        } else {
            let [camera_feed, status, birds_view, charts] = Layout::vertical([
                Constraint::Length(feed_height),
                Constraint::Length(status_height),
                Constraint::Length(feed_height),
                Constraint::Min(0),
            ])
            .areas(body);

            Self {
                camera_feed,
                status: show_status.then_some(status),
                birds_view,
                charts,
                status_bar,
            }
        }
    }
}

/// Main application state
pub struct App {
    settings: Settings,
    client: MonitorClient,
    theme: Theme,
    /// Camera list; `None` until the fetch succeeds
    cameras: Option<Vec<Camera>>,
    /// Pending camera-list fetch
    camera_request: Option<oneshot::Receiver<Result<Vec<Camera>, ApiError>>>,
    camera_feed: StreamView,
    birds_view: StreamView,
    status: StatusView,
    charts: ChartsView,
    help_overlay: HelpOverlay,
    should_quit: bool,
}

impl App {
    /// Create new app instance
    pub fn new(settings: Settings) -> Self {
        info!("Initializing live monitor (api: {})", settings.api_url);
        let client = MonitorClient::new(settings.api_url.clone());
        let theme = Theme::load();

        Self {
            camera_feed: StreamView::camera_feed(&settings),
            birds_view: StreamView::birds_view(&settings),
            status: StatusView::new(),
            charts: ChartsView::new(client.clone(), settings.poll_interval, theme.clone()),
            help_overlay: HelpOverlay::new(),
            cameras: None,
            camera_request: None,
            should_quit: false,
            client,
            theme,
            settings,
        }
    }

    pub fn cameras(&self) -> Option<&[Camera]> {
        self.cameras.as_deref()
    }

    /// Start the one-time camera list fetch
    pub fn mount(&mut self) {
        if self.cameras.is_some() || self.camera_request.is_some() {
            return;
        }
        let (tx, rx) = oneshot::channel();
        let client = self.client.clone();
        tokio::spawn(async move {
            let _ = tx.send(client.get_cameras().await);
        });
        self.camera_request = Some(rx);
    }

    /// Pick up the camera list once the fetch completes
    pub fn poll_cameras(&mut self) {
        let Some(rx) = self.camera_request.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(cameras)) => {
                info!("Received {} camera(s)", cameras.len());
                self.camera_request = None;
                self.set_cameras(cameras);
            }
            Ok(Err(e)) => {
                warn!("Camera list fetch failed: {}", e);
                self.camera_request = None;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!("Camera list fetch task ended without a result");
                self.camera_request = None;
            }
        }
    }

    /// Hand the camera list to every panel
    pub fn set_cameras(&mut self, cameras: Vec<Camera>) {
        for view in self.views_mut() {
            view.set_cameras(&cameras);
        }
        self.cameras = Some(cameras);
    }

    fn views_mut(&mut self) -> [&mut dyn ViewTrait; 4] {
        [
            &mut self.camera_feed,
            &mut self.birds_view,
            &mut self.status,
            &mut self.charts,
        ]
    }

    /// Per-frame state updates
    pub fn tick(&mut self) {
        self.poll_cameras();
        for view in self.views_mut() {
            view.tick();
        }
    }

    /// Render the whole dashboard
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = LiveLayout::compute(area, self.settings.development);
        let theme = &self.theme;

        let mut results = vec![
            self.camera_feed.render(frame, layout.camera_feed, theme),
            self.birds_view.render(frame, layout.birds_view, theme),
            self.charts.render(frame, layout.charts, theme),
        ];
        if let Some(status_area) = layout.status {
            results.push(self.status.render(frame, status_area, theme));
        }
        for result in results {
            if let Err(e) = result {
                warn!("View render error: {}", e);
            }
        }

        let mut status_bar = StatusBar::new(theme)
            .source("Cameras", self.cameras.is_some())
            .source("Log", self.charts.data().is_some());
        if let Some(updated) = self.charts.last_update() {
            status_bar = status_bar.metric("Updated", updated.format("%H:%M:%S").to_string());
        }
        if let Some((_, detected, violating, score)) = self.charts.data().and_then(|d| d.latest()) {
            status_bar = status_bar
                .metric("Detected", format_count(detected))
                .metric("Unsafe", format_count(violating))
                .metric("Score", format!("{:.2}", score));
        }
        if area.width < WIDE_LAYOUT_MIN_WIDTH {
            status_bar = status_bar.hide_help_hint();
        }
        frame.render_widget(status_bar, layout.status_bar);

        self.help_overlay.render(area, frame.buffer_mut(), theme);
    }

    /// Handle key press; returns true when the app should exit
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
        if self.help_overlay.visible {
            self.help_overlay.hide();
            return Ok(false);
        }

        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.help_overlay.show();
            }
            _ => {
                for view in self.views_mut() {
                    if view.handle_key(key)? == ViewAction::Handled {
                        debug!("Key {:?} handled by panel", key);
                        break;
                    }
                }
            }
        }

        Ok(self.should_quit)
    }

    /// Run the main event loop
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        self.mount();

        loop {
            self.tick();
            terminal.draw(|f| self.draw(f))?;

            // Handle events
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code, key.modifiers)? {
                        break;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!("Live monitor exiting");
        Ok(())
    }
}

fn format_count(value: f64) -> String {
    if value.is_finite() {
        format!("{:.0}", value)
    } else {
        "-".to_string()
    }
}
