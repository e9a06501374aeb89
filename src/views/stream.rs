//! Camera stream panels (front camera and bird's-eye view)
//!
//! Shows a spinner until the camera list arrives, then the playback URL and
//! the state of the external player.

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::{info, warn};

use crate::api::types::StreamSlot;
use crate::api::Camera;
use crate::config::Settings;
use crate::launcher::player::Player;
use crate::themes::Theme;
use crate::ui::{Panel, PanelStyle, Separators, Spinner};

/// Panel state
enum FeedState {
    /// Camera list not received yet
    Loading,
    /// Camera list received but it has no stream for this slot
    Unavailable,
    /// Player configured for the stream
    Ready(Player),
}

/// Stream panel for one camera stream
pub struct StreamView {
    slot: StreamSlot,
    /// ISO timestamp appended to the URL, fixed when the panel is created
    cache_bust: String,
    player_command: String,
    autoplay: bool,
    spinner: Spinner,
    state: FeedState,
}

impl StreamView {
    pub fn new(slot: StreamSlot, settings: &Settings) -> Self {
        Self {
            slot,
            cache_bust: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            player_command: settings.player_command.clone(),
            autoplay: settings.autoplay,
            spinner: Spinner::new("Loading"),
            state: FeedState::Loading,
        }
    }

    /// Front camera panel
    pub fn camera_feed(settings: &Settings) -> Self {
        Self::new(StreamSlot::Front, settings)
    }

    /// Bird's-eye panel
    pub fn birds_view(settings: &Settings) -> Self {
        Self::new(StreamSlot::BirdsEye, settings)
    }

    /// Key that launches the player for this panel
    pub fn play_key(&self) -> char {
        match self.slot {
            StreamSlot::Front => 'v',
            StreamSlot::BirdsEye => 'b',
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FeedState::Loading)
    }

    pub fn player(&self) -> Option<&Player> {
        match &self.state {
            FeedState::Ready(player) => Some(player),
            _ => None,
        }
    }

    /// URL handed to the player, if the stream is known
    pub fn playback_url(&self) -> Option<&str> {
        self.player().map(Player::url)
    }

    pub fn cache_bust(&self) -> &str {
        &self.cache_bust
    }

    /// Launch (or relaunch) the external player
    pub fn play(&mut self) {
        if let FeedState::Ready(player) = &mut self.state {
            if let Err(e) = player.launch() {
                warn!("{}: player launch failed: {}", self.slot.title(), e);
            }
        }
    }

    fn render_ready(player: &mut Player, play_key: char, frame: &mut Frame, area: Rect, theme: &Theme) {
        let running = player.is_running();
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", Separators::TRIANGLE_RIGHT),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(player.url().to_string(), Style::default().fg(theme.text_primary)),
            ]),
            Line::from(vec![
                Span::styled("Player: ", Style::default().fg(theme.text_muted)),
                Span::styled(
                    format!(
                        "{}{}",
                        if player.is_muted() { "muted" } else { "sound on" },
                        if player.is_autoplay() { ", autoplay" } else { "" }
                    ),
                    Style::default().fg(theme.text_secondary),
                ),
            ]),
        ];

        let status = if running {
            Span::styled(
                format!("{} Playing", Separators::CIRCLE_FILLED),
                Style::default().fg(theme.success),
            )
        } else {
            Span::styled(
                format!("{} Stopped  [{}] Play", Separators::CIRCLE_EMPTY, play_key),
                Style::default().fg(theme.text_muted),
            )
        };
        lines.push(Line::from(status));

        if let Some(err) = player.last_error() {
            lines.push(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(theme.error),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }
}

impl super::ViewTrait for StreamView {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) -> Result<()> {
        let style = match &self.state {
            FeedState::Loading | FeedState::Unavailable => PanelStyle::Muted,
            FeedState::Ready(player) if player.last_error().is_some() => PanelStyle::Error,
            FeedState::Ready(_) => PanelStyle::Live,
        };
        let block = Panel::new(theme).title(self.slot.title()).style(style).block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let play_key = self.play_key();
        match &mut self.state {
            FeedState::Loading => self.spinner.render(inner, frame.buffer_mut(), theme),
            FeedState::Unavailable => {
                let text = Paragraph::new("No stream available")
                    .style(Style::default().fg(theme.text_muted));
                frame.render_widget(text, inner);
            }
            FeedState::Ready(player) => Self::render_ready(player, play_key, frame, inner, theme),
        }

        Ok(())
    }

    fn set_cameras(&mut self, cameras: &[Camera]) {
        if !self.is_loading() {
            return;
        }

        let Some(src) = cameras.first().and_then(|c| c.stream(self.slot)) else {
            warn!("{}: camera list has no stream #{}", self.slot.title(), self.slot.index());
            self.state = FeedState::Unavailable;
            return;
        };

        let url = format!("{}?{}", src, self.cache_bust);
        info!("{}: stream {}", self.slot.title(), url);
        self.state = FeedState::Ready(Player::new(url, self.player_command.clone()).autoplay(self.autoplay));
        if self.autoplay {
            self.play();
        }
    }

    fn handle_key(&mut self, key: KeyCode) -> Result<super::ViewAction> {
        if key == KeyCode::Char(self.play_key()) && !self.is_loading() {
            self.play();
            return Ok(super::ViewAction::Handled);
        }
        Ok(super::ViewAction::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StreamSource;
    use crate::views::{ViewAction, ViewTrait};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn cameras() -> Vec<Camera> {
        vec![Camera {
            id: "default".to_string(),
            storage_host: "http://storage".to_string(),
            streams: vec![
                StreamSource { src: "http://cam/front.m3u8".to_string() },
                StreamSource { src: "http://cam/birdseye.m3u8".to_string() },
            ],
        }]
    }

    fn screen(view: &mut StreamView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 8)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                view.render(f, area, &theme).unwrap();
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_loading_without_cameras() {
        let settings = Settings::default();
        for mut view in [StreamView::camera_feed(&settings), StreamView::birds_view(&settings)] {
            let text = screen(&mut view);
            assert!(text.contains("Loading"));
            assert!(view.player().is_none());
            assert!(!text.contains("Player:"));
        }
    }

    #[test]
    fn test_camera_feed_uses_first_stream_with_cache_bust() {
        let mut view = StreamView::camera_feed(&Settings::default());
        view.set_cameras(&cameras());

        let url = view.playback_url().unwrap().to_string();
        assert_eq!(url, format!("http://cam/front.m3u8?{}", view.cache_bust()));
        assert!(view.cache_bust().ends_with('Z'));
        assert!(view.player().unwrap().is_muted());

        let text = screen(&mut view);
        assert!(text.contains("http://cam/front.m3u8?"));
        assert!(!text.contains("Loading"));
    }

    #[test]
    fn test_birds_view_uses_second_stream() {
        let mut view = StreamView::birds_view(&Settings::default());
        view.set_cameras(&cameras());
        assert!(view
            .playback_url()
            .unwrap()
            .starts_with("http://cam/birdseye.m3u8?"));
    }

    #[test]
    fn test_cache_bust_is_fixed_across_renders() {
        let mut view = StreamView::camera_feed(&Settings::default());
        view.set_cameras(&cameras());
        let first = view.playback_url().unwrap().to_string();
        screen(&mut view);
        std::thread::sleep(std::time::Duration::from_millis(5));
        screen(&mut view);
        assert_eq!(view.playback_url().unwrap(), first);
    }

    #[test]
    fn test_missing_stream_is_unavailable() {
        let mut view = StreamView::birds_view(&Settings::default());
        let mut single = cameras();
        single[0].streams.truncate(1);
        view.set_cameras(&single);
        assert!(view.playback_url().is_none());
        assert!(screen(&mut view).contains("No stream available"));

        let mut empty = StreamView::camera_feed(&Settings::default());
        empty.set_cameras(&[]);
        assert!(!empty.is_loading());
        assert!(empty.playback_url().is_none());
    }

    #[test]
    fn test_play_key_ignored_while_loading() {
        let mut view = StreamView::camera_feed(&Settings::default());
        assert_eq!(view.handle_key(KeyCode::Char('v')).unwrap(), ViewAction::Ignored);
        assert_eq!(view.handle_key(KeyCode::Char('b')).unwrap(), ViewAction::Ignored);
    }
}
