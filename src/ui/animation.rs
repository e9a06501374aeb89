//! Time-driven animation state
//!
//! Frames are derived from elapsed wall time, so callers only have to
//! redraw; there is nothing to tick.

use std::time::{Duration, Instant};

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::themes::Theme;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Indeterminate progress indicator shown while data is loading
#[derive(Clone, Debug)]
pub struct Spinner {
    start: Instant,
    frame_duration: Duration,
    label: String,
}

impl Spinner {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            frame_duration: Duration::from_millis(80),
            label: label.into(),
        }
    }

    /// Current frame character
    pub fn frame(&self) -> char {
        let elapsed = self.start.elapsed().as_millis();
        let idx = (elapsed / self.frame_duration.as_millis().max(1)) as usize % SPINNER_FRAMES.len();
        SPINNER_FRAMES[idx]
    }

    /// Render the spinner centred in `area`
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let line = Line::from(vec![
            Span::styled(format!("{} ", self.frame()), Style::default().fg(theme.accent)),
            Span::styled(self.label.as_str(), Style::default().fg(theme.text_muted)),
        ]);
        let row = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        Paragraph::new(line).alignment(Alignment::Center).render(row, buf);
    }
}
