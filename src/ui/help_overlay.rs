//! Help overlay
//!
//! Keyboard shortcuts reference overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::themes::Theme;

/// A keyboard shortcut entry
struct ShortcutEntry {
    key: &'static str,
    description: &'static str,
}

const SHORTCUTS: &[ShortcutEntry] = &[
    ShortcutEntry { key: "v", description: "Play Camera Feed" },
    ShortcutEntry { key: "b", description: "Play Bird's View" },
    ShortcutEntry { key: "r", description: "Refresh Charts" },
    ShortcutEntry { key: "?", description: "This Help" },
    ShortcutEntry { key: "q/Esc", description: "Quit" },
];

/// Help overlay showing keyboard shortcuts
pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    /// Create a new help overlay
    pub fn new() -> Self {
        Self { visible: false }
    }

    /// Show the overlay
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the overlay
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Render the help overlay
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.visible {
            return;
        }

        // Centered, just big enough for the shortcut list
        let width = 44u16.min(area.width.saturating_sub(4));
        let height = (SHORTCUTS.len() as u16 + 5).min(area.height.saturating_sub(2));
        let overlay_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(theme.accent).bold())
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.surface_elevated));

        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        for (i, entry) in SHORTCUTS.iter().enumerate() {
            let y = inner.y + 1 + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let line = Line::from(vec![
                Span::styled(format!("{:>10}", entry.key), Style::default().fg(theme.accent).bold()),
                Span::styled(format!("  {}", entry.description), Style::default().fg(theme.text_primary)),
            ]);
            Paragraph::new(line).render(Rect { y, height: 1, ..inner }, buf);
        }

        // Footer
        if inner.height > 1 {
            let footer_area = Rect {
                y: inner.bottom() - 1,
                height: 1,
                ..inner
            };
            Paragraph::new("[Press any key to close]")
                .style(Style::default().fg(theme.text_muted))
                .alignment(Alignment::Center)
                .render(footer_area, buf);
        }
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
