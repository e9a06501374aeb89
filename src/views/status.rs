//! Status panel (development builds)
//!
//! Informational table. The environment score is a fixed placeholder and the
//! time is captured once when the panel is created.

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::themes::Theme;
use crate::ui::Panel;

/// Placeholder shown until a real environment score exists
pub const ENVIRONMENT_SCORE_PLACEHOLDER: u32 = 12;

/// Address shown for the camera
pub const CAMERA_IP: &str = "127.0.0.1";

/// Status table
pub struct StatusView {
    mounted_at: String,
}

impl StatusView {
    pub fn new() -> Self {
        Self {
            mounted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Label/value rows, always three
    pub fn rows(&self) -> [(&'static str, String); 3] {
        [
            ("Environment Score", ENVIRONMENT_SCORE_PLACEHOLDER.to_string()),
            ("Time", self.mounted_at.clone()),
            ("Camera IP", CAMERA_IP.to_string()),
        ]
    }
}

impl Default for StatusView {
    fn default() -> Self {
        Self::new()
    }
}

impl super::ViewTrait for StatusView {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) -> Result<()> {
        let block = Panel::new(theme).title("Status").block();

        let rows: Vec<Row> = self
            .rows()
            .into_iter()
            .map(|(label, value)| {
                Row::new(vec![
                    Cell::from(label).style(Style::default().fg(theme.text_secondary).bold()),
                    Cell::from(value).style(Style::default().fg(theme.text_primary)),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(10)]).block(block);
        frame.render_widget(table, area);

        Ok(())
    }
}
