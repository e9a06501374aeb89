//! Status bar component
//!
//! Bottom line showing data-source state, the latest log values, the clock,
//! and the help hint.

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::themes::Theme;
use crate::ui::Separators;

/// Data-source indicator
#[derive(Clone, Debug)]
pub struct SourceStatus {
    pub name: String,
    pub ready: bool,
}

/// Status bar widget
pub struct StatusBar<'a> {
    theme: &'a Theme,
    sources: Vec<SourceStatus>,
    key_metrics: Vec<(String, String)>,
    show_help_hint: bool,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            sources: Vec::new(),
            key_metrics: Vec::new(),
            show_help_hint: true,
        }
    }

    /// Add a data-source indicator
    pub fn source(mut self, name: impl Into<String>, ready: bool) -> Self {
        self.sources.push(SourceStatus {
            name: name.into(),
            ready,
        });
        self
    }

    /// Add a key metric
    pub fn metric(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_metrics.push((label.into(), value.into()));
        self
    }

    /// Hide the help hint
    pub fn hide_help_hint(mut self) -> Self {
        self.show_help_hint = false;
        self
    }

    fn divider(&self) -> Span<'a> {
        Span::styled(Separators::DIVIDER, Style::default().fg(self.theme.border))
    }

    /// Build the status bar content as a Line
    fn build_content(&self) -> Line<'a> {
        let mut spans = vec![Span::styled(
            format!("{} LIVE MONITOR", Separators::DIAMOND),
            Style::default().fg(self.theme.accent).bold(),
        )];

        for source in &self.sources {
            spans.push(self.divider());
            let color = if source.ready {
                self.theme.success
            } else {
                self.theme.warning
            };
            spans.push(Span::styled(
                format!("{}: ", source.name),
                Style::default().fg(self.theme.text_secondary),
            ));
            spans.push(Span::styled(
                format!(
                    "{} {}",
                    self.theme.status_dot(source.ready),
                    if source.ready { "Ready" } else { "Waiting" }
                ),
                Style::default().fg(color),
            ));
        }

        for (label, value) in &self.key_metrics {
            spans.push(self.divider());
            spans.push(Span::styled(
                format!("{}: ", label),
                Style::default().fg(self.theme.text_secondary),
            ));
            spans.push(Span::styled(
                value.clone(),
                Style::default().fg(self.theme.text_primary),
            ));
        }

        spans.push(self.divider());
        spans.push(Span::styled(
            Local::now().format("%H:%M:%S").to_string(),
            Style::default().fg(self.theme.text_muted),
        ));

        if self.show_help_hint {
            spans.push(self.divider());
            spans.push(Span::styled(
                "[?] Help  [q] Quit",
                Style::default().fg(self.theme.text_muted),
            ));
        }

        Line::from(spans)
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.surface));
        let content = self.build_content();
        Paragraph::new(content).render(area, buf);
    }
}
