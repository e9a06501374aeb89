//! Reusable panel component
//!
//! Styled, rounded card that every dashboard section is drawn in.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding};

use crate::themes::Theme;

/// Panel style variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelStyle {
    /// Default panel style
    #[default]
    Default,
    /// Live data is flowing
    Live,
    /// Waiting for data
    Muted,
    /// Something went wrong (e.g. player failed to start)
    Error,
}

/// A styled panel component
#[derive(Clone)]
pub struct Panel<'a> {
    title: Option<&'a str>,
    subtitle: Option<String>,
    style: PanelStyle,
    theme: &'a Theme,
}

impl<'a> Panel<'a> {
    /// Create a new panel with the given theme
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            title: None,
            subtitle: None,
            style: PanelStyle::Default,
            theme,
        }
    }

    /// Set the panel title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Right-aligned text in the top border
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the panel style
    pub fn style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    /// Build the Block widget
    pub fn block(&self) -> Block<'a> {
        let border_color = match self.style {
            PanelStyle::Default => self.theme.border,
            PanelStyle::Live => self.theme.border_focused,
            PanelStyle::Muted => self.theme.border,
            PanelStyle::Error => self.theme.error,
        };

        let title_color = match self.style {
            PanelStyle::Default => self.theme.text_secondary,
            PanelStyle::Live => self.theme.accent,
            PanelStyle::Muted => self.theme.text_muted,
            PanelStyle::Error => self.theme.error,
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .padding(Padding::horizontal(1));

        if let Some(title) = self.title {
            block = block
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(title_color).bold());
        }

        if let Some(ref subtitle) = self.subtitle {
            block = block.title_top(
                Line::from(Span::styled(
                    format!(" {} ", subtitle),
                    Style::default().fg(self.theme.text_muted),
                ))
                .right_aligned(),
            );
        }

        block
    }
}
