//! Dashboard panels
//!
//! Each panel receives the camera list from the root once it is known,
//! keeps its own view state, and renders itself into the area it is given.

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::prelude::*;

use crate::api::Camera;
use crate::themes::Theme;

pub mod charts;
pub mod status;
pub mod stream;

/// Action returned by a panel's key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Key not handled
    Ignored,
    /// Key handled
    Handled,
}

/// Trait for dashboard panels
pub trait ViewTrait {
    /// Render the panel
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) -> Result<()>;

    /// Camera list arrived
    fn set_cameras(&mut self, _cameras: &[Camera]) {}

    /// Called once per frame before rendering
    fn tick(&mut self) {}

    /// Handle key input
    fn handle_key(&mut self, _key: KeyCode) -> Result<ViewAction> {
        // Default: don't handle
        Ok(ViewAction::Ignored)
    }
}
