//! UI components module
//!
//! Reusable UI components for the dashboard: panels, status bar,
//! help overlay, and the loading spinner.

pub mod animation;
pub mod borders;
pub mod help_overlay;
pub mod panels;
pub mod status_bar;

pub use animation::Spinner;
pub use borders::Separators;
pub use help_overlay::HelpOverlay;
pub use panels::{Panel, PanelStyle};
pub use status_bar::StatusBar;
