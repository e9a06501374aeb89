//! Theme system for color management
//!
//! See theme.rs for the semantic Theme struct.

pub mod theme;

pub use theme::Theme;
