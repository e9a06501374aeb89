//! Glyphs shared by the dashboard widgets

/// Separator and indicator characters for visual hierarchy
pub struct Separators;

impl Separators {
    /// Diamond (for branding)
    pub const DIAMOND: &'static str = "◆";

    /// Filled circle (status indicator)
    pub const CIRCLE_FILLED: &'static str = "●";

    /// Empty circle
    pub const CIRCLE_EMPTY: &'static str = "○";

    /// Triangle right (play)
    pub const TRIANGLE_RIGHT: &'static str = "▶";

    /// Vertical divider between status bar sections
    pub const DIVIDER: &'static str = " │ ";
}
