//! Theme structure
//!
//! Semantic color system: colors are organized by purpose, not by color name.

use ratatui::style::Color;

/// Theme colors with semantic organization
#[derive(Clone, Debug)]
pub struct Theme {
    // ─────────────────────────────────────────────────────────────────────────
    // Surfaces
    // ─────────────────────────────────────────────────────────────────────────
    /// Status bar background
    pub surface: Color,
    /// Overlays (help)
    pub surface_elevated: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Text
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary text - headers, values
    pub text_primary: Color,
    /// Secondary text - labels
    pub text_secondary: Color,
    /// Muted text - hints, timestamps, axes
    pub text_muted: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Accents
    // ─────────────────────────────────────────────────────────────────────────
    pub accent: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Semantic
    // ─────────────────────────────────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Borders
    // ─────────────────────────────────────────────────────────────────────────
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark slate theme - the default
    pub fn dark() -> Self {
        Self {
            surface: Color::Rgb(42, 48, 56),
            surface_elevated: Color::Rgb(58, 65, 75),   // #3a414b - Slate

            text_primary: Color::Rgb(245, 245, 247),    // #f5f5f7 - Off-white
            text_secondary: Color::Rgb(180, 180, 185),
            text_muted: Color::Rgb(136, 136, 136),      // #888888

            accent: Color::Rgb(244, 181, 138),          // #f4b58a - Peach

            success: Color::Rgb(139, 213, 162),         // #8bd5a2 - Soft green
            warning: Color::Rgb(249, 226, 175),         // #f9e2af - Warm yellow
            error: Color::Rgb(255, 107, 107),           // #ff6b6b - Soft red
            info: Color::Rgb(137, 180, 250),            // #89b4fa - Soft blue

            border: Color::Rgb(58, 65, 75),
            border_focused: Color::Rgb(244, 181, 138),
        }
    }

    /// Light theme for bright terminals
    pub fn light() -> Self {
        Self {
            surface: Color::Rgb(230, 232, 236),
            surface_elevated: Color::Rgb(245, 246, 248),

            text_primary: Color::Rgb(30, 34, 40),
            text_secondary: Color::Rgb(70, 76, 86),
            text_muted: Color::Rgb(120, 126, 136),

            accent: Color::Rgb(204, 110, 50),

            success: Color::Rgb(40, 140, 80),
            warning: Color::Rgb(180, 130, 20),
            error: Color::Rgb(200, 50, 50),
            info: Color::Rgb(40, 100, 200),

            border: Color::Rgb(180, 184, 192),
            border_focused: Color::Rgb(204, 110, 50),
        }
    }

    /// Theme by name (`dark`, `light`); unknown names fall back to dark
    pub fn named(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Load the theme selected by `LIVE_MONITOR_THEME`, with the accent
    /// optionally overridden by `LIVE_MONITOR_ACCENT` (`#rrggbb`)
    pub fn load() -> Self {
        let mut theme = Self::named(&crate::config::theme_name());
        if let Some(accent) = crate::config::accent_color().as_deref().and_then(Self::hex_to_color) {
            theme.accent = accent;
            theme.border_focused = accent;
        }
        theme
    }

    /// Convert hex string to Color
    pub fn hex_to_color(hex: &str) -> Option<Color> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }

    /// Get status dot character
    pub fn status_dot(&self, active: bool) -> &'static str {
        if active {
            "●"
        } else {
            "○"
        }
    }
}
