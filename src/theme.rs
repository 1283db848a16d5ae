// Theme support for the TUI
//
// Provides color palettes that can be configured via config file.
// "auto" uses terminal's ANSI palette, the named themes use true color (RGB)
// built around the Loga brand: dark brown surfaces with a warm yellow accent.

use crate::tui::scroll::FocusablePanel;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Surfaces
    /// `None` leaves the terminal's own background in place
    pub background: Option<Color>,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,

    // Storefront colors
    pub brand: Color,
    pub accent: Color,
    pub price: Color,
    pub discount: Color,
    pub selection: Color,
    pub selection_fg: Color,
    pub error: Color,
    pub success: Color,
    pub status_bar: Color,
    pub highlight: Color,

    // Panel identity colors (used when focused)
    pub panel_search: Color,
    pub panel_categories: Color,
    pub panel_grid: Color,
    pub panel_logs: Color,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "loga" => Self::loga(),
            "loga light" | "loga-light" => Self::loga_light(),
            _ => Self::auto(), // "auto" or unknown
        }
    }

    /// Load theme by name, dropping its background when configured to
    pub fn by_name_with_config(name: &str, use_theme_background: bool) -> Self {
        let mut theme = Self::by_name(name);
        if !use_theme_background {
            theme.background = None;
        }
        theme
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            background: None,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            border: Color::White,
            border_type: BorderType::Plain,
            brand: Color::Yellow,
            accent: Color::Yellow,
            price: Color::Green,
            discount: Color::Red,
            selection: Color::Yellow,
            selection_fg: Color::Black,
            error: Color::Red,
            success: Color::Green,
            status_bar: Color::Green,
            highlight: Color::Yellow,
            panel_search: Color::Cyan,
            panel_categories: Color::Yellow,
            panel_grid: Color::Green,
            panel_logs: Color::DarkGray,
        }
    }

    /// Loga - dark brown with the brand yellow
    pub fn loga() -> Self {
        Self {
            name: "Loga".to_string(),
            background: Some(Color::Rgb(0x2b, 0x1d, 0x14)), // espresso
            foreground: Color::Rgb(0xf3, 0xe9, 0xdc),       // linen
            muted: Color::Rgb(0x9c, 0x87, 0x72),            // khaki
            border: Color::Rgb(0x6b, 0x4f, 0x3a),           // leather
            border_type: BorderType::Rounded,
            brand: Color::Rgb(0xf5, 0xc5, 0x18),     // loga yellow
            accent: Color::Rgb(0xe0, 0x9f, 0x3e),    // amber
            price: Color::Rgb(0xf5, 0xc5, 0x18),     // loga yellow
            discount: Color::Rgb(0xe0, 0x6c, 0x4f),  // terracotta
            selection: Color::Rgb(0x8b, 0x5a, 0x2b), // saddle brown
            selection_fg: Color::Rgb(0xff, 0xf8, 0xe7),
            error: Color::Rgb(0xe0, 0x6c, 0x4f),      // terracotta
            success: Color::Rgb(0x9c, 0xc0, 0x6b),    // olive
            status_bar: Color::Rgb(0x9c, 0xc0, 0x6b), // olive
            highlight: Color::Rgb(0xf5, 0xc5, 0x18),  // loga yellow
            panel_search: Color::Rgb(0xe0, 0x9f, 0x3e),
            panel_categories: Color::Rgb(0xf5, 0xc5, 0x18),
            panel_grid: Color::Rgb(0x9c, 0xc0, 0x6b),
            panel_logs: Color::Rgb(0x9c, 0x87, 0x72),
        }
    }

    /// Loga Light - cream surfaces, brown text
    pub fn loga_light() -> Self {
        Self {
            name: "Loga Light".to_string(),
            background: Some(Color::Rgb(0xfb, 0xf6, 0xee)), // cream
            foreground: Color::Rgb(0x3e, 0x2a, 0x1c),       // dark brown
            muted: Color::Rgb(0x8a, 0x76, 0x63),
            border: Color::Rgb(0xc9, 0xb3, 0x9a),
            border_type: BorderType::Rounded,
            brand: Color::Rgb(0x8b, 0x5a, 0x2b), // saddle brown
            accent: Color::Rgb(0xb7, 0x79, 0x1f),
            price: Color::Rgb(0x8b, 0x5a, 0x2b),
            discount: Color::Rgb(0xb0, 0x3a, 0x2e),
            selection: Color::Rgb(0xf5, 0xc5, 0x18), // loga yellow
            selection_fg: Color::Rgb(0x2b, 0x1d, 0x14),
            error: Color::Rgb(0xb0, 0x3a, 0x2e),
            success: Color::Rgb(0x4f, 0x7a, 0x28),
            status_bar: Color::Rgb(0x4f, 0x7a, 0x28),
            highlight: Color::Rgb(0xb7, 0x79, 0x1f),
            panel_search: Color::Rgb(0xb7, 0x79, 0x1f),
            panel_categories: Color::Rgb(0x8b, 0x5a, 0x2b),
            panel_grid: Color::Rgb(0x4f, 0x7a, 0x28),
            panel_logs: Color::Rgb(0x8a, 0x76, 0x63),
        }
    }

    /// Get border color for a panel based on focus state
    ///
    /// Focused panels use their identity color, unfocused use the general border color.
    pub fn panel_border(&self, panel: FocusablePanel, focused: bool) -> Color {
        if focused {
            match panel {
                FocusablePanel::Search => self.panel_search,
                FocusablePanel::Categories => self.panel_categories,
                FocusablePanel::Grid => self.panel_grid,
            }
        } else {
            self.border
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::loga()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(Theme::by_name("LOGA").name, "Loga");
        assert_eq!(Theme::by_name("loga light").name, "Loga Light");
        assert_eq!(Theme::by_name("solarized").name, "auto");
    }

    #[test]
    fn test_terminal_background_when_disabled() {
        assert!(Theme::by_name_with_config("Loga", true).background.is_some());
        assert!(Theme::by_name_with_config("Loga", false).background.is_none());
    }

    #[test]
    fn test_panel_border_uses_identity_when_focused() {
        let theme = Theme::loga();
        assert_eq!(
            theme.panel_border(FocusablePanel::Grid, true),
            theme.panel_grid
        );
        assert_eq!(theme.panel_border(FocusablePanel::Grid, false), theme.border);
    }
}
