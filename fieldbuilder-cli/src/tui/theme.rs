use ratatui::style::Color;

/// Dashboard palette. One dark variant for now; widgets take the theme by
/// reference so a light variant stays a drop-in.
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_surface: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,
    pub accent_primary: Color,
    pub accent_success: Color,
    pub accent_warning: Color,
    pub accent_error: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_surface: Color::Rgb(31, 41, 55),
            text_primary: Color::Rgb(243, 244, 246),
            text_secondary: Color::Rgb(156, 163, 175),
            text_tertiary: Color::Rgb(107, 114, 128),
            accent_primary: Color::Rgb(96, 165, 250),
            accent_success: Color::Rgb(74, 222, 128),
            accent_warning: Color::Rgb(251, 191, 36),
            accent_error: Color::Rgb(248, 113, 113),
            border: Color::Rgb(75, 85, 99),
            border_focus: Color::Rgb(96, 165, 250),
        }
    }
}
