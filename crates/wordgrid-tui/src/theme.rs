use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Blocked crossword cell fill
    pub blocked: Color,
    /// Player-entered letter color
    pub letter: Color,
    /// Clue-start marker color
    pub clue_number: Color,
    /// Cursor cell background
    pub selected_bg: Color,
    /// Active-word cell background
    pub word_bg: Color,
    /// In-flight drag selection background
    pub selection_bg: Color,
    /// Found-word cell background
    pub found_bg: Color,
    /// Found-word list entry color
    pub found_fg: Color,
    /// Error message color
    pub error: Color,
    /// Success message color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            blocked: Color::Rgb { r: 55, g: 58, b: 70 },
            letter: Color::Rgb { r: 80, g: 180, b: 255 },
            clue_number: Color::Rgb { r: 140, g: 150, b: 180 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            word_bg: Color::Rgb { r: 35, g: 40, b: 55 },
            selection_bg: Color::Rgb { r: 60, g: 80, b: 130 },
            found_bg: Color::Rgb { r: 30, g: 75, b: 45 },
            found_fg: Color::Rgb { r: 90, g: 255, b: 130 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            blocked: Color::Rgb { r: 120, g: 120, b: 135 },
            letter: Color::Rgb { r: 30, g: 100, b: 200 },
            clue_number: Color::Rgb { r: 130, g: 130, b: 150 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            word_bg: Color::Rgb { r: 230, g: 232, b: 242 },
            selection_bg: Color::Rgb { r: 190, g: 205, b: 250 },
            found_bg: Color::Rgb { r: 200, g: 235, b: 205 },
            found_fg: Color::Rgb { r: 40, g: 160, b: 60 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            blocked: Color::DarkGrey,
            letter: Color::Cyan,
            clue_number: Color::Grey,
            selected_bg: Color::Blue,
            word_bg: Color::Rgb { r: 30, g: 30, b: 30 },
            selection_bg: Color::Blue,
            found_bg: Color::DarkGreen,
            found_fg: Color::Green,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }

    /// Look up a theme by its CLI name
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}
