use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used by the shell.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec::rgb(125, 207, 255),
            accent: ColorSpec::rgb(255, 159, 196),
            banner: ColorSpec::rgb(255, 159, 196),
            text: ColorSpec::rgb(169, 177, 214),
            text_muted: ColorSpec::rgb(117, 121, 148),
            background: ColorSpec::rgb(26, 27, 38),
            surface: ColorSpec::rgb(36, 40, 59),
            success: ColorSpec::rgb(158, 206, 106),
            warning: ColorSpec::rgb(255, 202, 40),
            error: ColorSpec::rgb(247, 118, 142),
            border_active: ColorSpec::rgb(125, 207, 255),
            border_normal: ColorSpec::rgb(117, 121, 148),
            highlight_bg: ColorSpec::rgb(125, 207, 255),
            highlight_fg: ColorSpec::rgb(26, 27, 38),
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: ColorSpec::rgb(161, 119, 255),
            accent: ColorSpec::rgb(255, 109, 146),
            banner: ColorSpec::rgb(255, 109, 146),
            text: ColorSpec::rgb(88, 82, 96),
            text_muted: ColorSpec::rgb(152, 147, 165),
            background: ColorSpec::rgb(250, 244, 237),
            surface: ColorSpec::rgb(255, 250, 243),
            success: ColorSpec::rgb(59, 247, 209),
            warning: ColorSpec::rgb(255, 210, 0),
            error: ColorSpec::rgb(235, 111, 146),
            border_active: ColorSpec::rgb(161, 119, 255),
            border_normal: ColorSpec::rgb(88, 82, 96),
            highlight_bg: ColorSpec::rgb(61, 174, 233),
            highlight_fg: ColorSpec::rgb(250, 244, 237),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: ColorSpec::rgb(189, 147, 249),
            accent: ColorSpec::rgb(255, 121, 198),
            banner: ColorSpec::rgb(255, 121, 198),
            text: ColorSpec::rgb(248, 248, 242),
            text_muted: ColorSpec::rgb(98, 114, 164),
            background: ColorSpec::rgb(40, 42, 54),
            surface: ColorSpec::rgb(68, 71, 90),
            success: ColorSpec::rgb(80, 250, 123),
            warning: ColorSpec::rgb(255, 184, 108),
            error: ColorSpec::rgb(255, 85, 85),
            border_active: ColorSpec::rgb(189, 147, 249),
            border_normal: ColorSpec::rgb(98, 114, 164),
            highlight_bg: ColorSpec::rgb(139, 233, 253),
            highlight_fg: ColorSpec::rgb(40, 42, 54),
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tokyo-night".to_string(),
            "rose-pine-dawn".to_string(),
            "dracula".to_string(),
        ]
    }
}
