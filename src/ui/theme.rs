use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
    pub footer_bg: ColorSpec,
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
            primary: ColorSpec::rgb(122, 162, 247),  // Blue
            accent: ColorSpec::rgb(187, 154, 247),   // Purple
            banner: ColorSpec::rgb(125, 207, 255),   // Cyan
            text: ColorSpec::rgb(192, 202, 245),
            text_muted: ColorSpec::rgb(86, 95, 137),
            success: ColorSpec::rgb(158, 206, 106),
            warning: ColorSpec::rgb(224, 175, 104),
            error: ColorSpec::rgb(247, 118, 142),
            border_active: ColorSpec::rgb(122, 162, 247),
            border_normal: ColorSpec::rgb(59, 66, 97),
            highlight_bg: ColorSpec::rgb(41, 46, 66),
            highlight_fg: ColorSpec::rgb(192, 202, 245),
            footer_bg: ColorSpec::rgb(22, 22, 30),
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: ColorSpec::rgb(40, 105, 131),   // Pine
            accent: ColorSpec::rgb(144, 122, 169),   // Iris
            banner: ColorSpec::rgb(215, 130, 126),   // Rose
            text: ColorSpec::rgb(87, 82, 121),
            text_muted: ColorSpec::rgb(152, 147, 165),
            success: ColorSpec::rgb(86, 148, 159),
            warning: ColorSpec::rgb(234, 157, 52),
            error: ColorSpec::rgb(180, 99, 122),
            border_active: ColorSpec::rgb(40, 105, 131),
            border_normal: ColorSpec::rgb(223, 218, 217),
            highlight_bg: ColorSpec::rgb(242, 233, 225),
            highlight_fg: ColorSpec::rgb(87, 82, 121),
            footer_bg: ColorSpec::rgb(250, 244, 237),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: ColorSpec::rgb(189, 147, 249),  // Purple
            accent: ColorSpec::rgb(255, 121, 198),   // Pink
            banner: ColorSpec::rgb(139, 233, 253),   // Cyan
            text: ColorSpec::rgb(248, 248, 242),
            text_muted: ColorSpec::rgb(98, 114, 164),
            success: ColorSpec::rgb(80, 250, 123),
            warning: ColorSpec::rgb(255, 184, 108),
            error: ColorSpec::rgb(255, 85, 85),
            border_active: ColorSpec::rgb(189, 147, 249),
            border_normal: ColorSpec::rgb(68, 71, 90),
            highlight_bg: ColorSpec::rgb(68, 71, 90),
            highlight_fg: ColorSpec::rgb(248, 248, 242),
            footer_bg: ColorSpec::rgb(33, 34, 44),
        }
    }

    /// Get theme by name.
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
