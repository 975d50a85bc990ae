//! Light and dark themes.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colour scheme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Switch to the other mode.
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Colours used to draw this mode.
    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette::LIGHT,
            ThemeMode::Dark => Palette::DARK,
        }
    }

    /// Lowercase name, as stored in the config file.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a theme name is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError(String);

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}', expected 'light' or 'dark'", self.0)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for ThemeMode {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

/// Resolved colours for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Particles, connection lines and key hints.
    pub primary: Color,
    /// Canvas fill.
    pub background: Color,
    /// Headline text.
    pub text: Color,
    /// Tagline and help text.
    pub subtext: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        primary: Color::Rgb(0xFF, 0x4D, 0x4D),
        background: Color::Rgb(0xF0, 0xF0, 0xF3),
        text: Color::Rgb(0x22, 0x22, 0x22),
        subtext: Color::Rgb(0x55, 0x55, 0x55),
    };

    pub const DARK: Palette = Palette {
        primary: Color::Rgb(0x1A, 0xBC, 0x9C),
        background: Color::Rgb(0x12, 0x12, 0x12),
        text: Color::Rgb(0xEE, 0xEE, 0xEE),
        subtext: Color::Rgb(0xAA, 0xAA, 0xAA),
    };
}
