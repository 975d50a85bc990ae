//! Detection of the terminal's own light/dark preference.

use motes_core::ThemeMode;

/// Guess the terminal's colour scheme from `COLORFGBG`.
pub fn system_theme() -> Option<ThemeMode> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| parse_colorfgbg(&value))
}

/// Parse a `COLORFGBG` value such as `15;0` or `0;default;15`.
///
/// The last field is the background palette index. Indices 0-6 and 8 are
/// dark colours in the standard 16-colour palette.
pub fn parse_colorfgbg(value: &str) -> Option<ThemeMode> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match background {
        0..=6 | 8 => Some(ThemeMode::Dark),
        7 | 9..=15 => Some(ThemeMode::Light),
        _ => None,
    }
}
