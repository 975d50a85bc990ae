//! Core types shared across the motes crates.

mod motion;
mod theme;

pub use motion::MotionPreference;
pub use theme::{Palette, ParseThemeError, ThemeMode};
