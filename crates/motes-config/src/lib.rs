//! Configuration for the motes terminal background.
//!
//! Settings live in `config.toml` under the platform config directory. The
//! same file stores the persisted theme, which [`ThemeState`] reads and
//! writes through the [`ThemeStore`] trait.

mod config;
mod error;
mod system;
mod theme_state;

pub use config::{Config, DEFAULT_FRAME_RATE, default_config_path};
pub use error::ConfigError;
pub use system::{parse_colorfgbg, system_theme};
pub use theme_state::{FileStore, MemoryStore, ThemeState, ThemeStore};
