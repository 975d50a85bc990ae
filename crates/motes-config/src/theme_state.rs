//! Application-level theme with a persisted preference.

use std::fmt::Debug;
use std::path::PathBuf;

use motes_core::ThemeMode;

use crate::config::Config;
use crate::error::ConfigError;

/// Where the chosen theme is persisted.
pub trait ThemeStore: Debug {
    fn load_theme(&self) -> Result<Option<ThemeMode>, ConfigError>;
    fn save_theme(&mut self, mode: ThemeMode) -> Result<(), ConfigError>;
}

impl<T: ThemeStore + ?Sized> ThemeStore for Box<T> {
    fn load_theme(&self) -> Result<Option<ThemeMode>, ConfigError> {
        (**self).load_theme()
    }

    fn save_theme(&mut self, mode: ThemeMode) -> Result<(), ConfigError> {
        (**self).save_theme(mode)
    }
}

/// Keeps the theme for the current process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    theme: Option<ThemeMode>,
}

impl ThemeStore for MemoryStore {
    fn load_theme(&self) -> Result<Option<ThemeMode>, ConfigError> {
        Ok(self.theme)
    }

    fn save_theme(&mut self, mode: ThemeMode) -> Result<(), ConfigError> {
        self.theme = Some(mode);
        Ok(())
    }
}

/// Stores the theme in the `theme` key of a config file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStore for FileStore {
    fn load_theme(&self) -> Result<Option<ThemeMode>, ConfigError> {
        Ok(Config::load_from(&self.path)?.theme)
    }

    fn save_theme(&mut self, mode: ThemeMode) -> Result<(), ConfigError> {
        // Rewrite the whole file so the other keys survive.
        let mut config = Config::load_from(&self.path)?;
        config.theme = Some(mode);
        config.save_to(&self.path)
    }
}

/// The current theme.
///
/// Initial value: the persisted theme, else the system preference, else
/// [`ThemeMode::Light`].
#[derive(Debug)]
pub struct ThemeState<S> {
    mode: ThemeMode,
    store: S,
}

impl<S: ThemeStore> ThemeState<S> {
    pub fn init(store: S, system: Option<ThemeMode>) -> Self {
        let persisted = store.load_theme().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read persisted theme");
            None
        });
        let mode = persisted.or(system).unwrap_or_default();
        tracing::debug!(?persisted, ?system, %mode, "resolved theme");
        Self { mode, store }
    }

    pub fn get(&self) -> ThemeMode {
        self.mode
    }

    /// Switch theme and persist it.
    ///
    /// The in-memory theme changes even if persisting fails.
    pub fn set(&mut self, mode: ThemeMode) -> Result<(), ConfigError> {
        self.mode = mode;
        self.store.save_theme(mode)
    }

    /// Switch theme for this session only.
    pub fn set_transient(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    pub fn toggle(&mut self) -> Result<ThemeMode, ConfigError> {
        let next = self.mode.toggle();
        self.set(next)?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingStore {
        theme: Option<ThemeMode>,
        saves: usize,
        fail: bool,
    }

    impl ThemeStore for RecordingStore {
        fn load_theme(&self) -> Result<Option<ThemeMode>, ConfigError> {
            if self.fail {
                return Err(ConfigError::NoConfigDir);
            }
            Ok(self.theme)
        }

        fn save_theme(&mut self, mode: ThemeMode) -> Result<(), ConfigError> {
            if self.fail {
                return Err(ConfigError::NoConfigDir);
            }
            self.theme = Some(mode);
            self.saves += 1;
            Ok(())
        }
    }

    #[test]
    fn test_memory_store_keeps_theme_in_process() {
        let store: Box<dyn ThemeStore> = Box::new(MemoryStore::default());
        let mut state = ThemeState::init(store, Some(ThemeMode::Dark));
        assert_eq!(state.get(), ThemeMode::Dark);

        assert_eq!(state.toggle().unwrap(), ThemeMode::Light);
        assert_eq!(state.store().load_theme().unwrap(), Some(ThemeMode::Light));
    }

    #[test]
    fn test_persisted_wins() {
        let store = RecordingStore {
            theme: Some(ThemeMode::Light),
            ..Default::default()
        };
        let state = ThemeState::init(store, Some(ThemeMode::Dark));
        assert_eq!(state.get(), ThemeMode::Light);
    }

    #[test]
    fn test_system_preference_second() {
        let state = ThemeState::init(RecordingStore::default(), Some(ThemeMode::Dark));
        assert_eq!(state.get(), ThemeMode::Dark);
    }

    #[test]
    fn test_light_by_default() {
        let state = ThemeState::init(RecordingStore::default(), None);
        assert_eq!(state.get(), ThemeMode::Light);
    }

    #[test]
    fn test_unreadable_store_falls_back() {
        let store = RecordingStore {
            fail: true,
            ..Default::default()
        };
        let state = ThemeState::init(store, Some(ThemeMode::Dark));
        assert_eq!(state.get(), ThemeMode::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let mut state = ThemeState::init(RecordingStore::default(), None);
        assert_eq!(state.toggle().unwrap(), ThemeMode::Dark);
        assert_eq!(state.get(), ThemeMode::Dark);
        assert_eq!(state.store().theme, Some(ThemeMode::Dark));
        assert_eq!(state.store().saves, 1);
    }

    #[test]
    fn test_transient_does_not_persist() {
        let mut state = ThemeState::init(RecordingStore::default(), None);
        state.set_transient(ThemeMode::Dark);
        assert_eq!(state.get(), ThemeMode::Dark);
        assert_eq!(state.store().saves, 0);
        assert_eq!(state.store().theme, None);
    }

    #[test]
    fn test_failed_save_still_switches() {
        let store = RecordingStore {
            fail: true,
            ..Default::default()
        };
        let mut state = ThemeState::init(store, None);
        assert!(state.set(ThemeMode::Dark).is_err());
        assert_eq!(state.get(), ThemeMode::Dark);
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            frame_rate: 24,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let mut state = ThemeState::init(FileStore::new(&path), None);
        state.set(ThemeMode::Dark).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.theme, Some(ThemeMode::Dark));
        assert_eq!(reloaded.frame_rate, 24);

        let again = ThemeState::init(FileStore::new(&path), Some(ThemeMode::Light));
        assert_eq!(again.get(), ThemeMode::Dark);
    }
}
