//! File-backed tracing so log output never lands on the TUI.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MOTES_LOG=debug`.
const FILTER_ENV: &str = "MOTES_LOG";

/// Install a subscriber writing to `motes.log` in the data directory.
///
/// Returns the log path, or `None` when logging could not be set up. A
/// decorative program keeps running without logs.
pub fn init() -> Option<PathBuf> {
    let dir = ProjectDirs::from("", "", "motes")?.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join("motes.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}
