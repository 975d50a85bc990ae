mod app;
mod host;
mod logging;

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use motes_config::{
    Config, ConfigError, FileStore, MemoryStore, ThemeState, ThemeStore, default_config_path,
    system_theme,
};
use motes_core::ThemeMode;

use crate::app::App;

/// An interactive particle field for your terminal.
#[derive(Parser, Debug)]
#[command(name = "motes", version, about)]
struct Args {
    /// Config file to read and persist the theme to
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme for this session only (light or dark)
    #[arg(short, long)]
    theme: Option<ThemeMode>,

    /// Keep particles still
    #[arg(long)]
    reduced_motion: bool,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let log_path = logging::init();

    let config_path = args.config.or_else(default_config_path);
    let (mut config, store) = load_settings(config_path.as_deref());
    if let Some(fps) = args.fps {
        config.frame_rate = fps;
    }
    config.reduced_motion |= args.reduced_motion;

    let mut theme = ThemeState::init(store, system_theme());
    if let Some(mode) = args.theme {
        theme.set_transient(mode);
    }

    tracing::info!(
        config = ?config_path,
        log = ?log_path,
        theme = %theme.get(),
        "starting motes"
    );

    let terminal = ratatui::init();
    install_panic_hook();
    let result = App::new(config, theme).run(terminal);
    ratatui::restore();
    result
}

/// Read the config file and pick where the theme is persisted.
///
/// Without a config path the session runs on defaults and keeps the theme in
/// memory.
fn load_settings(path: Option<&Path>) -> (Config, Box<dyn ThemeStore>) {
    match path {
        Some(path) => (
            Config::load_or_default(path),
            Box::new(FileStore::new(path)),
        ),
        None => {
            tracing::warn!(error = %ConfigError::NoConfigDir, "running with default configuration");
            (Config::default(), Box::new(MemoryStore::default()))
        }
    }
}

/// Release mouse capture and focus reporting before the terminal is restored
/// by the hook `ratatui::init` installed.
fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = host::release_input(&mut io::stdout());
        hook(info);
    }));
}
