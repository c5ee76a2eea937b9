use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "CELLSCAPE_LOG";

/// Install a file-backed subscriber so logs never touch the alternate screen.
///
/// Returns the log file path, or `None` when no data directory is known.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Some(dirs) = ProjectDirs::from("", "", "cellscape") else {
        return Ok(None);
    };
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir)?;
    let path = dir.join("cellscape.log");
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;

    Ok(Some(path))
}
