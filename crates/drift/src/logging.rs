//! File logging.
//!
//! The terminal belongs to the UI, so events go to `drift.log` in the
//! platform data directory instead of stderr.

use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use color_eyre::eyre::{WrapErr, eyre};
use tracing::Level;

/// Install a global subscriber writing to `path` at `level`.
pub fn init(path: &Path, level: &str) -> color_eyre::Result<()> {
    let level = Level::from_str(level).map_err(|_| eyre!("unknown log level `{level}`"))?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    tracing::info!(path = %path.display(), %level, "logging initialized");
    Ok(())
}
