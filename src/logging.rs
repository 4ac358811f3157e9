//! File logging.
//!
//! The terminal UI owns stdout, so log records go to a file instead.
//! Each run writes to its own `natseq-<hex>.log` in the chosen directory.
//! Filtering follows `RUST_LOG` and defaults to `info`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Builds a fresh log file path inside `dir`.
pub fn log_file_path(dir: &Path) -> PathBuf {
    let suffix: u32 = rand::random();
    dir.join(format!("natseq-{:08x}.log", suffix))
}

/// Installs the global subscriber writing to a new file in `dir`.
///
/// Returns the path of the log file.
pub fn init(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let path = log_file_path(dir);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    if let Err(e) = installed {
        // Nothing will ever write to it
        let _ = fs::remove_file(&path);
        anyhow::bail!("Failed to install logger: {}", e);
    }

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(path)
}
