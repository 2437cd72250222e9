use anyhow::{Context, Result};
use std::fs::{create_dir_all, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs a file-backed tracing subscriber for this session. The terminal
/// belongs to the UI, so nothing is written to stdout. `RUST_LOG` overrides
/// the default `info` level.
pub fn init() -> Result<PathBuf> {
    let path = build_log_path().context("No writable data directory for session logs")?;
    init_at(&path)?;
    Ok(path)
}

pub fn init_at(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Tracing already initialised: {}", e))?;
    Ok(())
}

fn build_log_path() -> Option<PathBuf> {
    let base = dirs::data_dir().or_else(|| std::env::current_dir().ok())?;
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    Some(
        base.join("encryptorx")
            .join("logs")
            .join(format!("session-{}.log", stamp)),
    )
}
