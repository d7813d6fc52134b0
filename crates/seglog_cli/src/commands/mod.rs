//! CLI command implementations.

pub mod append;
pub mod dump;
pub mod inspect;
pub mod read;
pub mod truncate;

use seglog_core::{Log, LogConfig};
use std::path::Path;

/// Opens a log that must already exist.
pub fn open_existing(path: &Path, config: LogConfig) -> Result<Log, Box<dyn std::error::Error>> {
    if !path.is_dir() {
        return Err(format!("No log found at {}", path.display()).into());
    }
    Ok(Log::open(path, config)?)
}
