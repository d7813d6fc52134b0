//! Truncate command implementation.

use seglog_core::LogConfig;
use std::path::Path;

/// Runs the truncate command.
pub fn run(path: &Path, config: LogConfig, lowest: u64) -> Result<(), Box<dyn std::error::Error>> {
    let log = super::open_existing(path, config)?;
    let removed = log
        .segments()
        .iter()
        .filter(|s| s.next_offset < lowest)
        .count();

    log.truncate(lowest)?;

    println!(
        "Removed {} segment(s); offsets now {}..={}",
        removed,
        log.lowest_offset(),
        log.highest_offset()
    );

    log.close()?;
    Ok(())
}
