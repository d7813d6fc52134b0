//! Append command implementation.

use seglog_core::{Log, LogConfig, Record};
use std::path::Path;

/// Runs the append command, creating the log if needed.
pub fn run(path: &Path, config: LogConfig, values: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let log = Log::open(path, config)?;

    for offset in append_all(&log, values)? {
        println!("{offset}");
    }

    log.close()?;
    Ok(())
}

fn append_all(log: &Log, values: &[String]) -> Result<Vec<u64>, Box<dyn std::error::Error>> {
    let mut offsets = Vec::with_capacity(values.len());
    for value in values {
        offsets.push(log.append(Record::new(value.clone().into_bytes()))?);
    }
    Ok(offsets)
}
