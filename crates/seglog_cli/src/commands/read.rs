//! Read command implementation.

use seglog_core::{LogConfig, Record};
use serde::Serialize;
use std::path::Path;

/// Record representation for output.
#[derive(Debug, Serialize)]
pub struct RecordInfo {
    /// Offset of the record.
    pub offset: u64,
    /// Value as UTF-8, with invalid sequences replaced.
    pub value: String,
    /// Value size in bytes.
    pub size: usize,
}

impl From<&Record> for RecordInfo {
    fn from(record: &Record) -> Self {
        Self {
            offset: record.offset,
            value: String::from_utf8_lossy(&record.value).into_owned(),
            size: record.value.len(),
        }
    }
}

/// Runs the read command.
pub fn run(
    path: &Path,
    config: LogConfig,
    offset: u64,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = super::open_existing(path, config)?;
    let record = log.read(offset)?;
    let info = RecordInfo::from(&record);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        _ => {
            println!("[{}] {} ({} bytes)", info.offset, info.value, info.size);
        }
    }

    Ok(())
}
