//! Inspect command implementation.

use seglog_core::{Log, LogConfig, SegmentInfo};
use serde::Serialize;
use std::path::Path;

/// Log inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Log directory.
    pub path: String,
    /// Base offset of the oldest segment.
    pub lowest_offset: u64,
    /// Last assigned offset.
    pub highest_offset: u64,
    /// Number of segments.
    pub segment_count: usize,
    /// Sum of store sizes in bytes.
    pub store_size: u64,
    /// Sum of index sizes in bytes.
    pub index_size: u64,
    /// Store rotation limit.
    pub max_store_bytes: u64,
    /// Index rotation limit.
    pub max_index_bytes: u64,
    /// Per-segment details (if requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentInfo>>,
}

/// Runs the inspect command.
pub fn run(
    path: &Path,
    config: LogConfig,
    show_segments: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = super::open_existing(path, config)?;
    let result = inspect(&log, show_segments);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn inspect(log: &Log, show_segments: bool) -> InspectResult {
    let segments = log.segments();

    InspectResult {
        path: log.dir().display().to_string(),
        lowest_offset: log.lowest_offset(),
        highest_offset: log.highest_offset(),
        segment_count: segments.len(),
        store_size: segments.iter().map(|s| s.store_bytes).sum(),
        index_size: segments.iter().map(|s| s.index_bytes).sum(),
        max_store_bytes: log.config().segment.max_store_bytes,
        max_index_bytes: log.config().segment.max_index_bytes,
        segments: show_segments.then_some(segments),
    }
}

fn print_text_output(result: &InspectResult) {
    println!("SegLog Inspection");
    println!("=================");
    println!();
    println!("Path: {}", result.path);
    println!();
    println!("Offsets:");
    println!("  Lowest:  {}", result.lowest_offset);
    println!("  Highest: {}", result.highest_offset);
    println!();
    println!("Storage:");
    println!("  Segments:    {}", result.segment_count);
    println!("  Store size:  {}", format_size(result.store_size));
    println!("  Index size:  {}", format_size(result.index_size));
    println!(
        "  Limits:      {} store / {} index",
        format_size(result.max_store_bytes),
        format_size(result.max_index_bytes)
    );

    if let Some(segments) = &result.segments {
        println!();
        println!("Segments:");
        for segment in segments {
            println!(
                "  [{}..{}) store {} index {}{}",
                segment.base_offset,
                segment.next_offset,
                format_size(segment.store_bytes),
                format_size(segment.index_bytes),
                if segment.maxed { " (full)" } else { "" }
            );
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
