//! Benchmark utilities.

#![warn(missing_docs)]

use rand::Rng;
use seglog_core::{Log, LogConfig, Record};
use std::path::Path;

/// Generate a random record value of the specified size.
pub fn random_value(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate records with random values of the specified size.
pub fn generate_records(count: usize, value_size: usize) -> Vec<Record> {
    (0..count)
        .map(|_| Record::new(random_value(value_size)))
        .collect()
}

/// Configuration that rotates every `records_per_segment` appends of
/// `value_size`-byte values.
pub fn rotating_config(records_per_segment: u64, value_size: usize) -> LogConfig {
    // CBOR map overhead plus the length prefix stays under 64 bytes
    let per_record = value_size as u64 + 64;
    LogConfig::new()
        .max_store_bytes(per_record * records_per_segment)
        .max_index_bytes(seglog_storage::ENTRY_WIDTH * records_per_segment.max(1))
}

/// Opens a log in `dir` holding `count` records of `value_size` bytes.
pub fn populated_log(dir: &Path, config: LogConfig, count: usize, value_size: usize) -> Log {
    let log = Log::open(dir, config).unwrap();
    for record in generate_records(count, value_size) {
        log.append(record).unwrap();
    }
    log
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotating_config_rotates() {
        let dir = tempfile::tempdir().unwrap();
        let log = populated_log(dir.path(), rotating_config(4, 32), 20, 32);
        assert!(log.segments().len() >= 5);
        assert_eq!(log.highest_offset(), 19);
    }
}
