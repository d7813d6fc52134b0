//! Test fixtures and log helpers.
//!
//! Provides temporary logs and common pre-populated scenarios.

use seglog_codec::{CborCodec, RecordCodec};
use seglog_core::{Log, LogConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A log in a temporary directory, removed on drop.
pub struct TestLog {
    /// The log instance.
    pub log: Log,
    config: LogConfig,
    codec: Arc<dyn RecordCodec>,
    /// Kept alive to prevent cleanup.
    temp_dir: TempDir,
}

impl TestLog {
    /// Creates a log with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LogConfig::default())
    }

    /// Creates a log with the given configuration and the CBOR codec.
    pub fn with_config(config: LogConfig) -> Self {
        Self::with_codec(config, Arc::new(CborCodec))
    }

    /// Creates a log with the given configuration and codec.
    pub fn with_codec(config: LogConfig, codec: Arc<dyn RecordCodec>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log = Log::with_codec(temp_dir.path().join("log"), config, Arc::clone(&codec))
            .expect("Failed to open log");

        Self {
            log,
            config,
            codec,
            temp_dir,
        }
    }

    /// Returns the log directory.
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("log")
    }

    /// Closes the log and opens it again from disk.
    #[must_use]
    pub fn reopen(self) -> Self {
        let Self {
            log,
            config,
            codec,
            temp_dir,
        } = self;

        log.close().expect("Failed to close log");
        drop(log);

        let log = Log::with_codec(temp_dir.path().join("log"), config, Arc::clone(&codec))
            .expect("Failed to reopen log");

        Self {
            log,
            config,
            codec,
            temp_dir,
        }
    }
}

impl Default for TestLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestLog {
    type Target = Log;

    fn deref(&self) -> &Self::Target {
        &self.log
    }
}

/// Runs a test with a temporary log using the default configuration.
///
/// # Example
///
/// ```rust
/// use seglog_testkit::with_temp_log;
///
/// with_temp_log(|log| {
///     assert_eq!(log.highest_offset(), 0);
/// });
/// ```
pub fn with_temp_log<F, R>(f: F) -> R
where
    F: FnOnce(&Log) -> R,
{
    let test_log = TestLog::new();
    f(&test_log.log)
}

/// Runs a test with a temporary log using `config`.
pub fn with_temp_log_config<F, R>(config: LogConfig, f: F) -> R
where
    F: FnOnce(&Log) -> R,
{
    let test_log = TestLog::with_config(config);
    f(&test_log.log)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use seglog_codec::Record;

    /// Store limit that rotates after every CBOR record of ten or so bytes.
    pub const TINY_STORE_BYTES: u64 = 32;

    /// Creates a log holding `count` records whose values are their decimal
    /// index.
    pub fn populated_log(count: usize, config: LogConfig) -> TestLog {
        let test_log = TestLog::with_config(config);
        for i in 0..count {
            test_log
                .append(Record::new(i.to_string().into_bytes()))
                .expect("Failed to append record");
        }
        test_log
    }

    /// Creates a log that has rotated through several segments.
    pub fn multi_segment_log(count: usize) -> TestLog {
        populated_log(count, LogConfig::new().max_store_bytes(TINY_STORE_BYTES))
    }
}
