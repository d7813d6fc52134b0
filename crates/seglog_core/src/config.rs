//! Log configuration.

use crate::error::{LogError, LogResult};
use seglog_storage::ENTRY_WIDTH;

/// Default store size at which a segment is rotated.
pub const DEFAULT_MAX_STORE_BYTES: u64 = 1024;

/// Default index size at which a segment is rotated.
pub const DEFAULT_MAX_INDEX_BYTES: u64 = 1024;

/// Per-segment limits and the offset a brand-new log starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentConfig {
    /// Store size (bytes, length prefixes included) at which the segment is full.
    pub max_store_bytes: u64,

    /// Index size in bytes; also the index file's pre-allocated capacity.
    pub max_index_bytes: u64,

    /// Base offset of the first segment of an empty log.
    pub initial_offset: u64,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            max_store_bytes: DEFAULT_MAX_STORE_BYTES,
            max_index_bytes: DEFAULT_MAX_INDEX_BYTES,
            initial_offset: 0,
        }
    }
}

/// Configuration for opening a log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Segment limits.
    pub segment: SegmentConfig,
}

impl LogConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store size rotation threshold.
    #[must_use]
    pub const fn max_store_bytes(mut self, bytes: u64) -> Self {
        self.segment.max_store_bytes = bytes;
        self
    }

    /// Sets the index size rotation threshold.
    #[must_use]
    pub const fn max_index_bytes(mut self, bytes: u64) -> Self {
        self.segment.max_index_bytes = bytes;
        self
    }

    /// Sets the first offset of a brand-new log.
    #[must_use]
    pub const fn initial_offset(mut self, offset: u64) -> Self {
        self.segment.initial_offset = offset;
        self
    }

    /// Replaces zero limits with the defaults.
    #[must_use]
    pub const fn normalized(mut self) -> Self {
        if self.segment.max_store_bytes == 0 {
            self.segment.max_store_bytes = DEFAULT_MAX_STORE_BYTES;
        }
        if self.segment.max_index_bytes == 0 {
            self.segment.max_index_bytes = DEFAULT_MAX_INDEX_BYTES;
        }
        self
    }

    /// Checks that the limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidConfig`] if the index cannot hold one entry.
    pub fn validate(&self) -> LogResult<()> {
        if self.segment.max_index_bytes < ENTRY_WIDTH {
            return Err(LogError::invalid_config(format!(
                "max_index_bytes must be at least {ENTRY_WIDTH}, got {}",
                self.segment.max_index_bytes
            )));
        }
        Ok(())
    }
}
