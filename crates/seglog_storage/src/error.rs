//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Attempted to read beyond the end of a store.
    #[error("read beyond end of store: offset {offset}, len {len}, size {size}")]
    ReadPastEnd {
        /// The requested read offset.
        offset: u64,
        /// The requested read length.
        len: u64,
        /// The current store size.
        size: u64,
    },

    /// The requested index entry has not been written.
    #[error("index entry {entry} not found: index holds {count} entries")]
    EntryNotFound {
        /// The requested entry number.
        entry: u64,
        /// Number of entries currently in the index.
        count: u64,
    },

    /// The index has no room for another entry.
    #[error("index full: {size} of {capacity} bytes used")]
    IndexFull {
        /// Bytes in use.
        size: u64,
        /// Mapped capacity in bytes.
        capacity: u64,
    },

    /// The store or index has been closed.
    #[error("storage is closed")]
    Closed,
}

impl StorageError {
    /// Returns true if this error means "nothing there" rather than a failure.
    ///
    /// Reads past the end of a store, missing index entries and a full index
    /// are all end-of-data conditions. A full index is how a segment learns it
    /// must be rotated.
    pub fn is_end_of_data(&self) -> bool {
        matches!(
            self,
            StorageError::ReadPastEnd { .. }
                | StorageError::EntryNotFound { .. }
                | StorageError::IndexFull { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_data_classification() {
        assert!(StorageError::EntryNotFound { entry: 3, count: 3 }.is_end_of_data());
        assert!(StorageError::IndexFull {
            size: 36,
            capacity: 36
        }
        .is_end_of_data());
        assert!(!StorageError::Closed.is_end_of_data());
        assert!(!StorageError::Io(io::Error::other("disk")).is_end_of_data());
    }

    #[test]
    fn error_display() {
        let err = StorageError::ReadPastEnd {
            offset: 40,
            len: 8,
            size: 19,
        };
        let msg = err.to_string();
        assert!(msg.contains("40"));
        assert!(msg.contains("19"));
    }
}
