//! Error types for log operations.

use seglog_codec::CodecError;
use seglog_storage::StorageError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for log operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors that can occur in log operations.
///
/// The first three variants are the conditions callers branch on:
/// an offset the log does not hold, a storage read that found nothing,
/// and an I/O failure. The rest are configuration and lifecycle errors.
#[derive(Debug, Error)]
pub enum LogError {
    /// The offset is not held by any segment (or not assigned yet).
    #[error("offset out of range: {offset}")]
    OffsetOutOfRange {
        /// The requested offset.
        offset: u64,
    },

    /// A store or index read found no data, or an index is full.
    #[error("end of data: {0}")]
    EndOfData(#[source] StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The record codec failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The log (or one of its segments) has been closed.
    #[error("log is closed")]
    Closed,

    /// Another log instance holds the directory lock.
    #[error("log directory locked: {}", path.display())]
    DirectoryLocked {
        /// The locked directory.
        path: PathBuf,
    },

    /// The configuration cannot be used.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

impl LogError {
    /// Creates an out-of-range error.
    pub fn out_of_range(offset: u64) -> Self {
        Self::OffsetOutOfRange { offset }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns true for [`LogError::OffsetOutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OffsetOutOfRange { .. })
    }

    /// Returns true for [`LogError::EndOfData`].
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, Self::EndOfData(_))
    }
}

impl From<StorageError> for LogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => Self::Io(e),
            StorageError::Closed => Self::Closed,
            other => Self::EndOfData(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_are_classified() {
        let eod: LogError = StorageError::EntryNotFound { entry: 1, count: 1 }.into();
        assert!(eod.is_end_of_data());

        let full: LogError = StorageError::IndexFull {
            size: 12,
            capacity: 12,
        }
        .into();
        assert!(full.is_end_of_data());

        let io: LogError = StorageError::Io(io::Error::other("disk")).into();
        assert!(matches!(io, LogError::Io(_)));

        let closed: LogError = StorageError::Closed.into();
        assert!(matches!(closed, LogError::Closed));
    }

    #[test]
    fn out_of_range_display() {
        let err = LogError::out_of_range(42);
        assert!(err.is_out_of_range());
        assert_eq!(err.to_string(), "offset out of range: 42");
    }
}
