//! The log abstraction the service runs on.

use seglog_core::{Log, LogResult, Record};

/// What the service needs from a log: append and read by offset.
pub trait CommitLog: Send + Sync {
    /// Appends a record and returns its offset.
    fn append(&self, record: Record) -> LogResult<u64>;

    /// Reads the record at `offset`.
    fn read(&self, offset: u64) -> LogResult<Record>;
}

impl CommitLog for Log {
    fn append(&self, record: Record) -> LogResult<u64> {
        Log::append(self, record)
    }

    fn read(&self, offset: u64) -> LogResult<Record> {
        Log::read(self, offset)
    }
}
