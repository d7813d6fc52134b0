//! A store and an index sharing one base offset.

use crate::config::SegmentConfig;
use crate::error::{LogError, LogResult};
use seglog_codec::{Record, RecordCodec};
use seglog_storage::{Index, StorageError, Store, ENTRY_WIDTH};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File extension of segment stores.
pub const STORE_EXTENSION: &str = "store";

/// File extension of segment indexes.
pub const INDEX_EXTENSION: &str = "index";

/// Returns the file name for a segment file, e.g. `00000000000000000016.store`.
///
/// Base offsets are zero-padded to 20 digits so lexical and numeric order agree.
pub fn segment_file_name(base_offset: u64, extension: &str) -> String {
    format!("{base_offset:020}.{extension}")
}

/// A bounded, contiguous run of offsets backed by one store and one index.
///
/// Offsets `[base_offset, next_offset)` are held by the segment; the index
/// is keyed by `offset - base_offset`.
///
/// # Invariants
///
/// - Relative offsets are contiguous from 0
/// - Index entry count equals store entry count, except after a failed
///   index write, which leaves an unreachable store entry behind
#[derive(Debug)]
pub struct Segment {
    store: Arc<Store>,
    index: Index,
    base_offset: u64,
    next_offset: u64,
    config: SegmentConfig,
    codec: Arc<dyn RecordCodec>,
}

/// Point-in-time description of a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentInfo {
    /// First offset the segment may hold.
    pub base_offset: u64,
    /// Next offset the segment will assign.
    pub next_offset: u64,
    /// Store size in bytes.
    pub store_bytes: u64,
    /// Index size in bytes.
    pub index_bytes: u64,
    /// Whether the segment has reached a size limit.
    pub maxed: bool,
}

impl Segment {
    /// Opens or creates the segment starting at `base_offset` in `dir`.
    ///
    /// `next_offset` is derived from the last index entry, or equals
    /// `base_offset` when the index is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be opened.
    pub fn open(
        dir: &Path,
        base_offset: u64,
        config: SegmentConfig,
        codec: Arc<dyn RecordCodec>,
    ) -> LogResult<Self> {
        let store = Store::open(&dir.join(segment_file_name(base_offset, STORE_EXTENSION)))?;
        let index = Index::open(
            &dir.join(segment_file_name(base_offset, INDEX_EXTENSION)),
            config.max_index_bytes,
        )?;

        let next_offset = match index.read_last() {
            Ok((relative, _)) => base_offset
                .checked_add(u64::from(relative))
                .and_then(|last| last.checked_add(1))
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("index entry {relative} overflows base offset {base_offset}"),
                    )
                })?,
            Err(e) if e.is_end_of_data() => base_offset,
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(base_offset, next_offset, "opened segment");

        Ok(Self {
            store: Arc::new(store),
            index,
            base_offset,
            next_offset,
            config,
            codec,
        })
    }

    /// Appends a record, assigning it the next offset.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding, the store write or the index write
    /// fails. A failed index write leaves the store entry in place. A
    /// segment whose next offset cannot be advanced (relative offset past
    /// `u32::MAX`, or global offset at `u64::MAX`) reports
    /// [`StorageError::IndexFull`] before anything is written.
    pub fn append(&mut self, mut record: Record) -> LogResult<u64> {
        let offset = self.next_offset;
        let relative = u32::try_from(offset - self.base_offset).map_err(|_| self.index_full())?;
        let next_offset = offset.checked_add(1).ok_or_else(|| self.index_full())?;
        record.offset = offset;

        let encoded = self.codec.encode(&record)?;
        let (_, position) = self.store.append(&encoded)?;
        self.index.write(relative, position)?;

        self.next_offset = next_offset;
        Ok(offset)
    }

    fn index_full(&self) -> LogError {
        LogError::EndOfData(StorageError::IndexFull {
            size: self.index.size(),
            capacity: self.index.capacity(),
        })
    }

    /// Reads the record at a global offset.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::OffsetOutOfRange`] unless
    /// `base_offset <= offset < next_offset`.
    pub fn read(&self, offset: u64) -> LogResult<Record> {
        if offset < self.base_offset || offset >= self.next_offset {
            return Err(LogError::out_of_range(offset));
        }

        let relative =
            u32::try_from(offset - self.base_offset).map_err(|_| LogError::out_of_range(offset))?;
        let (_, position) = self.index.read(relative)?;
        let bytes = self.store.read(position)?;
        Ok(self.codec.decode(&bytes)?)
    }

    /// Returns true once the store or the index has reached its limit.
    ///
    /// The index counts as full when one more entry would not fit under
    /// `max_index_bytes`, so the segment rotates before an append can fail.
    pub fn is_maxed(&self) -> bool {
        self.store.size() >= self.config.max_store_bytes
            || self.index.size() + ENTRY_WIDTH > self.config.max_index_bytes
    }

    /// Returns true if `offset` falls in `[base_offset, next_offset)`.
    pub fn contains(&self, offset: u64) -> bool {
        self.base_offset <= offset && offset < self.next_offset
    }

    /// First offset the segment may hold.
    pub fn base_offset(&self) -> u64 {
        self.base_offset
    }

    /// Next offset the segment will assign.
    pub fn next_offset(&self) -> u64 {
        self.next_offset
    }

    /// Shared handle to the store, for raw export.
    pub fn store(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }

    /// Paths of the store and index files.
    pub fn paths(&self) -> (PathBuf, PathBuf) {
        (
            self.store.path().to_path_buf(),
            self.index.path().to_path_buf(),
        )
    }

    /// Returns a snapshot of the segment's state.
    pub fn info(&self) -> SegmentInfo {
        SegmentInfo {
            base_offset: self.base_offset,
            next_offset: self.next_offset,
            store_bytes: self.store.size(),
            index_bytes: self.index.size(),
            maxed: self.is_maxed(),
        }
    }

    /// Closes the segment and deletes both files.
    ///
    /// # Errors
    ///
    /// Returns an error if closing or deleting fails.
    pub fn remove(&self) -> LogResult<()> {
        self.close()?;
        fs::remove_file(self.index.path())?;
        fs::remove_file(self.store.path())?;
        tracing::debug!(base_offset = self.base_offset, "removed segment");
        Ok(())
    }

    /// Closes the index, then the store.
    ///
    /// The store is closed even if closing the index fails.
    ///
    /// # Errors
    ///
    /// Returns the first error from either close.
    pub fn close(&self) -> LogResult<()> {
        let index = self.index.close();
        let store = self.store.close();
        index?;
        store?;
        Ok(())
    }
}
