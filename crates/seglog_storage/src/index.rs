//! Memory-mapped offset index.

use crate::error::{StorageError, StorageResult};
use memmap2::MmapMut;
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Width of the relative offset column.
pub const OFFSET_WIDTH: u64 = 4;

/// Width of the store position column.
pub const POSITION_WIDTH: u64 = 8;

/// Width of one index entry.
pub const ENTRY_WIDTH: u64 = OFFSET_WIDTH + POSITION_WIDTH;

/// Maps segment-relative offsets to store positions.
///
/// The backing file is grown to its full capacity when opened and mapped
/// into memory, so writes and lookups are plain memory copies. The logical
/// size (bytes actually holding entries) is tracked separately and the file
/// is cut back to it on close.
///
/// Entry `n` lives at byte `n * ENTRY_WIDTH`:
///
/// ```text
/// | rel_offset (4, BE) | position (8, BE) |
/// ```
///
/// # Invariants
///
/// - `size` is always a multiple of [`ENTRY_WIDTH`]
/// - `size <= capacity`
/// - After `close` (or drop) the file length equals `size`
#[derive(Debug)]
pub struct Index {
    path: PathBuf,
    state: RwLock<IndexState>,
}

#[derive(Debug)]
struct IndexState {
    /// `None` once the index has been closed.
    mapped: Option<Mapped>,
    size: u64,
}

#[derive(Debug)]
struct Mapped {
    file: File,
    mmap: MmapMut,
}

impl Index {
    /// Opens or creates an index at the given path.
    ///
    /// An existing file's length becomes the logical size. The file is then
    /// grown to `max(max_bytes, size)` and mapped.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity cannot hold a single entry, or if the
    /// file cannot be opened, resized or mapped.
    pub fn open(path: &Path, max_bytes: u64) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let size = file.metadata()?.len();
        let capacity = max_bytes.max(size);

        if capacity < ENTRY_WIDTH {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("index capacity {capacity} cannot hold a {ENTRY_WIDTH}-byte entry"),
            )));
        }

        file.set_len(capacity)?;
        let mmap = map(&file)?;

        Ok(Self {
            path: path.to_path_buf(),
            state: RwLock::new(IndexState {
                mapped: Some(Mapped { file, mmap }),
                size,
            }),
        })
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::IndexFull`] if there is no room for another
    /// entry, or [`StorageError::Closed`] after `close`.
    pub fn write(&self, offset: u32, position: u64) -> StorageResult<()> {
        let mut state = self.state.write();
        let size = state.size;
        let mapped = state.mapped.as_mut().ok_or(StorageError::Closed)?;

        let capacity = mapped.mmap.len() as u64;
        if size + ENTRY_WIDTH > capacity {
            return Err(StorageError::IndexFull { size, capacity });
        }

        let start = size as usize;
        let pos_start = start + OFFSET_WIDTH as usize;
        let end = start + ENTRY_WIDTH as usize;
        mapped.mmap[start..pos_start].copy_from_slice(&offset.to_be_bytes());
        mapped.mmap[pos_start..end].copy_from_slice(&position.to_be_bytes());

        state.size += ENTRY_WIDTH;
        Ok(())
    }

    /// Reads entry number `entry`, returning `(relative_offset, position)`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::EntryNotFound`] if the entry has not been
    /// written, or [`StorageError::Closed`] after `close`.
    pub fn read(&self, entry: u32) -> StorageResult<(u32, u64)> {
        let state = self.state.read();
        let mapped = state.mapped.as_ref().ok_or(StorageError::Closed)?;

        let count = state.size / ENTRY_WIDTH;
        let entry = u64::from(entry);
        if entry >= count {
            return Err(StorageError::EntryNotFound { entry, count });
        }

        Ok(decode_entry(&mapped.mmap, entry))
    }

    /// Reads the most recently written entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::EntryNotFound`] if the index is empty, or
    /// [`StorageError::Closed`] after `close`.
    pub fn read_last(&self) -> StorageResult<(u32, u64)> {
        let state = self.state.read();
        let mapped = state.mapped.as_ref().ok_or(StorageError::Closed)?;

        let count = state.size / ENTRY_WIDTH;
        if count == 0 {
            return Err(StorageError::EntryNotFound { entry: 0, count });
        }

        Ok(decode_entry(&mapped.mmap, count - 1))
    }

    /// Returns the logical size in bytes.
    pub fn size(&self) -> u64 {
        self.state.read().size
    }

    /// Returns the number of entries written.
    pub fn entries(&self) -> u64 {
        self.size() / ENTRY_WIDTH
    }

    /// Returns the mapped capacity in bytes, or `0` once closed.
    pub fn capacity(&self) -> u64 {
        self.state
            .read()
            .mapped
            .as_ref()
            .map_or(0, |m| m.mmap.len() as u64)
    }

    /// Returns true if another entry would not fit.
    pub fn is_full(&self) -> bool {
        let state = self.state.read();
        match state.mapped.as_ref() {
            Some(mapped) => state.size + ENTRY_WIDTH > mapped.mmap.len() as u64,
            None => true,
        }
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once [`close`](Index::close) has run.
    pub fn is_closed(&self) -> bool {
        self.state.read().mapped.is_none()
    }

    /// Flushes the mapping, unmaps it and truncates the file to its logical size.
    ///
    /// Closing an already closed index is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the first error from flushing, truncating or syncing. All
    /// three steps are attempted regardless.
    pub fn close(&self) -> StorageResult<()> {
        let mut state = self.state.write();
        let Some(mapped) = state.mapped.take() else {
            return Ok(());
        };
        release(mapped, state.size)
    }
}

impl Drop for Index {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if let Some(mapped) = state.mapped.take() {
            if let Err(e) = release(mapped, state.size) {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to close index on drop");
            }
        }
    }
}

#[allow(unsafe_code)]
fn map(file: &File) -> StorageResult<MmapMut> {
    // SAFETY: the file handle is owned by the index for the whole lifetime of
    // the mapping and is only resized after the mapping is dropped. Other
    // writers are kept out of the directory by the log's advisory lock.
    let mmap = unsafe { MmapMut::map_mut(file)? };
    Ok(mmap)
}

fn release(mapped: Mapped, size: u64) -> StorageResult<()> {
    let Mapped { file, mmap } = mapped;

    let flushed = mmap.flush();
    drop(mmap);
    let truncated = file.set_len(size);
    let synced = file.sync_all();

    flushed?;
    truncated?;
    synced?;
    Ok(())
}

fn decode_entry(buf: &[u8], entry: u64) -> (u32, u64) {
    let start = (entry * ENTRY_WIDTH) as usize;
    let pos_start = start + OFFSET_WIDTH as usize;
    let end = start + ENTRY_WIDTH as usize;

    let mut offset = [0u8; OFFSET_WIDTH as usize];
    offset.copy_from_slice(&buf[start..pos_start]);
    let mut position = [0u8; POSITION_WIDTH as usize];
    position.copy_from_slice(&buf[pos_start..end]);

    (u32::from_be_bytes(offset), u64::from_be_bytes(position))
}
