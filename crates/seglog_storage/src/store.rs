//! Append-only store of length-prefixed entries.

use crate::error::{StorageError, StorageResult};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Width of the big-endian length prefix written before every entry.
pub const LEN_WIDTH: u64 = 8;

/// A file of length-prefixed entries.
///
/// Every [`append`](Store::append) writes `| len (8, BE) | payload |` at the
/// end of the file and returns the position of the length prefix. Entries are
/// never rewritten.
///
/// # Buffering
///
/// Appends go through a `BufWriter`. Every read flushes the buffer first, so
/// data is visible to readers as soon as `append` returns. `close` flushes and
/// calls `File::sync_all`.
///
/// # Thread Safety
///
/// All methods take `&self`; the writer and the running size sit behind one
/// mutex, so `size` always matches the bytes handed to the writer.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    state: Mutex<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    /// `None` once the store has been closed.
    writer: Option<BufWriter<File>>,
    size: u64,
}

impl Store {
    /// Opens or creates a store at the given path.
    ///
    /// The file is opened in append mode; the logical size starts at the
    /// current file length.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;

        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(StoreState {
                writer: Some(BufWriter::new(file)),
                size,
            }),
        })
    }

    /// Appends one framed entry.
    ///
    /// Returns `(bytes_written, position)` where `bytes_written` includes the
    /// length prefix and `position` is where the entry starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is closed or the write fails.
    pub fn append(&self, payload: &[u8]) -> StorageResult<(u64, u64)> {
        let mut state = self.state.lock();
        let position = state.size;
        let writer = state.writer.as_mut().ok_or(StorageError::Closed)?;

        writer.write_all(&(payload.len() as u64).to_be_bytes())?;
        writer.write_all(payload)?;

        let written = LEN_WIDTH + payload.len() as u64;
        state.size += written;
        Ok((written, position))
    }

    /// Reads the payload of the entry starting at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadPastEnd`] if the entry does not lie within
    /// the store, [`StorageError::Closed`] after `close`, or an I/O error.
    pub fn read(&self, position: u64) -> StorageResult<Vec<u8>> {
        let mut state = self.state.lock();
        let size = state.size;
        let writer = state.writer.as_mut().ok_or(StorageError::Closed)?;

        if position.saturating_add(LEN_WIDTH) > size {
            return Err(StorageError::ReadPastEnd {
                offset: position,
                len: LEN_WIDTH,
                size,
            });
        }

        writer.flush()?;
        let file = writer.get_mut();
        file.seek(SeekFrom::Start(position))?;

        let mut len_bytes = [0u8; LEN_WIDTH as usize];
        file.read_exact(&mut len_bytes)?;
        let len = u64::from_be_bytes(len_bytes);

        let start = position + LEN_WIDTH;
        if start.saturating_add(len) > size {
            return Err(StorageError::ReadPastEnd {
                offset: start,
                len,
                size,
            });
        }

        let len = usize::try_from(len).map_err(|_| StorageError::ReadPastEnd {
            offset: start,
            len,
            size,
        })?;
        let mut payload = vec![0u8; len];
        file.read_exact(&mut payload)?;

        Ok(payload)
    }

    /// Reads raw bytes starting at `offset` into `buf`, ignoring framing.
    ///
    /// Returns the number of bytes read, which is `0` at or past the end of
    /// the store and may be less than `buf.len()` near the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is closed or the read fails.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> StorageResult<usize> {
        let mut state = self.state.lock();
        let size = state.size;
        let writer = state.writer.as_mut().ok_or(StorageError::Closed)?;

        if offset >= size || buf.is_empty() {
            return Ok(0);
        }

        writer.flush()?;
        let available = usize::try_from(size - offset).unwrap_or(usize::MAX);
        let n = buf.len().min(available);

        let file = writer.get_mut();
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut buf[..n])?;

        Ok(n)
    }

    /// Returns the total number of bytes written, length prefixes included.
    pub fn size(&self) -> u64 {
        self.state.lock().size
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once [`close`](Store::close) has run.
    pub fn is_closed(&self) -> bool {
        self.state.lock().writer.is_none()
    }

    /// Flushes buffered writes, syncs the file and releases the handle.
    ///
    /// Closing an already closed store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing or syncing fails.
    pub fn close(&self) -> StorageResult<()> {
        let Some(writer) = self.state.lock().writer.take() else {
            return Ok(());
        };

        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }
}
