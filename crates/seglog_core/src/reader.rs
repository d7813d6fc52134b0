//! Raw export of a log's store files.

use seglog_storage::{StorageError, Store, LEN_WIDTH};
use std::io::{self, Read};
use std::sync::Arc;

/// Reads every segment's store file back to back, in base offset order.
///
/// The bytes are the on-disk frames (`| len (8, BE) | payload |`), not
/// decoded records. Use [`read_frame`] to split them again.
///
/// The reader holds its own handles to the stores it was created with. If a
/// segment is removed afterwards, reading that segment fails.
#[derive(Debug)]
pub struct LogReader {
    stores: Vec<Arc<Store>>,
    current: usize,
    position: u64,
}

impl LogReader {
    pub(crate) fn new(stores: Vec<Arc<Store>>) -> Self {
        Self {
            stores,
            current: 0,
            position: 0,
        }
    }
}

impl Read for LogReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while let Some(store) = self.stores.get(self.current) {
            let n = store.read_at(buf, self.position).map_err(into_io)?;
            if n > 0 {
                self.position += n as u64;
                return Ok(n);
            }
            self.current += 1;
            self.position = 0;
        }

        Ok(0)
    }
}

fn into_io(err: StorageError) -> io::Error {
    match err {
        StorageError::Io(e) => e,
        other => io::Error::other(other),
    }
}

/// Reads one length-prefixed frame from an exported stream.
///
/// Returns `Ok(None)` at a clean end of stream.
///
/// # Errors
///
/// Returns `UnexpectedEof` if the stream ends inside a frame.
pub fn read_frame<R: Read>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut len = [0u8; LEN_WIDTH as usize];
    let mut filled = 0;
    while filled < len.len() {
        match reader.read(&mut len[filled..])? {
            0 if filled == 0 => return Ok(None),
            0 => return Err(io::ErrorKind::UnexpectedEof.into()),
            n => filled += n,
        }
    }

    let len = usize::try_from(u64::from_be_bytes(len))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;
    Ok(Some(payload))
}
