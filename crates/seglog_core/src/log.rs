//! The segmented log.

use crate::config::LogConfig;
use crate::error::{LogError, LogResult};
use crate::reader::LogReader;
use crate::segment::{Segment, SegmentInfo, INDEX_EXTENSION, STORE_EXTENSION};
use fs2::FileExt;
use parking_lot::RwLock;
use seglog_codec::{CborCodec, Record, RecordCodec};
use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Advisory lock file held while a log is open.
const LOCK_FILE: &str = "LOCK";

/// An append-only, offset-addressed log split into segments.
///
/// Appends go to the last (active) segment. When it reaches a size limit
/// a new segment is started right after the last assigned offset. Reads find
/// the segment whose range holds the offset.
///
/// # Layout
///
/// ```text
/// <dir>/
/// ├─ LOCK
/// ├─ 00000000000000000000.store
/// ├─ 00000000000000000000.index
/// ├─ 00000000000000000002.store
/// └─ 00000000000000000002.index
/// ```
///
/// # Thread Safety
///
/// One reader/writer lock guards the segment list. `append`, `truncate`,
/// `close`, `remove` and `reset` take it exclusively; everything else
/// shares it.
///
/// # Example
///
/// ```rust
/// use seglog_core::{Log, LogConfig};
/// use seglog_codec::Record;
///
/// let dir = tempfile::tempdir().unwrap();
/// let log = Log::open(dir.path(), LogConfig::default()).unwrap();
///
/// let offset = log.append(Record::from("hello")).unwrap();
/// assert_eq!(&log.read(offset).unwrap().value[..], b"hello");
/// ```
#[derive(Debug)]
pub struct Log {
    dir: PathBuf,
    config: LogConfig,
    codec: Arc<dyn RecordCodec>,
    state: RwLock<LogState>,
}

#[derive(Debug, Default)]
struct LogState {
    /// Ordered by base offset; the last one is active.
    segments: Vec<Segment>,
    /// `None` once the log has been closed.
    lock_file: Option<File>,
}

impl LogState {
    fn ensure_open(&self) -> LogResult<()> {
        if self.lock_file.is_none() {
            return Err(LogError::Closed);
        }
        Ok(())
    }

    fn active(&self) -> LogResult<&Segment> {
        self.segments.last().ok_or(LogError::Closed)
    }

    fn active_mut(&mut self) -> LogResult<&mut Segment> {
        self.segments.last_mut().ok_or(LogError::Closed)
    }
}

impl Log {
    /// Opens the log in `dir` with the default CBOR record codec.
    ///
    /// The directory is created if missing and existing segments are
    /// recovered.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the directory is
    /// locked by another log, or recovery fails.
    pub fn open(dir: impl AsRef<Path>, config: LogConfig) -> LogResult<Self> {
        Self::with_codec(dir, config, Arc::new(CborCodec))
    }

    /// Opens the log in `dir`, encoding records with `codec`.
    ///
    /// # Errors
    ///
    /// Same as [`Log::open`].
    pub fn with_codec(
        dir: impl AsRef<Path>,
        config: LogConfig,
        codec: Arc<dyn RecordCodec>,
    ) -> LogResult<Self> {
        let config = config.normalized();
        config.validate()?;

        let mut log = Self {
            dir: dir.as_ref().to_path_buf(),
            config,
            codec,
            state: RwLock::new(LogState::default()),
        };

        let state = log.setup()?;
        *log.state.get_mut() = state;
        Ok(log)
    }

    /// Locks the directory and opens one segment per base offset on disk,
    /// or a single segment at the initial offset if there are none.
    fn setup(&self) -> LogResult<LogState> {
        fs::create_dir_all(&self.dir)?;
        let lock_file = self.lock_dir()?;

        let base_offsets = scan_base_offsets(&self.dir)?;
        let mut segments = Vec::with_capacity(base_offsets.len().max(1));
        for base_offset in base_offsets {
            segments.push(self.open_segment(base_offset)?);
        }
        if segments.is_empty() {
            segments.push(self.open_segment(self.config.segment.initial_offset)?);
        }

        tracing::info!(
            dir = %self.dir.display(),
            segments = segments.len(),
            "opened log"
        );

        Ok(LogState {
            segments,
            lock_file: Some(lock_file),
        })
    }

    fn lock_dir(&self) -> LogResult<File> {
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILE))?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(LogError::DirectoryLocked {
                path: self.dir.clone(),
            });
        }

        Ok(lock_file)
    }

    fn open_segment(&self, base_offset: u64) -> LogResult<Segment> {
        Segment::open(
            &self.dir,
            base_offset,
            self.config.segment,
            Arc::clone(&self.codec),
        )
    }

    /// Appends a record and returns the offset assigned to it.
    ///
    /// If the active segment is full afterwards, a new segment starting at
    /// its next offset becomes active. A failed rotation does not fail the
    /// append; it is retried before the next one.
    ///
    /// # Errors
    ///
    /// Returns an error if the log is closed or the write fails.
    pub fn append(&self, record: Record) -> LogResult<u64> {
        let mut state = self.state.write();
        state.ensure_open()?;

        if state.active()?.is_maxed() {
            let base_offset = state.active()?.next_offset();
            let segment = self.open_segment(base_offset)?;
            state.segments.push(segment);
        }

        let offset = state.active_mut()?.append(record)?;

        let active = state.active()?;
        if active.is_maxed() {
            let base_offset = active.next_offset();
            match self.open_segment(base_offset) {
                Ok(segment) => {
                    tracing::debug!(base_offset, "rotated segment");
                    state.segments.push(segment);
                }
                Err(e) => {
                    tracing::warn!(
                        base_offset,
                        error = %e,
                        "segment rotation failed, retrying on next append"
                    );
                }
            }
        }

        Ok(offset)
    }

    /// Reads the record at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::OffsetOutOfRange`] if no segment holds `offset`.
    pub fn read(&self, offset: u64) -> LogResult<Record> {
        let state = self.state.read();
        state.ensure_open()?;

        let segment = state
            .segments
            .iter()
            .find(|s| s.contains(offset))
            .ok_or_else(|| LogError::out_of_range(offset))?;

        segment.read(offset)
    }

    /// Base offset of the first segment.
    pub fn lowest_offset(&self) -> u64 {
        self.state
            .read()
            .segments
            .first()
            .map_or(self.config.segment.initial_offset, Segment::base_offset)
    }

    /// Last assigned offset.
    ///
    /// For a log with nothing appended this is one below the first offset
    /// it will assign (saturating at 0).
    pub fn highest_offset(&self) -> u64 {
        self.state
            .read()
            .segments
            .last()
            .map_or(0, |s| s.next_offset().saturating_sub(1))
    }

    /// Removes every segment whose offsets all lie below `lowest`.
    ///
    /// Segments that straddle `lowest` are kept whole, so the new lowest
    /// offset may be smaller than `lowest`. If every segment is removed, an
    /// empty segment starting at `lowest` takes over.
    ///
    /// # Errors
    ///
    /// Returns an error if the log is closed or a segment cannot be removed.
    pub fn truncate(&self, lowest: u64) -> LogResult<()> {
        let mut state = self.state.write();
        state.ensure_open()?;

        let mut removed = 0usize;
        let mut i = 0;
        while i < state.segments.len() {
            if state.segments[i].next_offset() < lowest {
                // leaves the list even if deleting its files fails
                let segment = state.segments.remove(i);
                if let Err(e) = segment.remove() {
                    if state.segments.is_empty() {
                        state.segments.push(self.open_segment(lowest)?);
                    }
                    return Err(e);
                }
                removed += 1;
            } else {
                i += 1;
            }
        }

        if state.segments.is_empty() {
            let segment = self.open_segment(lowest)?;
            state.segments.push(segment);
        }

        tracing::info!(lowest, removed, "truncated log");
        Ok(())
    }

    /// Returns a reader over the raw bytes of every store, oldest first.
    pub fn reader(&self) -> LogReader {
        let state = self.state.read();
        LogReader::new(state.segments.iter().map(Segment::store).collect())
    }

    /// Returns a snapshot of every segment.
    pub fn segments(&self) -> Vec<SegmentInfo> {
        self.state.read().segments.iter().map(Segment::info).collect()
    }

    /// Closes every segment and releases the directory lock.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment fails to close.
    pub fn close(&self) -> LogResult<()> {
        let mut state = self.state.write();
        close_state(&mut state)
    }

    /// Closes the log and deletes its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if closing or deleting fails.
    pub fn remove(&self) -> LogResult<()> {
        let mut state = self.state.write();
        self.remove_state(&mut state)
    }

    /// Deletes everything and starts again with one empty segment at the
    /// initial offset.
    ///
    /// # Errors
    ///
    /// Returns an error if removal or setup fails.
    pub fn reset(&self) -> LogResult<()> {
        let mut state = self.state.write();
        self.remove_state(&mut state)?;
        *state = self.setup()?;
        tracing::info!(dir = %self.dir.display(), "reset log");
        Ok(())
    }

    fn remove_state(&self, state: &mut LogState) -> LogResult<()> {
        close_state(state)?;
        state.segments.clear();

        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        tracing::info!(dir = %self.dir.display(), "removed log");
        Ok(())
    }

    /// Returns the log directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }
}

/// Closes every segment and drops the lock, returning the first error.
fn close_state(state: &mut LogState) -> LogResult<()> {
    let mut first_error = None;
    for segment in &state.segments {
        if let Err(e) = segment.close() {
            tracing::warn!(base_offset = segment.base_offset(), error = %e, "failed to close segment");
            first_error.get_or_insert(e);
        }
    }
    // dropping the handle releases the advisory lock
    state.lock_file = None;
    first_error.map_or(Ok(()), Err)
}

/// Collects the distinct base offsets of the segment files in `dir`, ascending.
fn scan_base_offsets(dir: &Path) -> LogResult<Vec<u64>> {
    let mut base_offsets = BTreeSet::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if extension != STORE_EXTENSION && extension != INDEX_EXTENSION {
            continue;
        }

        match path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u64>().ok())
        {
            Some(base_offset) => {
                base_offsets.insert(base_offset);
            }
            None => {
                tracing::warn!(path = %path.display(), "skipping segment file with invalid name");
            }
        }
    }

    Ok(base_offsets.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment_file_name;
    use seglog_codec::RawCodec;
    use std::io::Read;
    use std::thread;
    use tempfile::tempdir;

    fn small_config() -> LogConfig {
        LogConfig::new().max_store_bytes(32)
    }

    #[test]
    fn append_and_read_same_record() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), small_config()).unwrap();

        let offset = log.append(Record::from("some log to write")).unwrap();
        let read = log.read(offset).unwrap();

        assert_eq!(&read.value[..], b"some log to write");
        assert_eq!(read.offset, offset);
    }

    #[test]
    fn offset_out_of_range() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), small_config()).unwrap();

        let err = log.read(1).unwrap_err();
        assert!(matches!(err, LogError::OffsetOutOfRange { offset: 1 }));

        log.append(Record::from("a")).unwrap();
        assert!(log.read(1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn init_with_existing_segments() {
        let dir = tempdir().unwrap();
        let offset = {
            let log = Log::open(dir.path(), small_config()).unwrap();
            let offset = log.append(Record::from("Hello world")).unwrap();
            log.close().unwrap();
            offset
        };

        let log = Log::open(dir.path(), small_config()).unwrap();
        let read = log.read(offset).unwrap();
        assert_eq!(&read.value[..], b"Hello world");
        assert_eq!(log.highest_offset(), read.offset);
        assert_eq!(log.lowest_offset(), read.offset);
    }

    #[test]
    fn reader_exports_raw_frames() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), small_config()).unwrap();
        log.append(Record::from("Hello world")).unwrap();

        let mut bytes = Vec::new();
        log.reader().read_to_end(&mut bytes).unwrap();

        let len = u64::from_be_bytes(bytes[..8].try_into().unwrap()) as usize;
        assert_eq!(bytes.len(), 8 + len);
        let record = CborCodec.decode(&bytes[8..]).unwrap();
        assert_eq!(&record.value[..], b"Hello world");
        assert_eq!(record.offset, 0);
    }

    #[test]
    fn reader_spans_segments() {
        let dir = tempdir().unwrap();
        let log = Log::with_codec(dir.path(), small_config(), Arc::new(RawCodec)).unwrap();
        for i in 0..5u8 {
            log.append(Record::new(vec![i; 10])).unwrap();
        }
        assert!(log.segments().len() > 1);

        let mut reader = log.reader();
        let mut offsets = Vec::new();
        while let Some(frame) = crate::read_frame(&mut reader).unwrap() {
            offsets.push(RawCodec.decode(&frame).unwrap().offset);
        }
        assert_eq!(offsets, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn truncate_removes_stale_segments() {
        for codec in [Arc::new(CborCodec) as Arc<dyn RecordCodec>, Arc::new(RawCodec)] {
            let dir = tempdir().unwrap();
            let log = Log::with_codec(dir.path(), small_config(), codec).unwrap();

            for _ in 0..5 {
                log.append(Record::from("Test value")).unwrap();
            }

            log.truncate(3).unwrap();

            let read = log.read(2).unwrap();
            assert_eq!(&read.value[..], b"Test value");
            assert_eq!(log.lowest_offset(), read.offset);
            assert_eq!(log.highest_offset(), 4);
            assert!(log.segments().iter().all(|s| s.next_offset >= 3));
            assert!(log.read(1).unwrap_err().is_out_of_range());
        }
    }

    #[test]
    fn rotation_keeps_offsets_contiguous() {
        let dir = tempdir().unwrap();
        // 8 (prefix) + 8 (offset) + 10 (value) = 26 bytes per entry, two per segment
        let log = Log::with_codec(dir.path(), small_config(), Arc::new(RawCodec)).unwrap();

        for want in 0..5u64 {
            assert_eq!(log.append(Record::from("Test value")).unwrap(), want);
        }

        let segments = log.segments();
        let bases: Vec<u64> = segments.iter().map(|s| s.base_offset).collect();
        assert_eq!(bases, vec![0, 2, 4]);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].next_offset, pair[1].base_offset);
        }

        let newest = segments.last().unwrap();
        assert_eq!(log.read(newest.base_offset).unwrap().offset, newest.base_offset);

        assert!(dir.path().join(segment_file_name(2, STORE_EXTENSION)).exists());
        assert!(dir.path().join(segment_file_name(4, INDEX_EXTENSION)).exists());
    }

    #[test]
    fn index_limit_rotates() {
        let dir = tempdir().unwrap();
        let config = LogConfig::new()
            .max_store_bytes(1 << 20)
            .max_index_bytes(seglog_storage::ENTRY_WIDTH * 2);
        let log = Log::open(dir.path(), config).unwrap();

        for want in 0..7u64 {
            assert_eq!(log.append(Record::from("x")).unwrap(), want);
        }
        assert_eq!(log.segments().len(), 4);
        for offset in 0..7 {
            assert_eq!(log.read(offset).unwrap().offset, offset);
        }
    }

    #[test]
    fn recovery_preserves_everything() {
        let dir = tempdir().unwrap();
        let config = small_config();

        let (lowest, highest, records) = {
            let log = Log::open(dir.path(), config).unwrap();
            for i in 0..20u8 {
                log.append(Record::new(vec![i; usize::from(i) + 1])).unwrap();
            }
            let records: Vec<Record> = (0..20).map(|o| log.read(o).unwrap()).collect();
            let bounds = (log.lowest_offset(), log.highest_offset());
            log.close().unwrap();
            (bounds.0, bounds.1, records)
        };

        let log = Log::open(dir.path(), config).unwrap();
        assert_eq!(log.lowest_offset(), lowest);
        assert_eq!(log.highest_offset(), highest);
        for record in &records {
            assert_eq!(&log.read(record.offset).unwrap(), record);
        }

        // appends continue where the previous instance stopped
        assert_eq!(log.append(Record::from("next")).unwrap(), highest + 1);
    }

    #[test]
    fn recovery_after_drop_without_close() {
        let dir = tempdir().unwrap();
        {
            let log = Log::open(dir.path(), LogConfig::default()).unwrap();
            log.append(Record::from("a")).unwrap();
            log.append(Record::from("b")).unwrap();
        }

        let log = Log::open(dir.path(), LogConfig::default()).unwrap();
        assert_eq!(log.highest_offset(), 1);
        assert_eq!(&log.read(1).unwrap().value[..], b"b");
    }

    #[test]
    fn initial_offset_is_used_for_new_logs() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), LogConfig::new().initial_offset(100)).unwrap();

        assert_eq!(log.lowest_offset(), 100);
        assert_eq!(log.append(Record::from("first")).unwrap(), 100);
        assert_eq!(log.highest_offset(), 100);
    }

    #[test]
    fn empty_log_bounds() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), LogConfig::default()).unwrap();

        assert_eq!(log.lowest_offset(), 0);
        assert_eq!(log.highest_offset(), 0);
        assert!(log.read(0).unwrap_err().is_out_of_range());
    }

    #[test]
    fn truncate_everything_keeps_log_writable() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), small_config()).unwrap();
        for _ in 0..3 {
            log.append(Record::from("Test value")).unwrap();
        }

        log.truncate(10).unwrap();

        assert_eq!(log.segments().len(), 1);
        assert_eq!(log.lowest_offset(), 10);
        assert_eq!(log.append(Record::from("again")).unwrap(), 10);
    }

    #[test]
    fn scan_ignores_foreign_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"hi").unwrap();
        fs::write(dir.path().join("garbage.store"), b"").unwrap();

        let log = Log::open(dir.path(), LogConfig::default()).unwrap();
        assert_eq!(log.segments().len(), 1);
        assert_eq!(log.lowest_offset(), 0);
    }

    #[test]
    fn directory_lock_is_exclusive() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), LogConfig::default()).unwrap();

        let err = Log::open(dir.path(), LogConfig::default()).unwrap_err();
        assert!(matches!(err, LogError::DirectoryLocked { .. }));

        log.close().unwrap();
        assert!(Log::open(dir.path(), LogConfig::default()).is_ok());
    }

    #[test]
    fn closed_log_rejects_operations() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), LogConfig::default()).unwrap();
        log.append(Record::from("a")).unwrap();
        log.close().unwrap();

        assert!(matches!(log.append(Record::from("b")), Err(LogError::Closed)));
        assert!(matches!(log.read(0), Err(LogError::Closed)));
        assert!(matches!(log.truncate(0), Err(LogError::Closed)));
        log.close().unwrap();
    }

    #[test]
    fn remove_deletes_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log");
        let log = Log::open(&path, LogConfig::default()).unwrap();
        log.append(Record::from("a")).unwrap();

        log.remove().unwrap();
        assert!(!path.exists());
        assert!(matches!(log.read(0), Err(LogError::Closed)));
    }

    #[test]
    fn reset_starts_fresh() {
        let dir = tempdir().unwrap();
        let config = small_config().initial_offset(7);
        let log = Log::open(dir.path().join("log"), config).unwrap();
        for _ in 0..5 {
            log.append(Record::from("Test value")).unwrap();
        }

        log.reset().unwrap();

        assert_eq!(log.segments().len(), 1);
        assert_eq!(log.lowest_offset(), 7);
        assert_eq!(log.highest_offset(), 6);
        assert!(log.read(8).unwrap_err().is_out_of_range());
        assert_eq!(log.append(Record::from("fresh")).unwrap(), 7);
    }

    #[test]
    fn invalid_config_rejected() {
        let dir = tempdir().unwrap();
        let err = Log::open(dir.path(), LogConfig::new().max_index_bytes(4)).unwrap_err();
        assert!(matches!(err, LogError::InvalidConfig { .. }));
    }

    #[test]
    fn concurrent_appends_and_reads() {
        let dir = tempdir().unwrap();
        let log = Arc::new(Log::open(dir.path(), LogConfig::new().max_store_bytes(256)).unwrap());

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..50u8 {
                        let offset = log.append(Record::new(vec![t, i])).unwrap();
                        let read = log.read(offset).unwrap();
                        assert_eq!(&read.value[..], &[t, i]);
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(log.highest_offset(), 199);
        for offset in 0..200 {
            assert_eq!(log.read(offset).unwrap().offset, offset);
        }
    }

    #[test]
    fn append_past_last_offset_fails_cleanly() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), LogConfig::new().initial_offset(u64::MAX)).unwrap();

        let err = log.append(Record::from("x")).unwrap_err();
        assert!(err.is_end_of_data());
        assert_eq!(log.segments()[0].store_bytes, 0);
        assert_eq!(log.highest_offset(), u64::MAX - 1);
        assert!(log.read(u64::MAX).unwrap_err().is_out_of_range());
    }

    #[test]
    fn last_offset_is_assignable_once() {
        let dir = tempdir().unwrap();
        let config = small_config().initial_offset(u64::MAX - 2);
        let log = Log::open(dir.path(), config).unwrap();

        assert_eq!(log.append(Record::from("Test value")).unwrap(), u64::MAX - 2);
        assert_eq!(log.append(Record::from("Test value")).unwrap(), u64::MAX - 1);
        assert!(log.append(Record::from("Test value")).unwrap_err().is_end_of_data());

        assert_eq!(log.highest_offset(), u64::MAX - 1);
        assert_eq!(log.read(u64::MAX - 1).unwrap().offset, u64::MAX - 1);
        log.close().unwrap();

        let log = Log::open(dir.path(), config).unwrap();
        assert_eq!(log.highest_offset(), u64::MAX - 1);
        assert_eq!(log.lowest_offset(), u64::MAX - 2);
    }

    #[test]
    fn truncate_drops_segment_whose_files_cannot_be_deleted() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), small_config()).unwrap();
        for _ in 0..5 {
            log.append(Record::from("Test value")).unwrap();
        }
        let first = log.segments()[0].clone();
        fs::remove_file(dir.path().join(segment_file_name(first.base_offset, INDEX_EXTENSION)))
            .unwrap();

        let err = log.truncate(first.next_offset + 1).unwrap_err();
        assert!(matches!(err, LogError::Io(_)));

        assert_eq!(log.lowest_offset(), first.next_offset);
        assert!(log.read(first.base_offset).unwrap_err().is_out_of_range());
        assert_eq!(log.read(4).unwrap().offset, 4);
        assert_eq!(log.append(Record::from("after")).unwrap(), 5);
    }

    #[test]
    fn close_releases_every_segment_and_the_lock() {
        let dir = tempdir().unwrap();
        let log = Log::open(dir.path(), small_config()).unwrap();
        for _ in 0..5 {
            log.append(Record::from("Test value")).unwrap();
        }
        assert!(log.segments().len() > 2);

        log.close().unwrap();
        let log = Log::open(dir.path(), small_config()).unwrap();
        assert_eq!(log.highest_offset(), 4);
        for offset in 0..5 {
            assert_eq!(log.read(offset).unwrap().offset, offset);
        }
    }
}
