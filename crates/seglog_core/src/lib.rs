//! # SegLog Core
//!
//! A segmented, append-only commit log.
//!
//! Records are appended to a [`Log`] and addressed by a monotonically
//! increasing offset. The log is a sequence of [`Segment`]s, each a store
//! file plus a memory-mapped index covering a contiguous run of offsets.
//! When the active segment fills up, a new one is started; old segments
//! can be dropped with [`Log::truncate`].
//!
//! This crate provides:
//! - [`Log`] - segment list, rotation, recovery and truncation
//! - [`Segment`] - one store/index pair with its offset range
//! - [`LogReader`] - raw byte export of every store, oldest first
//! - [`LogConfig`] - rotation limits and the initial offset
//!
//! ## Example
//!
//! ```rust
//! use seglog_core::{Log, LogConfig, Record};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let log = Log::open(dir.path(), LogConfig::new().max_store_bytes(64)).unwrap();
//!
//! for value in ["a", "b", "c"] {
//!     log.append(Record::from(value)).unwrap();
//! }
//!
//! assert_eq!(log.lowest_offset(), 0);
//! assert_eq!(log.highest_offset(), 2);
//! assert_eq!(&log.read(1).unwrap().value[..], b"b");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod log;
mod reader;
mod segment;

pub use config::{LogConfig, SegmentConfig, DEFAULT_MAX_INDEX_BYTES, DEFAULT_MAX_STORE_BYTES};
pub use error::{LogError, LogResult};
pub use log::Log;
pub use reader::{read_frame, LogReader};
pub use segment::{segment_file_name, Segment, SegmentInfo, INDEX_EXTENSION, STORE_EXTENSION};

pub use seglog_codec::{CborCodec, RawCodec, Record, RecordCodec};
