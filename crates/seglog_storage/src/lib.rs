//! # SegLog Storage
//!
//! Byte-level building blocks for the SegLog commit log.
//!
//! This crate knows nothing about records, offsets across segments, or
//! codecs. It provides two files per segment:
//!
//! - [`Store`] - an append-only file of length-prefixed entries
//! - [`Index`] - a memory-mapped table of fixed-width
//!   `(relative offset, store position)` entries
//!
//! ## On-disk formats
//!
//! ```text
//! store: | len (8, BE) | payload (len) | len (8, BE) | payload (len) | ...
//! index: | rel_offset (4, BE) | position (8, BE) | ...
//! ```
//!
//! ## Example
//!
//! ```rust
//! use seglog_storage::Store;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = Store::open(&dir.path().join("0.store")).unwrap();
//! let (written, pos) = store.append(b"hello world").unwrap();
//! assert_eq!(written, 19);
//! assert_eq!(store.read(pos).unwrap(), b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod index;
mod store;

pub use error::{StorageError, StorageResult};
pub use index::{Index, ENTRY_WIDTH, OFFSET_WIDTH, POSITION_WIDTH};
pub use store::{Store, LEN_WIDTH};
