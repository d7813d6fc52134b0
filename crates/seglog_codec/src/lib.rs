//! # SegLog Codec
//!
//! The [`Record`] type and the codecs that turn records into stored bytes.
//!
//! Segments receive a codec at construction time, so the on-disk record
//! layout is a choice of the caller:
//!
//! - [`CborCodec`] - CBOR map via `serde`/`ciborium` (default)
//! - [`RawCodec`] - fixed `| offset | value |` layout
//!
//! ## Usage
//!
//! ```
//! use seglog_codec::{CborCodec, Record, RecordCodec};
//!
//! let record = Record::from("hello").with_offset(3);
//! let bytes = CborCodec.encode(&record).unwrap();
//! assert_eq!(CborCodec.decode(&bytes).unwrap(), record);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod error;
mod record;

pub use codec::{CborCodec, RawCodec, RecordCodec};
pub use error::{CodecError, CodecResult};
pub use record::Record;
