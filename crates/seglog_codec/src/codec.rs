//! Record codecs.
//!
//! The log never looks inside an encoded record. A [`RecordCodec`] turns a
//! [`Record`] into the bytes a segment stores and back again; the store's own
//! length-prefix framing is independent of whatever layout the codec picks.

use crate::error::{CodecError, CodecResult};
use crate::record::Record;
use bytes::Bytes;

/// Converts records to and from their stored byte form.
///
/// Implementations must be deterministic and `decode(encode(r)) == r`.
pub trait RecordCodec: Send + Sync + std::fmt::Debug {
    /// Encodes a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded.
    fn encode(&self, record: &Record) -> CodecResult<Vec<u8>>;

    /// Decodes a record.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a valid encoding.
    fn decode(&self, bytes: &[u8]) -> CodecResult<Record>;
}

/// CBOR encoding of a record as a two-field map (`value`, `offset`).
///
/// This is the default codec used by `seglog_core::Log::open`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CborCodec;

impl RecordCodec for CborCodec {
    fn encode(&self, record: &Record) -> CodecResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(record.value.len() + 24);
        ciborium::into_writer(record, &mut buf)
            .map_err(|e| CodecError::encoding_failed(e.to_string()))?;
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Record> {
        ciborium::from_reader(bytes).map_err(|e| CodecError::decoding_failed(e.to_string()))
    }
}

/// Fixed binary layout: `| offset (8, BE) | value (rest) |`.
///
/// Smallest possible encoding; useful when record sizes must be predictable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl RawCodec {
    /// Bytes of overhead added to every value.
    pub const HEADER_LEN: usize = 8;
}

impl RecordCodec for RawCodec {
    fn encode(&self, record: &Record) -> CodecResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::HEADER_LEN + record.value.len());
        buf.extend_from_slice(&record.offset.to_be_bytes());
        buf.extend_from_slice(&record.value);
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Record> {
        if bytes.len() < Self::HEADER_LEN {
            return Err(CodecError::Truncated {
                expected: Self::HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let (header, value) = bytes.split_at(Self::HEADER_LEN);
        let mut offset = [0u8; Self::HEADER_LEN];
        offset.copy_from_slice(header);

        Ok(Record {
            value: Bytes::copy_from_slice(value),
            offset: u64::from_be_bytes(offset),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cbor_roundtrip() {
        let record = Record::from("hello world").with_offset(42);
        let bytes = CborCodec.encode(&record).unwrap();
        assert_eq!(CborCodec.decode(&bytes).unwrap(), record);
    }

    #[test]
    fn cbor_stores_value_as_byte_string() {
        let record = Record::from("abc");
        let bytes = CborCodec.encode(&record).unwrap();
        // map(2) header, then the byte string 0x43 'a' 'b' 'c' somewhere inside
        assert_eq!(bytes[0], 0xa2);
        assert!(bytes.windows(4).any(|w| w == [0x43, b'a', b'b', b'c']));
    }

    #[test]
    fn cbor_rejects_garbage() {
        let err = CborCodec.decode(&[0xff, 0x00, 0x13]).unwrap_err();
        assert!(matches!(err, CodecError::DecodingFailed { .. }));
    }

    #[test]
    fn raw_layout() {
        let record = Record::from("hi").with_offset(1);
        let bytes = RawCodec.encode(&record).unwrap();
        assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 1, b'h', b'i']);
    }

    #[test]
    fn raw_rejects_short_input() {
        let err = RawCodec.decode(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                expected: 8,
                actual: 3
            }
        );
    }

    proptest! {
        #[test]
        fn codecs_agree_on_content(value in prop::collection::vec(any::<u8>(), 0..512), offset in any::<u64>()) {
            let record = Record::new(value).with_offset(offset);
            let cbor = CborCodec.decode(&CborCodec.encode(&record).unwrap()).unwrap();
            let raw = RawCodec.decode(&RawCodec.encode(&record).unwrap()).unwrap();
            prop_assert_eq!(&cbor, &record);
            prop_assert_eq!(&raw, &record);
        }
    }
}
