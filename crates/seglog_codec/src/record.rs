//! The logical record stored in the log.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A value together with the offset the log assigned to it.
///
/// The offset is always set by the log on append; whatever a client puts
/// there is overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The record payload.
    pub value: Bytes,
    /// Global offset within the log.
    #[serde(default)]
    pub offset: u64,
}

impl Record {
    /// Creates a record with the given value and offset 0.
    pub fn new(value: impl Into<Bytes>) -> Self {
        Self {
            value: value.into(),
            offset: 0,
        }
    }

    /// Returns a copy of this record carrying `offset`.
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}

impl From<Vec<u8>> for Record {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<&'static str> for Record {
    fn from(value: &'static str) -> Self {
        Self::new(value.as_bytes())
    }
}
