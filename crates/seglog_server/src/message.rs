//! Request and response messages.

use seglog_core::Record;
use serde::{Deserialize, Serialize};

/// Append one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProduceRequest {
    /// The record to append; its offset is ignored.
    #[serde(with = "record_json")]
    pub record: Record,
}

/// Offset assigned to a produced record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProduceResponse {
    /// The assigned offset.
    pub offset: u64,
}

/// Read the record at an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeRequest {
    /// The offset to read.
    pub offset: u64,
}

/// A consumed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeResponse {
    /// The stored record, offset included.
    #[serde(with = "record_json")]
    pub record: Record,
}

/// Any unary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRequest {
    /// Append.
    Produce(ProduceRequest),
    /// Read.
    Consume(ConsumeRequest),
}

/// Any unary response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LogResponse {
    /// Result of a produce.
    Produce(ProduceResponse),
    /// Result of a consume.
    Consume(ConsumeResponse),
}

impl ProduceRequest {
    /// Creates a produce request.
    pub fn new(record: impl Into<Record>) -> Self {
        Self {
            record: record.into(),
        }
    }
}

impl ConsumeRequest {
    /// Creates a consume request.
    pub fn new(offset: u64) -> Self {
        Self { offset }
    }
}

/// Records on the wire carry their value as a base64 string.
mod record_json {
    use base64::Engine;
    use bytes::Bytes;
    use seglog_core::Record;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct JsonRecord {
        #[serde(with = "bytes_base64")]
        value: Bytes,
        #[serde(default)]
        offset: u64,
    }

    pub fn serialize<S>(record: &Record, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        JsonRecord {
            value: record.value.clone(),
            offset: record.offset,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Record, D::Error>
    where
        D: Deserializer<'de>,
    {
        let JsonRecord { value, offset } = JsonRecord::deserialize(deserializer)?;
        Ok(Record { value, offset })
    }

    mod bytes_base64 {
        use super::*;

        pub fn serialize<S>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
            serializer.serialize_str(&encoded)
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(&s)
                .map_err(serde::de::Error::custom)?;
            Ok(Bytes::from(decoded))
        }
    }
}
