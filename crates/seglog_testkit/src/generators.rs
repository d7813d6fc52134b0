//! Property-based test generators using proptest.
//!
//! Strategies stay small on purpose so every case can afford a real log on
//! disk, and limits are tight enough to force rotation.

use proptest::prelude::*;
use seglog_codec::{CborCodec, RawCodec, RecordCodec};
use seglog_core::LogConfig;
use seglog_storage::ENTRY_WIDTH;
use std::sync::Arc;

/// Strategy for generating record values (arbitrary bytes, possibly empty).
pub fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

/// Strategy for generating a batch of record values.
pub fn values_strategy(max_len: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(value_strategy(), 1..=max_len.max(1))
}

/// Strategy for configurations with small limits.
///
/// Store limits range from smaller than one record to a few records; index
/// limits hold between one and eight entries.
pub fn small_config_strategy() -> impl Strategy<Value = LogConfig> {
    (16u64..256, 1u64..=8, 0u64..1000).prop_map(|(store, entries, initial)| {
        LogConfig::new()
            .max_store_bytes(store)
            .max_index_bytes(entries * ENTRY_WIDTH)
            .initial_offset(initial)
    })
}

/// The record codecs shipped with SegLog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// [`CborCodec`].
    Cbor,
    /// [`RawCodec`].
    Raw,
}

impl CodecKind {
    /// Returns a codec instance.
    pub fn codec(self) -> Arc<dyn RecordCodec> {
        match self {
            CodecKind::Cbor => Arc::new(CborCodec),
            CodecKind::Raw => Arc::new(RawCodec),
        }
    }
}

/// Strategy picking one of the shipped codecs.
pub fn codec_strategy() -> impl Strategy<Value = CodecKind> {
    prop_oneof![Just(CodecKind::Cbor), Just(CodecKind::Raw)]
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn config_is_valid(config in small_config_strategy()) {
            prop_assert!(config.validate().is_ok());
            prop_assert_eq!(config.segment.max_index_bytes % ENTRY_WIDTH, 0);
        }

        #[test]
        fn values_are_bounded(values in values_strategy(10)) {
            prop_assert!(!values.is_empty());
            prop_assert!(values.len() <= 10);
            prop_assert!(values.iter().all(|v| v.len() < 64));
        }
    }
}
