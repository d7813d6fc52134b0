//! # SegLog Testkit
//!
//! Test utilities for SegLog.
//!
//! This crate provides:
//! - Temporary logs that clean up after themselves and can be reopened
//! - Property-based test generators using proptest
//! - Throughput and concurrency stress helpers
//!
//! ## Usage
//!
//! ```rust
//! use seglog_testkit::prelude::*;
//! use seglog_core::Record;
//!
//! with_temp_log(|log| {
//!     let offset = log.append(Record::from("hello")).unwrap();
//!     assert_eq!(log.read(offset).unwrap().offset, offset);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use stress::*;
