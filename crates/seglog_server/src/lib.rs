//! # SegLog Server
//!
//! Produce/consume service over a SegLog commit log.
//!
//! This crate provides:
//! - [`LogServer`] - unary produce/consume handlers plus channel-based
//!   produce and consume streams
//! - [`HttpHandler`] - JSON binding (`POST` produces, `GET` consumes)
//! - [`CommitLog`] - the append/read seam the service is written against
//!
//! The service does not own a listener. A host wires its transport of choice
//! to the handlers and maps failures with [`ServerError::status`].
//!
//! # Streaming
//!
//! ```rust,ignore
//! let (tx, mut rx) = server.stream_channel();
//! tokio::spawn(async move { server.consume_stream(ConsumeRequest::new(0), tx).await });
//! while let Some(resp) = rx.recv().await {
//!     println!("{}: {:?}", resp.record.offset, resp.record.value);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod commit_log;
mod config;
mod error;
mod http;
mod message;
mod server;

pub use commit_log::CommitLog;
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult, Status};
pub use http::{HttpHandler, HttpResponse};
pub use message::{
    ConsumeRequest, ConsumeResponse, LogRequest, LogResponse, ProduceRequest, ProduceResponse,
};
pub use server::LogServer;
