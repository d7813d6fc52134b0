//! Error types for the log service.

use seglog_core::LogError;
use thiserror::Error;

/// Result type for service operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Transport-neutral status code attached to every service error.
///
/// Transports translate it into their own vocabulary; [`Status::http_code`]
/// does so for HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The request could not be parsed or is not allowed.
    InvalidArgument,
    /// The requested offset is not in the log.
    OutOfRange,
    /// The method is not supported by the endpoint.
    MethodNotAllowed,
    /// The client went away before the call completed.
    Cancelled,
    /// The log is closed.
    Unavailable,
    /// Anything else.
    Internal,
}

impl Status {
    /// Returns the HTTP status code for this status.
    pub fn http_code(self) -> u16 {
        match self {
            Status::InvalidArgument | Status::OutOfRange => 400,
            Status::MethodNotAllowed => 405,
            Status::Cancelled => 499,
            Status::Unavailable => 503,
            Status::Internal => 500,
        }
    }
}

/// Errors that can occur while serving produce and consume calls.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The commit log rejected the call.
    #[error(transparent)]
    Log(#[from] LogError),

    /// Invalid request format.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The endpoint does not support the method.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The other side of a stream hung up.
    #[error("stream closed")]
    StreamClosed,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Maps the error onto a [`Status`].
    pub fn status(&self) -> Status {
        match self {
            ServerError::Log(LogError::OffsetOutOfRange { .. }) => Status::OutOfRange,
            ServerError::Log(LogError::Closed) => Status::Unavailable,
            ServerError::Log(_) => Status::Internal,
            ServerError::InvalidRequest(_) => Status::InvalidArgument,
            ServerError::MethodNotAllowed(_) => Status::MethodNotAllowed,
            ServerError::StreamClosed => Status::Cancelled,
            ServerError::Internal(_) => Status::Internal,
        }
    }

    /// Returns true if the offset is not in the log (yet).
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ServerError::Log(e) if e.is_out_of_range())
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status().http_code())
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status().http_code() >= 500
    }
}
