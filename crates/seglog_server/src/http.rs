//! JSON over HTTP binding.

use crate::error::{ServerError, ServerResult};
use crate::message::{ConsumeRequest, LogRequest, ProduceRequest};
use crate::server::LogServer;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// A response ready to be written by whatever HTTP stack hosts the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body.
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps HTTP requests on the log endpoint onto [`LogServer`].
///
/// | Method | Body                              | Response                  |
/// |--------|-----------------------------------|---------------------------|
/// | `POST` | `{"record": {"value": "<b64>"}}`  | `{"offset": n}`           |
/// | `GET`  | `{"offset": n}`                   | `{"record": {...}}`       |
///
/// Errors are returned as `{"error": "..."}` with the status from
/// [`ServerError::status`].
pub struct HttpHandler {
    server: Arc<LogServer>,
}

impl HttpHandler {
    /// Creates a handler over `server`.
    pub fn new(server: Arc<LogServer>) -> Self {
        Self { server }
    }

    /// Handles one request.
    pub fn handle(&self, method: &str, body: &[u8]) -> HttpResponse {
        match self.dispatch(method, body) {
            Ok(body) => HttpResponse { status: 200, body },
            Err(e) => {
                let status = e.status().http_code();
                if e.is_server_error() {
                    tracing::warn!(method, status, error = %e, "request failed");
                } else {
                    tracing::debug!(method, status, error = %e, "request rejected");
                }
                HttpResponse {
                    status,
                    body: encode(&ErrorBody {
                        error: e.to_string(),
                    })
                    .unwrap_or_default(),
                }
            }
        }
    }

    fn dispatch(&self, method: &str, body: &[u8]) -> ServerResult<Vec<u8>> {
        let request = match method {
            "POST" => LogRequest::Produce(decode::<ProduceRequest>(body)?),
            "GET" => LogRequest::Consume(decode::<ConsumeRequest>(body)?),
            other => return Err(ServerError::MethodNotAllowed(other.to_string())),
        };
        let response = self.server.handle_message(request)?;
        encode(&response)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ServerResult<T> {
    serde_json::from_slice(body).map_err(|e| ServerError::InvalidRequest(e.to_string()))
}

fn encode<T: Serialize>(value: &T) -> ServerResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| ServerError::Internal(e.to_string()))
}
