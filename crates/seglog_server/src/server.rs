//! Produce and consume handlers.

use crate::commit_log::CommitLog;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::message::{
    ConsumeRequest, ConsumeResponse, LogRequest, LogResponse, ProduceRequest, ProduceResponse,
};
use seglog_core::Record;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The log service.
///
/// Handlers are transport-agnostic: a transport decodes its wire messages
/// into [`ProduceRequest`]/[`ConsumeRequest`], calls the handler, and maps
/// errors through [`ServerError::status`]. Streaming calls exchange messages
/// over `tokio` channels and run log I/O on the blocking thread pool, so
/// they never stall a runtime worker. The unary handlers run on the calling
/// thread.
///
/// # Example
///
/// ```
/// use seglog_core::{Log, LogConfig};
/// use seglog_server::{ConsumeRequest, LogServer, ProduceRequest, ServerConfig};
/// use std::sync::Arc;
///
/// let dir = tempfile::tempdir().unwrap();
/// let log = Arc::new(Log::open(dir.path(), LogConfig::default()).unwrap());
/// let server = LogServer::new(log, ServerConfig::default());
///
/// let produced = server.handle_produce(ProduceRequest::new("hello")).unwrap();
/// let consumed = server.handle_consume(ConsumeRequest::new(produced.offset)).unwrap();
/// assert_eq!(&consumed.record.value[..], b"hello");
/// ```
pub struct LogServer {
    log: Arc<dyn CommitLog>,
    config: ServerConfig,
}

impl LogServer {
    /// Creates a service over `log`.
    pub fn new(log: Arc<dyn CommitLog>, config: ServerConfig) -> Self {
        Self { log, config }
    }

    /// Appends the request's record.
    pub fn handle_produce(&self, request: ProduceRequest) -> ServerResult<ProduceResponse> {
        let offset = self.log.append(request.record)?;
        Ok(ProduceResponse { offset })
    }

    /// Reads the record at the requested offset.
    pub fn handle_consume(&self, request: ConsumeRequest) -> ServerResult<ConsumeResponse> {
        let record = self.log.read(request.offset)?;
        Ok(ConsumeResponse { record })
    }

    /// Dispatches a unary request to the matching handler.
    pub fn handle_message(&self, request: LogRequest) -> ServerResult<LogResponse> {
        match request {
            LogRequest::Produce(req) => self.handle_produce(req).map(LogResponse::Produce),
            LogRequest::Consume(req) => self.handle_consume(req).map(LogResponse::Consume),
        }
    }

    /// Appends every request received on `requests`, sending each offset back
    /// in order.
    ///
    /// Returns `Ok(())` once `requests` is closed and drained.
    ///
    /// # Errors
    ///
    /// A failed append ends the stream with that error.
    /// [`ServerError::StreamClosed`] is returned if `responses` hangs up first.
    pub async fn produce_stream(
        &self,
        mut requests: mpsc::Receiver<ProduceRequest>,
        responses: mpsc::Sender<ProduceResponse>,
    ) -> ServerResult<()> {
        while let Some(request) = requests.recv().await {
            let offset = self.append_blocking(request.record).await?;
            let response = ProduceResponse { offset };
            if responses.send(response).await.is_err() {
                return Err(ServerError::StreamClosed);
            }
        }
        Ok(())
    }

    /// Sends records starting at `request.offset`, one after another, for as
    /// long as the receiving side is listening.
    ///
    /// Offsets that are not written yet are retried every
    /// [`ServerConfig::poll_interval`]. Dropping the receiver ends the stream
    /// with `Ok(())`.
    ///
    /// # Errors
    ///
    /// Any error other than out-of-range ends the stream.
    pub async fn consume_stream(
        &self,
        request: ConsumeRequest,
        responses: mpsc::Sender<ConsumeResponse>,
    ) -> ServerResult<()> {
        let mut offset = request.offset;

        loop {
            if responses.is_closed() {
                break;
            }

            match self.read_blocking(offset).await {
                Ok(record) => {
                    let response = ConsumeResponse { record };
                    if responses.send(response).await.is_err() {
                        break;
                    }
                    offset += 1;
                }
                Err(e) if e.is_out_of_range() => {
                    tokio::select! {
                        () = tokio::time::sleep(self.config.poll_interval) => {}
                        () = responses.closed() => break,
                    }
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(offset, "consume stream closed by client");
        Ok(())
    }

    async fn append_blocking(&self, record: Record) -> ServerResult<u64> {
        let log = Arc::clone(&self.log);
        let offset = tokio::task::spawn_blocking(move || log.append(record))
            .await
            .map_err(|e| ServerError::Internal(format!("append task failed: {e}")))??;
        Ok(offset)
    }

    async fn read_blocking(&self, offset: u64) -> ServerResult<Record> {
        let log = Arc::clone(&self.log);
        let record = tokio::task::spawn_blocking(move || log.read(offset))
            .await
            .map_err(|e| ServerError::Internal(format!("read task failed: {e}")))??;
        Ok(record)
    }

    /// Creates a channel sized for streaming calls.
    pub fn stream_channel<T>(&self) -> (mpsc::Sender<T>, mpsc::Receiver<T>) {
        mpsc::channel(self.config.max_stream_backlog.max(1))
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
