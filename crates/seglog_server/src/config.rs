//! Service configuration.

use std::time::Duration;

/// Configuration for the log service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// How long a consume stream waits before retrying an offset that has
    /// not been written yet.
    pub poll_interval: Duration,
    /// Capacity of the channels created by [`LogServer::stream_channel`](crate::LogServer::stream_channel).
    pub max_stream_backlog: usize,
}

impl ServerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            max_stream_backlog: 64,
        }
    }

    /// Sets the consume stream poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the stream channel capacity. Zero is raised to one.
    pub fn with_max_stream_backlog(mut self, backlog: usize) -> Self {
        self.max_stream_backlog = backlog.max(1);
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
