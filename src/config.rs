use crate::constants;
use std::time::Duration;

/// Host-side protocol tuning for a [`Device`](crate::Device).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    response_timeout: Duration,
    chunk_timeout: Duration,
    chunk_size: usize,
    trigger_address: u16,
    trigger_value: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            response_timeout: Duration::from_millis(constants::DEFAULT_RESPONSE_TIMEOUT_MS),
            chunk_timeout: Duration::from_millis(constants::DEFAULT_CHUNK_TIMEOUT_MS),
            chunk_size: constants::DEFAULT_CHUNK_SIZE,
            trigger_address: constants::HISTOGRAM_TRIGGER_ADDRESS,
            trigger_value: constants::HISTOGRAM_TRIGGER_VALUE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeout for a single register response on the control-in endpoint.
    pub fn response_timeout(&self) -> Duration {
        self.response_timeout
    }

    pub fn set_response_timeout(&mut self, timeout: Duration) {
        self.response_timeout = timeout;
    }

    /// Timeout for one bulk chunk. Expiry marks the end of a histogram stream,
    /// so it also bounds the idle tail of every capture.
    pub fn chunk_timeout(&self) -> Duration {
        self.chunk_timeout
    }

    pub fn set_chunk_timeout(&mut self, timeout: Duration) {
        self.chunk_timeout = timeout;
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Zero is clamped to one byte.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    pub fn trigger_address(&self) -> u16 {
        self.trigger_address
    }

    pub fn trigger_value(&self) -> u16 {
        self.trigger_value
    }

    pub fn set_trigger(&mut self, address: u16, value: u16) {
        self.trigger_address = address;
        self.trigger_value = value;
    }
}
