use crate::config::Config;
use crate::constants;
use crate::error::{Error, Result};
use crate::frame::{self, RegisterAddress, RegisterValue};
use crate::histogram::HistogramBlock;
use crate::transport::{Endpoint, Transport};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Register and histogram protocol engine for one FX2-bridged board.
///
/// The device owns its transport, and every operation borrows it mutably, so
/// at most one request is ever outstanding. The board cannot tell concurrent
/// responses apart. Nothing is retried; each failure goes straight back to
/// the caller.
pub struct Device<T: Transport, R: Rng = StdRng> {
    transport: T,
    config: Config,
    rng: R,
}

impl<T: Transport> Device<T> {
    /// Wraps an opened transport with default settings and an entropy-seeded
    /// sequence generator.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Config::default(), StdRng::from_entropy())
    }
}

impl<T: Transport, R: Rng> Device<T, R> {
    pub fn with_config(transport: T, config: Config, rng: R) -> Self {
        Self {
            transport,
            config,
            rng,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn read_register(&mut self, address: RegisterAddress) -> Result<RegisterValue> {
        let (request, sequence) = frame::encode_read(address, &mut self.rng);
        self.send_request(&request, "READ(addr)")?;
        let response = self.receive_response("READ(addr)")?;
        let value = frame::decode_read_response(&response, sequence)?;
        debug!("READ address({address:#06x}) = {value:#06x}");
        Ok(value)
    }

    pub fn write_register(&mut self, address: RegisterAddress, value: RegisterValue) -> Result<()> {
        let (request, sequence) = frame::encode_write(address, value, &mut self.rng);
        self.send_request(&request, "WRITE(addr,val)")?;
        let response = self.receive_response("WRITE(addr,val)")?;
        frame::decode_write_response(&response, sequence)?;
        debug!("WRITE address({address:#06x}) with value({value:#06x})");
        Ok(())
    }

    /// Triggers a capture and decodes the resulting stream.
    ///
    /// A device that sends nothing yields an empty block rather than an error.
    pub fn read_histogram(&mut self) -> Result<HistogramBlock> {
        let stream = self.capture_histogram_stream()?;
        HistogramBlock::decode(&stream)
    }

    /// Triggers a capture and returns the raw bulk stream, undecoded.
    ///
    /// The stream ends at the first failed or empty chunk read; with the
    /// default settings that is the first 100 ms of silence on the data
    /// endpoint.
    pub fn capture_histogram_stream(&mut self) -> Result<Vec<u8>> {
        self.write_register(self.config.trigger_address(), self.config.trigger_value())?;

        let mut stream = Vec::new();
        let mut chunks = 0usize;
        loop {
            match self.transport.read(
                Endpoint::Data,
                self.config.chunk_size(),
                self.config.chunk_timeout(),
            ) {
                Ok(chunk) if chunk.is_empty() => {
                    debug!("histogram stream ended on empty chunk");
                    break;
                }
                Ok(chunk) => {
                    stream.extend_from_slice(&chunk);
                    chunks += 1;
                }
                Err(err) => {
                    debug!("histogram stream ended: {err}");
                    break;
                }
            }
        }

        debug!("{} bytes read in {chunks} chunks", stream.len());
        Ok(stream)
    }

    /// Drains stale bytes from the response endpoint, returning how many were
    /// discarded. Useful right after opening a board left mid-conversation.
    pub fn clear_bus(&mut self) -> usize {
        let mut discarded = 0;
        while let Ok(bytes) =
            self.transport
                .read(Endpoint::Response, 1, self.config.chunk_timeout())
        {
            if bytes.is_empty() {
                break;
            }
            discarded += bytes.len();
        }
        if discarded > 0 {
            debug!("cleared {discarded} stale bytes from response endpoint");
        }
        discarded
    }

    fn send_request(&mut self, request: &[u8], context: &'static str) -> Result<()> {
        self.transport
            .write(Endpoint::Control, request)
            .map_err(|source| Error::WriteRequest { source, context })
    }

    fn receive_response(&mut self, context: &'static str) -> Result<Vec<u8>> {
        self.transport
            .read(
                Endpoint::Response,
                constants::RESPONSE_LEN,
                self.config.response_timeout(),
            )
            .map_err(|source| Error::ReadResponse { source, context })
    }
}
