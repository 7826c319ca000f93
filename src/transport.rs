use crate::constants;
use std::time::Duration;

/// Endpoint roles used by the register and histogram protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Endpoint {
    /// Control-out: request frames.
    Control = constants::EP_CONTROL_OUT,
    /// Control-in: 4-byte response frames.
    Response = constants::EP_RESPONSE_IN,
    /// Bulk-in: histogram stream.
    Data = constants::EP_DATA_IN,
}

impl Endpoint {
    pub fn address(self) -> u8 {
        self as u8
    }
}

/// Byte-stream access to an opened and configured device.
///
/// The caller owns discovery and interface setup; implementations only move
/// bytes. A failed or timed-out read is reported as an error, never as a
/// short buffer.
pub trait Transport {
    fn write(&mut self, endpoint: Endpoint, data: &[u8]) -> Result<(), rusb::Error>;

    fn read(
        &mut self,
        endpoint: Endpoint,
        max_len: usize,
        timeout: Duration,
    ) -> Result<Vec<u8>, rusb::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, endpoint: Endpoint, data: &[u8]) -> Result<(), rusb::Error> {
        (**self).write(endpoint, data)
    }

    fn read(
        &mut self,
        endpoint: Endpoint,
        max_len: usize,
        timeout: Duration,
    ) -> Result<Vec<u8>, rusb::Error> {
        (**self).read(endpoint, max_len, timeout)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;

    /// What the next read on a given endpoint should produce.
    #[derive(Debug)]
    pub(crate) enum Reply {
        Bytes(Vec<u8>),
        /// Echo the sequence byte of the most recent request, followed by these bytes.
        Echo([u8; 3]),
        Fail(rusb::Error),
    }

    /// Scripted transport: records writes and replays queued reads. An
    /// exhausted queue behaves like a timeout.
    #[derive(Debug, Default)]
    pub(crate) struct MockTransport {
        pub writes: Vec<(Endpoint, Vec<u8>)>,
        pub reads: Vec<(Endpoint, usize, Duration)>,
        pub fail_writes: Option<rusb::Error>,
        response: VecDeque<Reply>,
        data: VecDeque<Reply>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_response(&mut self, reply: Reply) -> &mut Self {
            self.response.push_back(reply);
            self
        }

        pub fn push_data(&mut self, reply: Reply) -> &mut Self {
            self.data.push_back(reply);
            self
        }

        fn last_sequence(&self) -> u8 {
            self.writes
                .iter()
                .rev()
                .find(|(endpoint, _)| *endpoint == Endpoint::Control)
                .map(|(_, frame)| frame[0])
                .unwrap_or(0)
        }
    }

    impl Transport for MockTransport {
        fn write(&mut self, endpoint: Endpoint, data: &[u8]) -> Result<(), rusb::Error> {
            if let Some(err) = self.fail_writes {
                return Err(err);
            }
            self.writes.push((endpoint, data.to_vec()));
            Ok(())
        }

        fn read(
            &mut self,
            endpoint: Endpoint,
            max_len: usize,
            timeout: Duration,
        ) -> Result<Vec<u8>, rusb::Error> {
            self.reads.push((endpoint, max_len, timeout));
            let queue = match endpoint {
                Endpoint::Data => &mut self.data,
                _ => &mut self.response,
            };
            match queue.pop_front() {
                Some(Reply::Bytes(mut bytes)) => {
                    bytes.truncate(max_len);
                    Ok(bytes)
                }
                Some(Reply::Echo(tail)) => {
                    let mut bytes = vec![self.last_sequence()];
                    bytes.extend_from_slice(&tail);
                    bytes.truncate(max_len);
                    Ok(bytes)
                }
                Some(Reply::Fail(err)) => Err(err),
                None => Err(rusb::Error::Timeout),
            }
        }
    }
}
