//! Device ids, endpoint addresses and wire-level constants.

/// Cypress FX2 vendor id.
pub const FX2_VID: u16 = 0x04b4;
/// Cypress FX2 product id.
pub const FX2_PID: u16 = 0x8613;

pub const EP_CONTROL_OUT: u8 = 0x02;
pub const EP_RESPONSE_IN: u8 = 0x86;
pub const EP_DATA_IN: u8 = 0x88;

pub const OPCODE_READ: u8 = 0x20;
pub const OPCODE_WRITE: u8 = 0x10;

/// Largest sequence number; sequence numbers live in `1..=SEQUENCE_MAX`.
pub const SEQUENCE_MAX: u8 = 15;

pub const REQUEST_READ_LEN: usize = 4;
pub const REQUEST_WRITE_LEN: usize = 6;
pub const RESPONSE_LEN: usize = 4;

/// Writing [`HISTOGRAM_TRIGGER_VALUE`] here starts a capture.
pub const HISTOGRAM_TRIGGER_ADDRESS: u16 = 0x0002;
pub const HISTOGRAM_TRIGGER_VALUE: u16 = 0x0001;

/// Padding word inserted by the capture hardware.
pub const HISTOGRAM_SENTINEL: u16 = 0x8000;
/// Number of trailing words holding the capture metadata.
pub const HISTOGRAM_METADATA_WORDS: usize = 9;
/// Seconds per tick of the dead-time and measurement counters.
pub const HISTOGRAM_TICK_SECONDS: f64 = 10e-8;

pub const DEFAULT_CHUNK_SIZE: usize = 1024;
pub const DEFAULT_CHUNK_TIMEOUT_MS: u64 = 100;
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 1_000;
