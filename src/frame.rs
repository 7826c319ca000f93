//! Register request/response frames.
//!
//! Both directions share one layout: sequence byte first, opcode byte second,
//! then little-endian 16-bit payload fields.

use crate::constants;
use crate::error::{Error, Result};
use log::{trace, warn};
use rand::Rng;
use std::fmt;

pub type RegisterAddress = u16;
pub type RegisterValue = u16;

/// Correlates a response with the request that caused it. Always in `1..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sequence(u8);

impl Sequence {
    pub fn new(value: u8) -> Option<Self> {
        (1..=constants::SEQUENCE_MAX)
            .contains(&value)
            .then_some(Self(value))
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(1..=constants::SEQUENCE_MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Read = constants::OPCODE_READ,
    Write = constants::OPCODE_WRITE,
}

impl Opcode {
    fn name(self) -> &'static str {
        match self {
            Opcode::Read => "READ",
            Opcode::Write => "WRITE",
        }
    }
}

pub fn encode_read<R: Rng + ?Sized>(
    address: RegisterAddress,
    rng: &mut R,
) -> ([u8; constants::REQUEST_READ_LEN], Sequence) {
    let sequence = Sequence::generate(rng);
    let [addr_lo, addr_hi] = address.to_le_bytes();
    let frame = [sequence.get(), Opcode::Read as u8, addr_lo, addr_hi];
    trace!("encoded READ({address:#06x}) seq {sequence}: {frame:02x?}");
    (frame, sequence)
}

pub fn encode_write<R: Rng + ?Sized>(
    address: RegisterAddress,
    value: RegisterValue,
    rng: &mut R,
) -> ([u8; constants::REQUEST_WRITE_LEN], Sequence) {
    let sequence = Sequence::generate(rng);
    let [addr_lo, addr_hi] = address.to_le_bytes();
    let [val_lo, val_hi] = value.to_le_bytes();
    let frame = [
        sequence.get(),
        Opcode::Write as u8,
        addr_lo,
        addr_hi,
        val_lo,
        val_hi,
    ];
    trace!("encoded WRITE({address:#06x}, {value:#06x}) seq {sequence}: {frame:02x?}");
    (frame, sequence)
}

pub fn decode_read_response(response: &[u8], expected: Sequence) -> Result<RegisterValue> {
    let frame = validate(response, Opcode::Read, expected)?;
    Ok(u16::from_le_bytes([frame[2], frame[3]]))
}

pub fn decode_write_response(response: &[u8], expected: Sequence) -> Result<()> {
    validate(response, Opcode::Write, expected).map(|_| ())
}

/// Checks opcode before sequence, so a frame that is wrong in both reports
/// the opcode.
fn validate(response: &[u8], opcode: Opcode, expected: Sequence) -> Result<&[u8]> {
    if response.len() < constants::RESPONSE_LEN {
        return Err(Error::TruncatedResponse {
            expected: constants::RESPONSE_LEN,
            actual: response.len(),
        });
    }

    trace!("{} response: {:02x?}", opcode.name(), response);

    let (sequence, actual_opcode) = (response[0], response[1]);
    if actual_opcode != opcode as u8 {
        warn!(
            "{} response carries op code {actual_opcode:#04x}",
            opcode.name()
        );
        return Err(Error::OpcodeMismatch {
            expected: opcode as u8,
            actual: actual_opcode,
        });
    }

    if sequence != expected.get() {
        warn!(
            "{} response carries sequence {sequence}, expected {expected}",
            opcode.name()
        );
        return Err(Error::SequenceMismatch {
            expected: expected.get(),
            actual: sequence,
        });
    }

    Ok(&response[..constants::RESPONSE_LEN])
}
