use rusb::Error as UsbLibError;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    WriteRequest {
        source: UsbLibError,
        context: &'static str,
    },
    ReadResponse {
        source: UsbLibError,
        context: &'static str,
    },
    OpcodeMismatch {
        expected: u8,
        actual: u8,
    },
    SequenceMismatch {
        expected: u8,
        actual: u8,
    },
    TruncatedResponse {
        expected: usize,
        actual: usize,
    },
    MalformedHistogram(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WriteRequest { source, context } => {
                write!(f, "error sending {context} request: {source}")
            }
            Error::ReadResponse { source, context } => {
                write!(f, "error receiving {context} response: {source}")
            }
            Error::OpcodeMismatch { expected, actual } => write!(
                f,
                "op code error in response (expected {expected:#04x}, found {actual:#04x})"
            ),
            Error::SequenceMismatch { expected, actual } => write!(
                f,
                "sequence number error in response (expected {expected}, found {actual})"
            ),
            Error::TruncatedResponse { expected, actual } => write!(
                f,
                "response too short (expected {expected} bytes, found {actual})"
            ),
            Error::MalformedHistogram(reason) => write!(f, "malformed histogram: {reason}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::WriteRequest { source, .. } | Error::ReadResponse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    /// True when the underlying transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::WriteRequest {
                source: UsbLibError::Timeout,
                ..
            } | Error::ReadResponse {
                source: UsbLibError::Timeout,
                ..
            }
        )
    }
}
