//! Device interface error types

use blink1_transport::{ParseError, TransportError};
use thiserror::Error;

/// Errors from blink(1) operations
///
/// Validation variants are always raised before any report is written.
#[derive(Error, Debug)]
pub enum Blink1Error {
    /// Argument is not numeric (or is NaN / infinite)
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    /// Argument outside its inclusive range
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Play range with start after end
    #[error("start position {start} must be less than or equal to end position {end}")]
    PositionOrder { start: u8, end: u8 },

    /// No matching hardware at open time
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Transport layer error, passed through unchanged
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Device returned a malformed reply
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(#[from] ParseError),
}

impl Blink1Error {
    /// True for errors raised before any I/O took place
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotANumber { .. } | Self::OutOfRange { .. } | Self::PositionOrder { .. }
        )
    }

    /// True when no device matched at open time
    pub fn is_device_not_found(&self) -> bool {
        matches!(self, Self::DeviceNotFound(_))
    }
}
