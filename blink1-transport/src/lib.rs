//! Transport layer for blink(1) USB notification lights
//!
//! This crate owns everything that touches the wire:
//!
//! - The `Transport` trait (feature report write/read over a HID control channel)
//! - A hidapi-backed implementation and device discovery
//! - The 9-byte feature report codec (typed commands and reply parsers)
//! - A monitoring middleware that prints every report passing through

pub mod command;
pub mod error;
pub mod monitor;
pub mod protocol;
pub mod types;

mod discovery;
mod hid;

pub use command::{
    try_parse_command, ColorReply, Deciseconds, FadeToColor, FirmwareVersion, GetVersion,
    HidCommand, HidResponse, ParseError, ParsedCommand, PatternLineReply, PlayLoop, PlayState,
    ReadColor, ReadPatternLine, ReadPlayState, Rgb, SavePattern, ServerDown, SetColor, SetLed,
    WritePatternLine,
};
pub use discovery::{list_serials, DeviceDiscovery, HidDiscovery};
pub use error::TransportError;
pub use hid::HidTransport;
pub use monitor::{CommandFilter, MonitorConfig, MonitorTransport};
pub use protocol::{FeatureReport, PRODUCT_ID, REPORT_ID, REPORT_LENGTH, VENDOR_ID};
pub use types::{DiscoveredDevice, TransportDeviceInfo};

/// The core transport trait - every backend implements this
///
/// A transport is a single HID control channel. It has no request/response
/// correlation, so callers must not interleave a write and its follow-up read
/// with another operation on the same handle.
pub trait Transport: Send + Sync {
    /// Write one complete feature report (report ID in byte 0)
    fn write_feature_report(&self, report: &[u8]) -> Result<(), TransportError>;

    /// Read one feature report of `len` bytes for `report_id`
    ///
    /// Blocks until the device answers or the backend's own timeout fires.
    /// The returned buffer includes the report ID in byte 0.
    fn read_feature_report(&self, report_id: u8, len: usize) -> Result<Vec<u8>, TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;

    /// Release the underlying handle
    fn close(&self) -> Result<(), TransportError>;
}

/// Type alias for a boxed transport
pub type BoxedTransport = Box<dyn Transport>;
