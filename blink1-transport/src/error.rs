//! Transport error types

use thiserror::Error;

/// Errors that can occur during transport operations
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Device disconnected")]
    Disconnected,

    #[error("Transport already closed")]
    Closed,

    #[error("Short feature report: expected {expected} bytes, got {got}")]
    ShortRead { expected: usize, got: usize },

    // HID-specific errors
    #[error("HID error: {0}")]
    HidError(String),

    #[error("HID permission denied: {0}")]
    HidPermissionDenied(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<hidapi::HidError> for TransportError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        let lower = msg.to_lowercase();
        if msg.contains("Permission denied") || msg.contains("EPERM") {
            TransportError::HidPermissionDenied(msg)
        } else if lower.contains("no such device") || lower.contains("not connected") {
            // ENODEV on hidraw, kIOReturnNoDevice on macOS, ERROR_DEVICE_NOT_CONNECTED on Windows
            TransportError::Disconnected
        } else {
            TransportError::HidError(msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidapi::HidError;

    fn api_error(message: &str) -> TransportError {
        HidError::HidApiError {
            message: message.to_string(),
        }
        .into()
    }

    #[test]
    fn test_unplugged_device_is_disconnected() {
        assert!(matches!(api_error("No such device"), TransportError::Disconnected));
        assert!(matches!(
            api_error("The device is not connected."),
            TransportError::Disconnected
        ));
    }

    #[test]
    fn test_other_hid_errors() {
        assert!(matches!(
            api_error("Permission denied"),
            TransportError::HidPermissionDenied(_)
        ));
        assert!(matches!(api_error("Broken pipe"), TransportError::HidError(_)));
    }
}
