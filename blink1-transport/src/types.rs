//! Common types for transport layer

use serde::Serialize;

/// Device identification information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Device path (hidapi path string)
    pub device_path: String,
    /// Serial number, empty if the device did not report one
    pub serial: String,
    /// Product name if available
    pub product_name: Option<String>,
}

/// Discovered device that can be opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredDevice {
    /// Serial number string, empty if unavailable
    pub serial: String,
    /// Platform path used to open the device
    pub path: String,
    /// Product name if available
    pub product_name: Option<String>,
}

impl DiscoveredDevice {
    /// Build the info block a transport reports once this device is opened
    pub fn to_info(&self, vid: u16, pid: u16) -> TransportDeviceInfo {
        TransportDeviceInfo {
            vid,
            pid,
            device_path: self.path.clone(),
            serial: self.serial.clone(),
            product_name: self.product_name.clone(),
        }
    }
}
