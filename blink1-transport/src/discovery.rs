//! Device discovery for blink(1) lights

use std::ffi::CString;

use hidapi::HidApi;
use tracing::debug;

use crate::error::TransportError;
use crate::hid::HidTransport;
use crate::types::DiscoveredDevice;
use crate::BoxedTransport;

/// Device discovery abstraction
pub trait DeviceDiscovery {
    /// List attached devices matching a VID/PID pair, in enumeration order
    fn list_devices(&self, vid: u16, pid: u16) -> Result<Vec<DiscoveredDevice>, TransportError>;

    /// Open a previously listed device
    fn open(
        &self,
        device: &DiscoveredDevice,
        vid: u16,
        pid: u16,
    ) -> Result<BoxedTransport, TransportError>;
}

/// hidapi-backed discovery
///
/// A fresh `HidApi` context is created per call so the device list always
/// reflects what is plugged in right now.
#[derive(Debug, Default, Clone, Copy)]
pub struct HidDiscovery;

impl HidDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceDiscovery for HidDiscovery {
    fn list_devices(&self, vid: u16, pid: u16) -> Result<Vec<DiscoveredDevice>, TransportError> {
        let api = HidApi::new()?;
        let mut devices = Vec::new();

        for info in api.device_list() {
            if info.vendor_id() != vid || info.product_id() != pid {
                continue;
            }

            let device = DiscoveredDevice {
                serial: info.serial_number().unwrap_or_default().to_string(),
                path: info.path().to_string_lossy().to_string(),
                product_name: info.product_string().map(|s| s.to_string()),
            };
            debug!(
                "Found device: VID={:04X} PID={:04X} serial={} path={}",
                vid, pid, device.serial, device.path
            );
            devices.push(device);
        }

        Ok(devices)
    }

    fn open(
        &self,
        device: &DiscoveredDevice,
        vid: u16,
        pid: u16,
    ) -> Result<BoxedTransport, TransportError> {
        let api = HidApi::new()?;
        let path = CString::new(device.path.as_str())
            .map_err(|e| TransportError::Internal(format!("invalid device path: {e}")))?;
        let handle = api.open_path(&path)?;
        Ok(Box::new(HidTransport::new(handle, device.to_info(vid, pid))))
    }
}

/// Serial numbers of every attached device matching the VID/PID pair
pub fn list_serials(
    discovery: &dyn DeviceDiscovery,
    vid: u16,
    pid: u16,
) -> Result<Vec<String>, TransportError> {
    Ok(discovery
        .list_devices(vid, pid)?
        .into_iter()
        .map(|d| d.serial)
        .collect())
}
