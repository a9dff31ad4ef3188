//! hidapi transport for a directly attached blink(1)

use hidapi::HidDevice;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// HID transport over the device's feature-report control channel
///
/// The handle is dropped on `close`; any later call fails with
/// `TransportError::Closed` instead of touching a stale handle.
pub struct HidTransport {
    device: Mutex<Option<HidDevice>>,
    info: TransportDeviceInfo,
}

impl HidTransport {
    /// Wrap an opened hidapi device
    pub fn new(device: HidDevice, info: TransportDeviceInfo) -> Self {
        Self {
            device: Mutex::new(Some(device)),
            info,
        }
    }
}

impl Transport for HidTransport {
    fn write_feature_report(&self, report: &[u8]) -> Result<(), TransportError> {
        let guard = self.device.lock();
        let device = guard.as_ref().ok_or(TransportError::Closed)?;
        debug!("Sending feature report: {:02X?}", report);
        device.send_feature_report(report)?;
        Ok(())
    }

    fn read_feature_report(&self, report_id: u8, len: usize) -> Result<Vec<u8>, TransportError> {
        let guard = self.device.lock();
        let device = guard.as_ref().ok_or(TransportError::Closed)?;
        let mut buf = vec![0u8; len];
        if let Some(first) = buf.first_mut() {
            *first = report_id;
        }
        let n = device.get_feature_report(&mut buf)?;
        if n < len {
            warn!("Feature report {report_id} returned {n} of {len} bytes");
            return Err(TransportError::ShortRead {
                expected: len,
                got: n,
            });
        }
        debug!("Received feature report: {:02X?}", buf);
        Ok(buf)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    fn close(&self) -> Result<(), TransportError> {
        // HidDevice releases the OS handle on drop
        match self.device.lock().take() {
            Some(_) => {
                debug!("Closed {}", self.info.device_path);
                Ok(())
            }
            None => Err(TransportError::Closed),
        }
    }
}
