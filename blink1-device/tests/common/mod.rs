//! In-memory transport and discovery used by the session tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use blink1_device::Blink1;
use blink1_transport::{
    BoxedTransport, DeviceDiscovery, DiscoveredDevice, Transport, TransportDeviceInfo,
    TransportError,
};

pub const SERIAL_1: &str = "1A001407";
pub const SERIAL_2: &str = "1A001408";
pub const PATH_1: &str = "path_1A001407";
pub const PATH_2: &str = "path_1A001408";

/// Shared view of everything the mock transport saw
#[derive(Default)]
pub struct Wire {
    pub sent: Vec<Vec<u8>>,
    pub reads: Vec<(u8, usize)>,
    pub replies: VecDeque<Vec<u8>>,
    pub closed: bool,
    pub fail_writes: bool,
}

pub struct MockTransport {
    wire: Arc<Mutex<Wire>>,
    info: TransportDeviceInfo,
}

impl Transport for MockTransport {
    fn write_feature_report(&self, report: &[u8]) -> Result<(), TransportError> {
        let mut wire = self.wire.lock().unwrap();
        if wire.fail_writes {
            return Err(TransportError::Disconnected);
        }
        wire.sent.push(report.to_vec());
        Ok(())
    }

    fn read_feature_report(&self, report_id: u8, len: usize) -> Result<Vec<u8>, TransportError> {
        let mut wire = self.wire.lock().unwrap();
        wire.reads.push((report_id, len));
        wire.replies.pop_front().ok_or(TransportError::Disconnected)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    fn close(&self) -> Result<(), TransportError> {
        self.wire.lock().unwrap().closed = true;
        Ok(())
    }
}

pub fn device(serial: &str, path: &str) -> DiscoveredDevice {
    DiscoveredDevice {
        serial: serial.to_string(),
        path: path.to_string(),
        product_name: Some("blink(1) mk2".to_string()),
    }
}

/// Discovery over a fixed device list; records which path was opened
pub struct MockDiscovery {
    pub devices: Vec<DiscoveredDevice>,
    pub wire: Arc<Mutex<Wire>>,
    pub opened: Mutex<Option<String>>,
}

impl MockDiscovery {
    pub fn new(devices: Vec<DiscoveredDevice>) -> Self {
        Self {
            devices,
            wire: Arc::new(Mutex::new(Wire::default())),
            opened: Mutex::new(None),
        }
    }
}

impl DeviceDiscovery for MockDiscovery {
    fn list_devices(&self, vid: u16, pid: u16) -> Result<Vec<DiscoveredDevice>, TransportError> {
        assert_eq!((vid, pid), (0x27B8, 0x01ED));
        Ok(self.devices.clone())
    }

    fn open(
        &self,
        device: &DiscoveredDevice,
        vid: u16,
        pid: u16,
    ) -> Result<BoxedTransport, TransportError> {
        *self.opened.lock().unwrap() = Some(device.path.clone());
        Ok(Box::new(MockTransport {
            wire: Arc::clone(&self.wire),
            info: device.to_info(vid, pid),
        }))
    }
}

/// A session on a single mock device plus a handle to its wire
pub fn open_mock() -> (Blink1, Arc<Mutex<Wire>>) {
    let discovery = MockDiscovery::new(vec![device(SERIAL_1, PATH_1)]);
    let wire = Arc::clone(&discovery.wire);
    let blink = Blink1::open_with(&discovery, None).unwrap();
    (blink, wire)
}

pub fn last_sent(wire: &Arc<Mutex<Wire>>) -> Vec<u8> {
    wire.lock().unwrap().sent.last().cloned().unwrap_or_default()
}

pub fn push_reply(wire: &Arc<Mutex<Wire>>, reply: &[u8]) {
    wire.lock().unwrap().replies.push_back(reply.to_vec());
}
