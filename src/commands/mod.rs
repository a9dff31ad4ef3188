//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `query`: Read-only commands (list, version, read, play-state, read-line)
//! - `set`: Color and device setting commands (set, fade, set-led, server-down)
//! - `pattern`: Playback and pattern storage commands (play, pause, play-loop,
//!   write-line, save-pattern)

pub mod pattern;
pub mod query;
pub mod set;

use anyhow::{Context as _, Result};
use blink1_device::{select_device, Blink1, Numeric};
use blink1_transport::{
    CommandFilter, DeviceDiscovery, HidDiscovery, MonitorConfig, MonitorTransport, PRODUCT_ID,
    VENDOR_ID,
};
use blink1_tool::config::Blink1Config;
use tracing::debug;

use crate::cli::GammaArgs;

/// Create monitor config from CLI args
pub fn create_monitor_config(
    monitor: bool,
    hex: bool,
    filter: Option<&str>,
) -> Result<Option<MonitorConfig>> {
    if !monitor {
        return Ok(None);
    }

    let filter = match filter {
        Some(f) => f.parse::<CommandFilter>().map_err(anyhow::Error::msg)?,
        None => CommandFilter::All,
    };

    Ok(Some(MonitorConfig::default().with_hex(hex).with_filter(filter)))
}

/// Everything a handler needs besides its own arguments
pub struct Context {
    pub config: Blink1Config,
    serial: Option<String>,
    monitor: Option<MonitorConfig>,
}

impl Context {
    pub fn new(
        config: Blink1Config,
        serial: Option<String>,
        monitor: Option<MonitorConfig>,
    ) -> Self {
        Self {
            config,
            serial,
            monitor,
        }
    }

    /// Serial number to open, `--serial` first, then the config file
    pub fn serial(&self) -> Option<&str> {
        self.config.serial(self.serial.as_deref())
    }

    /// Open the selected device
    /// If monitoring is enabled, the transport is wrapped with the monitor.
    pub fn open(&self) -> Result<Blink1> {
        let serial = self.serial();
        debug!("Opening blink(1) serial={:?}", serial);

        let Some(monitor) = &self.monitor else {
            return Ok(Blink1::open(serial)?);
        };

        let discovery = HidDiscovery::new();
        let devices = discovery.list_devices(VENDOR_ID, PRODUCT_ID)?;
        let device = select_device(&devices, serial)?;
        let transport = discovery
            .open(device, VENDOR_ID, PRODUCT_ID)
            .with_context(|| format!("Failed to open {}", device.path))?;
        Ok(Blink1::from_transport(MonitorTransport::wrap(transport, monitor.clone())))
    }

    /// Open a device, run `f` against it, then close it
    pub fn with_device<T>(&self, f: impl FnOnce(&Blink1) -> Result<T>) -> Result<T> {
        let blink = self.open()?;
        let result = f(&blink);
        blink.close(())?;
        result
    }

    /// LED from the command line or the config default
    pub fn led(&self, led: Option<Numeric>) -> Numeric {
        led.unwrap_or_else(|| self.config.led.into())
    }

    /// Fade time from the command line or the config default
    pub fn fade_millis(&self, millis: Option<Numeric>) -> Numeric {
        millis.unwrap_or_else(|| self.config.fade_millis.into())
    }

    /// Whether colors skip gamma correction; command-line flags win
    pub fn gamma_adjust(&self, gamma: GammaArgs) -> bool {
        gamma.already_corrected(self.config.gamma_adjust)
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
