//! Monitoring middleware for transport traffic
//!
//! Wraps any `Transport` and prints every feature report passing through it,
//! decoded to its command name, to stderr.
//!
//! # Example
//!
//! ```ignore
//! use blink1_transport::{MonitorConfig, MonitorTransport};
//!
//! let transport = discovery.open(&device, VENDOR_ID, PRODUCT_ID)?;
//! let monitored = MonitorTransport::wrap(transport, MonitorConfig::default().with_hex(true));
//! ```

use std::str::FromStr;

use crossterm::style::Stylize;

use crate::command::{try_parse_command, ParsedCommand};
use crate::protocol::cmd;
use crate::{BoxedTransport, Transport, TransportDeviceInfo, TransportError};

/// Report filter for selective display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandFilter {
    #[default]
    All,
    /// Outgoing reports only
    Writes,
    /// Replies only
    Reads,
    /// A single command code
    Code(u8),
}

impl FromStr for CommandFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "writes" | "write" | "out" => Ok(Self::Writes),
            "reads" | "read" | "in" => Ok(Self::Reads),
            _ => {
                // Codes are case sensitive ('p' vs 'P'), so use the raw input
                let raw = s.strip_prefix("cmd=").unwrap_or(s);
                if let Some(hex) = raw.strip_prefix("0x") {
                    return u8::from_str_radix(hex, 16)
                        .map(Self::Code)
                        .map_err(|e| format!("Invalid command byte: {e}"));
                }
                match raw.as_bytes() {
                    [code] => Ok(Self::Code(*code)),
                    _ => Err(format!("Unknown filter: {s}")),
                }
            }
        }
    }
}

/// Configuration for the monitor
#[derive(Debug, Clone, Default)]
pub struct MonitorConfig {
    /// Show raw hex dump alongside decoded output
    pub show_hex: bool,
    /// Filter for selective display
    pub filter: CommandFilter,
}

impl MonitorConfig {
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    pub fn with_filter(mut self, filter: CommandFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Transport middleware that prints all reports
pub struct MonitorTransport {
    inner: BoxedTransport,
    config: MonitorConfig,
    /// Command code of the last write, used to label the reply
    last_code: parking_lot::Mutex<u8>,
}

impl MonitorTransport {
    /// Wrap a transport with the monitor
    pub fn wrap(transport: BoxedTransport, config: MonitorConfig) -> BoxedTransport {
        Box::new(Self {
            inner: transport,
            config,
            last_code: parking_lot::Mutex::new(0),
        })
    }

    fn should_show(&self, code: u8, outgoing: bool) -> bool {
        match self.config.filter {
            CommandFilter::All => true,
            CommandFilter::Writes => outgoing,
            CommandFilter::Reads => !outgoing,
            CommandFilter::Code(c) => c == code,
        }
    }

    fn print_write(&self, report: &[u8]) {
        let code = report.get(1).copied().unwrap_or(0);
        if !self.should_show(code, true) {
            return;
        }

        match try_parse_command(report) {
            ParsedCommand::Unknown { code, args } => {
                eprintln!(
                    "{} {}  0x{:02x} {} {:02x?}",
                    ">>>".cyan(),
                    "CMD".cyan().bold(),
                    code,
                    cmd::name(code).yellow(),
                    args
                );
            }
            parsed => {
                let marker = if cmd::expects_reply(code) { " ..." } else { "" };
                eprintln!(
                    "{} {}  {:?}{}",
                    ">>>".cyan(),
                    "CMD".cyan().bold(),
                    parsed,
                    marker.dim()
                );
            }
        }

        if self.config.show_hex {
            eprintln!("    {}  {:02x?}", "HEX".dim(), report);
        }
    }

    fn print_read(&self, code: u8, reply: &[u8]) {
        if !self.should_show(code, false) {
            return;
        }

        eprintln!(
            "{} {}  {} {:02x?}",
            "<<<".green(),
            "RSP".green().bold(),
            cmd::name(code).yellow(),
            reply.get(2..).unwrap_or_default()
        );

        if self.config.show_hex {
            eprintln!("    {}  {:02x?}", "HEX".dim(), reply);
        }
    }
}

impl Transport for MonitorTransport {
    fn write_feature_report(&self, report: &[u8]) -> Result<(), TransportError> {
        self.print_write(report);
        *self.last_code.lock() = report.get(1).copied().unwrap_or(0);
        self.inner.write_feature_report(report)
    }

    fn read_feature_report(&self, report_id: u8, len: usize) -> Result<Vec<u8>, TransportError> {
        let reply = self.inner.read_feature_report(report_id, len)?;
        self.print_read(*self.last_code.lock(), &reply);
        Ok(reply)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        self.inner.device_info()
    }

    fn close(&self) -> Result<(), TransportError> {
        self.inner.close()
    }
}
