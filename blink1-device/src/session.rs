//! Device session: one opened blink(1) and the operations it supports

use blink1_transport::protocol::{PRODUCT_ID, REPORT_ID, REPORT_LENGTH, VENDOR_ID};
use blink1_transport::{
    BoxedTransport, ColorReply, Deciseconds, DeviceDiscovery, DiscoveredDevice, FadeToColor,
    FirmwareVersion, GetVersion, HidCommand, HidDiscovery, HidResponse, PatternLineReply,
    PlayLoop, PlayState, ReadColor, ReadPatternLine, ReadPlayState, Rgb, SavePattern, ServerDown,
    SetColor, SetLed, TransportDeviceInfo, WritePatternLine,
};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::call::{complete, Call};
use crate::color::wire_color;
use crate::error::Blink1Error;
use crate::options::{
    ColorOptions, FadeOptions, LedOptions, PatternLineOptions, PlayLoopOptions,
    ReadPatternOptions, ServerDownOptions,
};
use crate::validate;

/// One line of the device's stored animation, as read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PatternLine {
    /// Line index that was requested
    pub line_index: u8,
    pub color: Rgb,
    pub fade_millis: u32,
    pub led: u8,
}

/// Pick the device to open
///
/// Without a serial number the first enumerated device is chosen.
pub fn select_device<'d>(
    devices: &'d [DiscoveredDevice],
    serial: Option<&str>,
) -> Result<&'d DiscoveredDevice, Blink1Error> {
    let first = devices.first().ok_or_else(|| {
        Blink1Error::DeviceNotFound("no blink(1) devices could be found".into())
    })?;

    match serial {
        None => Ok(first),
        Some(wanted) => devices.iter().find(|d| d.serial == wanted).ok_or_else(|| {
            Blink1Error::DeviceNotFound(format!(
                "no blink(1) with serial number {wanted} could be found"
            ))
        }),
    }
}

/// Serial numbers of all attached blink(1) devices
pub fn list_serials() -> Result<Vec<String>, Blink1Error> {
    Ok(blink1_transport::list_serials(
        &HidDiscovery::new(),
        VENDOR_ID,
        PRODUCT_ID,
    )?)
}

/// An opened blink(1)
///
/// Operations validate their arguments, write one feature report and, for
/// read-style operations, read one reply. The write/read pair is serialized
/// per session since the control channel cannot correlate replies.
pub struct Blink1 {
    transport: BoxedTransport,
    serial: String,
    io_lock: Mutex<()>,
}

impl Blink1 {
    /// Open the first blink(1), or the one with the given serial number
    pub fn open(serial: Option<&str>) -> Result<Self, Blink1Error> {
        Self::open_with(&HidDiscovery::new(), serial)
    }

    /// Open through a specific discovery backend
    pub fn open_with(
        discovery: &dyn DeviceDiscovery,
        serial: Option<&str>,
    ) -> Result<Self, Blink1Error> {
        let devices = discovery.list_devices(VENDOR_ID, PRODUCT_ID)?;
        let device = select_device(&devices, serial)?;
        let transport = discovery.open(device, VENDOR_ID, PRODUCT_ID)?;
        Ok(Self::from_transport(transport))
    }

    /// Wrap an already opened transport
    pub fn from_transport(transport: BoxedTransport) -> Self {
        let serial = transport.device_info().serial.clone();
        info!(
            "Opened blink(1) serial={} path={}",
            serial,
            transport.device_info().device_path
        );
        Self {
            transport,
            serial,
            io_lock: Mutex::new(()),
        }
    }

    /// Serial number chosen at open time
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Get device information
    pub fn device_info(&self) -> &TransportDeviceInfo {
        self.transport.device_info()
    }

    fn send<C: HidCommand>(&self, command: &C) -> Result<(), Blink1Error> {
        let report = command.build();
        let _io = self.io_lock.lock();
        self.transport.write_feature_report(&report)?;
        Ok(())
    }

    fn query<C: HidCommand, R: HidResponse>(&self, command: &C) -> Result<R, Blink1Error> {
        let report = command.build();
        let _io = self.io_lock.lock();
        self.transport.write_feature_report(&report)?;
        let reply = self.transport.read_feature_report(REPORT_ID, REPORT_LENGTH)?;
        debug!("Reply to '{}': {:02X?}", char::from(C::CODE), reply);
        Ok(R::parse(&reply)?)
    }

    // === Color ===

    /// Set a color immediately (`n`)
    pub fn set_color<'a>(
        &self,
        call: impl Into<Call<'a, ColorOptions, ()>>,
    ) -> Result<(), Blink1Error> {
        let (opts, callback) = call.into().into_parts();
        let color = Rgb::new(
            validate::channel(&opts.r, "r")?,
            validate::channel(&opts.g, "g")?,
            validate::channel(&opts.b, "b")?,
        );
        let led = validate::led_index(&opts.led)?;

        let command = SetColor::new(wire_color(color, opts.gamma_adjust), led);
        debug!("set_color {color} led={led}");
        self.send(&command)?;
        complete(callback, &());
        Ok(())
    }

    /// Fade to a color (`c`); a zero duration still takes one tick
    pub fn fade_to_color<'a>(
        &self,
        call: impl Into<Call<'a, FadeOptions, ()>>,
    ) -> Result<(), Blink1Error> {
        let (opts, callback) = call.into().into_parts();
        let fade_millis = validate::millis(&opts.fade_millis, "fade_millis")?;
        let color = Rgb::new(
            validate::channel(&opts.r, "r")?,
            validate::channel(&opts.g, "g")?,
            validate::channel(&opts.b, "b")?,
        );
        let led = validate::led_index(&opts.led)?;

        let command = FadeToColor::new(
            wire_color(color, opts.gamma_adjust),
            Deciseconds::from_millis(fade_millis).at_least_one_tick(),
            led,
        );
        debug!("fade_to_color {color} over {fade_millis}ms led={led}");
        self.send(&command)?;
        complete(callback, &());
        Ok(())
    }

    /// Read the color an LED is currently showing (`r`)
    pub fn read_current_color<'a>(
        &self,
        call: impl Into<Call<'a, LedOptions, ColorReply>>,
    ) -> Result<ColorReply, Blink1Error> {
        let (opts, callback) = call.into().into_parts();
        let led = validate::led_index(&opts.led)?;

        let reply: ColorReply = self.query(&ReadColor { led })?;
        complete(callback, &reply);
        Ok(reply)
    }

    /// Select the LED later commands act on (`l`)
    pub fn set_led<'a>(
        &self,
        call: impl Into<Call<'a, LedOptions, ()>>,
    ) -> Result<(), Blink1Error> {
        let (opts, callback) = call.into().into_parts();
        let led = validate::led_index(&opts.led)?;

        self.send(&SetLed { led })?;
        complete(callback, &());
        Ok(())
    }

    // === Watchdog ===

    /// Arm (`on = 1`) or disarm the server-down watchdog (`D`)
    ///
    /// The timeout is enforced by the firmware; the host only has to keep
    /// re-arming it.
    pub fn server_down<'a>(
        &self,
        call: impl Into<Call<'a, ServerDownOptions, ()>>,
    ) -> Result<(), Blink1Error> {
        let (opts, callback) = call.into().into_parts();
        let millis = validate::millis(&opts.millis, "millis")?;
        let on = validate::bit(&opts.on, "on")?;

        let command = ServerDown {
            on,
            timeout: Deciseconds::from_millis(millis),
        };
        debug!("server_down on={on} timeout={millis}ms");
        self.send(&command)?;
        complete(callback, &());
        Ok(())
    }

    // === Playback ===

    /// Play or stop a range of pattern lines (`p`)
    pub fn play_loop<'a>(
        &self,
        call: impl Into<Call<'a, PlayLoopOptions, ()>>,
    ) -> Result<(), Blink1Error> {
        let (opts, callback) = call.into().into_parts();
        let start = validate::position(&opts.start_position, "start_position")?;
        let end = validate::position(&opts.end_position, "end_position")?;
        let count = validate::count(&opts.count)?;
        let play = validate::bit(&opts.play, "play")?;
        validate::ensure_ordered(start, end)?;

        self.send(&PlayLoop {
            play,
            start,
            end,
            count,
        })?;
        complete(callback, &());
        Ok(())
    }

    /// Start pattern playback
    pub fn play<'a>(&self, call: impl Into<Call<'a, (), ()>>) -> Result<(), Blink1Error> {
        let (_, callback) = call.into().into_parts();
        self.send(&PlayLoop::play())?;
        complete(callback, &());
        Ok(())
    }

    /// Stop pattern playback
    pub fn pause<'a>(&self, call: impl Into<Call<'a, (), ()>>) -> Result<(), Blink1Error> {
        let (_, callback) = call.into().into_parts();
        self.send(&PlayLoop::pause())?;
        complete(callback, &());
        Ok(())
    }

    /// Read playback state (`S`)
    pub fn read_play_state<'a>(
        &self,
        call: impl Into<Call<'a, (), PlayState>>,
    ) -> Result<PlayState, Blink1Error> {
        let (_, callback) = call.into().into_parts();
        let state: PlayState = self.query(&ReadPlayState)?;
        complete(callback, &state);
        Ok(state)
    }

    // === Pattern storage ===

    /// Write one pattern line to RAM (`P`); lost on power cycle until saved
    pub fn write_pattern_line<'a>(
        &self,
        call: impl Into<Call<'a, PatternLineOptions, ()>>,
    ) -> Result<(), Blink1Error> {
        let (opts, callback) = call.into().into_parts();
        let fade_millis = validate::millis(&opts.fade_millis, "fade_millis")?;
        let color = Rgb::new(
            validate::channel(&opts.r, "r")?,
            validate::channel(&opts.g, "g")?,
            validate::channel(&opts.b, "b")?,
        );
        let line = validate::position(&opts.line_index, "line_index")?;

        let command = WritePatternLine {
            color: wire_color(color, opts.gamma_adjust),
            fade: Deciseconds::from_millis(fade_millis),
            line,
        };
        debug!("write_pattern_line {line}: {color} over {fade_millis}ms");
        self.send(&command)?;
        complete(callback, &());
        Ok(())
    }

    /// Commit the pattern table to flash (`W`)
    pub fn persist_pattern<'a>(
        &self,
        call: impl Into<Call<'a, (), ()>>,
    ) -> Result<(), Blink1Error> {
        let (_, callback) = call.into().into_parts();
        self.send(&SavePattern)?;
        info!("Pattern saved to flash on {}", self.serial);
        complete(callback, &());
        Ok(())
    }

    /// Read one pattern line (`R`)
    pub fn read_pattern_line<'a>(
        &self,
        call: impl Into<Call<'a, ReadPatternOptions, PatternLine>>,
    ) -> Result<PatternLine, Blink1Error> {
        let (opts, callback) = call.into().into_parts();
        let line_index = validate::position(&opts.line_index, "line_index")?;

        let reply: PatternLineReply = self.query(&ReadPatternLine { line: line_index })?;
        let line = PatternLine {
            line_index,
            color: reply.color,
            fade_millis: reply.fade_millis,
            led: reply.led,
        };
        complete(callback, &line);
        Ok(line)
    }

    // === Device info ===

    /// Firmware version as "major.minor" (`v`)
    pub fn version<'a>(
        &self,
        call: impl Into<Call<'a, (), String>>,
    ) -> Result<String, Blink1Error> {
        let (_, callback) = call.into().into_parts();
        let version: FirmwareVersion = self.query(&GetVersion)?;
        let version = version.to_string();
        complete(callback, &version);
        Ok(version)
    }

    /// Release the device handle
    pub fn close<'a>(self, call: impl Into<Call<'a, (), ()>>) -> Result<(), Blink1Error> {
        let (_, callback) = call.into().into_parts();
        self.transport.close()?;
        info!("Closed blink(1) serial={}", self.serial);
        complete(callback, &());
        Ok(())
    }
}
