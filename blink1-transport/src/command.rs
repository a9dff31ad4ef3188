//! Type-safe feature report builders and reply parsers
//!
//! Every blink(1) command is a 9-byte feature report: report ID, an ASCII
//! command code, then up to seven argument bytes. This module maps each
//! command to its exact byte layout and decodes the replies of the read-style
//! commands, keeping the firmware quirks (decisecond time split, modulo-255
//! low byte) in one place.

use std::fmt;

use serde::Serialize;

use crate::protocol::{self, cmd, FeatureReport, PATTERN_COMMIT_MAGIC, REPORT_LENGTH};

// =============================================================================
// Core Traits
// =============================================================================

/// A command that can be serialized to a feature report
pub trait HidCommand {
    /// ASCII command code (byte 1 of the report)
    const CODE: u8;

    /// Argument bytes (bytes 2..9 of the report, unpadded)
    fn args(&self) -> Vec<u8>;

    /// Build the complete 9-byte feature report
    fn build(&self) -> FeatureReport {
        protocol::build_report(Self::CODE, &self.args())
    }
}

/// A reply that can be parsed from a feature report
pub trait HidResponse: Sized {
    /// Decode a full-length report (report ID in byte 0)
    fn from_report(report: &FeatureReport) -> Self;

    /// Parse with length validation
    fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let report: &FeatureReport = data
            .get(..REPORT_LENGTH)
            .and_then(|head| head.try_into().ok())
            .ok_or(ParseError::TooShort {
                expected: REPORT_LENGTH,
                got: data.len(),
            })?;
        Ok(Self::from_report(report))
    }
}

/// Parse error for replies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    TooShort { expected: usize, got: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { expected, got } => {
                write!(f, "Reply too short: expected {expected} bytes, got {got}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// Shared field types
// =============================================================================

/// RGB color as sent on the wire (already gamma-corrected if needed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fade or timeout duration in the firmware's native unit (1/10 s)
///
/// Sent as a big-endian pair whose low byte is taken modulo 255, not 256.
/// The firmware has always been driven this way, so the quirk is kept for
/// wire compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Deciseconds(pub u16);

impl Deciseconds {
    /// Convert milliseconds, truncating to whole deciseconds
    ///
    /// Values beyond the 16-bit range saturate at `u16::MAX`.
    pub fn from_millis(millis: u32) -> Self {
        Self(u16::try_from(millis / 10).unwrap_or(u16::MAX))
    }

    /// A fade must take at least one tick
    pub fn at_least_one_tick(self) -> Self {
        if self.0 == 0 {
            Self(1)
        } else {
            self
        }
    }

    /// Milliseconds this duration represents
    pub fn as_millis(self) -> u32 {
        u32::from(self.0) * 10
    }

    /// Wire encoding: `[value >> 8, value % 255]`
    pub fn to_wire(self) -> [u8; 2] {
        let hi = (self.0 >> 8) as u8;
        let lo = (self.0 % 255) as u8;
        [hi, lo]
    }

    /// Inverse of the wire split as the firmware reports it back, in milliseconds
    pub fn millis_from_wire(hi: u8, lo: u8) -> u32 {
        ((u32::from(hi) << 8) + u32::from(lo)) * 10
    }
}

// =============================================================================
// Color commands
// =============================================================================

/// `n` - set color immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetColor {
    pub color: Rgb,
    pub led: u8,
}

impl SetColor {
    pub fn new(color: Rgb, led: u8) -> Self {
        Self { color, led }
    }
}

impl HidCommand for SetColor {
    const CODE: u8 = cmd::SET_COLOR;

    fn args(&self) -> Vec<u8> {
        vec![self.color.r, self.color.g, self.color.b, 0, 0, self.led]
    }
}

/// `c` - fade to color over a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FadeToColor {
    pub color: Rgb,
    pub fade: Deciseconds,
    pub led: u8,
}

impl FadeToColor {
    pub fn new(color: Rgb, fade: Deciseconds, led: u8) -> Self {
        Self { color, fade, led }
    }
}

impl HidCommand for FadeToColor {
    const CODE: u8 = cmd::FADE_TO_COLOR;

    fn args(&self) -> Vec<u8> {
        let [hi, lo] = self.fade.at_least_one_tick().to_wire();
        vec![self.color.r, self.color.g, self.color.b, hi, lo, self.led]
    }
}

/// `r` - read the color currently shown by an LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadColor {
    pub led: u8,
}

impl HidCommand for ReadColor {
    const CODE: u8 = cmd::READ_COLOR;

    fn args(&self) -> Vec<u8> {
        vec![self.led, 0, 0, 0, 0, self.led]
    }
}

/// Reply to `r`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ColorReply {
    pub color: Rgb,
    pub led: u8,
}

impl HidResponse for ColorReply {
    fn from_report(report: &FeatureReport) -> Self {
        Self {
            color: Rgb::new(report[2], report[3], report[4]),
            led: report[7],
        }
    }
}

/// `l` - select the LED later single-LED commands act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetLed {
    pub led: u8,
}

impl HidCommand for SetLed {
    const CODE: u8 = cmd::SET_LED;

    fn args(&self) -> Vec<u8> {
        vec![self.led]
    }
}

// =============================================================================
// Watchdog
// =============================================================================

/// `D` - arm or disarm the server-down watchdog
///
/// When armed and not refreshed within `timeout`, the firmware starts playing
/// its stored pattern on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerDown {
    pub on: bool,
    pub timeout: Deciseconds,
}

impl HidCommand for ServerDown {
    const CODE: u8 = cmd::SERVER_DOWN;

    fn args(&self) -> Vec<u8> {
        let [hi, lo] = self.timeout.to_wire();
        vec![u8::from(self.on), hi, lo]
    }
}

// =============================================================================
// Pattern playback
// =============================================================================

/// `p` - start/stop playback, optionally over a line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayLoop {
    pub play: bool,
    pub start: u8,
    pub end: u8,
    pub count: u8,
}

impl PlayLoop {
    /// Resume playback with the firmware's current range
    pub fn play() -> Self {
        Self {
            play: true,
            ..Self::default()
        }
    }

    /// Stop playback
    pub fn pause() -> Self {
        Self::default()
    }
}

impl HidCommand for PlayLoop {
    const CODE: u8 = cmd::PLAY_LOOP;

    fn args(&self) -> Vec<u8> {
        vec![u8::from(self.play), self.start, self.end, self.count]
    }
}

/// `S` - read playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadPlayState;

impl HidCommand for ReadPlayState {
    const CODE: u8 = cmd::READ_PLAY_STATE;

    fn args(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// Reply to `S`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlayState {
    pub playing: bool,
    pub start: u8,
    pub end: u8,
    pub count: u8,
    pub position: u8,
}

impl HidResponse for PlayState {
    fn from_report(report: &FeatureReport) -> Self {
        Self {
            playing: report[2] != 0,
            start: report[3],
            end: report[4],
            count: report[5],
            position: report[6],
        }
    }
}

/// `P` - write one line of the in-RAM pattern table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WritePatternLine {
    pub color: Rgb,
    pub fade: Deciseconds,
    pub line: u8,
}

impl HidCommand for WritePatternLine {
    const CODE: u8 = cmd::WRITE_PATTERN_LINE;

    fn args(&self) -> Vec<u8> {
        let [hi, lo] = self.fade.to_wire();
        vec![self.color.r, self.color.g, self.color.b, hi, lo, self.line]
    }
}

/// `W` - commit the pattern table to flash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SavePattern;

impl HidCommand for SavePattern {
    const CODE: u8 = cmd::SAVE_PATTERN;

    fn args(&self) -> Vec<u8> {
        PATTERN_COMMIT_MAGIC.to_vec()
    }
}

/// `R` - read one pattern line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadPatternLine {
    pub line: u8,
}

impl HidCommand for ReadPatternLine {
    const CODE: u8 = cmd::READ_PATTERN_LINE;

    fn args(&self) -> Vec<u8> {
        vec![0, 0, 0, 0, 0, self.line, 0]
    }
}

/// Reply to `R`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PatternLineReply {
    pub color: Rgb,
    pub fade_millis: u32,
    pub led: u8,
}

impl HidResponse for PatternLineReply {
    fn from_report(report: &FeatureReport) -> Self {
        Self {
            color: Rgb::new(report[2], report[3], report[4]),
            fade_millis: Deciseconds::millis_from_wire(report[5], report[6]),
            led: report[7],
        }
    }
}

// =============================================================================
// Device info
// =============================================================================

/// `v` - read firmware version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetVersion;

impl HidCommand for GetVersion {
    const CODE: u8 = cmd::GET_VERSION;

    fn args(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// Reply to `v`: two ASCII digits, e.g. `'2','0'` for "2.0"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FirmwareVersion {
    pub major: char,
    pub minor: char,
}

impl HidResponse for FirmwareVersion {
    fn from_report(report: &FeatureReport) -> Self {
        Self {
            major: char::from(report[3]),
            minor: char::from(report[4]),
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

// =============================================================================
// Packet dispatch (for monitoring)
// =============================================================================

/// An outgoing report decoded back into its typed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    SetColor(SetColor),
    FadeToColor(FadeToColor),
    ReadColor(ReadColor),
    ServerDown(ServerDown),
    PlayLoop(PlayLoop),
    ReadPlayState,
    WritePatternLine(WritePatternLine),
    SavePattern,
    ReadPatternLine(ReadPatternLine),
    SetLed(SetLed),
    GetVersion,
    Unknown { code: u8, args: Vec<u8> },
}

/// Decode a feature report (report ID in byte 0) into a typed command
pub fn try_parse_command(data: &[u8]) -> ParsedCommand {
    let mut report = [0u8; REPORT_LENGTH];
    let n = data.len().min(REPORT_LENGTH);
    report[..n].copy_from_slice(&data[..n]);

    let code = report[1];
    let a = &report[2..];
    let rgb = Rgb::new(a[0], a[1], a[2]);
    let fade = Deciseconds(u16::from(a[3]) << 8 | u16::from(a[4]));

    match code {
        cmd::SET_COLOR => ParsedCommand::SetColor(SetColor::new(rgb, a[5])),
        cmd::FADE_TO_COLOR => ParsedCommand::FadeToColor(FadeToColor::new(rgb, fade, a[5])),
        cmd::READ_COLOR => ParsedCommand::ReadColor(ReadColor { led: a[0] }),
        cmd::SERVER_DOWN => ParsedCommand::ServerDown(ServerDown {
            on: a[0] != 0,
            timeout: Deciseconds(u16::from(a[1]) << 8 | u16::from(a[2])),
        }),
        cmd::PLAY_LOOP => ParsedCommand::PlayLoop(PlayLoop {
            play: a[0] != 0,
            start: a[1],
            end: a[2],
            count: a[3],
        }),
        cmd::READ_PLAY_STATE => ParsedCommand::ReadPlayState,
        cmd::WRITE_PATTERN_LINE => ParsedCommand::WritePatternLine(WritePatternLine {
            color: rgb,
            fade,
            line: a[5],
        }),
        cmd::SAVE_PATTERN => ParsedCommand::SavePattern,
        cmd::READ_PATTERN_LINE => ParsedCommand::ReadPatternLine(ReadPatternLine { line: a[5] }),
        cmd::SET_LED => ParsedCommand::SetLed(SetLed { led: a[0] }),
        cmd::GET_VERSION => ParsedCommand::GetVersion,
        _ => ParsedCommand::Unknown {
            code,
            args: a.to_vec(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_color_layout() {
        let report = SetColor::new(Rgb::new(10, 20, 40), 2).build();
        assert_eq!(report, [1, b'n', 10, 20, 40, 0, 0, 2, 0]);
    }

    #[test]
    fn test_fade_to_color_layout() {
        let cmd = FadeToColor::new(Rgb::new(10, 20, 40), Deciseconds::from_millis(10), 1);
        assert_eq!(cmd.build(), [1, 0x63, 10, 20, 40, 0, 1, 1, 0]);
    }

    #[test]
    fn test_fade_zero_is_one_tick() {
        let cmd = FadeToColor::new(Rgb::RED, Deciseconds(0), 0);
        let report = cmd.build();
        assert_eq!(report[5], 0);
        assert_eq!(report[6], 1);
    }

    #[test]
    fn test_write_pattern_line_keeps_zero_fade() {
        let cmd = WritePatternLine {
            color: Rgb::GREEN,
            fade: Deciseconds(0),
            line: 3,
        };
        assert_eq!(cmd.build(), [1, b'P', 0, 255, 0, 0, 0, 3, 0]);
    }

    #[test]
    fn test_decisecond_low_byte_is_mod_255() {
        assert_eq!(Deciseconds(255).to_wire(), [0, 0]);
        assert_eq!(Deciseconds(256).to_wire(), [1, 1]);
        assert_eq!(Deciseconds(1000).to_wire(), [3, 235]);
        assert_eq!(Deciseconds(u16::MAX).to_wire(), [255, 0]);
    }

    #[test]
    fn test_decisecond_from_millis_truncates() {
        assert_eq!(Deciseconds::from_millis(19), Deciseconds(1));
        assert_eq!(Deciseconds::from_millis(655_350), Deciseconds(u16::MAX));
        assert_eq!(Deciseconds::from_millis(u32::MAX), Deciseconds(u16::MAX));
        assert_eq!(Deciseconds(100).as_millis(), 1000);
    }

    #[test]
    fn test_server_down_layout() {
        let on = ServerDown {
            on: true,
            timeout: Deciseconds::from_millis(2000),
        };
        assert_eq!(on.build(), [1, 0x44, 1, 0, 200, 0, 0, 0, 0]);
        assert_eq!(ServerDown::default().build(), [1, 0x44, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_play_and_pause() {
        assert_eq!(PlayLoop::play().build(), [1, 0x70, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(PlayLoop::pause().build(), [1, 0x70, 0, 0, 0, 0, 0, 0, 0]);
        let ranged = PlayLoop {
            play: true,
            start: 5,
            end: 8,
            count: 1,
        };
        assert_eq!(ranged.build(), [1, 0x70, 1, 5, 8, 1, 0, 0, 0]);
    }

    #[test]
    fn test_save_pattern_magic() {
        assert_eq!(SavePattern.build(), [1, b'W', 0xBE, 0xEF, 0xCA, 0xFE, 0, 0, 0]);
    }

    #[test]
    fn test_read_requests() {
        assert_eq!(ReadColor { led: 1 }.build(), [1, 0x72, 1, 0, 0, 0, 0, 1, 0]);
        assert_eq!(ReadPatternLine { line: 5 }.build(), [1, 0x52, 0, 0, 0, 0, 0, 5, 0]);
        assert_eq!(ReadPlayState.build(), [1, b'S', 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_color_reply_parse() {
        let reply = ColorReply::parse(&[1, 0x72, 10, 20, 40, 0, 0, 2, 0]).unwrap();
        assert_eq!(reply.color, Rgb::new(10, 20, 40));
        assert_eq!(reply.led, 2);
    }

    #[test]
    fn test_play_state_parse() {
        let state = PlayState::parse(&[1, b'S', 1, 2, 12, 3, 7, 0, 0]).unwrap();
        assert!(state.playing);
        assert_eq!(state.start, 2);
        assert_eq!(state.end, 12);
        assert_eq!(state.count, 3);
        assert_eq!(state.position, 7);
    }

    #[test]
    fn test_pattern_line_reply_parse() {
        let reply = PatternLineReply::parse(&[1, 0x52, 10, 20, 40, 0, 100, 5, 0]).unwrap();
        assert_eq!(reply.color, Rgb::new(10, 20, 40));
        assert_eq!(reply.fade_millis, 1000);
        assert_eq!(reply.led, 5);
    }

    #[test]
    fn test_version_parse() {
        let v = FirmwareVersion::parse(&[1, 0x76, 0, 0x31, 0x30, 0, 0, 0, 0]).unwrap();
        assert_eq!(v.to_string(), "1.0");
    }

    #[test]
    fn test_short_reply_rejected() {
        let err = ColorReply::parse(&[1, 0x72, 10]).unwrap_err();
        assert_eq!(err, ParseError::TooShort { expected: 9, got: 3 });
    }

    #[test]
    fn test_parse_command_dispatch() {
        let report = FadeToColor::new(Rgb::BLUE, Deciseconds(300), 2).build();
        match try_parse_command(&report) {
            ParsedCommand::FadeToColor(c) => {
                assert_eq!(c.color, Rgb::BLUE);
                assert_eq!(c.led, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(try_parse_command(&SavePattern.build()), ParsedCommand::SavePattern);
        assert!(matches!(
            try_parse_command(&[1, b'!', 9]),
            ParsedCommand::Unknown { code: b'!', .. }
        ));
    }
}
