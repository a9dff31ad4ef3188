//! Protocol constants and report framing for blink(1) mk2 devices

/// ThingM USB vendor ID
pub const VENDOR_ID: u16 = 0x27B8;
/// blink(1) product ID (mk1/mk2/mk3 share it)
pub const PRODUCT_ID: u16 = 0x01ED;

/// Feature report ID used for every command and reply
pub const REPORT_ID: u8 = 1;
/// Feature report length including the report ID byte
pub const REPORT_LENGTH: usize = 9;
/// Argument bytes available after report ID and command code
pub const MAX_ARGS: usize = REPORT_LENGTH - 2;

/// One complete feature report as sent on the wire
pub type FeatureReport = [u8; REPORT_LENGTH];

/// Highest LED index addressable on a mk2 (0 = all, 1 = top, 2 = bottom)
pub const MAX_LED_INDEX: u8 = 2;
/// Highest pattern line index on a mk2
pub const MAX_PATTERN_LINE: u8 = 31;
/// Largest fade/timeout in milliseconds the 16-bit decisecond field can carry
pub const MAX_MILLIS: u32 = 65535 * 10;

/// Confirmation bytes the firmware requires before writing the pattern to flash
pub const PATTERN_COMMIT_MAGIC: [u8; 4] = [0xBE, 0xEF, 0xCA, 0xFE];

/// Command codes (ASCII) understood by the firmware
pub mod cmd {
    pub const SET_COLOR: u8 = b'n';
    pub const FADE_TO_COLOR: u8 = b'c';
    pub const READ_COLOR: u8 = b'r';
    pub const SERVER_DOWN: u8 = b'D';
    pub const PLAY_LOOP: u8 = b'p';
    pub const READ_PLAY_STATE: u8 = b'S';
    pub const WRITE_PATTERN_LINE: u8 = b'P';
    pub const SAVE_PATTERN: u8 = b'W';
    pub const READ_PATTERN_LINE: u8 = b'R';
    pub const SET_LED: u8 = b'l';
    pub const GET_VERSION: u8 = b'v';

    /// Get human-readable name for a command code
    pub fn name(code: u8) -> &'static str {
        match code {
            SET_COLOR => "SET_COLOR",
            FADE_TO_COLOR => "FADE_TO_COLOR",
            READ_COLOR => "READ_COLOR",
            SERVER_DOWN => "SERVER_DOWN",
            PLAY_LOOP => "PLAY_LOOP",
            READ_PLAY_STATE => "READ_PLAY_STATE",
            WRITE_PATTERN_LINE => "WRITE_PATTERN_LINE",
            SAVE_PATTERN => "SAVE_PATTERN",
            READ_PATTERN_LINE => "READ_PATTERN_LINE",
            SET_LED => "SET_LED",
            GET_VERSION => "GET_VERSION",
            _ => "UNKNOWN",
        }
    }

    /// Commands that are followed by a reply read
    pub fn expects_reply(code: u8) -> bool {
        matches!(
            code,
            READ_COLOR | READ_PLAY_STATE | READ_PATTERN_LINE | GET_VERSION
        )
    }
}

/// Build a feature report: report ID, command code, zero-padded arguments
///
/// Arguments past the seventh are dropped; the report is always 9 bytes.
pub fn build_report(code: u8, args: &[u8]) -> FeatureReport {
    let mut buf = [0u8; REPORT_LENGTH];
    buf[0] = REPORT_ID;
    buf[1] = code;
    let n = args.len().min(MAX_ARGS);
    buf[2..2 + n].copy_from_slice(&args[..n]);
    buf
}
