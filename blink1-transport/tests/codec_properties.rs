//! Property-based tests for the blink(1) feature report codec.

use blink1_transport::protocol::{cmd, REPORT_ID, REPORT_LENGTH};
use blink1_transport::{
    try_parse_command, Deciseconds, FadeToColor, HidCommand, HidResponse, ParsedCommand,
    PatternLineReply, Rgb, ServerDown, SetColor, WritePatternLine,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Every set-color report has the fixed 9-byte layout.
    #[test]
    fn prop_set_color_layout(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), led in 0u8..=2) {
        let report = SetColor::new(Rgb::new(r, g, b), led).build();
        prop_assert_eq!(report, [REPORT_ID, cmd::SET_COLOR, r, g, b, 0, 0, led, 0]);
    }

    /// The wire pair is always `[ds >> 8, ds % 255]` for the truncated decisecond value.
    #[test]
    fn prop_decisecond_split(millis in 0u32..=655_350) {
        let ds = millis / 10;
        let [hi, lo] = Deciseconds::from_millis(millis).to_wire();
        prop_assert_eq!(u32::from(hi), ds >> 8);
        prop_assert_eq!(u32::from(lo), ds % 255);
    }

    /// Below one low-byte wrap the reply decoder recovers the decisecond bucket exactly.
    #[test]
    fn prop_short_fades_round_trip(millis in 0u32..2550) {
        let ds = Deciseconds::from_millis(millis);
        let [hi, lo] = ds.to_wire();
        prop_assert_eq!(Deciseconds::millis_from_wire(hi, lo), (millis / 10) * 10);
    }

    /// Fade-to-color never encodes a zero duration; other commands keep it.
    #[test]
    fn prop_fade_floor_only_on_fade(millis in 0u32..=655_350) {
        let ds = Deciseconds::from_millis(millis);
        let fade = FadeToColor::new(Rgb::WHITE, ds, 0).build();
        let expected = ds.at_least_one_tick().to_wire();
        prop_assert_eq!([fade[5], fade[6]], expected);

        let line = WritePatternLine { color: Rgb::WHITE, fade: ds, line: 0 }.build();
        prop_assert_eq!([line[5], line[6]], ds.to_wire());

        let watchdog = ServerDown { on: true, timeout: ds }.build();
        prop_assert_eq!([watchdog[3], watchdog[4]], ds.to_wire());
    }

    /// Every typed command decodes back to its own variant.
    #[test]
    fn prop_monitor_decodes_set_color(
        r in any::<u8>(),
        g in any::<u8>(),
        b in any::<u8>(),
        led in 0u8..=2,
    ) {
        let cmd = SetColor::new(Rgb::new(r, g, b), led);
        prop_assert_eq!(try_parse_command(&cmd.build()), ParsedCommand::SetColor(cmd));
    }

    /// Replies of any content decode without panicking and map fixed offsets.
    #[test]
    fn prop_pattern_reply_offsets(bytes in proptest::array::uniform9(any::<u8>())) {
        let reply = PatternLineReply::parse(&bytes).unwrap();
        prop_assert_eq!(reply.color, Rgb::new(bytes[2], bytes[3], bytes[4]));
        prop_assert_eq!(reply.led, bytes[7]);
        prop_assert_eq!(
            reply.fade_millis,
            ((u32::from(bytes[5]) << 8) + u32::from(bytes[6])) * 10
        );
    }

    /// Anything shorter than a full report is rejected.
    #[test]
    fn prop_short_replies_rejected(len in 0usize..REPORT_LENGTH) {
        let data = vec![0u8; len];
        prop_assert!(PatternLineReply::parse(&data).is_err());
    }
}
