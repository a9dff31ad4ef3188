//! Property tests for argument validation and gamma correction

mod common;

use blink1_device::{degamma, validate, wire_color, ColorOptions, FadeOptions, Numeric, Rgb};
use common::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn degamma_is_monotonic(n in 0u8..255) {
        prop_assert!(degamma(n) <= degamma(n + 1));
    }

    #[test]
    fn degamma_never_brightens(n in any::<u8>()) {
        prop_assert!(degamma(n) <= n);
    }

    #[test]
    fn set_color_writes_corrected_channels(
        r in any::<u8>(),
        g in any::<u8>(),
        b in any::<u8>(),
        led in 0u8..=2,
        corrected in any::<bool>(),
    ) {
        let (blink, wire) = open_mock();
        blink
            .set_color(ColorOptions::rgb(r, g, b).led(led).gamma_adjust(corrected))
            .unwrap();
        let expected = wire_color(Rgb::new(r, g, b), corrected);
        prop_assert_eq!(
            last_sent(&wire),
            vec![1, b'n', expected.r, expected.g, expected.b, 0, 0, led, 0]
        );
    }

    #[test]
    fn out_of_range_channels_name_the_field(v in prop_oneof![i64::MIN..0, 256i64..i64::MAX]) {
        let err = validate::channel(&Numeric::Int(v), "g").unwrap_err();
        prop_assert_eq!(err.to_string(), "g must be between 0 and 255");
    }

    #[test]
    fn in_range_floats_truncate(v in 0.0f64..=255.0) {
        let got = validate::channel(&Numeric::Float(v), "r").unwrap();
        prop_assert_eq!(got, v.trunc() as u8);
    }

    #[test]
    fn text_numbers_match_integers(v in 0u8..=31) {
        let from_text = validate::position(&Numeric::from(v.to_string()), "line_index").unwrap();
        prop_assert_eq!(from_text, v);
    }

    #[test]
    fn fractional_text_truncates_before_range_check(whole in 0u8..=255, frac in 0u32..1000) {
        let text = format!("{whole}.{frac}");
        let got = validate::channel(&Numeric::from(text), "r").unwrap();
        prop_assert_eq!(got, whole);
    }

    #[test]
    fn non_numeric_text_is_rejected(s in "[a-zA-Z ]{1,12}") {
        let err = validate::millis(&Numeric::from(s), "millis").unwrap_err();
        prop_assert_eq!(err.to_string(), "millis must be a number");
    }

    #[test]
    fn short_fades_still_take_a_tick(millis in 0u32..10) {
        let (blink, wire) = open_mock();
        blink
            .fade_to_color(FadeOptions::rgb(1, 2, 3).fade_millis(millis).gamma_adjust(true))
            .unwrap();
        let sent = last_sent(&wire);
        prop_assert_eq!(&sent[5..7], &[0, 1]);
    }
}
