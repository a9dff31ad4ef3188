//! Argument validation
//!
//! Every numeric argument is range-checked before a report is built. Errors
//! name the field and its inclusive range, e.g. "r must be between 0 and 255".

use blink1_transport::protocol::{MAX_LED_INDEX, MAX_MILLIS, MAX_PATTERN_LINE};

use crate::error::Blink1Error;
use crate::numeric::Numeric;

/// Coerce `value` to an integer and check it against `[min, max]`
///
/// Coercion happens first, so `"255.5"` is accepted as 255 and `-0.5` as 0.
pub fn ranged<T: TryFrom<i64>>(
    value: &Numeric,
    field: &'static str,
    min: i64,
    max: i64,
) -> Result<T, Blink1Error> {
    let n = value.parse().ok_or(Blink1Error::NotANumber { field })?;
    let out_of_range = Blink1Error::OutOfRange { field, min, max };
    if n < min || n > max {
        return Err(out_of_range);
    }
    T::try_from(n).map_err(|_| out_of_range)
}

/// 16-bit address, 0-65535
pub fn address(value: &Numeric) -> Result<u16, Blink1Error> {
    ranged(value, "address", 0, 0xFFFF)
}

/// Byte value, 0-255
pub fn value(value: &Numeric) -> Result<u8, Blink1Error> {
    ranged(value, "value", 0, 0xFF)
}

/// Color channel, 0-255
pub fn channel(value: &Numeric, field: &'static str) -> Result<u8, Blink1Error> {
    ranged(value, field, 0, 0xFF)
}

/// On/off flag, 0-1
pub fn bit(value: &Numeric, field: &'static str) -> Result<bool, Blink1Error> {
    ranged::<u8>(value, field, 0, 1).map(|b| b == 1)
}

/// Repeat count, 0-255
pub fn count(value: &Numeric) -> Result<u8, Blink1Error> {
    ranged(value, "count", 0, 0xFF)
}

/// Pattern position or line index, 0-31
pub fn position(value: &Numeric, field: &'static str) -> Result<u8, Blink1Error> {
    ranged(value, field, 0, i64::from(MAX_PATTERN_LINE))
}

/// LED index, 0-2
pub fn led_index(value: &Numeric) -> Result<u8, Blink1Error> {
    ranged(value, "led", 0, i64::from(MAX_LED_INDEX))
}

/// Duration in milliseconds, 0-655350
pub fn millis(value: &Numeric, field: &'static str) -> Result<u32, Blink1Error> {
    ranged(value, field, 0, i64::from(MAX_MILLIS))
}

/// Play ranges must not run backwards
pub fn ensure_ordered(start: u8, end: u8) -> Result<(), Blink1Error> {
    if start > end {
        return Err(Blink1Error::PositionOrder { start, end });
    }
    Ok(())
}
