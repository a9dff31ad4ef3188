//! Numeric arguments accepted as native numbers or as text

use std::fmt;

use serde::Deserialize;

/// A caller-supplied numeric argument
///
/// Options may carry integers, floats or their textual form (e.g. values
/// taken straight from a command line or a config file). `parse` is the one
/// place any of them becomes an integer; text with no leading digits is
/// rejected instead of being coerced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Default for Numeric {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl Numeric {
    /// Integer value, or `None` for non-numeric text, NaN and infinities
    ///
    /// Floats truncate toward zero. Text is read as a decimal integer prefix
    /// (optional sign, then digits) after leading whitespace, so `"12.9"`
    /// is 12, `"-0.5"` is 0 and `"1e2"` is 1.
    pub fn parse(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(s) => integer_prefix(s),
        }
    }
}

fn integer_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    // Overlong digit runs saturate; they fail every range check anyway
    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

macro_rules! numeric_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Numeric {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

numeric_from_int!(u8, u16, u32, i8, i16, i32, i64);

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Numeric {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Numeric {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
