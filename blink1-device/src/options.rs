//! Named options for each device operation
//!
//! Every field is optional and defaults to 0 / false. Numeric fields accept
//! integers, floats or text (see [`Numeric`]).

use serde::Deserialize;

use crate::numeric::Numeric;

/// Options for `set_color`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    pub r: Numeric,
    pub g: Numeric,
    pub b: Numeric,
    /// LED index (0 = all)
    pub led: Numeric,
    /// Channels are already gamma-correct; send them unchanged
    pub gamma_adjust: bool,
}

impl ColorOptions {
    pub fn rgb(r: impl Into<Numeric>, g: impl Into<Numeric>, b: impl Into<Numeric>) -> Self {
        Self {
            r: r.into(),
            g: g.into(),
            b: b.into(),
            ..Self::default()
        }
    }

    pub fn led(mut self, led: impl Into<Numeric>) -> Self {
        self.led = led.into();
        self
    }

    pub fn gamma_adjust(mut self, already_corrected: bool) -> Self {
        self.gamma_adjust = already_corrected;
        self
    }
}

/// Options for `fade_to_color`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FadeOptions {
    pub r: Numeric,
    pub g: Numeric,
    pub b: Numeric,
    pub led: Numeric,
    pub fade_millis: Numeric,
    pub gamma_adjust: bool,
}

impl FadeOptions {
    pub fn rgb(r: impl Into<Numeric>, g: impl Into<Numeric>, b: impl Into<Numeric>) -> Self {
        Self {
            r: r.into(),
            g: g.into(),
            b: b.into(),
            ..Self::default()
        }
    }

    pub fn led(mut self, led: impl Into<Numeric>) -> Self {
        self.led = led.into();
        self
    }

    pub fn fade_millis(mut self, millis: impl Into<Numeric>) -> Self {
        self.fade_millis = millis.into();
        self
    }

    pub fn gamma_adjust(mut self, already_corrected: bool) -> Self {
        self.gamma_adjust = already_corrected;
        self
    }
}

/// Options for `read_current_color` and `set_led`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LedOptions {
    pub led: Numeric,
}

impl LedOptions {
    pub fn new(led: impl Into<Numeric>) -> Self {
        Self { led: led.into() }
    }
}

/// Options for `server_down`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerDownOptions {
    /// 1 arms the watchdog, 0 disarms it
    pub on: Numeric,
    /// Timeout before the firmware takes over
    pub millis: Numeric,
}

impl ServerDownOptions {
    pub fn new(on: impl Into<Numeric>, millis: impl Into<Numeric>) -> Self {
        Self {
            on: on.into(),
            millis: millis.into(),
        }
    }
}

/// Options for `play_loop`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayLoopOptions {
    /// 1 plays, 0 stops
    pub play: Numeric,
    pub start_position: Numeric,
    pub end_position: Numeric,
    /// Loop count, 0 = forever
    pub count: Numeric,
}

/// Options for `write_pattern_line`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PatternLineOptions {
    pub r: Numeric,
    pub g: Numeric,
    pub b: Numeric,
    pub fade_millis: Numeric,
    pub line_index: Numeric,
    pub gamma_adjust: bool,
}

/// Options for `read_pattern_line`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReadPatternOptions {
    pub line_index: Numeric,
}

impl ReadPatternOptions {
    pub fn new(line_index: impl Into<Numeric>) -> Self {
        Self {
            line_index: line_index.into(),
        }
    }
}
