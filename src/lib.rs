//! blink(1) command-line tool support
//!
//! The device protocol lives in `blink1-transport` and `blink1-device`; this
//! crate only holds what the CLI needs on top, such as the config file.

pub mod config;
