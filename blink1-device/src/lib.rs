//! High-level interface for blink(1) USB notification lights
//!
//! This crate validates operation arguments, applies gamma correction and
//! drives the feature report codec from `blink1-transport` through an opened
//! device session.
//!
//! ```ignore
//! use blink1_device::{Blink1, Call, FadeOptions};
//!
//! let blink = Blink1::open(None)?;
//! blink.fade_to_color(FadeOptions::rgb(255, 0, 0).fade_millis(500))?;
//! blink.version(Call::handler(|v| println!("firmware {v}")))?;
//! blink.close(())?;
//! ```

pub mod call;
pub mod color;
pub mod error;
pub mod numeric;
pub mod options;
pub mod session;
pub mod validate;

pub use call::{Call, Completion};
pub use color::{degamma, wire_color, GAMMA_TABLE};
pub use error::Blink1Error;
pub use numeric::Numeric;
pub use options::{
    ColorOptions, FadeOptions, LedOptions, PatternLineOptions, PlayLoopOptions,
    ReadPatternOptions, ServerDownOptions,
};
pub use session::{list_serials, select_device, Blink1, PatternLine};

// Re-export reply types so consumers need not depend on the transport crate
pub use blink1_transport::{ColorReply, PlayState, Rgb};
