//! Color and device setting command handlers.

use anyhow::Result;
use blink1_device::{ColorOptions, FadeOptions, LedOptions, Numeric, ServerDownOptions};
use tracing::info;

use super::Context;
use crate::cli::{GammaArgs, Switch};

/// Set a color immediately
pub fn set(ctx: &Context, rgb: [Numeric; 3], led: Option<Numeric>, gamma: GammaArgs) -> Result<()> {
    let [r, g, b] = rgb;
    let options = ColorOptions::rgb(r, g, b)
        .led(ctx.led(led))
        .gamma_adjust(ctx.gamma_adjust(gamma));
    ctx.with_device(|blink| Ok(blink.set_color(options)?))
}

/// Fade to a color
pub fn fade(
    ctx: &Context,
    rgb: [Numeric; 3],
    millis: Option<Numeric>,
    led: Option<Numeric>,
    gamma: GammaArgs,
) -> Result<()> {
    let [r, g, b] = rgb;
    let options = FadeOptions::rgb(r, g, b)
        .fade_millis(ctx.fade_millis(millis))
        .led(ctx.led(led))
        .gamma_adjust(ctx.gamma_adjust(gamma));
    ctx.with_device(|blink| Ok(blink.fade_to_color(options)?))
}

/// Select the LED later commands act on
pub fn set_led(ctx: &Context, led: Numeric) -> Result<()> {
    ctx.with_device(|blink| Ok(blink.set_led(LedOptions::new(led))?))
}

/// Arm or disarm the server-down watchdog
pub fn server_down(ctx: &Context, state: Switch, millis: Option<Numeric>) -> Result<()> {
    let on = u8::from(state == Switch::On);
    let millis = millis.unwrap_or_default();
    ctx.with_device(|blink| {
        blink.server_down(ServerDownOptions::new(on, millis))?;
        info!("Server-down watchdog {}", if on == 1 { "armed" } else { "disarmed" });
        Ok(())
    })
}
