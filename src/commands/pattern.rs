//! Pattern playback and storage command handlers.

use anyhow::Result;
use blink1_device::{Call, Numeric, PatternLineOptions, PlayLoopOptions};

use super::Context;
use crate::cli::GammaArgs;

/// Start pattern playback
pub fn play(ctx: &Context) -> Result<()> {
    ctx.with_device(|blink| Ok(blink.play(())?))
}

/// Stop pattern playback
pub fn pause(ctx: &Context) -> Result<()> {
    ctx.with_device(|blink| Ok(blink.pause(())?))
}

/// Play (or stop) a range of pattern lines
pub fn play_loop(
    ctx: &Context,
    start: Numeric,
    end: Numeric,
    count: Numeric,
    stop: bool,
) -> Result<()> {
    let options = PlayLoopOptions {
        play: u8::from(!stop).into(),
        start_position: start,
        end_position: end,
        count,
    };
    ctx.with_device(|blink| Ok(blink.play_loop(options)?))
}

/// Write one pattern line to device RAM
pub fn write_line(
    ctx: &Context,
    line: Numeric,
    rgb: [Numeric; 3],
    millis: Option<Numeric>,
    gamma: GammaArgs,
) -> Result<()> {
    let [r, g, b] = rgb;
    let options = PatternLineOptions {
        r,
        g,
        b,
        fade_millis: ctx.fade_millis(millis),
        line_index: line,
        gamma_adjust: ctx.gamma_adjust(gamma),
    };
    ctx.with_device(|blink| {
        blink.write_pattern_line(options)?;
        println!("Pattern line written (not saved; run save-pattern to keep it)");
        Ok(())
    })
}

/// Save the pattern in RAM to flash
pub fn save_pattern(ctx: &Context) -> Result<()> {
    ctx.with_device(|blink| {
        let serial = blink.serial();
        blink.persist_pattern(Call::handler(|_: ()| println!("Pattern saved on {serial}")))?;
        Ok(())
    })
}
