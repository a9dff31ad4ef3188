//! Query (read-only) command handlers.

use anyhow::Result;
use blink1_device::{
    Call, ColorReply, LedOptions, Numeric, PatternLine, PlayState, ReadPatternOptions,
};
use blink1_transport::{DeviceDiscovery, HidDiscovery, PRODUCT_ID, VENDOR_ID};

use super::{print_json, Context};

/// List attached devices
pub fn list(json: bool) -> Result<()> {
    let devices = HidDiscovery::new().list_devices(VENDOR_ID, PRODUCT_ID)?;
    if json {
        return print_json(&devices);
    }
    if devices.is_empty() {
        eprintln!("No blink(1) devices found");
        return Ok(());
    }
    for device in &devices {
        match &device.product_name {
            Some(name) => println!("{}  {}", device.serial, name),
            None => println!("{}", device.serial),
        }
    }
    Ok(())
}

/// Get firmware version
pub fn version(ctx: &Context) -> Result<()> {
    ctx.with_device(|blink| {
        let serial = blink.serial().to_string();
        blink.version(Call::handler(move |v: String| {
            println!("{serial}: firmware v{v}");
        }))?;
        Ok(())
    })
}

/// Read the color an LED is showing
pub fn read(ctx: &Context, led: Option<Numeric>, json: bool) -> Result<()> {
    let led = ctx.led(led);
    let reply: ColorReply =
        ctx.with_device(|blink| Ok(blink.read_current_color(LedOptions { led })?))?;
    if json {
        return print_json(&reply);
    }
    println!("LED {}: {}", reply.led, reply.color);
    Ok(())
}

/// Get pattern playback state
pub fn play_state(ctx: &Context, json: bool) -> Result<()> {
    let state: PlayState = ctx.with_device(|blink| Ok(blink.read_play_state(())?))?;
    if json {
        return print_json(&state);
    }
    println!("Playback:");
    println!("  Playing:  {}", if state.playing { "yes" } else { "no" });
    println!("  Range:    {}-{}", state.start, state.end);
    println!("  Count:    {}", state.count);
    println!("  Position: {}", state.position);
    Ok(())
}

/// Read one pattern line
pub fn read_line(ctx: &Context, line: Numeric, json: bool) -> Result<()> {
    let line: PatternLine =
        ctx.with_device(|blink| Ok(blink.read_pattern_line(ReadPatternOptions::new(line))?))?;
    if json {
        return print_json(&line);
    }
    println!(
        "Line {:2}: {} fade {} ms (led {})",
        line.line_index, line.color, line.fade_millis, line.led
    );
    Ok(())
}
