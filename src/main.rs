//! blink(1) command-line tool
//!
//! Sets colors, drives pattern playback and manages the stored pattern on
//! blink(1) USB notification lights.

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::debug;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;
use commands::Context;

use blink1_tool::config::Blink1Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config_path = cli.config.clone().unwrap_or_else(Blink1Config::default_path);
    debug!("Loading config from {:?}", config_path);
    let config = Blink1Config::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let monitor = commands::create_monitor_config(cli.monitor, cli.hex, cli.filter.as_deref())?;
    let ctx = Context::new(config, cli.serial, monitor);

    match cli.command {
        // Default: list devices
        None => commands::query::list(false),

        // === Query Commands ===
        Some(Commands::List { json }) => commands::query::list(json),
        Some(Commands::Version) => commands::query::version(&ctx),
        Some(Commands::Read { led, json }) => commands::query::read(&ctx, led, json),
        Some(Commands::PlayState { json }) => commands::query::play_state(&ctx, json),
        Some(Commands::ReadLine { line, json }) => commands::query::read_line(&ctx, line, json),

        // === Set Commands ===
        Some(Commands::Set { r, g, b, led, gamma }) => {
            commands::set::set(&ctx, [r, g, b], led, gamma)
        }
        Some(Commands::Fade {
            r,
            g,
            b,
            millis,
            led,
            gamma,
        }) => commands::set::fade(&ctx, [r, g, b], millis, led, gamma),
        Some(Commands::SetLed { led }) => commands::set::set_led(&ctx, led),
        Some(Commands::ServerDown { state, millis }) => {
            commands::set::server_down(&ctx, state, millis)
        }

        // === Playback Commands ===
        Some(Commands::Play) => commands::pattern::play(&ctx),
        Some(Commands::Pause) => commands::pattern::pause(&ctx),
        Some(Commands::PlayLoop {
            start,
            end,
            count,
            stop,
        }) => commands::pattern::play_loop(&ctx, start, end, count, stop),

        // === Pattern Commands ===
        Some(Commands::WriteLine {
            line,
            r,
            g,
            b,
            millis,
            gamma,
        }) => commands::pattern::write_line(&ctx, line, [r, g, b], millis, gamma),
        Some(Commands::SavePattern) => commands::pattern::save_pattern(&ctx),
    }
}
