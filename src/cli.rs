// CLI definitions using clap

use std::convert::Infallible;
use std::path::PathBuf;

use blink1_device::Numeric;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Numeric arguments stay text; range checks happen in the device layer
fn numeric(s: &str) -> Result<Numeric, Infallible> {
    Ok(Numeric::from(s))
}

#[derive(Parser)]
#[command(name = "blink1-tool")]
#[command(author, version, about = "Control blink(1) USB notification lights")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Serial number of the device to use (default: first found)
    #[arg(short, long, global = true)]
    pub serial: Option<String>,

    /// Enable transport monitoring (prints every feature report)
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Show raw hex dump alongside decoded output
    #[arg(long, global = true)]
    pub hex: bool,

    /// Filter monitor output (all, writes, reads, cmd=X, 0xNN)
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Config file path (default: ~/.config/blink1/blink1.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Query Commands ===
    /// List serial numbers of attached devices
    #[command(visible_aliases = ["ls", "devices"])]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get firmware version
    #[command(visible_aliases = ["ver", "v"])]
    Version,

    /// Read the color an LED is showing
    #[command(visible_aliases = ["get", "rgb"])]
    Read {
        /// LED index (0-2)
        #[arg(short, long, value_parser = numeric)]
        led: Option<Numeric>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get pattern playback state
    #[command(visible_alias = "ps")]
    PlayState {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read one pattern line
    #[command(visible_alias = "rl")]
    ReadLine {
        /// Pattern line (0-31)
        #[arg(value_parser = numeric)]
        line: Numeric,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    // === Set Commands ===
    /// Set a color immediately
    #[command(visible_alias = "s")]
    Set {
        /// Red (0-255)
        #[arg(value_parser = numeric, allow_negative_numbers = true)]
        r: Numeric,
        /// Green (0-255)
        #[arg(value_parser = numeric, allow_negative_numbers = true)]
        g: Numeric,
        /// Blue (0-255)
        #[arg(value_parser = numeric, allow_negative_numbers = true)]
        b: Numeric,
        /// LED index (0 = all)
        #[arg(short, long, value_parser = numeric)]
        led: Option<Numeric>,
        #[command(flatten)]
        gamma: GammaArgs,
    },

    /// Fade to a color
    #[command(visible_alias = "f")]
    Fade {
        /// Red (0-255)
        #[arg(value_parser = numeric, allow_negative_numbers = true)]
        r: Numeric,
        /// Green (0-255)
        #[arg(value_parser = numeric, allow_negative_numbers = true)]
        g: Numeric,
        /// Blue (0-255)
        #[arg(value_parser = numeric, allow_negative_numbers = true)]
        b: Numeric,
        /// Fade time in milliseconds (0-655350)
        #[arg(short, long, value_parser = numeric)]
        millis: Option<Numeric>,
        /// LED index (0 = all)
        #[arg(short, long, value_parser = numeric)]
        led: Option<Numeric>,
        #[command(flatten)]
        gamma: GammaArgs,
    },

    /// Select the LED later commands act on
    #[command(visible_alias = "sl")]
    SetLed {
        /// LED index (0-2)
        #[arg(value_parser = numeric)]
        led: Numeric,
    },

    /// Arm or disarm the server-down watchdog
    #[command(visible_aliases = ["watchdog", "sd"])]
    ServerDown {
        /// Arm (on) or disarm (off)
        state: Switch,
        /// Timeout in milliseconds before the stored pattern plays
        #[arg(short, long, value_parser = numeric)]
        millis: Option<Numeric>,
    },

    // === Playback Commands ===
    /// Start pattern playback
    Play,

    /// Stop pattern playback
    #[command(visible_alias = "stop")]
    Pause,

    /// Play a range of pattern lines
    #[command(visible_alias = "loop")]
    PlayLoop {
        /// First line (0-31)
        #[arg(long, value_parser = numeric, default_value = "0")]
        start: Numeric,
        /// Last line (0-31)
        #[arg(long, value_parser = numeric, default_value = "31")]
        end: Numeric,
        /// Repeat count (0 = forever)
        #[arg(long, value_parser = numeric, default_value = "0")]
        count: Numeric,
        /// Stop instead of play
        #[arg(long)]
        stop: bool,
    },

    // === Pattern Commands ===
    /// Write one pattern line to device RAM
    #[command(visible_alias = "wl")]
    WriteLine {
        /// Pattern line (0-31)
        #[arg(value_parser = numeric)]
        line: Numeric,
        /// Red (0-255)
        #[arg(value_parser = numeric, allow_negative_numbers = true)]
        r: Numeric,
        /// Green (0-255)
        #[arg(value_parser = numeric, allow_negative_numbers = true)]
        g: Numeric,
        /// Blue (0-255)
        #[arg(value_parser = numeric, allow_negative_numbers = true)]
        b: Numeric,
        /// Fade time in milliseconds (0-655350)
        #[arg(short, long, value_parser = numeric)]
        millis: Option<Numeric>,
        #[command(flatten)]
        gamma: GammaArgs,
    },

    /// Save the pattern in RAM to flash
    #[command(visible_aliases = ["save", "persist"])]
    SavePattern,
}

/// Gamma handling for color arguments
///
/// Without either flag the config file's `gamma_adjust` decides.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GammaArgs {
    /// Values are already gamma-correct; send them unchanged
    #[arg(long, conflicts_with = "degamma")]
    pub raw: bool,
    /// Gamma-correct values even if the config file says they are raw
    #[arg(long)]
    pub degamma: bool,
}

impl GammaArgs {
    /// Whether colors skip gamma correction, given the configured default
    pub fn already_corrected(self, configured: bool) -> bool {
        match (self.raw, self.degamma) {
            (true, _) => true,
            (_, true) => false,
            _ => configured,
        }
    }
}

/// On/off argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fade_args() {
        let cli = Cli::try_parse_from(["blink1-tool", "fade", "255", "0", "10", "-m", "500"])
            .unwrap();
        match cli.command {
            Some(Commands::Fade { r, b, millis, led, .. }) => {
                assert_eq!(r, Numeric::from("255"));
                assert_eq!(b, Numeric::from("10"));
                assert_eq!(millis, Some(Numeric::from("500")));
                assert!(led.is_none());
            }
            _ => panic!("Expected fade"),
        }
    }

    #[test]
    fn test_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "blink1-tool",
            "version",
            "--serial",
            "1A001407",
            "--monitor",
        ])
        .unwrap();
        assert_eq!(cli.serial.as_deref(), Some("1A001407"));
        assert!(cli.monitor);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_negative_channel_reaches_validation() {
        let cli = Cli::try_parse_from(["blink1-tool", "set", "-1", "0", "0"]).unwrap();
        match cli.command {
            Some(Commands::Set { r, .. }) => assert_eq!(r, Numeric::from("-1")),
            _ => panic!("Expected set"),
        }
    }

    #[test]
    fn test_gamma_flags_override_config() {
        let cli = Cli::try_parse_from(["blink1-tool", "set", "1", "2", "3", "--degamma"]).unwrap();
        match cli.command {
            Some(Commands::Set { gamma, .. }) => {
                assert!(!gamma.already_corrected(true));
                assert!(!gamma.already_corrected(false));
            }
            _ => panic!("Expected set"),
        }

        let raw = GammaArgs { raw: true, degamma: false };
        assert!(raw.already_corrected(false));
        assert!(GammaArgs::default().already_corrected(true));
        assert!(!GammaArgs::default().already_corrected(false));
    }

    #[test]
    fn test_raw_and_degamma_conflict() {
        let result =
            Cli::try_parse_from(["blink1-tool", "fade", "1", "2", "3", "--raw", "--degamma"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_server_down_switch() {
        let cli = Cli::try_parse_from(["blink1-tool", "watchdog", "on", "-m", "2000"]).unwrap();
        match cli.command {
            Some(Commands::ServerDown { state, millis }) => {
                assert_eq!(state, Switch::On);
                assert_eq!(millis, Some(Numeric::from("2000")));
            }
            _ => panic!("Expected server-down"),
        }
    }
}
