//! Tool configuration
//!
//! Defaults for options the command line does not set, read from
//! `~/.config/blink1/blink1.toml`:
//!
//! ```toml
//! serial = "1A001407"
//! gamma_adjust = false
//! fade_millis = 300
//! led = 0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Defaults applied to every command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blink1Config {
    /// Device to open when `--serial` is not given
    #[serde(default)]
    pub serial: Option<String>,
    /// Colors are already gamma-correct; send them unchanged
    #[serde(default)]
    pub gamma_adjust: bool,
    /// Fade duration when `--millis` is not given
    #[serde(default = "default_fade_millis")]
    pub fade_millis: u32,
    /// LED index when `--led` is not given (0 = all)
    #[serde(default)]
    pub led: u8,
}

fn default_fade_millis() -> u32 {
    300
}

impl Default for Blink1Config {
    fn default() -> Self {
        Self {
            serial: None,
            gamma_adjust: false,
            fade_millis: default_fade_millis(),
            led: 0,
        }
    }
}

impl Blink1Config {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("blink1")
            .join("blink1.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Blink1Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Command-line serial wins over the configured one
    pub fn serial<'a>(&'a self, cli: Option<&'a str>) -> Option<&'a str> {
        cli.or(self.serial.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Blink1Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Blink1Config::default());
        assert_eq!(config.fade_millis, 300);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blink1.toml");
        std::fs::write(&path, "serial = \"1A001407\"\nled = 2\n").unwrap();

        let config = Blink1Config::load(&path).unwrap();
        assert_eq!(config.serial.as_deref(), Some("1A001407"));
        assert_eq!(config.led, 2);
        assert_eq!(config.fade_millis, 300);
        assert!(!config.gamma_adjust);
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blink1.toml");
        std::fs::write(&path, "fade_millis = \"slow\"\n").unwrap();
        assert!(Blink1Config::load(&path).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let config = Blink1Config {
            serial: Some("1A001408".into()),
            gamma_adjust: true,
            fade_millis: 1000,
            led: 1,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Blink1Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_cli_serial_overrides() {
        let config = Blink1Config {
            serial: Some("1A001407".into()),
            ..Default::default()
        };
        assert_eq!(config.serial(Some("1A001408")), Some("1A001408"));
        assert_eq!(config.serial(None), Some("1A001407"));
        assert_eq!(Blink1Config::default().serial(None), None);
    }

    #[test]
    fn test_default_path_file_name() {
        let path = Blink1Config::default_path();
        assert!(path.ends_with("blink1/blink1.toml"));
    }
}
