use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigError;

/// Crossfading photo backdrop with an ambient particle field.
#[derive(Parser, Debug, Default)]
#[command(name = "backdrop", version)]
pub struct Args {
    /// Directory the image names are resolved against
    pub base_path: Option<PathBuf>,

    /// TOML file with default settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image file name, relative to the base path (repeatable)
    #[arg(short, long = "image")]
    pub images: Vec<String>,

    /// Milliseconds between automatic advances
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Crossfade duration in milliseconds
    #[arg(long)]
    pub transition_ms: Option<u64>,

    /// Disable auto-advance, as a reduced-motion preference would
    #[arg(long)]
    pub reduced_motion: bool,

    /// Do not draw the particle field
    #[arg(long)]
    pub no_particles: bool,

    /// Draw the index/running caption
    #[arg(long)]
    pub status: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub base_path: PathBuf,
    // Empty means "every image in base_path, sorted by name"
    pub images: Vec<String>,
    pub interval_ms: u64,
    pub transition_ms: u64,
    pub resize_debounce_ms: u64,
    pub reduced_motion: bool,
    pub particles: bool,
    pub show_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            images: Vec::new(),
            interval_ms: INTERVAL_MS,
            transition_ms: TRANSITION_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            reduced_motion: false,
            particles: true,
            show_status: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("interval_ms", self.interval_ms),
            ("transition_ms", self.transition_ms),
            ("resize_debounce_ms", self.resize_debounce_ms),
        ];
        for (field, value) in durations {
            if value == 0 {
                return Err(ConfigError::ZeroDuration { field });
            }
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

impl Args {
    /// Loads the config file (if any), applies command line overrides and validates the result.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(base_path) = self.base_path {
            config.base_path = base_path;
        }
        if !self.images.is_empty() {
            config.images = self.images;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if let Some(transition_ms) = self.transition_ms {
            config.transition_ms = transition_ms;
        }
        config.reduced_motion |= self.reduced_motion;
        config.particles &= !self.no_particles;
        config.show_status |= self.status;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_page_timings() {
        let config = Config::default();
        assert_eq!(config.interval(), Duration::from_secs(7));
        assert_eq!(config.transition(), Duration::from_secs(1));
        assert_eq!(config.resize_debounce(), Duration::from_millis(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            base_path = "photos"
            images = ["a.jpg", "b.jpg"]
            reduced_motion = true
            "#,
        )
        .unwrap();
        assert_eq!(config.base_path, PathBuf::from("photos"));
        assert_eq!(config.images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        assert!(config.reduced_motion);
        assert_eq!(config.interval_ms, INTERVAL_MS);
        assert!(config.particles);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("intervall_ms = 10").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_durations_are_rejected() {
        let config = Config { transition_ms: 0, ..Config::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration { field: "transition_ms" }));

        let config = Config { interval_ms: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn command_line_overrides_defaults() {
        let args = Args::parse_from([
            "backdrop",
            "pics",
            "--image",
            "one.png",
            "--interval-ms",
            "2500",
            "--reduced-motion",
            "--no-particles",
        ]);
        let config = args.into_config().unwrap();
        assert_eq!(config.base_path, PathBuf::from("pics"));
        assert_eq!(config.images, vec!["one.png".to_string()]);
        assert_eq!(config.interval_ms, 2500);
        assert!(config.reduced_motion);
        assert!(!config.particles);
    }

    #[test]
    fn command_line_zero_interval_fails_validation() {
        let args = Args::parse_from(["backdrop", "--interval-ms", "0"]);
        assert!(args.into_config().is_err());
    }

    #[test]
    fn missing_config_file_is_a_read_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
