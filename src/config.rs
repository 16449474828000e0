//! Settings loaded once at startup from `config.toml`, then overridden by
//! command-line flags. A missing file means defaults (Carballo).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Args;
use crate::error::{Result, WeatherError};

/// One day. Longer intervals are rejected by [`Config::validate`].
pub const MAX_REFRESH_MINUTES: u64 = 24 * 60;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_name")]
    pub name: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// Open-Meteo base URL, without the `/forecast` path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_hours_to_show")]
    pub hours_to_show: usize,
    #[serde(default = "default_days_to_show")]
    pub days_to_show: usize,
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_location_name() -> String {
    "Carballo".to_string()
}

fn default_latitude() -> f64 {
    43.213
}

fn default_longitude() -> f64 {
    -8.689
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_hours_to_show() -> usize {
    12
}

fn default_days_to_show() -> usize {
    5
}

fn default_refresh_minutes() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hours_to_show: default_hours_to_show(),
            days_to_show: default_days_to_show(),
            refresh_minutes: default_refresh_minutes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tiempo").join("config.toml"))
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads the file named on the command line (or the default one), applies
    /// the flag overrides and validates the result.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match args.config.clone().or_else(Self::default_path) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref name) = args.name {
            self.location.name = name.clone();
        }
        if let Some(lat) = args.latitude {
            self.location.latitude = lat;
        }
        if let Some(lon) = args.longitude {
            self.location.longitude = lon;
        }
        if let Some(hours) = args.hours {
            self.display.hours_to_show = hours;
        }
        if let Some(days) = args.days {
            self.display.days_to_show = days;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if !(-90.0..=90.0).contains(&self.location.latitude) {
            errors.push(format!("latitude {} out of range", self.location.latitude));
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            errors.push(format!(
                "longitude {} out of range",
                self.location.longitude
            ));
        }
        if self.api.base_url.is_empty() {
            errors.push("api.base_url is empty".to_string());
        }
        if self.api.timeout_seconds == 0 {
            errors.push("api.timeout_seconds must be positive".to_string());
        }
        if self.display.hours_to_show == 0 {
            errors.push("display.hours_to_show must be positive".to_string());
        }
        if self.display.days_to_show == 0 {
            errors.push("display.days_to_show must be positive".to_string());
        }
        if self.display.refresh_minutes > MAX_REFRESH_MINUTES {
            errors.push(format!(
                "display.refresh_minutes must be at most {MAX_REFRESH_MINUTES}"
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(WeatherError::Config(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults_point_at_carballo() {
        let config = Config::default();
        assert_eq!(config.location.name, "Carballo");
        assert_eq!(config.location.latitude, 43.213);
        assert_eq!(config.location.longitude, -8.689);
        assert_eq!(config.display.hours_to_show, 12);
        assert_eq!(config.display.days_to_show, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[location]\nname = \"Vigo\"\nlatitude = 42.24\n\n[display]\nhours_to_show = 6"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.location.name, "Vigo");
        assert_eq!(config.location.latitude, 42.24);
        assert_eq!(config.location.longitude, -8.689);
        assert_eq!(config.display.hours_to_show, 6);
        assert_eq!(config.display.days_to_show, 5);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[location\nname = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, WeatherError::Config(_)));
    }

    #[test]
    fn test_args_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[location]\nname = \"Vigo\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = Args::parse_from([
            "tiempo",
            "--config",
            &path,
            "--latitude",
            "40.4",
            "--longitude=-3.7",
            "--days",
            "3",
        ]);
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.location.name, "Vigo");
        assert_eq!(config.location.latitude, 40.4);
        assert_eq!(config.location.longitude, -3.7);
        assert_eq!(config.display.days_to_show, 3);
    }

    #[test]
    fn test_validation_collects_errors() {
        let mut config = Config::default();
        config.location.latitude = 91.0;
        config.display.hours_to_show = 0;

        match config.validate() {
            Err(WeatherError::Config(msg)) => {
                assert!(msg.contains("latitude"));
                assert!(msg.contains("hours_to_show"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_refresh_minutes_upper_bound() {
        let config: Config = toml::from_str("[display]\nrefresh_minutes = 1440").unwrap();
        assert!(config.validate().is_ok());

        let config: Config =
            toml::from_str("[display]\nrefresh_minutes = 9223372036854775807").unwrap();
        match config.validate() {
            Err(WeatherError::Config(msg)) => assert!(msg.contains("refresh_minutes")),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
