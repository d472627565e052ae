//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `indidrive.toml` in the working directory, or the file named by
//! `INDIDRIVE_CONFIG`. Every field has a default so the file is optional.
//! Environment variables take precedence over file values.

use std::time::Duration;

use indidrive_adapter_metoffice::MetOfficeConfig;
use indidrive_app::outbox::DEFAULT_CAPACITY;
use serde::Deserialize;

const DEFAULT_PATH: &str = "indidrive.toml";

/// Top-level configuration shared by all driver executables.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
    pub door: DoorConfig,
    pub temperature: TemperatureConfig,
    pub led: LedConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Messages kept waiting for the writer before the oldest is dropped.
    pub queue_capacity: usize,
}

/// Roll-off door settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Time a movement takes, in seconds.
    pub dwell_secs: u64,
    pub poll_interval_ms: u64,
}

/// Temperature settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    pub poll_interval_secs: u64,
    /// Served until the first successful reading.
    pub fallback_value: f64,
    /// Met Office backend; used only when an API key is set.
    pub metoffice: MetOfficeConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LedConfig {
    pub poll_interval_ms: u64,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is unreadable or malformed,
    /// or if the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("INDIDRIVE_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// `var` looks up one environment variable.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("INDIDRIVE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("INDIDRIVE_METOFFICE_KEY") {
            self.temperature.metoffice.api_key = Some(val);
        }
        if let Some(capacity) = var("INDIDRIVE_QUEUE_CAPACITY").and_then(|v| v.parse().ok()) {
            self.engine.queue_capacity = capacity;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "engine.queue_capacity must be non-zero".to_string(),
            ));
        }
        let intervals = [
            ("door.poll_interval_ms", self.door.poll_interval_ms),
            ("temperature.poll_interval_secs", self.temperature.poll_interval_secs),
            ("led.poll_interval_ms", self.led.poll_interval_ms),
            ("temperature.metoffice.timeout_secs", self.temperature.metoffice.timeout_secs),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Validation(format!("{name} must be non-zero")));
        }
        if self.temperature.metoffice.sites.is_empty() {
            return Err(ConfigError::Validation(
                "temperature.metoffice.sites must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl DoorConfig {
    #[must_use]
    pub fn dwell(&self) -> Duration {
        Duration::from_secs(self.dwell_secs)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl TemperatureConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl LedConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "indidrive=info".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            dwell_secs: 20,
            poll_interval_ms: 1000,
        }
    }
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 600,
            fallback_value: 0.0,
            metoffice: MetOfficeConfig::default(),
        }
    }
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.filter, "indidrive=info");
        assert_eq!(config.engine.queue_capacity, 100);
        assert_eq!(config.door.dwell(), Duration::from_secs(20));
        assert_eq!(config.door.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.temperature.poll_interval(), Duration::from_secs(600));
        assert!(config.temperature.metoffice.api_key.is_none());
        assert_eq!(config.led.poll_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.engine.queue_capacity, 100);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [logging]
            filter = 'debug'

            [engine]
            queue_capacity = 10

            [door]
            dwell_secs = 5
            poll_interval_ms = 250

            [temperature]
            poll_interval_secs = 60
            fallback_value = 12.5

            [temperature.metoffice]
            api_key = 'abc'
            sites = [1, 2, 3]

            [led]
            poll_interval_ms = 500
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.engine.queue_capacity, 10);
        assert_eq!(config.door.dwell(), Duration::from_secs(5));
        assert_eq!(config.door.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.temperature.poll_interval(), Duration::from_secs(60));
        assert!((config.temperature.fallback_value - 12.5).abs() < f64::EPSILON);
        assert_eq!(config.temperature.metoffice.api_key.as_deref(), Some("abc"));
        assert_eq!(config.temperature.metoffice.sites, vec![1, 2, 3]);
        assert_eq!(config.temperature.metoffice.timeout_secs, 30);
        assert_eq!(config.led.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.door.dwell_secs, 20);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("INDIDRIVE_LOG", "indidrive=debug"),
            ("INDIDRIVE_METOFFICE_KEY", "k3y"),
            ("INDIDRIVE_QUEUE_CAPACITY", "42"),
        ]));
        assert_eq!(config.logging.filter, "indidrive=debug");
        assert_eq!(config.temperature.metoffice.api_key.as_deref(), Some("k3y"));
        assert_eq!(config.engine.queue_capacity, 42);
    }

    #[test]
    fn should_prefer_rust_log_over_indidrive_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("INDIDRIVE_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparseable_capacity() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("INDIDRIVE_QUEUE_CAPACITY", "lots")]));
        assert_eq!(config.engine.queue_capacity, 100);
    }

    #[test]
    fn should_reject_zero_capacity() {
        let mut config = Config::default();
        config.engine.queue_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_poll_interval() {
        let mut config = Config::default();
        config.door.poll_interval_ms = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: door.poll_interval_ms must be non-zero"
        );
    }

    #[test]
    fn should_reject_empty_site_list() {
        let mut config = Config::default();
        config.temperature.metoffice.sites.clear();
        assert!(config.validate().is_err());
    }
}
