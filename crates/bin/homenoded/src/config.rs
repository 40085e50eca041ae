//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homenode.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::fmt;
use std::time::Duration;

use homenode_adapter_mqtt::MqttConfig;
use homenode_app::ports::Credentials;
use homenode_app::timing::Timings;
use homenode_domain::climate::{ClimatePolicy, DEFAULT_THRESHOLD_CELSIUS};
use homenode_domain::temperature::Temperature;
use serde::Deserialize;

/// Default config file, relative to the working directory.
pub const CONFIG_FILE: &str = "homenode.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wireless station credentials.
    pub link: LinkConfig,
    /// Broker and session settings.
    pub mqtt: MqttConfig,
    /// Climate control rule.
    pub climate: ClimateConfig,
    /// Retry and polling delays.
    pub timing: TimingConfig,
    /// Virtual thermometer.
    pub sensor: SensorConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Access point to join.
#[derive(Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub ssid: String,
    pub password: String,
}

/// Climate control configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// The climate unit runs strictly above this temperature.
    pub threshold_celsius: f32,
}

/// Delays, all in whole seconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub link_attempt_timeout: u64,
    pub link_check_interval: u64,
    pub link_disconnect_pause: u64,
    pub link_retry_delay: u64,
    pub session_retry_delay: u64,
    pub poll_interval: u64,
    pub fault_pause: u64,
}

/// Virtual thermometer configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Temperature the thermometer reports.
    pub celsius: f32,
    /// Fail every n-th sample; 0 never fails.
    pub fail_every: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `homenode.toml` (if present), apply
    /// environment-variable overrides and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but cannot be read or is
    /// malformed, or if the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
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

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HOMENODE_WIFI_SSID") {
            self.link.ssid = val;
        }
        if let Some(val) = var("HOMENODE_WIFI_PASSWORD") {
            self.link.password = val;
        }
        if let Some(val) = var("HOMENODE_BROKER_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Some(port) = var("HOMENODE_BROKER_PORT").and_then(|val| val.parse().ok()) {
            self.mqtt.broker_port = port;
        }
        if let Some(val) = var("HOMENODE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.link.ssid.is_empty() {
            return Err(ConfigError::Validation("ssid must not be empty".to_string()));
        }
        if self.mqtt.broker_host.is_empty() {
            return Err(ConfigError::Validation(
                "broker host must not be empty".to_string(),
            ));
        }
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation(
                "broker port must be non-zero".to_string(),
            ));
        }
        if let Some(name) = self.timing.first_zero() {
            return Err(ConfigError::Validation(format!(
                "timing.{name} must be positive"
            )));
        }
        if !self.climate.threshold_celsius.is_finite() {
            return Err(ConfigError::Validation(
                "climate threshold must be a finite number".to_string(),
            ));
        }
        if !self.sensor.celsius.is_finite() {
            return Err(ConfigError::Validation(
                "sensor temperature must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    /// Station credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            ssid: self.link.ssid.clone(),
            password: self.link.password.clone(),
        }
    }

    /// Climate rule built from the configured threshold.
    #[must_use]
    pub fn climate_policy(&self) -> ClimatePolicy {
        ClimatePolicy::new(Temperature::celsius(self.climate.threshold_celsius))
    }

    /// Delays as durations.
    #[must_use]
    pub fn timings(&self) -> Timings {
        let t = &self.timing;
        Timings {
            link_attempt_timeout: Duration::from_secs(t.link_attempt_timeout),
            link_check_interval: Duration::from_secs(t.link_check_interval),
            link_disconnect_pause: Duration::from_secs(t.link_disconnect_pause),
            link_retry_delay: Duration::from_secs(t.link_retry_delay),
            session_retry_delay: Duration::from_secs(t.session_retry_delay),
            poll_interval: Duration::from_secs(t.poll_interval),
            fault_pause: Duration::from_secs(t.fault_pause),
        }
    }
}

impl TimingConfig {
    fn first_zero(&self) -> Option<&'static str> {
        [
            ("link_attempt_timeout", self.link_attempt_timeout),
            ("link_check_interval", self.link_check_interval),
            ("link_disconnect_pause", self.link_disconnect_pause),
            ("link_retry_delay", self.link_retry_delay),
            ("session_retry_delay", self.session_retry_delay),
            ("poll_interval", self.poll_interval),
            ("fault_pause", self.fault_pause),
        ]
        .into_iter()
        .find_map(|(name, secs)| (secs == 0).then_some(name))
    }
}

impl fmt::Debug for LinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkConfig")
            .field("ssid", &self.ssid)
            .field("password", &"***")
            .finish()
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            ssid: "Wokwi-GUEST".to_string(),
            password: String::new(),
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            threshold_celsius: DEFAULT_THRESHOLD_CELSIUS,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            link_attempt_timeout: 20,
            link_check_interval: 1,
            link_disconnect_pause: 2,
            link_retry_delay: 5,
            session_retry_delay: 5,
            poll_interval: 1,
            fault_pause: 5,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            celsius: 22.0,
            fail_every: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homenoded=info,homenode=info".to_string(),
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
