use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::timer::CookingTimer;
use crate::units::UnitSystem;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Unit system recipes are displayed in
    #[serde(default = "default_units")]
    pub units: UnitSystem,
    /// Default recipe collection, a file path or an http(s) URL
    #[serde(default)]
    pub data_source: Option<String>,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Countdown timer settings
    #[serde(default)]
    pub timer: TimerConfig,
}

/// Configuration for the countdown timer
#[derive(Debug, Deserialize, Clone)]
pub struct TimerConfig {
    /// Seconds the done indication stays up before reverting to idle
    #[serde(default = "default_grace_secs")]
    pub grace_secs: u64,
    /// Remaining seconds at which the display switches to the warning state
    #[serde(default = "default_warning_secs")]
    pub warning_secs: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            grace_secs: default_grace_secs(),
            warning_secs: default_warning_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            units: default_units(),
            data_source: None,
            timeout: default_timeout(),
            timer: TimerConfig::default(),
        }
    }
}

// Default value functions
fn default_units() -> UnitSystem {
    UnitSystem::Metric
}

fn default_timeout() -> u64 {
    30
}

fn default_grace_secs() -> u64 {
    3
}

fn default_warning_secs() -> u64 {
    10
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__TIMER__GRACE_SECS
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: RECIPES__TIMER__GRACE_SECS
            .add_source(
                Environment::with_prefix("RECIPES")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// HTTP timeout as a duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// A countdown timer configured with this config's timer settings
    pub fn cooking_timer(&self) -> CookingTimer {
        CookingTimer::with_settings(
            Duration::from_secs(self.timer.grace_secs),
            self.timer.warning_secs,
        )
    }
}
