//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dial::Point;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "circular-timer")]
#[command(about = "Radial-dial countdown timer with a headless HTTP input bridge")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Scale applied to every angular delta of the dial
    #[arg(long, default_value = "0.4")]
    pub dial_sensitivity: f64,

    /// Minimum time between accepted pointer samples, in milliseconds
    #[arg(long, default_value = "30")]
    pub update_threshold_ms: u64,

    /// Scaled rotation consumed per whole-minute step
    #[arg(long, default_value = "0.8")]
    pub minute_threshold: f64,

    /// Countdown tick period, in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_interval_ms: u64,

    /// Longest duration the dial can be set to, in minutes
    #[arg(long, default_value = "60")]
    pub max_minutes: u32,

    /// Dial center, x coordinate in control-local space
    #[arg(long, default_value = "150")]
    pub center_x: f64,

    /// Dial center, y coordinate in control-local space
    #[arg(long, default_value = "150")]
    pub center_y: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Collect the dial and countdown tuning into a validated `TimerConfig`
    pub fn timer_config(&self) -> Result<TimerConfig, ConfigError> {
        let config = TimerConfig {
            dial_sensitivity: self.dial_sensitivity,
            update_threshold: Duration::from_millis(self.update_threshold_ms),
            minute_threshold: self.minute_threshold,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            max_minutes: self.max_minutes,
            center: Point::new(self.center_x, self.center_y),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Rejected tuning values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("dial sensitivity must be a positive number, got {0}")]
    InvalidSensitivity(f64),
    #[error("minute threshold must be a positive number, got {0}")]
    InvalidMinuteThreshold(f64),
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("max minutes must be greater than zero")]
    ZeroMaxMinutes,
    #[error("dial center must have finite coordinates")]
    InvalidCenter,
}

/// Tuning constants shared by the dial controller and the countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub dial_sensitivity: f64,
    #[serde(with = "millis")]
    pub update_threshold: Duration,
    pub minute_threshold: f64,
    #[serde(with = "millis")]
    pub tick_interval: Duration,
    pub max_minutes: u32,
    pub center: Point,
}

impl TimerConfig {
    /// Check every option is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dial_sensitivity.is_finite() && self.dial_sensitivity > 0.0) {
            return Err(ConfigError::InvalidSensitivity(self.dial_sensitivity));
        }
        if !(self.minute_threshold.is_finite() && self.minute_threshold > 0.0) {
            return Err(ConfigError::InvalidMinuteThreshold(self.minute_threshold));
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.max_minutes == 0 {
            return Err(ConfigError::ZeroMaxMinutes);
        }
        if !(self.center.x.is_finite() && self.center.y.is_finite()) {
            return Err(ConfigError::InvalidCenter);
        }
        Ok(())
    }

    /// Upper bound of the duration in seconds
    pub fn max_seconds(&self) -> f64 {
        f64::from(self.max_minutes) * 60.0
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            dial_sensitivity: 0.4,
            update_threshold: Duration::from_millis(30),
            minute_threshold: 0.8,
            tick_interval: Duration::from_secs(1),
            max_minutes: 60,
            center: Point::new(150.0, 150.0),
        }
    }
}

/// Durations travel as whole milliseconds
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_timer_defaults() {
        let config = Config::try_parse_from(["circular-timer"]).unwrap();
        assert_eq!(config.timer_config().unwrap(), TimerConfig::default());
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn cli_flags_override_tuning() {
        let config = Config::try_parse_from([
            "circular-timer",
            "--dial-sensitivity",
            "1.5",
            "--tick-interval-ms",
            "100",
            "--max-minutes",
            "90",
            "-v",
        ])
        .unwrap();
        let timer = config.timer_config().unwrap();
        assert_eq!(timer.dial_sensitivity, 1.5);
        assert_eq!(timer.tick_interval, Duration::from_millis(100));
        assert_eq!(timer.max_seconds(), 5400.0);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_unusable_values() {
        let mut config = TimerConfig::default();
        config.dial_sensitivity = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidSensitivity(0.0)));

        let mut config = TimerConfig::default();
        config.tick_interval = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));

        let mut config = TimerConfig::default();
        config.max_minutes = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxMinutes));

        let mut config = TimerConfig::default();
        config.center = Point::new(f64::NAN, 0.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidCenter));
    }

    #[test]
    fn serializes_durations_as_millis() {
        let json = serde_json::to_value(TimerConfig::default()).unwrap();
        assert_eq!(json["update_threshold"], 30);
        assert_eq!(json["tick_interval"], 1000);
    }
}
