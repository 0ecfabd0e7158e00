//! Pricer configuration.
//!
//! Loaded from an optional TOML file; command line flags override individual values.

use std::path::Path;
use std::str::FromStr;

use bsm_pricing::CurveSettings;
use serde::Deserialize;
use thiserror::Error;

/// File read when `--config` is not given. Its absence is not an error.
pub const DEFAULT_CONFIG_PATH: &str = "bsm-pricer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("invalid curve settings: {0}")]
    InvalidCurve(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Inputs used when a flag is omitted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketDefaults {
    pub underlying_price: f64,
    pub strike_price: f64,
    pub time_to_expiration: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            underlying_price: 100.0,
            strike_price: 105.0,
            time_to_expiration: 1.0,
            risk_free_rate: 0.05,
            volatility: 0.2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricerConfig {
    pub log_level: LogLevel,
    pub defaults: MarketDefaults,
    pub curve: CurveSettings,
}

impl PricerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// An explicit path must exist; otherwise the default file is read if present.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.curve.num_points == 0 {
            return Err(ConfigError::InvalidCurve(
                "num_points must be positive".to_string(),
            ));
        }
        if !self.curve.price_range.is_finite() || self.curve.price_range < 0.0 {
            return Err(ConfigError::InvalidCurve(format!(
                "price_range must be a finite non-negative number, got {}",
                self.curve.price_range
            )));
        }
        Ok(())
    }
}
