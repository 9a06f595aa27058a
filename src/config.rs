//! Environment configuration

use crate::confetti::Surface;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_ORACLE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_FRAME_MS: u64 = 16;
const DEFAULT_SURFACE_WIDTH: f32 = 80.0;
const DEFAULT_SURFACE_HEIGHT: f32 = 24.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be positive")]
    NotPositive { var: &'static str },
    #[error("{var} must be a finite number of at least 0, got {value}")]
    OutOfRange { var: &'static str, value: String },
}

/// Runtime settings for the binary
#[derive(Debug, Clone, PartialEq)]
pub struct SeerConfig {
    /// Base URL of the oracle service
    pub oracle_url: String,
    /// Period between animation frames
    pub frame_interval: Duration,
    /// Area the confetti falls through
    pub surface: Surface,
}

impl Default for SeerConfig {
    fn default() -> Self {
        Self {
            oracle_url: DEFAULT_ORACLE_URL.to_string(),
            frame_interval: Duration::from_millis(DEFAULT_FRAME_MS),
            surface: Surface::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT),
        }
    }
}

impl SeerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset variables fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let oracle_url = lookup("SEER_ORACLE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.oracle_url);

        let frame_interval = match parse::<u64>(&lookup, "SEER_FRAME_MS")? {
            Some(0) => return Err(ConfigError::NotPositive { var: "SEER_FRAME_MS" }),
            Some(ms) => Duration::from_millis(ms),
            None => defaults.frame_interval,
        };

        let width = dimension(&lookup, "SEER_SURFACE_WIDTH", defaults.surface.width)?;
        let height = dimension(&lookup, "SEER_SURFACE_HEIGHT", defaults.surface.height)?;

        Ok(Self {
            oracle_url,
            frame_interval,
            surface: Surface::new(width, height),
        })
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}

/// Surface dimension; the particle engine needs a finite, non-negative extent
fn dimension(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: f32,
) -> Result<f32, ConfigError> {
    match parse::<f32>(lookup, var)? {
        None => Ok(default),
        Some(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Some(value) => Err(ConfigError::OutOfRange {
            var,
            value: value.to_string(),
        }),
    }
}
