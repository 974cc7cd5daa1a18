/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```
//! use orderbook_reconciler::OrderbookConfig;
//!
//! let config = OrderbookConfig::from_json_str("{}").unwrap();
//! assert_eq!(config.submission.delay_ms, 100);
//! assert_eq!(config.board.highlight_ms, 600);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for [`OrderbookConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A sampling range is empty, inverted or not strictly positive.
    #[error("invalid {name} range [{min}, {max})")]
    InvalidRange {
        /// Which range failed.
        name: &'static str,
        /// Lower bound as configured.
        min: f64,
        /// Upper bound as configured.
        max: f64,
    },

    /// The command channel must hold at least one command.
    #[error("channel capacity must be greater than zero")]
    ZeroCapacity,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderbookConfig {
    /// Command channel buffer size (backpressure when full).
    pub channel_capacity: usize,

    /// Synthetic order sampling ranges.
    pub generator: GeneratorConfig,

    /// Simulated submission settings.
    pub submission: SubmissionConfig,

    /// Reference renderer settings.
    pub board: BoardConfig,
}

impl Default for OrderbookConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 65536,
            generator: GeneratorConfig::default(),
            submission: SubmissionConfig::default(),
            board: BoardConfig::default(),
        }
    }
}

impl OrderbookConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed JSON, or any validation error.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroCapacity`] or [`ConfigError::InvalidRange`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        self.generator.validate()
    }
}

/// Sampling ranges for synthetic orders, half-open `[min, max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Inclusive lower quantity bound.
    pub quantity_min: f64,
    /// Exclusive upper quantity bound.
    pub quantity_max: f64,
    /// Inclusive lower price bound.
    pub price_min: f64,
    /// Exclusive upper price bound.
    pub price_max: f64,
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            quantity_min: 0.1,
            quantity_max: 10.1,
            price_min: 50.0,
            price_max: 1050.0,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Quantity sampling range.
    #[must_use]
    pub fn quantity_range(&self) -> Range<f64> {
        self.quantity_min..self.quantity_max
    }

    /// Price sampling range.
    #[must_use]
    pub fn price_range(&self) -> Range<f64> {
        self.price_min..self.price_max
    }

    /// Checks that both ranges are non-empty and strictly positive.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidRange`] naming the first offending range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("quantity", self.quantity_min, self.quantity_max)?;
        check_range("price", self.price_min, self.price_max)
    }
}

fn check_range(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons, so it lands here too.
    if !(min > 0.0 && min < max && max.is_finite()) {
        return Err(ConfigError::InvalidRange { name, min, max });
    }
    Ok(())
}

/// Simulated submission settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Delay before the simulated backend acknowledges an order.
    pub delay_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self { delay_ms: 100 }
    }
}

impl SubmissionConfig {
    /// Delay as a [`Duration`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Reference renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// How long a freshly inserted row stays highlighted.
    pub highlight_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { highlight_ms: 600 }
    }
}

impl BoardConfig {
    /// Highlight duration as a [`Duration`].
    #[must_use]
    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}
