//! Tunables for an opponent tracker.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_HYPOTHESES: usize = 1000;
pub const DEFAULT_DISCARD_THRESHOLD: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Hypothesis count above which the belief set falls back to the empty hand.
    #[serde(default = "default_max_hypotheses")]
    pub max_hypotheses: usize,
    /// Hand size above which production triggers the forced-discard expansion.
    #[serde(default = "default_discard_threshold")]
    pub discard_threshold: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_hypotheses: DEFAULT_MAX_HYPOTHESES,
            discard_threshold: DEFAULT_DISCARD_THRESHOLD,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hypotheses == 0 {
            return Err(ConfigError::InvalidField {
                field: "max_hypotheses",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.discard_threshold == 0 {
            return Err(ConfigError::InvalidField {
                field: "discard_threshold",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_max_hypotheses() -> usize {
    DEFAULT_MAX_HYPOTHESES
}

fn default_discard_threshold() -> u32 {
    DEFAULT_DISCARD_THRESHOLD
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}
