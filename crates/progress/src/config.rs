//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::pace::PaceThresholds;

/// Errors raised while loading engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Thresholds out of order or not finite
    #[error("Invalid pace thresholds: on_track_min={on_track_min}, at_risk_min={at_risk_min}")]
    InvalidThresholds {
        /// Configured on-track bound
        on_track_min: f64,
        /// Configured at-risk bound
        at_risk_min: f64,
    },
}

/// Configuration for the analytics engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pace classification policy
    pub thresholds: PaceThresholds,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check `at_risk_min <= on_track_min <= 0` with finite bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let PaceThresholds {
            on_track_min,
            at_risk_min,
        } = self.thresholds;

        let ordered = on_track_min.is_finite()
            && at_risk_min.is_finite()
            && at_risk_min <= on_track_min
            && on_track_min <= 0.0;

        if ordered {
            Ok(())
        } else {
            Err(ConfigError::InvalidThresholds {
                on_track_min,
                at_risk_min,
            })
        }
    }
}
