//! Pace classification.

use serde::{Deserialize, Serialize};

/// How a key result's actual progress compares to its expected pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
    /// At, near, or ahead of the expected pace
    OnTrack,
    /// Moderately behind
    AtRisk,
    /// Far behind
    OffTrack,
}

impl PaceStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceStatus::OnTrack => "on_track",
            PaceStatus::AtRisk => "at_risk",
            PaceStatus::OffTrack => "off_track",
        }
    }
}

impl std::fmt::Display for PaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy thresholds on `delta = progress - expected` (both fractions).
///
/// `delta >= on_track_min` is on track, `delta >= at_risk_min` is at risk,
/// anything lower is off track. Bounds are inclusive up to
/// [`PaceThresholds::EPSILON`], so a delta of exactly five points behind
/// stays on track even when `0.35 - 0.40` rounds below `-0.05`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceThresholds {
    /// Lowest delta still classified on track
    pub on_track_min: f64,

    /// Lowest delta still classified at risk
    pub at_risk_min: f64,
}

impl PaceThresholds {
    /// Default lower bound for on track: 5 points behind.
    pub const DEFAULT_ON_TRACK_MIN: f64 = -0.05;

    /// Default lower bound for at risk: 20 points behind.
    pub const DEFAULT_AT_RISK_MIN: f64 = -0.20;

    /// Slack absorbed when comparing a delta against a bound.
    pub const EPSILON: f64 = 1e-9;

    /// Classify actual progress against expected progress.
    ///
    /// A NaN delta satisfies no bound and lands in `OffTrack`.
    pub fn classify(&self, progress: f64, expected: f64) -> PaceStatus {
        let delta = progress - expected + Self::EPSILON;
        if delta >= self.on_track_min {
            PaceStatus::OnTrack
        } else if delta >= self.at_risk_min {
            PaceStatus::AtRisk
        } else {
            PaceStatus::OffTrack
        }
    }
}

impl Default for PaceThresholds {
    fn default() -> Self {
        Self {
            on_track_min: Self::DEFAULT_ON_TRACK_MIN,
            at_risk_min: Self::DEFAULT_AT_RISK_MIN,
        }
    }
}

/// Classify with the default thresholds.
pub fn classify_pace(progress: f64, expected: f64) -> PaceStatus {
    PaceThresholds::default().classify(progress, expected)
}
