//! Progress & pace analytics.
//!
//! Pure functions that turn key results, their check-ins and optional
//! quarter targets into progress fractions, pace classifications, quarterly
//! comparisons, burn-up series and velocity figures. Nothing here performs
//! I/O or keeps state between calls.

#![warn(missing_docs)]

pub mod interpolator;
pub mod calculator;
pub mod pace;
pub mod quarterly;
pub mod analytics;
pub mod rollup;
pub mod forecast;
pub mod config;
pub mod engine;

pub use interpolator::{elapsed_fraction, expected_value, value_to_progress};
pub use calculator::{compute_kr_progress, compute_kr_progress_with, ProgressResult};
pub use pace::{classify_pace, PaceStatus, PaceThresholds};
pub use quarterly::{compute_quarterly_breakdown, quarter_end_value, QuarterSummary};
pub use analytics::{
    aggregate_analytics, aggregate_analytics_with, task_velocity, AnalyticsSummary, BurnUpPoint,
    DailyCheckIns, PaceBreakdown, TaskVelocity, WeeklyThroughput,
};
pub use rollup::{rollup_objectives, rollup_objectives_with, ObjectiveProgress};
pub use forecast::{forecast_completion, CompletionForecast};
pub use config::{ConfigError, EngineConfig};
pub use engine::AnalyticsEngine;
