//! Configured entry point over the pure analytics functions.

use okrpace_core::{CheckIn, DateRange, KeyResult, QuarterTarget, Task, Time};

use crate::analytics::{aggregate_analytics_with, AnalyticsSummary};
use crate::calculator::{compute_kr_progress_with, ProgressResult};
use crate::config::EngineConfig;
use crate::forecast::{forecast_completion, CompletionForecast};
use crate::pace::PaceStatus;
use crate::quarterly::{compute_quarterly_breakdown, QuarterSummary};
use crate::rollup::{rollup_objectives_with, ObjectiveProgress};

/// The analytics engine.
///
/// Holds no state besides its configuration; every call recomputes from
/// the records it is given, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: EngineConfig,
}

impl AnalyticsEngine {
    /// Create an engine with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify a progress/expected pair.
    pub fn classify(&self, progress: f64, expected: f64) -> PaceStatus {
        self.config.thresholds.classify(progress, expected)
    }

    /// Progress of a single key result at `as_of`.
    pub fn key_result_progress(
        &self,
        kr: &KeyResult,
        check_ins: &[CheckIn],
        quarter_targets: &[QuarterTarget],
        year: i32,
        as_of: Time,
    ) -> ProgressResult {
        compute_kr_progress_with(kr, check_ins, quarter_targets, year, as_of, &self.config.thresholds)
    }

    /// Quarter-by-quarter breakdown.
    pub fn quarterly_breakdown(
        &self,
        kr: &KeyResult,
        check_ins: &[CheckIn],
        quarter_targets: &[QuarterTarget],
        year: i32,
    ) -> Vec<QuarterSummary> {
        compute_quarterly_breakdown(kr, check_ins, quarter_targets, year)
    }

    /// Analytics for a reporting period.
    pub fn analytics(
        &self,
        krs: &[KeyResult],
        check_ins: &[CheckIn],
        quarter_targets: &[QuarterTarget],
        tasks: &[Task],
        range: DateRange,
    ) -> AnalyticsSummary {
        aggregate_analytics_with(krs, check_ins, quarter_targets, tasks, range, &self.config.thresholds)
    }

    /// Objective rollup of already computed results.
    pub fn objectives(&self, krs: &[KeyResult], results: &[ProgressResult]) -> Vec<ObjectiveProgress> {
        rollup_objectives_with(krs, results, &self.config.thresholds)
    }

    /// Completion forecast for a key result.
    pub fn forecast(&self, kr: &KeyResult, check_ins: &[CheckIn], as_of: Time) -> CompletionForecast {
        forecast_completion(kr, check_ins, as_of)
    }
}
