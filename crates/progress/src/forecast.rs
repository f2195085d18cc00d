//! Completion forecasting from check-in velocity.

use chrono::TimeDelta;
use okrpace_core::{year_end, CheckIn, KeyResult, KeyResultId, Time};
use serde::{Deserialize, Serialize};

use crate::interpolator::value_to_progress;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Projection of when a key result will reach its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionForecast {
    /// Key result
    pub key_result_id: KeyResultId,

    /// Value change per day between the first and latest check-in
    pub rate_per_day: Option<f64>,

    /// When the target is projected to be reached
    pub projected_completion: Option<Time>,

    /// Progress projected for the end of the key result's year
    pub projected_year_end_progress: Option<f64>,

    /// Projected completion falls inside the key result's year
    pub completes_in_year: bool,
}

impl CompletionForecast {
    fn none(key_result_id: KeyResultId) -> Self {
        Self {
            key_result_id,
            rate_per_day: None,
            projected_completion: None,
            projected_year_end_progress: None,
            completes_in_year: false,
        }
    }
}

fn days_between(from: Time, to: Time) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

fn add_days(at: Time, days: f64) -> Option<Time> {
    let millis = days * MILLIS_PER_DAY;
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    at.checked_add_signed(delta)
}

/// Project completion of a metric key result from the check-ins recorded
/// up to `as_of`.
///
/// Milestones, degenerate metrics and key results with fewer than two
/// distinct check-in instants have no projection.
pub fn forecast_completion(kr: &KeyResult, check_ins: &[CheckIn], as_of: Time) -> CompletionForecast {
    if !kr.is_metric() || kr.is_degenerate() {
        return CompletionForecast::none(kr.id);
    }

    let mut own: Vec<&CheckIn> = check_ins
        .iter()
        .filter(|c| c.key_result_id == kr.id && c.recorded_at <= as_of)
        .collect();
    own.sort_by_key(|c| c.recorded_at);

    let (Some(first), Some(latest)) = (own.first(), own.last()) else {
        return CompletionForecast::none(kr.id);
    };
    let elapsed = days_between(first.recorded_at, latest.recorded_at);
    if elapsed <= 0.0 {
        return CompletionForecast::none(kr.id);
    }

    let rate = (latest.value - first.value) / elapsed;
    let direction = kr.range().signum();
    let end = year_end(kr.year);

    let projected_year_end_progress = if latest.recorded_at < end {
        let value = latest.value + rate * days_between(latest.recorded_at, end);
        Some(value_to_progress(kr, value))
    } else {
        None
    };

    let remaining = kr.target_value - latest.value;
    let projected_completion = if remaining * direction <= 0.0 {
        Some(latest.recorded_at)
    } else if rate * direction <= 0.0 {
        None
    } else {
        add_days(latest.recorded_at, remaining / rate)
    };

    tracing::trace!(
        "Forecast for {}: rate {:.4}/day, completion {:?}",
        kr.id,
        rate,
        projected_completion
    );

    CompletionForecast {
        key_result_id: kr.id,
        rate_per_day: Some(rate),
        completes_in_year: projected_completion.is_some_and(|t| t < end),
        projected_completion,
        projected_year_end_progress,
    }
}
