//! Key result progress calculation.

use okrpace_core::{latest_check_in, CheckIn, KeyResult, KeyResultId, KeyResultKind, QuarterPlan, QuarterTarget, Time};
use serde::{Deserialize, Serialize};

use crate::interpolator::{expected_value_with_plan, value_to_progress};
use crate::pace::{PaceStatus, PaceThresholds};

/// Computed progress of a single key result at an evaluation instant.
///
/// Recomputed on every call and never cached by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressResult {
    /// Key result this result describes
    pub key_result_id: KeyResultId,

    /// Progress fraction; may be below 0 or above 1
    pub progress: f64,

    /// Value of the latest check-in, or the start value
    pub current_value: f64,

    /// Value the key result should have reached by `evaluated_at`
    pub expected_value: f64,

    /// `expected_value` as a fraction of the target range
    pub expected_progress: f64,

    /// Pace classification
    pub pace: PaceStatus,

    /// Evaluation instant
    pub evaluated_at: Time,

    /// Target equals start, so progress is undefined
    pub degenerate: bool,

    /// Check-ins that belonged to this key result
    pub check_in_count: usize,
}

impl ProgressResult {
    /// Progress clamped to `[0, 1]` for progress bars.
    pub fn display_progress(&self) -> f64 {
        self.progress.clamp(0.0, 1.0)
    }

    /// `progress - expected_progress`.
    pub fn delta(&self) -> f64 {
        self.progress - self.expected_progress
    }
}

/// Compute progress with the default pace thresholds.
pub fn compute_kr_progress(
    kr: &KeyResult,
    check_ins: &[CheckIn],
    quarter_targets: &[QuarterTarget],
    year: i32,
    as_of: Time,
) -> ProgressResult {
    compute_kr_progress_with(kr, check_ins, quarter_targets, year, as_of, &PaceThresholds::default())
}

/// Compute progress of `kr` at `as_of`, classifying pace with `thresholds`.
pub fn compute_kr_progress_with(
    kr: &KeyResult,
    check_ins: &[CheckIn],
    quarter_targets: &[QuarterTarget],
    year: i32,
    as_of: Time,
    thresholds: &PaceThresholds,
) -> ProgressResult {
    let plan = QuarterPlan::for_key_result(quarter_targets, kr.id);
    let own: Vec<&CheckIn> = check_ins.iter().filter(|c| c.key_result_id == kr.id).collect();

    let current_value = latest_check_in(check_ins, kr.id, None)
        .map(|c| c.value)
        .unwrap_or(kr.start_value);

    let progress = match kr.kind {
        KeyResultKind::Milestone => {
            if own.iter().any(|c| c.is_truthy()) {
                1.0
            } else {
                0.0
            }
        }
        KeyResultKind::Metric => value_to_progress(kr, current_value),
    };

    let degenerate = kr.is_degenerate();
    if degenerate {
        tracing::warn!("Key result {} has target equal to start ({})", kr.id, kr.start_value);
    }

    let expected_value = expected_value_with_plan(kr, &plan, as_of, year);
    let expected_progress = value_to_progress(kr, expected_value);
    let pace = thresholds.classify(progress, expected_progress);

    tracing::trace!(
        "Key result {}: progress {:.4}, expected {:.4}, pace {}",
        kr.id,
        progress,
        expected_progress,
        pace
    );

    ProgressResult {
        key_result_id: kr.id,
        progress,
        current_value,
        expected_value,
        expected_progress,
        pace,
        evaluated_at: as_of,
        degenerate,
        check_in_count: own.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use okrpace_core::{year_end, year_start, ObjectiveId, Quarter};

    fn at(y: i32, m: u32, d: u32) -> Time {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn midpoint(year: i32) -> Time {
        year_start(year) + (year_end(year) - year_start(year)) / 2
    }

    #[test]
    fn test_midpoint_single_check_in() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let mid = midpoint(2026);
        let check_ins = vec![CheckIn::new(kr.id, 50.0, mid)];

        let result = compute_kr_progress(&kr, &check_ins, &[], 2026, mid);
        assert_eq!(result.progress, 0.5);
        assert!((result.expected_progress - 0.5).abs() < 1e-9);
        assert_eq!(result.pace, PaceStatus::OnTrack);
    }

    #[test]
    fn test_no_check_ins() {
        let kr = KeyResult::metric(ObjectiveId::new(), 20.0, 80.0, 2026);
        let result = compute_kr_progress(&kr, &[], &[], 2026, at(2026, 3, 1));
        assert_eq!(result.current_value, 20.0);
        assert_eq!(result.progress, 0.0);
        assert_eq!(result.check_in_count, 0);
        assert!(!result.degenerate);
    }

    #[test]
    fn test_degenerate_key_result() {
        let kr = KeyResult::metric(ObjectiveId::new(), 10.0, 10.0, 2026);
        let check_ins = vec![CheckIn::new(kr.id, 30.0, at(2026, 2, 1))];
        let result = compute_kr_progress(&kr, &check_ins, &[], 2026, at(2026, 6, 1));
        assert_eq!(result.progress, 0.0);
        assert_eq!(result.expected_progress, 0.0);
        assert!(result.degenerate);
        assert_eq!(result.pace, PaceStatus::OnTrack);
    }

    #[test]
    fn test_end_to_end_example() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 1000.0, 2026);
        let check_ins = vec![
            CheckIn::new(kr.id, 0.0, at(2026, 1, 1)),
            CheckIn::new(kr.id, 200.0, at(2026, 4, 1)),
            CheckIn::new(kr.id, 600.0, at(2026, 7, 1)),
        ];

        let result = compute_kr_progress(&kr, &check_ins, &[], 2026, at(2026, 7, 1));
        assert_eq!(result.current_value, 600.0);
        assert!((result.progress - 0.6).abs() < 1e-12);
        assert!((result.expected_progress - 0.5).abs() < 0.01);
        assert!(result.delta() > 0.09);
        assert_eq!(result.pace, PaceStatus::OnTrack);
    }

    #[test]
    fn test_latest_by_timestamp_not_input_order() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let check_ins = vec![
            CheckIn::new(kr.id, 70.0, at(2026, 5, 1)),
            CheckIn::new(kr.id, 30.0, at(2026, 2, 1)),
        ];
        let result = compute_kr_progress(&kr, &check_ins, &[], 2026, at(2026, 6, 1));
        assert_eq!(result.current_value, 70.0);
    }

    #[test]
    fn test_other_key_results_ignored() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let other = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let check_ins = vec![CheckIn::new(other.id, 90.0, at(2026, 2, 1))];
        let result = compute_kr_progress(&kr, &check_ins, &[], 2026, at(2026, 6, 1));
        assert_eq!(result.progress, 0.0);
        assert_eq!(result.check_in_count, 0);
    }

    #[test]
    fn test_over_and_under_achievement_unclamped() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let over = vec![CheckIn::new(kr.id, 150.0, at(2026, 2, 1))];
        let result = compute_kr_progress(&kr, &over, &[], 2026, at(2026, 6, 1));
        assert_eq!(result.progress, 1.5);
        assert_eq!(result.display_progress(), 1.0);

        let under = vec![CheckIn::new(kr.id, -10.0, at(2026, 2, 1))];
        let result = compute_kr_progress(&kr, &under, &[], 2026, at(2026, 6, 1));
        assert_eq!(result.progress, -0.1);
        assert_eq!(result.display_progress(), 0.0);
    }

    #[test]
    fn test_milestone_any_truthy() {
        let kr = KeyResult::milestone(ObjectiveId::new(), 2026);
        let check_ins = vec![
            CheckIn::new(kr.id, 1.0, at(2026, 2, 1)),
            CheckIn::new(kr.id, 0.0, at(2026, 3, 1)),
        ];
        let result = compute_kr_progress(&kr, &check_ins, &[], 2026, at(2026, 6, 1));
        assert_eq!(result.progress, 1.0);
        assert_eq!(result.current_value, 0.0);
        assert_eq!(result.expected_value, 0.0);
    }

    #[test]
    fn test_milestone_overdue_is_off_track() {
        let kr = KeyResult::milestone(ObjectiveId::new(), 2026);
        let result = compute_kr_progress(&kr, &[], &[], 2026, at(2027, 1, 5));
        assert_eq!(result.progress, 0.0);
        assert_eq!(result.expected_progress, 1.0);
        assert_eq!(result.pace, PaceStatus::OffTrack);
    }

    #[test]
    fn test_idempotent() {
        let kr = KeyResult::metric(ObjectiveId::new(), 3.0, 17.0, 2026);
        let check_ins = vec![
            CheckIn::new(kr.id, 5.5, at(2026, 2, 11)),
            CheckIn::new(kr.id, 9.25, at(2026, 8, 3)),
        ];
        let targets = vec![QuarterTarget::new(kr.id, Quarter::Q2, 8.0)];
        let a = compute_kr_progress(&kr, &check_ins, &targets, 2026, at(2026, 9, 1));
        let b = compute_kr_progress(&kr, &check_ins, &targets, 2026, at(2026, 9, 1));
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn test_later_higher_check_in_increases_progress() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let mut check_ins = vec![CheckIn::new(kr.id, 40.0, at(2026, 3, 1))];
        let before = compute_kr_progress(&kr, &check_ins, &[], 2026, at(2026, 6, 1));

        check_ins.push(CheckIn::new(kr.id, 55.0, at(2026, 4, 1)));
        let after = compute_kr_progress(&kr, &check_ins, &[], 2026, at(2026, 6, 1));

        assert!(after.progress > before.progress);
        assert_eq!(after.progress, 0.55);
    }

    #[test]
    fn test_nan_propagates() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let check_ins = vec![CheckIn::new(kr.id, f64::NAN, at(2026, 3, 1))];
        let result = compute_kr_progress(&kr, &check_ins, &[], 2026, at(2026, 6, 1));
        assert!(result.progress.is_nan());
        assert_eq!(result.pace, PaceStatus::OffTrack);
    }

    #[test]
    fn test_custom_thresholds() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let mid = midpoint(2026);
        let check_ins = vec![CheckIn::new(kr.id, 48.0, mid)];
        let strict = PaceThresholds {
            on_track_min: 0.0,
            at_risk_min: -0.1,
        };
        let result = compute_kr_progress_with(&kr, &check_ins, &[], 2026, mid, &strict);
        assert_eq!(result.pace, PaceStatus::AtRisk);
    }

    #[test]
    fn test_exactly_five_points_behind_quarter_target_is_on_track() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let targets = vec![QuarterTarget::new(kr.id, Quarter::Q2, 40.0)];
        let check_ins = vec![CheckIn::new(kr.id, 35.0, at(2026, 5, 15))];
        let q2_end = Quarter::Q2.end(2026);

        let result = compute_kr_progress(&kr, &check_ins, &targets, 2026, q2_end);
        assert_eq!(result.expected_value, 40.0);
        assert_eq!(result.pace, PaceStatus::OnTrack);
    }
}
