//! Quarter-by-quarter target vs. actual comparison.

use okrpace_core::{latest_check_in, CheckIn, KeyResult, Quarter, QuarterPlan, QuarterTarget, Time};
use serde::{Deserialize, Serialize};

use crate::interpolator::expected_value_with_plan;

/// Target vs. actual for one quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterSummary {
    /// Quarter
    pub quarter: Quarter,

    /// Inclusive quarter start
    pub start: Time,

    /// Exclusive quarter end
    pub end: Time,

    /// Expected value at the quarter end
    pub expected_value: f64,

    /// Latest recorded value before the quarter end (start value if none)
    pub actual_value: f64,

    /// `actual_value - expected_value`
    pub variance: f64,

    /// Variance as a percentage of the target range
    pub variance_percent: f64,

    /// Expected value came from an explicit quarter target
    pub has_explicit_target: bool,

    /// Check-ins recorded inside this quarter
    pub check_ins_in_quarter: usize,
}

/// Break `kr` down into four quarter summaries for `year`.
pub fn compute_quarterly_breakdown(
    kr: &KeyResult,
    check_ins: &[CheckIn],
    quarter_targets: &[QuarterTarget],
    year: i32,
) -> Vec<QuarterSummary> {
    let plan = QuarterPlan::for_key_result(quarter_targets, kr.id);
    // The annual line is the interpolator without explicit targets.
    let annual = QuarterPlan::default();

    Quarter::ALL
        .into_iter()
        .map(|quarter| {
            let start = quarter.start(year);
            let end = quarter.end(year);

            let explicit = plan.get(quarter);
            let expected_value =
                explicit.unwrap_or_else(|| expected_value_with_plan(kr, &annual, end, year));

            let actual_value = value_before(kr, check_ins, end);

            let check_ins_in_quarter = check_ins
                .iter()
                .filter(|c| c.key_result_id == kr.id && start <= c.recorded_at && c.recorded_at < end)
                .count();

            let variance = actual_value - expected_value;
            let variance_percent = if kr.range() == 0.0 {
                0.0
            } else {
                variance * 100.0 / kr.range()
            };

            QuarterSummary {
                quarter,
                start,
                end,
                expected_value,
                actual_value,
                variance,
                variance_percent,
                has_explicit_target: explicit.is_some(),
                check_ins_in_quarter,
            }
        })
        .collect()
}

/// Latest value recorded strictly before `end`, else the start value.
///
/// Check-ins exactly at a quarter's exclusive end belong to the next quarter.
fn value_before(kr: &KeyResult, check_ins: &[CheckIn], end: Time) -> f64 {
    latest_check_in(check_ins, kr.id, Some(end))
        .map(|c| c.value)
        .unwrap_or(kr.start_value)
}

/// Value of `kr` as of the end of `quarter` (carry-forward of the start value).
pub fn quarter_end_value(kr: &KeyResult, check_ins: &[CheckIn], quarter: Quarter, year: i32) -> f64 {
    value_before(kr, check_ins, quarter.end(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use okrpace_core::{KeyResultId, ObjectiveId};

    use crate::interpolator::expected_value;

    fn at(y: i32, m: u32, d: u32) -> Time {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_always_four_quarters() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let summaries = compute_quarterly_breakdown(&kr, &[], &[], 2026);
        assert_eq!(summaries.len(), 4);
        assert_eq!(
            summaries.iter().map(|s| s.quarter).collect::<Vec<_>>(),
            Quarter::ALL.to_vec()
        );
    }

    #[test]
    fn test_matches_interpolator_without_targets() {
        let kr = KeyResult::metric(ObjectiveId::new(), 7.0, 1234.5, 2026);
        let summaries = compute_quarterly_breakdown(&kr, &[], &[], 2026);
        for summary in &summaries {
            assert_eq!(summary.expected_value, expected_value(&kr, &[], summary.end, 2026));
            assert!(!summary.has_explicit_target);
        }
        assert_eq!(summaries[3].expected_value, 1234.5);
    }

    #[test]
    fn test_carry_forward_baseline() {
        let kr = KeyResult::metric(ObjectiveId::new(), 10.0, 110.0, 2026);
        let check_ins = vec![CheckIn::new(kr.id, 60.0, at(2026, 8, 1))];
        let summaries = compute_quarterly_breakdown(&kr, &check_ins, &[], 2026);

        assert_eq!(summaries[0].actual_value, 10.0);
        assert_eq!(summaries[1].actual_value, 10.0);
        assert_eq!(summaries[2].actual_value, 60.0);
        assert_eq!(summaries[3].actual_value, 60.0);
        assert_eq!(summaries[2].check_ins_in_quarter, 1);
        assert_eq!(summaries[3].check_ins_in_quarter, 0);
    }

    #[test]
    fn test_explicit_target_and_variance() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 1000.0, 2026);
        let targets = vec![QuarterTarget::new(kr.id, Quarter::Q2, 300.0)];
        let check_ins = vec![
            CheckIn::new(kr.id, 200.0, at(2026, 3, 15)),
            CheckIn::new(kr.id, 350.0, at(2026, 6, 10)),
        ];

        let summaries = compute_quarterly_breakdown(&kr, &check_ins, &targets, 2026);
        let q2 = &summaries[1];
        assert!(q2.has_explicit_target);
        assert_eq!(q2.expected_value, 300.0);
        assert_eq!(q2.actual_value, 350.0);
        assert_eq!(q2.variance, 50.0);
        assert_eq!(q2.variance_percent, 5.0);
    }

    #[test]
    fn test_explicit_q4_target() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 1000.0, 2026);
        let targets = vec![QuarterTarget::new(kr.id, Quarter::Q4, 900.0)];
        let check_ins = vec![CheckIn::new(kr.id, 950.0, at(2026, 12, 20))];

        let summaries = compute_quarterly_breakdown(&kr, &check_ins, &targets, 2026);
        let q4 = &summaries[3];
        assert!(q4.has_explicit_target);
        assert_eq!(q4.expected_value, 900.0);
        assert_eq!(q4.actual_value, 950.0);
        assert_eq!(q4.variance, 50.0);
        assert_eq!(q4.variance_percent, 5.0);

        // Every row agrees with the interpolator at its quarter end
        for summary in &summaries {
            assert_eq!(summary.expected_value, expected_value(&kr, &targets, summary.end, 2026));
        }
        assert!(summaries[..3].iter().all(|s| !s.has_explicit_target));
    }

    #[test]
    fn test_boundary_check_in_belongs_to_next_quarter() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let check_ins = vec![CheckIn::new(kr.id, 40.0, Quarter::Q2.start(2026))];
        let summaries = compute_quarterly_breakdown(&kr, &check_ins, &[], 2026);
        assert_eq!(summaries[0].actual_value, 0.0);
        assert_eq!(summaries[1].actual_value, 40.0);
        assert_eq!(quarter_end_value(&kr, &check_ins, Quarter::Q1, 2026), 0.0);
        assert_eq!(quarter_end_value(&kr, &check_ins, Quarter::Q2, 2026), 40.0);
    }

    #[test]
    fn test_degenerate_variance_percent_is_zero() {
        let kr = KeyResult::metric(ObjectiveId::new(), 5.0, 5.0, 2026);
        let check_ins = vec![CheckIn::new(kr.id, 9.0, at(2026, 2, 1))];
        let summaries = compute_quarterly_breakdown(&kr, &check_ins, &[], 2026);
        assert!(summaries.iter().all(|s| s.variance_percent == 0.0));
        assert_eq!(summaries[0].variance, 4.0);
    }

    #[test]
    fn test_other_key_result_check_ins_ignored() {
        let kr = KeyResult::metric(ObjectiveId::new(), 0.0, 100.0, 2026);
        let check_ins = vec![CheckIn::new(KeyResultId::new(), 80.0, at(2026, 2, 1))];
        let summaries = compute_quarterly_breakdown(&kr, &check_ins, &[], 2026);
        assert!(summaries.iter().all(|s| s.actual_value == 0.0));
    }
}
