//! Expected-value interpolation.
//!
//! Metric key results are paced linearly from `start_value` at the start of
//! the year to `target_value` at its end. Explicit quarter targets bend the
//! line into a piecewise-linear curve through the quarter boundaries:
//!
//! ```text
//! value
//!   |                         v4
//!   |                 v3 ____/
//!   |          v2 ___/
//!   |    v1 __/
//!   |___/
//!   +----|-----|------|------|---> time
//!   Jan  Apr   Jul    Oct    Jan
//! ```
//!
//! An anchor `vq` is the explicit target of quarter `q` when one exists,
//! otherwise the annual line's value at that quarter end.

use okrpace_core::{year_end, year_start, KeyResult, KeyResultKind, Quarter, QuarterPlan, QuarterTarget, Time};

/// Fraction of `[from, to)` elapsed at `at`, clamped to `[0, 1]`.
pub(crate) fn fraction_between(at: Time, from: Time, to: Time) -> f64 {
    if at <= from {
        return 0.0;
    }
    if at >= to {
        return 1.0;
    }
    let span = (to - from).num_milliseconds() as f64;
    let elapsed = (at - from).num_milliseconds() as f64;
    elapsed / span
}

/// Fraction of `year` elapsed at `as_of`, clamped to `[0, 1]`.
pub fn elapsed_fraction(as_of: Time, year: i32) -> f64 {
    fraction_between(as_of, year_start(year), year_end(year))
}

/// Value on the straight annual line at `as_of`.
fn annual_line(kr: &KeyResult, as_of: Time, year: i32) -> f64 {
    let fraction = elapsed_fraction(as_of, year);
    if fraction <= 0.0 {
        kr.start_value
    } else if fraction >= 1.0 {
        kr.target_value
    } else {
        kr.start_value + kr.range() * fraction
    }
}

/// Anchor value at the end of `quarter`.
fn anchor(kr: &KeyResult, plan: &QuarterPlan, quarter: Quarter, year: i32) -> f64 {
    plan.get(quarter)
        .unwrap_or_else(|| annual_line(kr, quarter.end(year), year))
}

fn piecewise(kr: &KeyResult, plan: &QuarterPlan, as_of: Time, year: i32) -> f64 {
    if as_of <= year_start(year) {
        return kr.start_value;
    }

    let mut previous = kr.start_value;
    for quarter in Quarter::ALL {
        let current = anchor(kr, plan, quarter, year);
        let end = quarter.end(year);
        if as_of < end {
            let fraction = fraction_between(as_of, quarter.start(year), end);
            return previous + (current - previous) * fraction;
        }
        previous = current;
    }

    previous
}

/// Expected value of a milestone: done once its due date has passed.
fn milestone_expected(kr: &KeyResult, as_of: Time, year: i32) -> f64 {
    if as_of >= kr.due_instant(year) {
        1.0
    } else {
        0.0
    }
}

/// Expected value using an already-collected quarter plan.
pub fn expected_value_with_plan(kr: &KeyResult, plan: &QuarterPlan, as_of: Time, year: i32) -> f64 {
    match kr.kind {
        KeyResultKind::Milestone => milestone_expected(kr, as_of, year),
        KeyResultKind::Metric if plan.is_empty() => annual_line(kr, as_of, year),
        KeyResultKind::Metric => piecewise(kr, plan, as_of, year),
    }
}

/// Theoretically expected value of `kr` at `as_of` within `year`.
pub fn expected_value(kr: &KeyResult, quarter_targets: &[QuarterTarget], as_of: Time, year: i32) -> f64 {
    let plan = QuarterPlan::for_key_result(quarter_targets, kr.id);
    expected_value_with_plan(kr, &plan, as_of, year)
}

/// Express `value` as a fraction of the key result's target range.
///
/// Milestone values are already fractions. Degenerate metrics report 0.
pub fn value_to_progress(kr: &KeyResult, value: f64) -> f64 {
    match kr.kind {
        KeyResultKind::Milestone => value,
        KeyResultKind::Metric if kr.is_degenerate() => 0.0,
        KeyResultKind::Metric => (value - kr.start_value) / kr.range(),
    }
}
