//! Reporting-period analytics across many key results.
//!
//! The aggregation is total over well-formed input: an empty key result list
//! yields a zeroed summary, and check-ins that reference unknown key results
//! are skipped rather than treated as errors.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use okrpace_core::{CheckIn, DateRange, KeyResult, KeyResultId, KeyResultKind, QuarterTarget, Task, Time};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::{compute_kr_progress_with, ProgressResult};
use crate::interpolator::value_to_progress;
use crate::pace::{PaceStatus, PaceThresholds};

const SECONDS_PER_WEEK: i64 = 7 * 86_400;

/// Key result counts per pace status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaceBreakdown {
    /// On track
    pub on_track: usize,
    /// At risk
    pub at_risk: usize,
    /// Off track
    pub off_track: usize,
}

impl PaceBreakdown {
    /// Count one more key result with `status`.
    pub fn record(&mut self, status: PaceStatus) {
        match status {
            PaceStatus::OnTrack => self.on_track += 1,
            PaceStatus::AtRisk => self.at_risk += 1,
            PaceStatus::OffTrack => self.off_track += 1,
        }
    }

    /// Count for `status`.
    pub fn get(&self, status: PaceStatus) -> usize {
        match status {
            PaceStatus::OnTrack => self.on_track,
            PaceStatus::AtRisk => self.at_risk,
            PaceStatus::OffTrack => self.off_track,
        }
    }

    /// Total classified key results.
    pub fn total(&self) -> usize {
        self.on_track + self.at_risk + self.off_track
    }
}

/// Check-ins recorded on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCheckIns {
    /// Day (UTC)
    pub date: NaiveDate,
    /// Number of check-ins
    pub count: usize,
}

/// Tasks completed in one 7-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyThroughput {
    /// Bucket start
    pub week_start: Time,
    /// Tasks completed in the bucket
    pub completed: usize,
}

/// Task completion velocity over the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskVelocity {
    /// Tasks completed inside the period
    pub completed: usize,
    /// Period length in weeks (at least one day)
    pub weeks: f64,
    /// Completed tasks per week
    pub per_week: f64,
    /// Completions per 7-day bucket, starting at the period start
    pub weekly: Vec<WeeklyThroughput>,
}

/// One sample of the burn-up chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnUpPoint {
    /// Check-in timestamp
    pub timestamp: Time,
    /// Mean progress across all key results at that instant
    pub progress: f64,
}

/// Analytics for a reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Reporting period
    pub range: DateRange,
    /// Key results analysed
    pub total_krs: usize,
    /// Key results per pace status
    pub pace_breakdown: PaceBreakdown,
    /// Key results with target equal to start
    pub degenerate_krs: usize,
    /// Unweighted mean of per-key-result progress
    pub overall_progress: f64,
    /// Per-key-result progress at the period end
    pub results: Vec<ProgressResult>,
    /// Check-ins per day across the period
    pub check_in_heatmap: Vec<DailyCheckIns>,
    /// Task completion velocity
    pub task_velocity: TaskVelocity,
    /// Mean progress over time, replayed from check-in history
    pub burn_up: Vec<BurnUpPoint>,
    /// Check-ins referencing key results outside the input set
    pub ignored_check_ins: usize,
}

/// Aggregate analytics with the default pace thresholds.
pub fn aggregate_analytics(
    krs: &[KeyResult],
    check_ins: &[CheckIn],
    quarter_targets: &[QuarterTarget],
    tasks: &[Task],
    range: DateRange,
) -> AnalyticsSummary {
    aggregate_analytics_with(krs, check_ins, quarter_targets, tasks, range, &PaceThresholds::default())
}

/// Aggregate analytics for `range`, evaluated at the end of the range.
///
/// Check-ins recorded after the range end are not yet known at evaluation
/// time and are left out of every figure.
///
/// The heatmap holds one entry per calendar day of `range` and the weekly
/// velocity series one per 7-day bucket, so both grow linearly with the
/// range length whatever the input size. Callers accepting user-supplied
/// ranges should bound them first; a ten-year range is about 3650 heatmap
/// entries.
pub fn aggregate_analytics_with(
    krs: &[KeyResult],
    check_ins: &[CheckIn],
    quarter_targets: &[QuarterTarget],
    tasks: &[Task],
    range: DateRange,
    thresholds: &PaceThresholds,
) -> AnalyticsSummary {
    debug!(
        "Aggregating analytics: {} key results, {} check-ins, {} tasks",
        krs.len(),
        check_ins.len(),
        tasks.len()
    );

    let index: HashMap<KeyResultId, usize> = krs.iter().enumerate().map(|(i, kr)| (kr.id, i)).collect();

    // Each kept check-in is paired with the slot of its key result.
    let mut ignored_check_ins = 0;
    let mut kept: Vec<(usize, &CheckIn)> = Vec::new();
    for check_in in check_ins {
        match index.get(&check_in.key_result_id) {
            None => ignored_check_ins += 1,
            Some(&slot) if check_in.recorded_at <= range.end() => kept.push((slot, check_in)),
            Some(_) => {}
        }
    }
    if ignored_check_ins > 0 {
        debug!("Ignoring {} check-ins for unknown key results", ignored_check_ins);
    }

    let mut grouped: Vec<Vec<CheckIn>> = vec![Vec::new(); krs.len()];
    for (slot, check_in) in &kept {
        grouped[*slot].push((*check_in).clone());
    }

    let results: Vec<ProgressResult> = krs
        .iter()
        .zip(&grouped)
        .map(|(kr, own)| compute_kr_progress_with(kr, own, quarter_targets, kr.year, range.end(), thresholds))
        .collect();

    let mut pace_breakdown = PaceBreakdown::default();
    for result in &results {
        pace_breakdown.record(result.pace);
    }

    AnalyticsSummary {
        range,
        total_krs: krs.len(),
        pace_breakdown,
        degenerate_krs: results.iter().filter(|r| r.degenerate).count(),
        overall_progress: mean(results.iter().map(|r| r.progress), results.len()),
        check_in_heatmap: check_in_heatmap(&kept, range),
        task_velocity: task_velocity(tasks, range),
        burn_up: burn_up(krs, &kept, range),
        results,
        ignored_check_ins,
    }
}

fn mean(values: impl Iterator<Item = f64>, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}

/// Dense per-day check-in counts over the range.
fn check_in_heatmap(check_ins: &[(usize, &CheckIn)], range: DateRange) -> Vec<DailyCheckIns> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for (_, check_in) in check_ins.iter().filter(|(_, c)| range.contains(c.recorded_at)) {
        *counts.entry(check_in.recorded_at.date_naive()).or_insert(0) += 1;
    }

    range
        .calendar_days()
        .map(|date| DailyCheckIns {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Completed tasks per week inside the range.
///
/// Allocates `ceil(days / 7)` buckets, at least one.
pub fn task_velocity(tasks: &[Task], range: DateRange) -> TaskVelocity {
    let bucket_count = ((range.days() / 7.0).ceil() as usize).max(1);
    let mut weekly: Vec<WeeklyThroughput> = (0..bucket_count)
        .map(|i| WeeklyThroughput {
            week_start: range.start() + chrono::Duration::seconds(i as i64 * SECONDS_PER_WEEK),
            completed: 0,
        })
        .collect();

    let mut completed = 0;
    for done_at in tasks.iter().filter_map(Task::done_at) {
        if !range.contains(done_at) {
            continue;
        }
        completed += 1;
        let bucket = ((done_at - range.start()).num_seconds() / SECONDS_PER_WEEK) as usize;
        weekly[bucket.min(bucket_count - 1)].completed += 1;
    }

    let weeks = range.days().max(1.0) / 7.0;
    TaskVelocity {
        completed,
        weeks,
        per_week: completed as f64 / weeks,
        weekly,
    }
}

/// Running replay state for one key result.
#[derive(Debug, Clone, Copy)]
struct ReplayState {
    progress: f64,
    completed: bool,
}

/// Replay check-ins in time order and sample mean progress after each
/// distinct timestamp inside the range.
///
/// Each key result keeps its running state, so a check-in only touches its
/// own key result. A point equals recomputing every key result from the
/// check-ins recorded up to that instant.
fn burn_up(krs: &[KeyResult], check_ins: &[(usize, &CheckIn)], range: DateRange) -> Vec<BurnUpPoint> {
    if krs.is_empty() {
        return Vec::new();
    }

    // Stable sort keeps input order among equal timestamps.
    let mut events: Vec<(usize, &CheckIn)> = check_ins.to_vec();
    events.sort_by_key(|(_, c)| c.recorded_at);

    let mut state = vec![
        ReplayState {
            progress: 0.0,
            completed: false,
        };
        krs.len()
    ];
    let mut points = Vec::new();

    let mut i = 0;
    while i < events.len() {
        let timestamp = events[i].1.recorded_at;
        while i < events.len() && events[i].1.recorded_at == timestamp {
            let (slot, check_in) = events[i];
            let kr = &krs[slot];
            let entry = &mut state[slot];
            match kr.kind {
                KeyResultKind::Metric => entry.progress = value_to_progress(kr, check_in.value),
                KeyResultKind::Milestone => {
                    entry.completed |= check_in.is_truthy();
                    entry.progress = if entry.completed { 1.0 } else { 0.0 };
                }
            }
            i += 1;
        }

        if range.contains(timestamp) {
            points.push(BurnUpPoint {
                timestamp,
                progress: mean(state.iter().map(|s| s.progress), state.len()),
            });
        }
    }

    points
}
