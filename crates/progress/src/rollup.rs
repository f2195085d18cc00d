//! Objective-level rollup of key result progress.

use std::collections::{BTreeMap, HashMap};

use okrpace_core::{KeyResult, KeyResultId, ObjectiveId};
use serde::{Deserialize, Serialize};

use crate::calculator::ProgressResult;
use crate::pace::{PaceStatus, PaceThresholds};

/// Progress of an objective, averaged over its key results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveProgress {
    /// Objective
    pub objective_id: ObjectiveId,

    /// Key results that contributed
    pub key_results: Vec<KeyResultId>,

    /// Unweighted mean progress
    pub progress: f64,

    /// Unweighted mean expected progress
    pub expected_progress: f64,

    /// Pace of the mean against the mean expectation
    pub pace: PaceStatus,
}

/// Roll per-key-result results up to their objectives (default thresholds).
pub fn rollup_objectives(krs: &[KeyResult], results: &[ProgressResult]) -> Vec<ObjectiveProgress> {
    rollup_objectives_with(krs, results, &PaceThresholds::default())
}

/// Roll per-key-result results up to their objectives, sorted by objective id.
///
/// Results for key results missing from `krs` are skipped.
pub fn rollup_objectives_with(
    krs: &[KeyResult],
    results: &[ProgressResult],
    thresholds: &PaceThresholds,
) -> Vec<ObjectiveProgress> {
    let owners: HashMap<KeyResultId, ObjectiveId> = krs.iter().map(|kr| (kr.id, kr.objective_id)).collect();

    let mut groups: BTreeMap<ObjectiveId, Vec<&ProgressResult>> = BTreeMap::new();
    for result in results {
        match owners.get(&result.key_result_id) {
            Some(objective_id) => groups.entry(*objective_id).or_default().push(result),
            None => tracing::debug!("Skipping result for unknown key result {}", result.key_result_id),
        }
    }

    groups
        .into_iter()
        .map(|(objective_id, members)| {
            let n = members.len() as f64;
            let progress = members.iter().map(|r| r.progress).sum::<f64>() / n;
            let expected_progress = members.iter().map(|r| r.expected_progress).sum::<f64>() / n;
            ObjectiveProgress {
                objective_id,
                key_results: members.iter().map(|r| r.key_result_id).collect(),
                progress,
                expected_progress,
                pace: thresholds.classify(progress, expected_progress),
            }
        })
        .collect()
}
