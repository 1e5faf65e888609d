//! Run-level aggregates: status, conflict list, heatmap, jitter counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::conflict::Conflict;
use crate::grid::GridCell;

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    /// No separation violation at any sampled time
    Clear,

    /// At least one separation violation somewhere in the run
    ConflictDetected,
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionStatus::Clear => write!(f, "CLEAR"),
            MissionStatus::ConflictDetected => write!(f, "CONFLICT DETECTED"),
        }
    }
}

/// Everything a completed run reports.
#[derive(Debug, Clone, PartialEq)]
pub struct DeconflictionReport {
    /// `ConflictDetected` iff `conflicts` is non-empty
    pub status: MissionStatus,

    /// Violations in sample order, one entry per pair per sampled time
    pub conflicts: Vec<Conflict>,

    /// Per-cell occupancy counts summed over all samples, post-jitter
    pub heatmap: BTreeMap<GridCell, u64>,

    /// Number of jitter applications across the run
    pub swarm_effect: u64,

    /// Conflict count of the first sampled step. Measured after that
    /// step's jitter already ran, matching the long-standing reporting
    /// behavior; this is not a true pre-avoidance count.
    pub baseline_conflicts: usize,
}

impl DeconflictionReport {
    /// True when the run finished without any violation.
    pub fn is_clear(&self) -> bool {
        self.status == MissionStatus::Clear
    }
}
