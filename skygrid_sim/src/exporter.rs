//! JSON export of a completed run for external visualization.
//!
//! The engine never draws anything; renderers consume these files
//! instead. Heatmap cells flatten into records because JSON keys cannot
//! carry coordinate pairs.

use serde::{Deserialize, Serialize};
use skygrid_core::{Conflict, DeconflictionReport, Mission, MissionStatus};
use std::fs::File;
use std::io::Write;

/// A mission's planned path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionTrack {
    pub id: String,
    pub waypoints: Vec<[f64; 3]>,
    pub start: f64,
    pub end: f64,
}

impl MissionTrack {
    pub fn from_mission(mission: &Mission) -> Self {
        Self {
            id: mission.id.clone(),
            waypoints: mission.waypoints.iter().map(|w| [w.x, w.y, w.z]).collect(),
            start: mission.window.start,
            end: mission.window.end,
        }
    }
}

/// One heatmap cell with its accumulated occupancy count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellCount {
    pub x: i64,
    pub y: i64,
    pub count: u64,
}

/// Complete run export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Scenario name
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    /// Planned paths, primary first
    pub missions: Vec<MissionTrack>,

    /// Run outcome
    pub status: MissionStatus,

    /// Violations in sample order
    pub conflicts: Vec<Conflict>,

    /// Heatmap as flat cell records
    pub heatmap: Vec<CellCount>,

    /// Jitter applications across the run
    pub swarm_effect: u64,

    /// First-step conflict count
    pub baseline_conflicts: usize,
}

impl SimExport {
    /// Builds the export from a finished run.
    pub fn new(
        scenario: &str,
        seed: u64,
        primary: &Mission,
        others: &[Mission],
        report: &DeconflictionReport,
    ) -> Self {
        let mut missions = vec![MissionTrack::from_mission(primary)];
        missions.extend(others.iter().map(MissionTrack::from_mission));

        let heatmap = report
            .heatmap
            .iter()
            .map(|(cell, count)| CellCount {
                x: cell.x,
                y: cell.y,
                count: *count,
            })
            .collect();

        Self {
            scenario: scenario.to_string(),
            seed,
            missions,
            status: report.status,
            conflicts: report.conflicts.clone(),
            heatmap,
            swarm_effect: report.swarm_effect,
            baseline_conflicts: report.baseline_conflicts,
        }
    }

    /// Writes pretty JSON to `path`.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
