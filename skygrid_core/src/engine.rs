//! The time-stepped deconfliction driver.
//!
//! A [`Simulation`] runs a primary mission against a set of others across
//! the union of their time windows. Each sample: interpolate positions,
//! bucket them, jitter the crowded ones, re-bucket, scan for separation
//! violations, and fold the results into the report.

use nalgebra::Vector3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::conflict::{self, Conflict};
use crate::error::ConfigError;
use crate::grid::{GridCell, SpatialGrid};
use crate::mission::Mission;
use crate::report::{DeconflictionReport, MissionStatus};
use crate::swarm::SwarmModel;

/// Telemetry for one executed time sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Sample time in seconds, rounded to two decimals
    pub time: f64,

    /// Vehicles airborne at this sample
    pub active: usize,

    /// Violations found at this sample
    pub conflicts: usize,

    /// Jitter applications at this sample
    pub adjustments: usize,
}

/// Time-stepped conflict detection over a set of missions.
///
/// Construction validates everything up front; a built `Simulation` can
/// always run to completion. Driving it step by step (instead of calling
/// [`Simulation::run`]) lets callers log progress without the engine
/// depending on any logging framework.
pub struct Simulation {
    /// Primary first, then the others in their given order. Jitter draws
    /// consume the RNG in this order, so it is part of reproducibility.
    missions: Vec<Mission>,

    config: EngineConfig,
    swarm: SwarmModel,
    rng: ChaCha8Rng,

    current_time: f64,
    end_time: f64,
    steps_executed: u64,

    conflicts: Vec<Conflict>,
    heatmap: BTreeMap<GridCell, u64>,
    swarm_effect: u64,
    baseline_conflicts: usize,
}

impl Simulation {
    /// Validates missions and tunables and positions the clock at the
    /// earliest window start.
    pub fn new(
        primary: Mission,
        others: Vec<Mission>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        primary.validate()?;
        for mission in &others {
            mission.validate()?;
        }

        let mut missions = Vec::with_capacity(1 + others.len());
        missions.push(primary);
        missions.extend(others);

        let start_time = missions
            .iter()
            .map(|m| m.window.start)
            .fold(f64::INFINITY, f64::min);
        let end_time = missions
            .iter()
            .map(|m| m.window.end)
            .fold(f64::NEG_INFINITY, f64::max);

        let swarm = SwarmModel::new(config.density_threshold, config.adjustment_scale);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Ok(Self {
            missions,
            config,
            swarm,
            rng,
            current_time: start_time,
            end_time,
            steps_executed: 0,
            conflicts: Vec::new(),
            heatmap: BTreeMap::new(),
            swarm_effect: 0,
            baseline_conflicts: 0,
        })
    }

    /// Executes one time sample, or returns `None` past the last window
    /// end.
    pub fn step(&mut self) -> Option<StepOutcome> {
        if self.current_time > self.end_time {
            return None;
        }
        let t = self.current_time;

        // Missions outside their window drop out of this sample entirely.
        let mut raw: Vec<(String, Vector3<f64>)> = Vec::new();
        for mission in &self.missions {
            if let Some(position) = mission.position_at(t) {
                raw.push((mission.id.clone(), position));
            }
        }

        // Pass 1: crowding is judged on unadjusted positions.
        let density_grid = SpatialGrid::bucket(&raw, self.config.cell_size);

        let mut adjustments: usize = 0;
        let mut adjusted: Vec<(String, Vector3<f64>)> = Vec::with_capacity(raw.len());
        for (id, position) in raw {
            let density = density_grid.density_at(&position);
            match self.swarm.adjust(position, density, &mut self.rng) {
                Some(moved) => {
                    adjustments += 1;
                    adjusted.push((id, moved));
                }
                None => adjusted.push((id, position)),
            }
        }
        self.swarm_effect += adjustments as u64;

        // Pass 2: final positions drive both the scan and the heatmap.
        let scan_grid = SpatialGrid::bucket(&adjusted, self.config.cell_size);
        let pairs = conflict::scan(&scan_grid, self.config.safety_distance);

        let time = round2(t);
        let found = pairs.len();
        for pair in pairs {
            self.conflicts.push(Conflict { time, pair });
        }

        for (cell, occupants) in scan_grid.iter() {
            *self.heatmap.entry(*cell).or_insert(0) += occupants.len() as u64;
        }

        if self.steps_executed == 0 {
            self.baseline_conflicts = found;
        }
        self.steps_executed += 1;
        self.current_time += self.config.dt;

        Some(StepOutcome {
            time,
            active: adjusted.len(),
            conflicts: found,
            adjustments,
        })
    }

    /// Runs to the terminal state and freezes the report.
    pub fn run(mut self) -> DeconflictionReport {
        while self.step().is_some() {}
        self.into_report()
    }

    /// Current sample clock in seconds.
    pub fn time(&self) -> f64 {
        self.current_time
    }

    /// True once the clock has passed the last window end.
    pub fn finished(&self) -> bool {
        self.current_time > self.end_time
    }

    /// Consumes the simulation into its report.
    pub fn into_report(self) -> DeconflictionReport {
        let status = if self.conflicts.is_empty() {
            MissionStatus::Clear
        } else {
            MissionStatus::ConflictDetected
        };
        DeconflictionReport {
            status,
            conflicts: self.conflicts,
            heatmap: self.heatmap,
            swarm_effect: self.swarm_effect,
            baseline_conflicts: self.baseline_conflicts,
        }
    }
}

/// One-shot convenience: validate, run, report.
pub fn check_missions(
    primary: Mission,
    others: Vec<Mission>,
    config: EngineConfig,
) -> Result<DeconflictionReport, ConfigError> {
    Ok(Simulation::new(primary, others, config)?.run())
}

/// Rounds to two decimals, the precision conflict records carry.
fn round2(t: f64) -> f64 {
    (t * 100.0).round() / 100.0
}
