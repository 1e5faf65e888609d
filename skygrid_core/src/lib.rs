//! SkyGrid Core - Time-Stepped UAV Deconfliction Engine
//!
//! This library answers one question: given a set of planned drone
//! missions, where and when do they get dangerously close?
//!
//! The pipeline, once per time sample:
//! 1. **Trajectories**: each mission interpolates linearly along its
//!    waypoints inside its time window (`Mission::position_at`).
//! 2. **Bucketing**: positions land in fixed-size horizontal grid cells so
//!    proximity checks stay local to 3x3 neighborhoods (`SpatialGrid`).
//! 3. **Swarm jitter**: occupants of crowded cells get a small random
//!    nudge, a stand-in for a local avoidance reaction (`SwarmModel`).
//! 4. **Scanning**: every unique pair below the safety distance becomes a
//!    conflict record (`conflict::scan`).
//!
//! [`Simulation`] drives the loop across the union of all mission windows
//! and folds the samples into a [`DeconflictionReport`]: overall status,
//! the conflict list, an occupancy heatmap, the jitter count, and the
//! first-step baseline.

pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod grid;
pub mod mission;
pub mod report;
pub mod swarm;

// Re-export key types for convenience
pub use config::EngineConfig;
pub use conflict::{Conflict, ConflictPair};
pub use engine::{check_missions, Simulation, StepOutcome};
pub use error::ConfigError;
pub use grid::{GridCell, SpatialGrid};
pub use mission::{Mission, TimeWindow};
pub use report::{DeconflictionReport, MissionStatus};
pub use swarm::SwarmModel;
