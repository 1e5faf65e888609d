//! Traffic scenarios for the deconfliction engine.
//!
//! Each scenario produces a primary mission plus a set of other vehicles.
//! Random generation draws from its own seeded stream, independent of the
//! engine's jitter stream, so the traffic shape never shifts when engine
//! parameters change.

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skygrid_core::{Mission, TimeWindow};

/// Stream separator for scenario generation seeds.
const GENERATION_SEED_STREAM: u64 = 0x9e3779b97f4a7c15;

/// Vehicle count for the stress scenario.
pub const STRESS_DRONES: usize = 15;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// Fixed six-vehicle demo: two convergence shapes, an altitude layer,
    /// a non-overlapping window, and a near-miss track
    Mixed,

    /// Primary plus randomly generated traffic
    Random,

    /// Random traffic at 15 vehicles, throughput mode (no export)
    Stress,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![ScenarioId::Mixed, ScenarioId::Random, ScenarioId::Stress]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Mixed => "mixed",
            ScenarioId::Random => "random",
            ScenarioId::Stress => "stress",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Mixed => "Hand-built six-vehicle set with known conflicts and safe layers",
            ScenarioId::Random => "Randomly generated traffic around a fixed primary",
            ScenarioId::Stress => "15 random vehicles to push density and jitter",
        }
    }

    /// Builds the scenario's missions. `drones` only affects `Random`;
    /// `Mixed` is fixed and `Stress` always flies 15.
    pub fn build(&self, seed: u64, drones: usize) -> (Mission, Vec<Mission>) {
        match self {
            ScenarioId::Mixed => mixed_traffic(),
            ScenarioId::Random => random_traffic(seed, drones),
            ScenarioId::Stress => random_traffic(seed, STRESS_DRONES),
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mixed" | "demo" => Ok(ScenarioId::Mixed),
            "random" | "rand" => Ok(ScenarioId::Random),
            "stress" => Ok(ScenarioId::Stress),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

fn waypoints(points: &[(f64, f64, f64)]) -> Vec<Vector3<f64>> {
    points
        .iter()
        .map(|(x, y, z)| Vector3::new(*x, *y, *z))
        .collect()
}

/// The hand-built demo set.
pub fn mixed_traffic() -> (Mission, Vec<Mission>) {
    let primary = Mission::new(
        "Primary",
        waypoints(&[(0.0, 0.0, 20.0), (30.0, 15.0, 22.0), (60.0, 35.0, 25.0)]),
        TimeWindow::new(0.0, 50.0),
    );

    let others = vec![
        // Converges with the primary at (30, 15, 22)
        Mission::new(
            "Drone_A",
            waypoints(&[(5.0, 5.0, 22.0), (30.0, 15.0, 22.0), (60.0, 40.0, 24.0)]),
            TimeWindow::new(0.0, 50.0),
        ),
        // Same corridor as the primary, 60m up
        Mission::new(
            "Drone_B",
            waypoints(&[(0.0, 0.0, 60.0), (30.0, 15.0, 60.0), (60.0, 35.0, 60.0)]),
            TimeWindow::new(0.0, 50.0),
        ),
        // Takes off after the primary has landed
        Mission::new(
            "Drone_C",
            waypoints(&[(0.0, 0.0, 20.0), (25.0, 10.0, 22.0), (55.0, 30.0, 25.0)]),
            TimeWindow::new(60.0, 100.0),
        ),
        // Second convergence shape on an offset window
        Mission::new(
            "Drone_D",
            waypoints(&[(10.0, -5.0, 21.0), (35.0, 10.0, 22.0), (65.0, 30.0, 23.0)]),
            TimeWindow::new(5.0, 45.0),
        ),
        // Parallel track, near misses only
        Mission::new(
            "Drone_E",
            waypoints(&[(15.0, 10.0, 30.0), (40.0, 25.0, 32.0), (70.0, 45.0, 34.0)]),
            TimeWindow::new(0.0, 50.0),
        ),
    ];

    (primary, others)
}

/// A fixed primary plus `count` randomly generated vehicles.
pub fn random_traffic(seed: u64, count: usize) -> (Mission, Vec<Mission>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(GENERATION_SEED_STREAM));

    let primary = Mission::new(
        "Primary",
        waypoints(&[(0.0, 0.0, 20.0), (20.0, 10.0, 25.0), (50.0, 30.0, 30.0)]),
        TimeWindow::new(0.0, 50.0),
    );

    let others = (1..=count).map(|i| random_mission(&mut rng, i)).collect();
    (primary, others)
}

/// One random mission inside the shared airspace envelope: x in [0, 60],
/// y in [-20, 60], z in [10, 80], takeoff in [0, 20], flight time in
/// [20, 60].
fn random_mission<R: Rng>(rng: &mut R, index: usize) -> Mission {
    let waypoints = (0..3)
        .map(|_| {
            Vector3::new(
                rng.gen_range(0..=60) as f64,
                rng.gen_range(-20..=60) as f64,
                rng.gen_range(10..=80) as f64,
            )
        })
        .collect();

    let start = rng.gen_range(0..=20) as f64;
    let end = start + rng.gen_range(20..=60) as f64;

    Mission::new(
        &format!("Drone_{}", index),
        waypoints,
        TimeWindow::new(start, end),
    )
}
