//! SkyGrid deconfliction CLI
//!
//! Runs a traffic scenario through the conflict-detection engine and
//! reports conflicts, swarm activity, and traffic hotspots.
//!
//! Exit codes: 0 = clear, 1 = bad input, 2 = conflicts detected.

use clap::Parser;
use skygrid_core::{EngineConfig, Simulation};
use skygrid_sim::scenarios::ScenarioId;
use skygrid_sim::{render_report, SimExport};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// SkyGrid UAV deconfliction CLI
#[derive(Parser, Debug)]
#[command(name = "skygrid-sim")]
#[command(about = "Run UAV traffic scenarios through the deconfliction engine", long_about = None)]
struct Args {
    /// Scenario to run (mixed, random, stress)
    #[arg(short = 'S', long, default_value = "mixed")]
    scenario: String,

    /// Number of generated vehicles for the random scenario
    #[arg(short, long, default_value = "8")]
    drones: usize,

    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Minimum allowed 3D separation in meters
    #[arg(long, default_value = "5.0")]
    safety_distance: f64,

    /// Grid cell edge length in meters
    #[arg(long, default_value = "50.0")]
    cell_size: f64,

    /// Sampling time step in seconds
    #[arg(long, default_value = "0.5")]
    dt: f64,

    /// Verbose output (per-step progress)
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Export run data to a JSON file for visualization
    #[arg(long)]
    export: Option<String>,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let scenario: ScenarioId = args.scenario.parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available scenarios: mixed, random, stress");
        std::process::exit(1);
    });

    let seed = if args.seed == 0 {
        let derived = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos() as u64;
        info!("Derived seed {} from clock (replay with --seed {})", derived, derived);
        derived
    } else {
        args.seed
    };

    let config = EngineConfig {
        safety_distance: args.safety_distance,
        cell_size: args.cell_size,
        dt: args.dt,
        seed,
        ..EngineConfig::default()
    };

    if !args.json {
        info!("SkyGrid Deconfliction v0.1.0");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!("Scenario: {} - {}", scenario.name(), scenario.description());
    }

    let (primary, others) = scenario.build(seed, args.drones);
    if !args.json {
        info!(
            "Missions: {} ('{}' + {} others), seed={}",
            others.len() + 1,
            primary.id,
            others.len(),
            seed
        );
    }

    let mut sim = match Simulation::new(primary.clone(), others.clone(), config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Drive step by step so progress is visible at debug level.
    debug!("Clock opens at t={:.1}s (earliest mission window)", sim.time());
    let mut steps = 0u64;
    while let Some(outcome) = sim.step() {
        if steps % 20 == 0 {
            debug!(
                "  t={:.1}s | active={} | conflicts={} | adjusted={}",
                outcome.time, outcome.active, outcome.conflicts, outcome.adjustments
            );
        }
        steps += 1;
    }
    let report = sim.into_report();

    if args.json {
        let summary = serde_json::json!({
            "scenario": scenario.name(),
            "seed": seed,
            "status": report.status,
            "conflicts": report.conflicts.len(),
            "swarm_effect": report.swarm_effect,
            "baseline_conflicts": report.baseline_conflicts,
            "steps": steps,
        });
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    } else {
        println!("{}", render_report(&report));
    }

    if let Some(export_path) = &args.export {
        if scenario == ScenarioId::Stress {
            warn!("Stress scenario runs in throughput mode; skipping export");
        } else {
            let export = SimExport::new(scenario.name(), seed, &primary, &others, &report);
            if let Err(e) = export.write_to_file(export_path) {
                error!("Failed to write export: {:?}", e);
                std::process::exit(1);
            }
            if !args.json {
                info!("Exported {} mission tracks to {}", export.missions.len(), export_path);
            }
        }
    }

    // Exit with proper code for CI
    if !report.is_clear() {
        std::process::exit(2);
    }
}
