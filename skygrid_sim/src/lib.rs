//! SkyGrid scenario runner.
//!
//! Wraps the core deconfliction engine with ready-made traffic scenarios,
//! terminal report rendering, and JSON export for external visualization.
//!
//! ```ignore
//! use skygrid_core::{check_missions, EngineConfig};
//! use skygrid_sim::scenarios::ScenarioId;
//!
//! let (primary, others) = ScenarioId::Mixed.build(42, 8);
//! let report = check_missions(primary, others, EngineConfig::default())?;
//! println!("{}", skygrid_sim::render_report(&report));
//! ```

pub mod exporter;
pub mod scenarios;
pub mod summary;

pub use exporter::{CellCount, MissionTrack, SimExport};
pub use scenarios::ScenarioId;
pub use summary::{render_report, top_hotspots};
