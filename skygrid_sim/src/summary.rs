//! Plain-text report rendering for terminal output.
//!
//! Hotspot ranking lives here, not in the engine: the core reports raw
//! per-cell counts and presentation decides what "top" means.

use skygrid_core::{DeconflictionReport, GridCell};

/// How many hotspot cells the summary lists.
const TOP_HOTSPOTS: usize = 3;

/// Top `n` heatmap cells by accumulated occupancy. Ties break on the cell
/// coordinates so equal counts render in a stable order.
pub fn top_hotspots(report: &DeconflictionReport, n: usize) -> Vec<(GridCell, u64)> {
    let mut cells: Vec<(GridCell, u64)> = report
        .heatmap
        .iter()
        .map(|(cell, count)| (*cell, *count))
        .collect();
    cells.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    cells.truncate(n);
    cells
}

/// Renders the terminal summary block.
pub fn render_report(report: &DeconflictionReport) -> String {
    let mut out = String::new();

    out.push_str("────────────────────────────────\n");
    out.push_str("     ✈ UAV Conflict Report\n");
    out.push_str("────────────────────────────────\n");
    out.push_str(&format!("Mission Status: {}\n", report.status));

    if report.conflicts.is_empty() {
        out.push_str("✔ No conflicts detected. Safe route.\n");
        return out;
    }

    out.push_str(&format!("\nTotal Conflicts: {}\n", report.conflicts.len()));

    if report.swarm_effect > 0 {
        out.push_str(&format!(
            "Swarm Avoidance: Applied ({} micro-adjustments)\n",
            report.swarm_effect
        ));
    } else {
        out.push_str("Swarm Avoidance: Not triggered\n");
    }

    out.push_str("\nKey Hotspots (by air traffic density):\n");
    for (cell, score) in top_hotspots(report, TOP_HOTSPOTS) {
        out.push_str(&format!("  → Cell {}: Density Score {}\n", cell, score));
    }
    out.push_str("\n────────────────────────────────\n");

    out
}
