//! Pairwise separation scanning within grid neighborhoods.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::grid::SpatialGrid;

/// An unordered pair of mission ids stored in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConflictPair {
    pub first: String,
    pub second: String,
}

impl ConflictPair {
    /// Builds the canonical form, `first <= second` lexicographically, so
    /// (A, B) and (B, A) collapse to the same value.
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                first: a.to_string(),
                second: b.to_string(),
            }
        } else {
            Self {
                first: b.to_string(),
                second: a.to_string(),
            }
        }
    }
}

impl std::fmt::Display for ConflictPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.first, self.second)
    }
}

/// A separation violation at one sampled time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Sample time in seconds, rounded to two decimals
    pub time: f64,

    /// The violating pair
    pub pair: ConflictPair,
}

/// Finds every unique pair closer than `safety_distance` in one bucketed
/// sample.
///
/// Each occupied cell is checked against its 3x3 neighborhood. A seen-set
/// on canonical pairs keeps the scan to one distance check per pair per
/// call, even though the self-cell visit and reciprocal neighbor visits
/// re-derive the same pair.
pub fn scan(grid: &SpatialGrid, safety_distance: f64) -> Vec<ConflictPair> {
    let mut seen: HashSet<ConflictPair> = HashSet::new();
    let mut violations = Vec::new();

    for (cell, occupants) in grid.iter() {
        for neighbor in cell.neighborhood() {
            if let Some(others) = grid.occupants(&neighbor) {
                for (id_a, pos_a) in occupants {
                    for (id_b, pos_b) in others {
                        if id_a == id_b {
                            continue;
                        }
                        let pair = ConflictPair::new(id_a, id_b);
                        if !seen.insert(pair.clone()) {
                            continue;
                        }
                        if distance(pos_a, pos_b) < safety_distance {
                            violations.push(pair);
                        }
                    }
                }
            }
        }
    }

    violations
}

/// Euclidean 3D distance.
pub fn distance(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    (a - b).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid_of(positions: &[(&str, f64, f64, f64)]) -> SpatialGrid {
        let owned: Vec<(String, Vector3<f64>)> = positions
            .iter()
            .map(|(id, x, y, z)| (id.to_string(), Vector3::new(*x, *y, *z)))
            .collect();
        SpatialGrid::bucket(&owned, 50.0)
    }

    #[test]
    fn test_pair_is_canonical() {
        assert_eq!(ConflictPair::new("Primary", "Drone_A"), ConflictPair::new("Drone_A", "Primary"));
        assert_eq!(ConflictPair::new("Drone_A", "Primary").first, "Drone_A");
    }

    #[test]
    fn test_distance_is_euclidean_3d() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(3.0, 4.0, 12.0);
        assert_relative_eq!(distance(&a, &b), 13.0, epsilon = 1e-12);
    }

    #[test]
    fn test_close_pair_in_same_cell_detected() {
        let grid = grid_of(&[
            ("Primary", 10.0, 10.0, 20.0),
            ("Drone_A", 12.0, 10.0, 20.0),
        ]);
        let pairs = scan(&grid, 5.0);
        assert_eq!(pairs, vec![ConflictPair::new("Drone_A", "Primary")]);
    }

    #[test]
    fn test_no_conflict_when_far_apart() {
        let grid = grid_of(&[
            ("Primary", 10.0, 10.0, 20.0),
            ("Drone_A", 40.0, 10.0, 20.0),
        ]);
        assert!(scan(&grid, 5.0).is_empty());
    }

    #[test]
    fn test_altitude_gap_in_shared_cell_is_safe() {
        // Same cell and same x/y, but 40m of vertical separation.
        let grid = grid_of(&[
            ("Primary", 10.0, 10.0, 20.0),
            ("Drone_B", 10.0, 10.0, 60.0),
        ]);
        assert!(scan(&grid, 5.0).is_empty());
    }

    #[test]
    fn test_pair_straddling_cell_boundary_detected() {
        let grid = grid_of(&[
            ("Primary", 49.0, 10.0, 20.0),
            ("Drone_A", 51.0, 10.0, 20.0),
        ]);
        let pairs = scan(&grid, 5.0);
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_cluster_reports_each_pair_once() {
        let grid = grid_of(&[
            ("a", 10.0, 10.0, 20.0),
            ("b", 11.0, 10.0, 20.0),
            ("c", 10.0, 11.0, 20.0),
        ]);
        let mut pairs = scan(&grid, 5.0);
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ConflictPair::new("a", "b"),
                ConflictPair::new("a", "c"),
                ConflictPair::new("b", "c"),
            ]
        );
    }

    #[test]
    fn test_empty_grid_scans_clean() {
        let grid = SpatialGrid::bucket(&[], 50.0);
        assert!(scan(&grid, 5.0).is_empty());
    }
}
