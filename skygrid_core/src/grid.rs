//! Horizontal spatial hash for neighbor-limited proximity search.
//!
//! Cells are fixed-size squares in the x/y plane. Altitude stays out of
//! the bucket key: the grid guards a full 3D separation check, but
//! crowding (and therefore swarm jitter) is judged per horizontal cell,
//! so vertically stacked vehicles still count toward the same cell's
//! density.

use nalgebra::Vector3;
use std::collections::BTreeMap;

/// A horizontal grid cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub x: i64,
    pub y: i64,
}

impl GridCell {
    /// The cell containing `position` for the given cell edge length.
    pub fn containing(position: &Vector3<f64>, cell_size: f64) -> Self {
        Self {
            x: (position.x / cell_size).floor() as i64,
            y: (position.y / cell_size).floor() as i64,
        }
    }

    /// The 3x3 Chebyshev neighborhood around this cell, itself included.
    pub fn neighborhood(self) -> impl Iterator<Item = GridCell> {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).map(move |dy| GridCell {
                x: self.x + dx,
                y: self.y + dy,
            })
        })
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One time sample's positions bucketed by horizontal cell.
///
/// Cells iterate in sorted key order, so everything downstream of a grid
/// walk (jitter draws, conflict append order) is reproducible for a given
/// seed.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cells: BTreeMap<GridCell, Vec<(String, Vector3<f64>)>>,
    cell_size: f64,
}

impl SpatialGrid {
    /// Buckets `(id, position)` pairs, preserving slice order within each
    /// cell.
    pub fn bucket(positions: &[(String, Vector3<f64>)], cell_size: f64) -> Self {
        let mut cells: BTreeMap<GridCell, Vec<(String, Vector3<f64>)>> = BTreeMap::new();
        for (id, position) in positions {
            let cell = GridCell::containing(position, cell_size);
            cells.entry(cell).or_default().push((id.clone(), *position));
        }
        Self { cells, cell_size }
    }

    /// Occupant count of the cell containing `position`.
    pub fn density_at(&self, position: &Vector3<f64>) -> usize {
        let cell = GridCell::containing(position, self.cell_size);
        self.cells.get(&cell).map_or(0, Vec::len)
    }

    /// Occupants of `cell`, if any.
    pub fn occupants(&self, cell: &GridCell) -> Option<&[(String, Vector3<f64>)]> {
        self.cells.get(cell).map(Vec::as_slice)
    }

    /// Iterates occupied cells in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GridCell, &[(String, Vector3<f64>)])> {
        self.cells.iter().map(|(cell, list)| (cell, list.as_slice()))
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when nothing was bucketed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
