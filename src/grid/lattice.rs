//! Lattice construction and the greedy neighbour walk.

use crate::compute::basis::BasisConverter;
use crate::compute::sphere::{Centroid, angular_distance_between, centroid};
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::grid::cell::{CellIndex, Direction, GridCell};
use parkgrid_types::SphericalPoint;
use serde::{Deserialize, Serialize};

/// Local extents below this (~6 µm on Earth) count as zero.
const MIN_EXTENT: f64 = 1e-12;

/// Distance between neighbouring cell centers along each local axis, as an
/// angle on the unit sphere. An axis with a half-width of zero has spacing 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub dy: f64,
    pub dz: f64,
}

impl Spacing {
    /// Derive spacing from the largest local offsets of the data.
    ///
    /// An axis in use whose own extent is zero borrows the other axis's
    /// extent, and every axis in use is raised to `floor`.
    fn derive(
        max_dy: f64,
        max_dz: f64,
        half_columns: usize,
        half_rows: usize,
        floor: f64,
    ) -> Result<Self> {
        if half_columns == 0 && half_rows == 0 {
            return Ok(Self { dy: 0.0, dz: 0.0 });
        }

        let extent = max_dy.max(max_dz);
        if extent < MIN_EXTENT {
            return Err(GridError::DegenerateExtent);
        }

        let along = |own: f64, half: usize| {
            if half == 0 {
                return 0.0;
            }
            let own = if own < MIN_EXTENT { extent } else { own };
            (own / half as f64).max(floor)
        };

        Ok(Self {
            dy: along(max_dy, half_columns),
            dz: along(max_dz, half_rows),
        })
    }
}

/// Result of walking the lattice toward a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located {
    pub cell: CellIndex,
    /// Angular distance from the point to the cell center, radians.
    pub distance: f64,
    /// Neighbour moves taken from the center cell.
    pub hops: usize,
}

/// A fully built lattice: the cell arena plus the geometry it was built from.
#[derive(Debug, Clone)]
pub(crate) struct Lattice {
    columns: usize,
    rows: usize,
    center: CellIndex,
    cells: Vec<GridCell>,
    converter: BasisConverter,
    spacing: Spacing,
    centroid: Centroid,
}

impl Lattice {
    /// Build a lattice around `points`. Cells start empty.
    pub(crate) fn build(config: &GridConfig, points: &[SphericalPoint]) -> Result<Self> {
        let centroid = centroid(points.iter().copied())?;
        let converter = BasisConverter::at(&centroid.point, config.rotation_radians());

        let (mut max_dy, mut max_dz) = (0.0f64, 0.0f64);
        for point in points {
            let local = converter.convert_point(point);
            max_dy = max_dy.max(local.y.abs());
            max_dz = max_dz.max(local.z.abs());
        }

        let spacing = Spacing::derive(
            max_dy,
            max_dz,
            config.columns,
            config.rows,
            config.min_spacing_radians(),
        )?;

        let columns = config.lattice_columns();
        let rows = config.lattice_rows();
        let center = CellIndex::new(config.columns, config.rows);

        let mut cells = Vec::with_capacity(columns * rows);
        for column in 0..columns {
            for row in 0..rows {
                let dy = spacing.dy * (column as f64 - center.column as f64);
                let dz = spacing.dz * (row as f64 - center.row as f64);
                cells.push(GridCell::new(converter.revert_offset(dy, dz)));
            }
        }

        let mut lattice = Self {
            columns,
            rows,
            center,
            cells,
            converter,
            spacing,
            centroid,
        };
        lattice.link();

        log::debug!(
            "built {}x{} lattice at ({:.6}, {:.6}) from {} points, spacing ({:.3e}, {:.3e}) rad",
            columns,
            rows,
            lattice.centroid.point.lat_degrees(),
            lattice.centroid.point.lng_degrees(),
            lattice.centroid.count,
            spacing.dy,
            spacing.dz,
        );

        Ok(lattice)
    }

    fn link(&mut self) {
        for column in 0..self.columns {
            for row in 0..self.rows {
                let index = CellIndex::new(column, row);
                let slot = self.slot(index);
                for direction in Direction::ALL {
                    let neighbor = direction.step(index, self.columns, self.rows);
                    self.cells[slot].set_neighbor(direction, neighbor);
                }
            }
        }
    }

    /// Column-major position of `index` in the arena.
    #[inline]
    fn slot(&self, index: CellIndex) -> usize {
        index.column * self.rows + index.row
    }

    #[inline]
    fn index_of(&self, slot: usize) -> CellIndex {
        CellIndex::new(slot / self.rows, slot % self.rows)
    }

    pub(crate) fn contains(&self, index: CellIndex) -> bool {
        index.column < self.columns && index.row < self.rows
    }

    pub(crate) fn cell(&self, index: CellIndex) -> Option<&GridCell> {
        if self.contains(index) {
            self.cells.get(self.slot(index))
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, index: CellIndex) -> Option<&mut GridCell> {
        if self.contains(index) {
            let slot = self.slot(index);
            self.cells.get_mut(slot)
        } else {
            None
        }
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = (CellIndex, &GridCell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(slot, cell)| (self.index_of(slot), cell))
    }

    pub(crate) fn clear_items(&mut self) {
        self.cells.iter_mut().for_each(GridCell::clear);
    }

    pub(crate) fn converter(&self) -> &BasisConverter {
        &self.converter
    }

    pub(crate) fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub(crate) fn centroid(&self) -> &Centroid {
        &self.centroid
    }

    fn distance_to(&self, index: CellIndex, point: &SphericalPoint) -> f64 {
        angular_distance_between(self.cells[self.slot(index)].center(), point)
    }

    /// Hill-climb from the center cell: move to the closest strictly closer
    /// neighbour until none is closer.
    ///
    /// Distance strictly decreases on every hop, so no cell is visited twice
    /// and the walk ends within `cells.len()` hops.
    pub(crate) fn walk(&self, point: &SphericalPoint) -> Located {
        let mut current = self.center;
        let mut best = self.distance_to(current, point);
        let mut hops = 0;

        while hops < self.cells.len() {
            let mut next = None;
            for (_, neighbor) in self.cells[self.slot(current)].neighbors() {
                let distance = self.distance_to(neighbor, point);
                if distance < best {
                    best = distance;
                    next = Some(neighbor);
                }
            }

            match next {
                Some(neighbor) => {
                    current = neighbor;
                    hops += 1;
                }
                None => break,
            }
        }

        log::trace!(
            "walk ended at ({}, {}) after {} hops, distance {:.3e}",
            current.column,
            current.row,
            hops,
            best
        );

        Located {
            cell: current,
            distance: best,
            hops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(half_side_degrees: f64) -> Vec<SphericalPoint> {
        let h = half_side_degrees;
        vec![
            SphericalPoint::from_degrees(-h, -h),
            SphericalPoint::from_degrees(-h, h),
            SphericalPoint::from_degrees(h, -h),
            SphericalPoint::from_degrees(h, h),
        ]
    }

    #[test]
    fn test_spacing_single_cell_needs_no_extent() {
        let spacing = Spacing::derive(0.0, 0.0, 0, 0, 0.0).unwrap();
        assert_eq!(spacing, Spacing { dy: 0.0, dz: 0.0 });
    }

    #[test]
    fn test_spacing_zero_extent_is_degenerate() {
        assert_eq!(
            Spacing::derive(0.0, 0.0, 1, 1, 0.0).unwrap_err(),
            GridError::DegenerateExtent
        );
    }

    #[test]
    fn test_spacing_borrows_missing_axis() {
        let spacing = Spacing::derive(0.0, 0.2, 2, 1, 0.0).unwrap();
        assert!((spacing.dy - 0.1).abs() < 1e-15);
        assert!((spacing.dz - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_spacing_floor_applies() {
        let spacing = Spacing::derive(1e-6, 1e-6, 1, 1, 1e-4).unwrap();
        assert_eq!(spacing, Spacing { dy: 1e-4, dz: 1e-4 });
    }

    #[test]
    fn test_slot_index_round_trip() {
        let config = GridConfig::new(2, 1).with_min_spacing_meters(0.0);
        let lattice = Lattice::build(&config, &square(1.0)).unwrap();
        assert_eq!((lattice.columns, lattice.rows), (5, 3));
        for (index, _) in lattice.cells() {
            assert_eq!(lattice.index_of(lattice.slot(index)), index);
        }
    }

    #[test]
    fn test_center_cell_sits_on_centroid() {
        let config = GridConfig::new(1, 1).with_min_spacing_meters(0.0);
        let lattice = Lattice::build(&config, &square(0.5)).unwrap();
        let center = lattice.cell(lattice.center).unwrap();
        let d = angular_distance_between(center.center(), &lattice.centroid().point);
        assert!(d < 1e-7);
    }

    #[test]
    fn test_outer_cells_reach_data_extent() {
        let config = GridConfig::new(1, 1).with_min_spacing_meters(0.0);
        let points = square(1.0);
        let lattice = Lattice::build(&config, &points).unwrap();

        // Every corner of the data square has a cell center on it.
        for point in &points {
            let located = lattice.walk(point);
            assert!(located.distance < 1e-7, "{located:?}");
        }
    }

    #[test]
    fn test_walk_from_center_to_center_is_free() {
        let config = GridConfig::new(3, 3).with_min_spacing_meters(0.0);
        let lattice = Lattice::build(&config, &square(2.0)).unwrap();
        let origin = lattice.centroid().point;
        let located = lattice.walk(&origin);
        assert_eq!(located.cell, lattice.center);
        assert_eq!(located.hops, 0);
    }

    #[test]
    fn test_out_of_bounds_index() {
        let config = GridConfig::new(1, 1);
        let lattice = Lattice::build(&config, &square(1.0)).unwrap();
        assert!(lattice.cell(CellIndex::new(3, 0)).is_none());
        assert!(lattice.cell(CellIndex::new(0, 3)).is_none());
        assert!(lattice.cell(CellIndex::new(2, 2)).is_some());
    }
}
