//! The spatial binning grid.
//!
//! A [`SpatialGrid`] owns every item it was given, a lattice of
//! `(2c+1) × (2r+1)` cells centered on the items' spherical centroid, and the
//! assignment of each located item to one cell.
//!
//! ```rust
//! use parkgrid::{GridConfig, SpatialGrid};
//! use parkgrid_types::SphericalPoint;
//!
//! let points = vec![
//!     SphericalPoint::from_degrees(0.0, 0.0),
//!     SphericalPoint::from_degrees(0.0, 10.0),
//! ];
//! let grid = SpatialGrid::new(2, 0, points, 0.0)?;
//!
//! assert_eq!(grid.dimensions(), (5, 1));
//! assert_eq!(grid.cell_of(0).unwrap().column, 0);
//! assert_eq!(grid.cell_of(1).unwrap().column, 4);
//! # Ok::<(), parkgrid::GridError>(())
//! ```

pub mod cell;
mod lattice;

pub use cell::{CellIndex, Direction, GridCell};
pub use lattice::{Located, Spacing};

use crate::compute::basis::BasisConverter;
use crate::compute::sphere::Centroid;
use crate::compute::validation::validate_spherical_point;
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use geo::{Distance, Haversine};
use lattice::Lattice;
use parkgrid_types::{Locatable, SphericalPoint};

/// Items binned into a centroid-anchored lattice on the sphere.
///
/// Mutating operations take `&mut self`; a rebuild invalidates every
/// [`CellIndex`] handed out before it.
#[derive(Debug, Clone)]
pub struct SpatialGrid<T> {
    config: GridConfig,
    items: Vec<T>,
    assignments: Vec<Option<CellIndex>>,
    lattice: Option<Lattice>,
}

impl<T: Locatable> SpatialGrid<T> {
    /// Build a grid over `items` and bin all of them.
    ///
    /// `columns` and `rows` are half-widths; the rotation offset turns the
    /// lattice clockwise.
    ///
    /// # Errors
    ///
    /// - [`GridError::EmptyInput`] if no item has coordinates
    /// - [`GridError::DegenerateExtent`] if all located items coincide
    ///
    /// Items with non-finite or out-of-range coordinates are kept but never
    /// binned.
    pub fn new<I>(
        columns: usize,
        rows: usize,
        items: I,
        rotation_offset_degrees: f64,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let config = GridConfig::new(columns, rows)
            .with_rotation_offset_degrees(rotation_offset_degrees);
        Self::with_config(config, items)
    }

    /// Build a grid over `items` with a full configuration and bin them.
    pub fn with_config<I>(config: GridConfig, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut grid = Self::empty(config)?;
        grid.items = items.into_iter().collect();
        grid.assignments = vec![None; grid.items.len()];
        grid.rebin_all()?;
        Ok(grid)
    }

    /// A grid with no items and no lattice yet.
    pub fn empty(config: GridConfig) -> Result<Self> {
        config.validate().map_err(GridError::InvalidConfig)?;
        Ok(Self {
            config,
            items: Vec::new(),
            assignments: Vec::new(),
            lattice: None,
        })
    }

    /// Replace the item set and build a fresh lattice around it, leaving
    /// every cell empty.
    ///
    /// On error the grid keeps its previous items and lattice.
    pub fn build<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let points: Vec<SphericalPoint> = Self::located_points(&items)
            .into_iter()
            .map(|(_, point)| point)
            .collect();
        let lattice = Lattice::build(&self.config, &points)?;

        self.assignments = vec![None; items.len()];
        self.items = items;
        self.lattice = Some(lattice);
        Ok(())
    }

    /// Add one item and bin it.
    ///
    /// On a built lattice the item is placed by walking from the center cell;
    /// nothing else moves and spacing is unchanged. On an empty grid the
    /// lattice is built from everything accumulated so far.
    ///
    /// Returns the cell the item landed in, or `None` for an item without
    /// coordinates (kept, but not binned).
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidInput`] for bad coordinates (the item is not kept).
    /// If the first build fails, the error is returned and the item stays in
    /// the accumulated set so a later `bind` or [`rebin_all`](Self::rebin_all)
    /// can succeed.
    pub fn bind(&mut self, item: T) -> Result<Option<CellIndex>> {
        let location = item.location();
        if let Some(point) = &location {
            validate_spherical_point(point)?;
        }

        let id = self.items.len();
        self.items.push(item);
        self.assignments.push(None);

        let Some(point) = location else {
            log::debug!("item {} has no coordinates; kept unbinned", id);
            return Ok(None);
        };

        let Some(lattice) = self.lattice.as_mut() else {
            self.rebin_all()?;
            return Ok(self.assignments[id]);
        };

        let located = lattice.walk(&point);
        if let Some(cell) = lattice.cell_mut(located.cell) {
            cell.push(id);
        }
        self.assignments[id] = Some(located.cell);
        Ok(Some(located.cell))
    }

    /// Rebuild the lattice from every accumulated item (new centroid, new
    /// spacing) and bin all located items again.
    ///
    /// On error the previous lattice and assignments stay in place.
    pub fn rebin_all(&mut self) -> Result<()> {
        let located = Self::located_points(&self.items);
        let points: Vec<SphericalPoint> = located.iter().map(|(_, p)| *p).collect();
        let mut lattice = Lattice::build(&self.config, &points)?;

        let mut assignments = vec![None; self.items.len()];
        for (id, point) in &located {
            let hit = lattice.walk(point);
            if let Some(cell) = lattice.cell_mut(hit.cell) {
                cell.push(*id);
            }
            assignments[*id] = Some(hit.cell);
        }

        log::debug!(
            "binned {} of {} items into {} cells",
            located.len(),
            self.items.len(),
            self.config.lattice_columns() * self.config.lattice_rows()
        );

        self.lattice = Some(lattice);
        self.assignments = assignments;
        Ok(())
    }

    /// Empty every cell without touching the lattice geometry.
    pub fn clear_assignments(&mut self) {
        if let Some(lattice) = self.lattice.as_mut() {
            lattice.clear_items();
        }
        self.assignments.iter_mut().for_each(|slot| *slot = None);
    }

    /// Nearest-cell query: walk the current lattice toward `point` without
    /// binning anything. `None` before the first build or for a point with
    /// non-finite coordinates.
    pub fn locate(&self, point: &SphericalPoint) -> Option<Located> {
        if !point.is_finite() {
            return None;
        }
        self.lattice.as_ref().map(|lattice| lattice.walk(point))
    }

    /// Number of accumulated items with usable coordinates.
    pub fn located_count(&self) -> usize {
        self.items
            .iter()
            .filter_map(Locatable::location)
            .filter(|point| validate_spherical_point(point).is_ok())
            .count()
    }

    /// Located items with usable coordinates. Items without coordinates or
    /// with non-finite or out-of-range ones stay in the item list but are
    /// left out of the centroid and binning.
    fn located_points(items: &[T]) -> Vec<(usize, SphericalPoint)> {
        let mut located = Vec::with_capacity(items.len());
        for (id, item) in items.iter().enumerate() {
            match item.location() {
                Some(point) => match validate_spherical_point(&point) {
                    Ok(()) => located.push((id, point)),
                    Err(GridError::InvalidInput(reason)) => {
                        log::warn!("skipping item {} with unusable coordinates: {}", id, reason)
                    }
                    Err(e) => log::warn!("skipping item {}: {}", id, e),
                },
                None => log::warn!("skipping item {} without coordinates", id),
            }
        }
        located
    }
}

impl<T> SpatialGrid<T> {
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Whether a lattice exists.
    pub fn is_built(&self) -> bool {
        self.lattice.is_some()
    }

    /// Lattice `(columns, rows)`, i.e. `(2c+1, 2r+1)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.config.lattice_columns(), self.config.lattice_rows())
    }

    pub fn cell_count(&self) -> usize {
        self.config.lattice_columns() * self.config.lattice_rows()
    }

    pub fn center_index(&self) -> CellIndex {
        CellIndex::new(self.config.columns, self.config.rows)
    }

    pub fn cell(&self, index: CellIndex) -> Option<&GridCell> {
        self.lattice.as_ref()?.cell(index)
    }

    pub fn center_cell(&self) -> Option<&GridCell> {
        self.cell(self.center_index())
    }

    /// All cells with their indices, column by column. Empty before the
    /// first build.
    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, &GridCell)> + '_ {
        self.lattice.iter().flat_map(|lattice| lattice.cells())
    }

    /// Cells holding at least one item.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (CellIndex, &GridCell)> + '_ {
        self.cells().filter(|(_, cell)| !cell.is_empty())
    }

    pub fn neighbor(&self, index: CellIndex, direction: Direction) -> Option<CellIndex> {
        self.cell(index)?.neighbor(direction)
    }

    /// Items binned into `index`, in binning order.
    pub fn cell_items(&self, index: CellIndex) -> impl Iterator<Item = &T> + '_ {
        self.cell(index)
            .into_iter()
            .flat_map(move |cell| cell.item_ids().iter().map(move |&id| &self.items[id]))
    }

    /// The cell item `id` is currently binned in.
    pub fn cell_of(&self, id: usize) -> Option<CellIndex> {
        self.assignments.get(id).copied().flatten()
    }

    /// Every accumulated item, located or not, in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, id: usize) -> Option<&T> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items currently sitting in a cell.
    pub fn bound_count(&self) -> usize {
        self.assignments.iter().filter(|slot| slot.is_some()).count()
    }

    /// Current spacing as angles on the unit sphere.
    pub fn spacing(&self) -> Option<Spacing> {
        self.lattice.as_ref().map(Lattice::spacing)
    }

    /// Ground distance in metres between the center cell and its right and
    /// up neighbours. An axis without neighbours reports `0.0`.
    pub fn spacing_meters(&self) -> Option<(f64, f64)> {
        let center = self.center_index();
        let along = |direction| {
            self.neighbor(center, direction)
                .and_then(|neighbor| self.distance_meters(center, neighbor))
                .unwrap_or(0.0)
        };
        self.is_built()
            .then(|| (along(Direction::Right), along(Direction::Up)))
    }

    /// Haversine distance in metres between two cell centers.
    pub fn distance_meters(&self, a: CellIndex, b: CellIndex) -> Option<f64> {
        let a: geo::Point<f64> = (*self.cell(a)?.center()).into();
        let b: geo::Point<f64> = (*self.cell(b)?.center()).into();
        Some(Haversine.distance(a, b))
    }

    /// Centroid of the located items at the last build.
    pub fn centroid(&self) -> Option<&Centroid> {
        self.lattice.as_ref().map(Lattice::centroid)
    }

    /// The local basis of the last build.
    pub fn converter(&self) -> Option<&BasisConverter> {
        self.lattice.as_ref().map(Lattice::converter)
    }
}
