//! Lattice cells and their addressing.

use parkgrid_types::SphericalPoint;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Position of a cell in the lattice. Only meaningful for the build that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub column: usize,
    pub row: usize,
}

impl CellIndex {
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// Lattice adjacency. `Right`/`Left` step along columns, `Up`/`Down` along rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    /// Scan order used by the neighbour walk.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
        }
    }

    #[inline]
    const fn slot(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        }
    }

    /// The neighbouring index in this direction, if it lies inside a lattice
    /// of `columns × rows` cells.
    pub fn step(self, from: CellIndex, columns: usize, rows: usize) -> Option<CellIndex> {
        let CellIndex { column, row } = from;
        match self {
            Direction::Right => (column + 1 < columns).then(|| CellIndex::new(column + 1, row)),
            Direction::Up => (row + 1 < rows).then(|| CellIndex::new(column, row + 1)),
            Direction::Left => column.checked_sub(1).map(|c| CellIndex::new(c, row)),
            Direction::Down => row.checked_sub(1).map(|r| CellIndex::new(column, r)),
        }
    }
}

/// One lattice cell: a center on the sphere, links to up to four
/// neighbours, and the ids of the items currently binned here.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    center: SphericalPoint,
    neighbors: [Option<CellIndex>; 4],
    items: SmallVec<[usize; 4]>,
}

impl GridCell {
    pub(crate) fn new(center: SphericalPoint) -> Self {
        Self {
            center,
            neighbors: [None; 4],
            items: SmallVec::new(),
        }
    }

    pub fn center(&self) -> &SphericalPoint {
        &self.center
    }

    /// Center latitude in radians.
    pub fn lat(&self) -> f64 {
        self.center.lat()
    }

    /// Center longitude in radians.
    pub fn lng(&self) -> f64 {
        self.center.lng()
    }

    /// The neighbour in `direction`, or `None` on the lattice boundary.
    pub fn neighbor(&self, direction: Direction) -> Option<CellIndex> {
        self.neighbors[direction.slot()]
    }

    /// Present neighbours in [`Direction::ALL`] order.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, CellIndex)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.neighbor(direction).map(|index| (direction, index)))
    }

    /// Ids (positions in the grid's item list) of items binned here, in
    /// binning order.
    pub fn item_ids(&self) -> &[usize] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, index: Option<CellIndex>) {
        self.neighbors[direction.slot()] = index;
    }

    pub(crate) fn push(&mut self, item_id: usize) {
        self.items.push(item_id);
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}
