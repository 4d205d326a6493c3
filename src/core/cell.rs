//! Grid geometry: cells and board dimensions.
//!
//! `Cell` is an opaque coordinate key - hashable, ordered, copyable.
//! The ordering gives cell sets a canonical sorted form, which the
//! knowledge base relies on for value equality between sentences.
//!
//! `GridSize` owns all bounds logic so the engine and the board agree
//! on what "adjacent" means.
//!
//! ```
//! use mine_ai::core::{Cell, GridSize};
//!
//! let grid = GridSize::new(3, 3);
//! let corner = Cell::new(0, 0);
//!
//! // A corner cell has exactly 3 in-bounds neighbors.
//! assert_eq!(grid.neighbors(corner).len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A `(row, col)` coordinate on the board.
///
/// Used purely as a value-identity key: hashable, equality-comparable,
/// and totally ordered (row-major) so sets of cells have a canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index, 0-based from the top.
    pub row: usize,
    /// Column index, 0-based from the left.
    pub col: usize,
}

impl Cell {
    /// Create a cell at the given coordinates.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Neighbor list for a cell. A cell has at most 8 neighbors, so this
/// never spills to the heap.
pub type Neighbors = SmallVec<[Cell; 8]>;

/// Board dimensions: `height` rows by `width` columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
}

impl GridSize {
    /// Create a grid of the given dimensions.
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Total number of cells on the board.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Whether `cell` lies within the board.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// All in-bounds cells adjacent to `cell` (up to 8), excluding
    /// `cell` itself, in row-major order.
    #[must_use]
    pub fn neighbors(&self, cell: Cell) -> Neighbors {
        let mut out = Neighbors::new();
        let row_lo = cell.row.saturating_sub(1);
        let col_lo = cell.col.saturating_sub(1);
        for row in row_lo..=cell.row + 1 {
            for col in col_lo..=cell.col + 1 {
                let candidate = Cell::new(row, col);
                if candidate != cell && self.contains(candidate) {
                    out.push(candidate);
                }
            }
        }
        out
    }

    /// Iterate over every cell on the board in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}
