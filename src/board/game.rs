use rustc_hash::FxHashSet;

use crate::core::{Cell, GridSize, SolverRng};
use crate::knowledge::{KnowledgeEngine, KnowledgeError};

/// A Minesweeper board with a hidden mine layout.
///
/// Owns the ground truth the engine is trying to deduce. Reveals are
/// answered with exact adjacent-mine counts; the board never volunteers
/// anything else.
#[derive(Clone, Debug)]
pub struct Board {
    grid: GridSize,
    mines: FxHashSet<Cell>,
}

impl Board {
    /// Place `mine_count` mines uniformly at random on distinct cells.
    ///
    /// Panics if `mine_count` exceeds the number of cells.
    #[must_use]
    pub fn generate(grid: GridSize, mine_count: usize, rng: &mut SolverRng) -> Self {
        assert!(
            mine_count <= grid.cell_count(),
            "cannot place {mine_count} mines on a {grid} board"
        );
        let mut mines = FxHashSet::default();
        while mines.len() < mine_count {
            let row = rng.gen_range_usize(0..grid.height);
            let col = rng.gen_range_usize(0..grid.width);
            mines.insert(Cell::new(row, col));
        }
        Self { grid, mines }
    }

    /// Build a board with an explicit mine layout, for deterministic tests.
    ///
    /// Panics if any mine lies outside the grid.
    #[must_use]
    pub fn with_mines(grid: GridSize, mines: impl IntoIterator<Item = Cell>) -> Self {
        let mines: FxHashSet<Cell> = mines.into_iter().collect();
        for &mine in &mines {
            assert!(grid.contains(mine), "mine {mine} is outside the {grid} board");
        }
        Self { grid, mines }
    }

    /// Board dimensions.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Whether `cell` hides a mine.
    #[must_use]
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Number of mines adjacent to `cell` (the cell itself excluded).
    #[must_use]
    pub fn adjacent_mines(&self, cell: Cell) -> usize {
        self.grid
            .neighbors(cell)
            .iter()
            .filter(|neighbor| self.mines.contains(*neighbor))
            .count()
    }

    /// Total number of mines on the board.
    #[must_use]
    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    /// Number of cells that do not hide a mine.
    #[must_use]
    pub fn safe_cell_count(&self) -> usize {
        self.grid.cell_count() - self.mines.len()
    }

    /// The hidden mine layout. Test-side oracle; a real player never
    /// sees this.
    #[must_use]
    pub fn mines(&self) -> &FxHashSet<Cell> {
        &self.mines
    }
}

/// How a driven game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// Every safe cell was revealed.
    Won,
    /// A revealed cell hid a mine.
    Lost {
        /// The fatal cell.
        cell: Cell,
    },
    /// No move was available before every safe cell was revealed.
    /// Unreachable while inference is sound; kept as a guard.
    Stalled,
}

/// Play one game to completion: safe move when one is proven, random
/// move otherwise, until the board is cleared or a mine goes off.
///
/// Panics if `engine` was built for different dimensions than `board`.
pub fn play(board: &Board, engine: &mut KnowledgeEngine) -> Result<GameOutcome, KnowledgeError> {
    assert_eq!(
        engine.grid(),
        board.grid(),
        "engine and board disagree on grid dimensions"
    );
    loop {
        if engine.played().len() == board.safe_cell_count() {
            return Ok(GameOutcome::Won);
        }
        let Some(cell) = engine.known_safe_move().or_else(|| engine.random_move()) else {
            return Ok(GameOutcome::Stalled);
        };
        if board.is_mine(cell) {
            return Ok(GameOutcome::Lost { cell });
        }
        engine.record_evidence(cell, board.adjacent_mines(cell))?;
    }
}
