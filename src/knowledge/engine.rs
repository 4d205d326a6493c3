//! The knowledge engine: evidence ingestion and the derivation fixpoint.
//!
//! ## How facts flow
//!
//! 1. The board collaborator reveals a cell and its adjacent mine count.
//! 2. `record_evidence` turns that into a sentence over the cell's
//!    still-unresolved neighbors.
//! 3. The fixpoint loop then alternates three passes until a full pass
//!    changes nothing:
//!    - **propagate**: every sentence that has become fully determined
//!      marks its cells globally mine/safe, and each global fact narrows
//!      *every* sentence that mentions the cell;
//!    - **sweep**: sentences narrowed down to the empty set are dropped
//!      (an empty sentence still claiming mines is a contradiction);
//!    - **resolve**: for every strict-subset pair `(A, B)`, the sentence
//!      `(B.cells - A.cells, B.count - A.count)` is derived. New
//!      sentences are staged and appended after the scan - the pass
//!      never mutates the collection it is iterating.
//!
//! The loop terminates: each pass either shrinks the total cell mass of
//! the knowledge base, removes a sentence, or adds a sentence strictly
//! smaller than an existing one, and the universe of distinct cell sets
//! is finite.
//!
//! ## Certainty only
//!
//! The engine never guesses. `known_safe_move` answers only from proven
//! facts; when nothing is proven, callers fall back to `random_move`,
//! which is uniform over unplayed non-mine cells and is the only place
//! the engine touches its RNG.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, GridSize, SolverRng};

use super::error::KnowledgeError;
use super::sentence::Sentence;

/// Accumulated knowledge about one game of Minesweeper.
///
/// All public mutating operations run the derivation fixpoint to
/// completion before returning, so callers never observe a partially
/// derived state. A contradiction poisons the engine permanently.
#[derive(Debug)]
pub struct KnowledgeEngine {
    grid: GridSize,
    rng: SolverRng,
    /// Cells the caller has already chosen. Monotone.
    played: FxHashSet<Cell>,
    /// Cells proven to be mines. Monotone, disjoint from `known_safe`.
    known_mine: FxHashSet<Cell>,
    /// Cells proven to be safe. Monotone, disjoint from `known_mine`.
    known_safe: FxHashSet<Cell>,
    /// Current constraints. No value-equal duplicates after a fixpoint;
    /// no sentence mentions a cell in `known_mine` or `known_safe`.
    knowledge: Vec<Sentence>,
    poisoned: bool,
}

impl KnowledgeEngine {
    /// Create an engine for a board of the given dimensions.
    #[must_use]
    pub fn new(grid: GridSize, rng: SolverRng) -> Self {
        Self {
            grid,
            rng,
            played: FxHashSet::default(),
            known_mine: FxHashSet::default(),
            known_safe: FxHashSet::default(),
            knowledge: Vec::new(),
            poisoned: false,
        }
    }

    /// Ingest one piece of evidence: `cell` was revealed and has exactly
    /// `adjacent_mine_count` mines among its in-bounds neighbors.
    ///
    /// Preconditions (violations are rejected with zero state change):
    /// `cell` is in bounds, has not been played before, is not a known
    /// mine, and the engine is not poisoned.
    ///
    /// On success the derivation fixpoint has run to completion. A
    /// [`KnowledgeError::Contradiction`] means the evidence conflicts
    /// with established facts; the engine is then poisoned and rejects
    /// all further use.
    pub fn record_evidence(
        &mut self,
        cell: Cell,
        adjacent_mine_count: usize,
    ) -> Result<(), KnowledgeError> {
        if self.poisoned {
            return Err(KnowledgeError::ContractViolation(
                "engine was poisoned by an earlier contradiction".to_string(),
            ));
        }
        if !self.grid.contains(cell) {
            return Err(KnowledgeError::ContractViolation(format!(
                "cell {cell} is outside the {} grid",
                self.grid
            )));
        }
        if self.played.contains(&cell) {
            return Err(KnowledgeError::ContractViolation(format!(
                "cell {cell} was already played"
            )));
        }
        if self.known_mine.contains(&cell) {
            return Err(KnowledgeError::ContractViolation(format!(
                "cell {cell} is a known mine and cannot be revealed"
            )));
        }

        self.ingest(cell, adjacent_mine_count).map_err(|err| {
            if matches!(err, KnowledgeError::Contradiction(_)) {
                self.poisoned = true;
            }
            err
        })
    }

    fn ingest(&mut self, cell: Cell, adjacent_mine_count: usize) -> Result<(), KnowledgeError> {
        self.played.insert(cell);
        self.mark_safe(cell)?;

        // Build the new sentence over the unresolved neighbors only:
        // known mines are subtracted from the count, known safes are
        // skipped outright.
        let mut count = adjacent_mine_count;
        let mut unresolved: BTreeSet<Cell> = BTreeSet::new();
        for neighbor in self.grid.neighbors(cell) {
            if self.known_mine.contains(&neighbor) {
                count = count.checked_sub(1).ok_or_else(|| {
                    KnowledgeError::Contradiction(format!(
                        "evidence at {cell} reports fewer mines than already proven adjacent"
                    ))
                })?;
            } else if !self.known_safe.contains(&neighbor) {
                unresolved.insert(neighbor);
            }
        }

        if unresolved.is_empty() {
            if count != 0 {
                return Err(KnowledgeError::Contradiction(format!(
                    "evidence at {cell} leaves {count} mines with no cells to hold them"
                )));
            }
        } else {
            let sentence = Sentence::new(unresolved, count)?;
            if !self.knowledge.contains(&sentence) {
                self.knowledge.push(sentence);
            }
        }

        self.fixpoint()
    }

    /// Re-run the derivation fixpoint.
    ///
    /// `record_evidence` already runs this; calling it again on a stable
    /// engine changes nothing. Exposed so callers (and tests) can check
    /// stability explicitly.
    pub fn run_inference(&mut self) -> Result<(), KnowledgeError> {
        if self.poisoned {
            return Err(KnowledgeError::ContractViolation(
                "engine was poisoned by an earlier contradiction".to_string(),
            ));
        }
        self.fixpoint().map_err(|err| {
            if matches!(err, KnowledgeError::Contradiction(_)) {
                self.poisoned = true;
            }
            err
        })
    }

    fn fixpoint(&mut self) -> Result<(), KnowledgeError> {
        loop {
            let mut changed = false;
            changed |= self.propagate_certain()?;
            changed |= self.sweep_resolved()?;
            changed |= self.resolve_subsets()?;
            if !changed {
                return Ok(());
            }
        }
    }

    /// Propagation pass: collect every cell some sentence now proves to
    /// be a mine or safe, then apply each fact globally. Collection
    /// happens before any mutation - narrowing a sentence mid-scan would
    /// invalidate the derivations of its successors.
    fn propagate_certain(&mut self) -> Result<bool, KnowledgeError> {
        let mut mines: BTreeSet<Cell> = BTreeSet::new();
        let mut safes: BTreeSet<Cell> = BTreeSet::new();
        for sentence in &self.knowledge {
            mines.extend(sentence.derive_certain_mines());
            safes.extend(sentence.derive_certain_safes());
        }

        let mut changed = false;
        for cell in mines {
            changed |= self.mark_mine(cell)?;
        }
        for cell in safes {
            changed |= self.mark_safe(cell)?;
        }
        Ok(changed)
    }

    /// Record `cell` as a proven mine and narrow every sentence that
    /// mentions it. Returns whether the fact was new.
    fn mark_mine(&mut self, cell: Cell) -> Result<bool, KnowledgeError> {
        if self.known_safe.contains(&cell) {
            return Err(KnowledgeError::Contradiction(format!(
                "cell {cell} proven to be a mine but already proven safe"
            )));
        }
        if !self.known_mine.insert(cell) {
            return Ok(false);
        }
        for sentence in &mut self.knowledge {
            sentence.narrow_as_mine(cell)?;
        }
        Ok(true)
    }

    /// Record `cell` as proven safe and narrow every sentence that
    /// mentions it. Returns whether the fact was new.
    fn mark_safe(&mut self, cell: Cell) -> Result<bool, KnowledgeError> {
        if self.known_mine.contains(&cell) {
            return Err(KnowledgeError::Contradiction(format!(
                "cell {cell} proven to be safe but already proven a mine"
            )));
        }
        if !self.known_safe.insert(cell) {
            return Ok(false);
        }
        for sentence in &mut self.knowledge {
            sentence.narrow_as_safe(cell);
        }
        Ok(true)
    }

    /// Sweep pass: drop sentences whose cell set has been narrowed to
    /// empty. An empty sentence with a non-zero count means the global
    /// facts and the sentence disagree.
    fn sweep_resolved(&mut self) -> Result<bool, KnowledgeError> {
        if let Some(bad) = self
            .knowledge
            .iter()
            .find(|s| s.is_resolved() && s.count() > 0)
        {
            return Err(KnowledgeError::Contradiction(format!(
                "sentence narrowed to no cells still claims {} mines",
                bad.count()
            )));
        }
        let before = self.knowledge.len();
        self.knowledge.retain(|s| !s.is_resolved());
        Ok(self.knowledge.len() != before)
    }

    /// Resolution pass: deduplicate by value, then derive the difference
    /// sentence for every strict-subset pair. Derived sentences are
    /// staged into a separate list and appended after the scan, so the
    /// collection being iterated is never mutated (next-generation
    /// build-then-swap).
    fn resolve_subsets(&mut self) -> Result<bool, KnowledgeError> {
        let mut changed = false;

        // Narrowing can make two previously distinct sentences coincide;
        // keep the first occurrence of each value.
        let mut seen: FxHashSet<Sentence> = self.knowledge.iter().cloned().collect();
        if seen.len() != self.knowledge.len() {
            let mut kept: Vec<Sentence> = Vec::with_capacity(seen.len());
            let mut emitted: FxHashSet<Sentence> = FxHashSet::default();
            for sentence in self.knowledge.drain(..) {
                if emitted.insert(sentence.clone()) {
                    kept.push(sentence);
                }
            }
            self.knowledge = kept;
            changed = true;
        }

        let mut staged: Vec<Sentence> = Vec::new();
        for subset in &self.knowledge {
            for superset in &self.knowledge {
                if subset.is_strict_subset_of(superset) {
                    let derived = subset.resolve_against(superset)?;
                    if seen.insert(derived.clone()) {
                        staged.push(derived);
                    }
                }
            }
        }
        if !staged.is_empty() {
            self.knowledge.extend(staged);
            changed = true;
        }
        Ok(changed)
    }

    /// A cell proven safe that has not been played yet, or `None`.
    ///
    /// Ties break to the row-major minimum so the choice is
    /// deterministic without consuming randomness.
    #[must_use]
    pub fn known_safe_move(&self) -> Option<Cell> {
        self.known_safe
            .iter()
            .copied()
            .filter(|cell| !self.played.contains(cell))
            .min()
    }

    /// A uniformly random cell that is neither played nor a known mine,
    /// or `None` when the grid is exhausted.
    pub fn random_move(&mut self) -> Option<Cell> {
        let grid = self.grid;
        let candidates: Vec<Cell> = grid
            .cells()
            .filter(|cell| !self.played.contains(cell) && !self.known_mine.contains(cell))
            .collect();
        self.rng.choose(&candidates).copied()
    }

    /// Board dimensions this engine reasons about.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Cells the caller has played so far.
    #[must_use]
    pub fn played(&self) -> &FxHashSet<Cell> {
        &self.played
    }

    /// Cells proven to be mines.
    #[must_use]
    pub fn known_mines(&self) -> &FxHashSet<Cell> {
        &self.known_mine
    }

    /// Cells proven to be safe.
    #[must_use]
    pub fn known_safes(&self) -> &FxHashSet<Cell> {
        &self.known_safe
    }

    /// The current sentence collection.
    #[must_use]
    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Whether a contradiction has made this engine unusable.
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Deterministic, serializable view of the engine state for
    /// diagnostics. Sets are sorted so equal states serialize equally.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            played: self.played.iter().copied().collect(),
            known_mine: self.known_mine.iter().copied().collect(),
            known_safe: self.known_safe.iter().copied().collect(),
            knowledge: self.knowledge.clone(),
            poisoned: self.poisoned,
        }
    }
}

/// Serializable point-in-time view of a [`KnowledgeEngine`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board dimensions.
    pub grid: GridSize,
    /// Cells played so far, sorted.
    pub played: BTreeSet<Cell>,
    /// Proven mines, sorted.
    pub known_mine: BTreeSet<Cell>,
    /// Proven safe cells, sorted.
    pub known_safe: BTreeSet<Cell>,
    /// Current sentences, in collection order.
    pub knowledge: Vec<Sentence>,
    /// Whether the engine hit a contradiction.
    pub poisoned: bool,
}
