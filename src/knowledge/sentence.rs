//! Logical sentences about the board.
//!
//! A `Sentence` states "exactly `count` of these cells are mines". It is
//! the unit the knowledge base reasons over: evidence arrives as a
//! sentence, subset resolution derives new sentences, and narrowing
//! shrinks a sentence in place as cell facts become known globally.
//!
//! Cells are stored in a `BTreeSet` so every sentence has one canonical
//! sorted representation: two sentences over the same cells with the same
//! count compare (and hash) equal regardless of how they were built,
//! which is what the knowledge base's deduplication keys on.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::Cell;

use super::error::KnowledgeError;

/// A constraint "exactly `count` of `cells` are mines".
///
/// Invariants, enforced at construction and on every narrowing step:
/// `count <= |cells|`, and an empty cell set implies `count == 0`.
/// Violating either is a [`KnowledgeError::Contradiction`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Build a sentence, validating `count <= |cells|`.
    pub fn new(
        cells: impl IntoIterator<Item = Cell>,
        count: usize,
    ) -> Result<Self, KnowledgeError> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        if count > cells.len() {
            return Err(KnowledgeError::Contradiction(format!(
                "sentence claims {count} mines among {} cells",
                cells.len()
            )));
        }
        Ok(Self { cells, count })
    }

    /// The cells this sentence constrains.
    #[must_use]
    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// The number of mines among [`Self::cells`].
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the sentence constrains no cells (and so carries no
    /// information - its count is necessarily zero).
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells certain to be mines: all of them, when every remaining cell
    /// must be a mine (`count == |cells|`) and there is at least one.
    #[must_use]
    pub fn derive_certain_mines(&self) -> BTreeSet<Cell> {
        if self.count > 0 && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Cells certain to be safe: all of them, when no mines remain to be
    /// placed among them (`count == 0`).
    #[must_use]
    pub fn derive_certain_safes(&self) -> BTreeSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Narrow the sentence given that `cell` is known to be a mine:
    /// remove it and decrement the count. No-op if the sentence does not
    /// mention `cell`.
    ///
    /// Decrementing below zero means the global state and this sentence
    /// disagree, which is a contradiction.
    pub fn narrow_as_mine(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        if self.cells.remove(&cell) {
            self.count = self.count.checked_sub(1).ok_or_else(|| {
                KnowledgeError::Contradiction(format!(
                    "marking {cell} as mine drives sentence count below zero"
                ))
            })?;
        }
        Ok(())
    }

    /// Narrow the sentence given that `cell` is known to be safe: remove
    /// it, count unchanged. No-op if the sentence does not mention `cell`.
    pub fn narrow_as_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    /// Whether this sentence's cells are a strict subset of `other`'s.
    ///
    /// Strictness matters: resolving a sentence against itself (or an
    /// equal sentence) would derive the useless empty sentence.
    #[must_use]
    pub fn is_strict_subset_of(&self, other: &Self) -> bool {
        self.cells.len() < other.cells.len() && self.cells.is_subset(&other.cells)
    }

    /// Subset resolution: given that `self.cells` is a strict subset of
    /// `other.cells`, the cells of `other` outside `self` contain exactly
    /// `other.count - self.count` mines.
    ///
    /// Returns a contradiction if the subtraction goes negative, or if
    /// the derived count exceeds the derived cell set.
    pub fn resolve_against(&self, superset: &Self) -> Result<Self, KnowledgeError> {
        debug_assert!(self.is_strict_subset_of(superset));
        let count = superset.count.checked_sub(self.count).ok_or_else(|| {
            KnowledgeError::Contradiction(format!(
                "resolving {self} against {superset} yields a negative count"
            ))
        })?;
        let cells = superset.cells.difference(&self.cells).copied();
        Self::new(cells, count)
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "}} = {}", self.count)
    }
}
