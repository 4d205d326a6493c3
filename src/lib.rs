//! # mine-ai
//!
//! A knowledge-based Minesweeper AI. Given revealed-cell evidence
//! ("this cell has N mines among its neighbors"), the engine derives
//! with logical certainty which cells are safe and which are mines, and
//! keeps combining facts until no more can be drawn.
//!
//! ## Design Principles
//!
//! 1. **Certainty only**: the engine never guesses. It reports proven
//!    facts; callers fall back to an unconstrained random choice.
//!
//! 2. **Fixpoint before return**: every mutation runs derivation to
//!    completion, so the engine is never observed mid-inference.
//!
//! 3. **Isolated randomness**: the only nondeterminism is `SolverRng`,
//!    consumed by the random-move fallback and board generation.
//!    Inference itself is deterministic and independently testable.
//!
//! 4. **Fail fast**: contradictory evidence poisons the engine; caller
//!    contract violations are rejected with zero state change.
//!
//! ## Modules
//!
//! - `core`: grid geometry (`Cell`, `GridSize`) and deterministic RNG
//! - `knowledge`: sentences, the inference engine, error taxonomy
//! - `board`: reference board collaborator and game driver for tests
//!
//! ## Example
//!
//! ```
//! use mine_ai::{Cell, GridSize, KnowledgeEngine, SolverRng};
//!
//! let mut engine = KnowledgeEngine::new(GridSize::new(3, 3), SolverRng::new(42));
//!
//! // The corner cell was revealed with zero adjacent mines.
//! engine.record_evidence(Cell::new(0, 0), 0)?;
//!
//! // All three of its neighbors are now proven safe.
//! assert_eq!(engine.known_safes().len(), 4);
//! assert_eq!(engine.known_safe_move(), Some(Cell::new(0, 1)));
//! # Ok::<(), mine_ai::KnowledgeError>(())
//! ```

pub mod board;
pub mod core;
pub mod knowledge;

// Re-export commonly used types
pub use crate::core::{Cell, GridSize, Neighbors, SolverRng, SolverRngState};

pub use crate::knowledge::{KnowledgeEngine, KnowledgeError, Sentence, Snapshot};

pub use crate::board::{play, Board, GameOutcome};
