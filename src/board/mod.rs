//! Reference Minesweeper board for exercising the engine.
//!
//! The engine never depends on this module: it consumes only the
//! `(cell, adjacent-mine-count)` evidence feed. `Board` is the
//! collaborator that produces that feed - hidden mine placement,
//! adjacency counts, win detection - plus a driver that plays a full
//! game. Integration tests and demos live on top of it.

mod game;

pub use game::{play, Board, GameOutcome};
