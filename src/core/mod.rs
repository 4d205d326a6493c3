//! Core types: grid geometry and deterministic RNG.
//!
//! This module contains the building blocks shared by the knowledge
//! engine and the board collaborator. Nothing here knows about mines
//! or sentences; it is coordinates and randomness only.

pub mod cell;
pub mod rng;

pub use cell::{Cell, GridSize, Neighbors};
pub use rng::{SolverRng, SolverRngState};
