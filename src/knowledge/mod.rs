//! The propositional knowledge base: sentences, the engine, and errors.
//!
//! Knowledge is represented as sentences of the form "exactly `count` of
//! these cells are mines". The engine accumulates sentences from
//! revealed-cell evidence and runs a subset-resolution fixpoint after
//! every mutation, so every fact it reports is a logical certainty.

pub mod engine;
pub mod error;
pub mod sentence;

pub use engine::{KnowledgeEngine, Snapshot};
pub use error::KnowledgeError;
pub use sentence::Sentence;
