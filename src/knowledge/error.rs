//! Error taxonomy for the knowledge engine.
//!
//! Two failure classes, both fail-fast:
//!
//! - `Contradiction`: the knowledge base is internally inconsistent
//!   (a sentence count went negative, or an empty sentence claims mines).
//!   Fatal - the engine's state is no longer trustworthy and every
//!   subsequent mutating call is rejected.
//! - `ContractViolation`: the caller broke a precondition (revealing the
//!   same cell twice, revealing a known mine, reusing a poisoned engine).
//!   Rejected synchronously with zero state change.
//!
//! There are no retries: inference is pure deduction over supplied facts,
//! so there is nothing to retry.

/// Failure raised by the knowledge engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KnowledgeError {
    /// The knowledge base is internally inconsistent. The engine is
    /// poisoned and must not be reused.
    Contradiction(String),
    /// A caller precondition was violated. No state was changed.
    ContractViolation(String),
}

impl std::fmt::Display for KnowledgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contradiction(msg) => write!(f, "contradiction in knowledge base: {msg}"),
            Self::ContractViolation(msg) => write!(f, "contract violation: {msg}"),
        }
    }
}

impl std::error::Error for KnowledgeError {}
