//! Deterministic random number generation for the solver.
//!
//! The engine's inference is pure deduction; the only nondeterminism in
//! the whole crate is the fallback random move and board generation, and
//! both flow through `SolverRng`. Keeping the randomness source isolated
//! here means inference stays deterministic and independently testable.
//!
//! ## Key Features
//!
//! - **Deterministic**: same seed produces an identical sequence
//! - **Forkable**: independent streams for independent game instances
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use mine_ai::core::SolverRng;
//!
//! let mut rng = SolverRng::new(42);
//!
//! // Forks produce different but deterministic sequences.
//! let mut forked = rng.fork();
//! assert_ne!(rng.gen_range_usize(0..1000), forked.gen_range_usize(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG backing `random_move` and board generation.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
#[derive(Clone, Debug)]
pub struct SolverRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl SolverRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence. Used to
    /// give a board and its engine (or parallel game instances) separate
    /// streams from one master seed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random `usize` in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a uniformly random element from a slice.
    ///
    /// Returns `None` if the slice is empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> SolverRngState {
        SolverRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &SolverRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
    /// Fork counter for deterministic branching.
    pub fork_counter: u64,
}
