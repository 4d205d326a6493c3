//! Scenario tests for the knowledge engine's public contract.

use mine_ai::{Cell, GridSize, KnowledgeEngine, KnowledgeError, SolverRng};

fn engine(height: usize, width: usize) -> KnowledgeEngine {
    KnowledgeEngine::new(GridSize::new(height, width), SolverRng::new(42))
}

// =============================================================================
// Evidence Ingestion
// =============================================================================

#[test]
fn test_zero_count_reveal_proves_all_neighbors_safe() {
    let mut ai = engine(3, 3);
    ai.record_evidence(Cell::new(0, 0), 0).unwrap();

    assert!(ai.played().contains(&Cell::new(0, 0)));
    assert!(ai.known_safes().contains(&Cell::new(0, 0)));
    for cell in [Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)] {
        assert!(ai.known_safes().contains(&cell), "{cell} should be safe");
    }
    assert!(ai.known_mines().is_empty());
    // A zero-count sentence resolves immediately; nothing should linger.
    assert!(ai.knowledge().is_empty());
}

#[test]
fn test_saturated_count_proves_remaining_neighbors_mines() {
    let mut ai = engine(3, 3);
    // Establish that the whole bottom-left block is safe.
    ai.record_evidence(Cell::new(2, 1), 0).unwrap();

    // (1, 1) now has exactly 3 unresolved neighbors: the top row.
    // A count of 3 proves all of them mines.
    ai.record_evidence(Cell::new(1, 1), 3).unwrap();
    for cell in [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)] {
        assert!(ai.known_mines().contains(&cell), "{cell} should be a mine");
    }
}

#[test]
fn test_evidence_for_cell_already_known_safe_is_accepted() {
    let mut ai = engine(3, 3);
    ai.record_evidence(Cell::new(0, 0), 0).unwrap();
    // (0, 1) is known safe but unplayed; revealing it is the normal path.
    assert!(ai.known_safes().contains(&Cell::new(0, 1)));
    ai.record_evidence(Cell::new(0, 1), 0).unwrap();
    assert!(ai.played().contains(&Cell::new(0, 1)));
}

// =============================================================================
// Subset Resolution
// =============================================================================

#[test]
fn test_one_two_pattern_resolves_both_mines() {
    // The classic 1-2 pattern on a 2x5 strip with mines at (1,0), (1,2):
    //   revealing the top row left-to-right pins both mines and clears
    //   the rest of the bottom row.
    let mut ai = engine(2, 5);
    ai.record_evidence(Cell::new(0, 1), 2).unwrap();
    ai.record_evidence(Cell::new(0, 0), 1).unwrap();
    ai.record_evidence(Cell::new(0, 2), 1).unwrap();
    ai.record_evidence(Cell::new(0, 3), 1).unwrap();
    ai.record_evidence(Cell::new(0, 4), 0).unwrap();

    assert!(ai.known_mines().contains(&Cell::new(1, 0)));
    assert!(ai.known_mines().contains(&Cell::new(1, 2)));
    assert!(ai.known_safes().contains(&Cell::new(1, 1)));
    assert!(ai.known_safes().contains(&Cell::new(1, 3)));
    assert!(ai.known_safes().contains(&Cell::new(1, 4)));
}

#[test]
fn test_derived_facts_update_every_mentioning_sentence() {
    let mut ai = engine(2, 4);
    ai.record_evidence(Cell::new(0, 1), 2).unwrap();
    ai.record_evidence(Cell::new(0, 0), 1).unwrap();
    ai.record_evidence(Cell::new(0, 2), 1).unwrap();

    // Once the fixpoint settles, no sentence may mention a resolved cell
    // and every sentence must still be internally consistent.
    for sentence in ai.knowledge() {
        assert!(sentence.count() <= sentence.cells().len());
        for cell in sentence.cells() {
            assert!(!ai.known_mines().contains(cell));
            assert!(!ai.known_safes().contains(cell));
        }
    }
}

#[test]
fn test_no_duplicate_sentences_after_fixpoint() {
    let mut ai = engine(3, 4);
    ai.record_evidence(Cell::new(0, 0), 1).unwrap();
    ai.record_evidence(Cell::new(0, 2), 1).unwrap();
    ai.record_evidence(Cell::new(2, 1), 1).unwrap();

    let sentences = ai.knowledge();
    for (i, a) in sentences.iter().enumerate() {
        for b in &sentences[i + 1..] {
            assert_ne!(a, b, "duplicate sentence survived the fixpoint");
        }
    }
}

// =============================================================================
// Contract Violations (zero state change)
// =============================================================================

#[test]
fn test_replaying_a_cell_is_rejected_without_state_change() {
    let mut ai = engine(3, 3);
    ai.record_evidence(Cell::new(0, 0), 1).unwrap();
    ai.record_evidence(Cell::new(2, 2), 1).unwrap();
    let before = ai.snapshot();

    let err = ai.record_evidence(Cell::new(0, 0), 1).unwrap_err();
    assert!(matches!(err, KnowledgeError::ContractViolation(_)));
    assert_eq!(ai.snapshot(), before, "rejected call must not mutate");
    assert!(!ai.is_poisoned());
}

#[test]
fn test_revealing_a_proven_mine_is_rejected() {
    let mut ai = engine(2, 2);
    ai.record_evidence(Cell::new(0, 0), 3).unwrap();
    let before = ai.snapshot();

    let err = ai.record_evidence(Cell::new(1, 1), 0).unwrap_err();
    assert!(matches!(err, KnowledgeError::ContractViolation(_)));
    assert_eq!(ai.snapshot(), before);
}

// =============================================================================
// Contradictions (poisoning)
// =============================================================================

#[test]
fn test_conflicting_evidence_raises_contradiction() {
    let mut ai = engine(1, 3);
    ai.record_evidence(Cell::new(0, 0), 1).unwrap();
    assert!(ai.known_mines().contains(&Cell::new(0, 1)));

    // (0, 2) borders only the proven mine; a count of 0 is impossible.
    let err = ai.record_evidence(Cell::new(0, 2), 0).unwrap_err();
    assert!(matches!(err, KnowledgeError::Contradiction(_)));
    assert!(ai.is_poisoned());
}

#[test]
fn test_poisoned_engine_rejects_all_further_use() {
    let mut ai = engine(1, 3);
    ai.record_evidence(Cell::new(0, 0), 1).unwrap();
    let _ = ai.record_evidence(Cell::new(0, 2), 0).unwrap_err();

    assert!(matches!(
        ai.record_evidence(Cell::new(0, 2), 1),
        Err(KnowledgeError::ContractViolation(_))
    ));
    assert!(matches!(
        ai.run_inference(),
        Err(KnowledgeError::ContractViolation(_))
    ));
}

// =============================================================================
// Move Selection
// =============================================================================

#[test]
fn test_known_safe_move_never_returns_played_or_unsafe() {
    let mut ai = engine(3, 3);
    ai.record_evidence(Cell::new(0, 0), 0).unwrap();

    while let Some(cell) = ai.known_safe_move() {
        assert!(ai.known_safes().contains(&cell));
        assert!(!ai.played().contains(&cell));
        ai.record_evidence(cell, 0).unwrap();
    }
    // A fully safe 3x3 board plays out completely through safe moves.
    assert_eq!(ai.played().len(), 9);
}

#[test]
fn test_random_move_returns_none_on_exhausted_grid() {
    let mut ai = engine(1, 2);
    ai.record_evidence(Cell::new(0, 0), 1).unwrap();
    // (0, 1) is a proven mine; (0, 0) is played. Nothing is playable.
    assert_eq!(ai.random_move(), None);
}

#[test]
fn test_random_move_is_deterministic_per_seed() {
    let grid = GridSize::new(4, 4);
    let mut ai1 = KnowledgeEngine::new(grid, SolverRng::new(7));
    let mut ai2 = KnowledgeEngine::new(grid, SolverRng::new(7));
    assert_eq!(ai1.random_move(), ai2.random_move());
    assert_eq!(ai1.random_move(), ai2.random_move());
}

// =============================================================================
// Monotonicity
// =============================================================================

#[test]
fn test_fact_sets_only_grow() {
    let mut ai = engine(3, 3);
    let reveals = [
        (Cell::new(2, 1), 0),
        (Cell::new(1, 1), 3),
        (Cell::new(1, 0), 2),
    ];

    let mut prev = ai.snapshot();
    for (cell, count) in reveals {
        ai.record_evidence(cell, count).unwrap();
        let next = ai.snapshot();
        assert!(prev.played.is_subset(&next.played));
        assert!(prev.known_mine.is_subset(&next.known_mine));
        assert!(prev.known_safe.is_subset(&next.known_safe));
        assert!(next.known_mine.is_disjoint(&next.known_safe));
        prev = next;
    }
}
