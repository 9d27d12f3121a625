//! Property-Based Tests for Verdict Derivation and History Bounds
//!
//! These tests verify invariants that should hold regardless of input: the
//! verdict/confidence relationship for any normalized score pair, and the
//! capacity/ordering guarantees of the analysis history, including under
//! concurrent recording.

use proptest::prelude::*;

use deepguard_core::analysis::round_pct;
use deepguard_core::{AnalysisHistory, AnalysisResult, MAX_HISTORY, ScorePair, Verdict};

// Strategy for generating a normalized score pair (real + fake == 1).
fn score_pair_strategy() -> impl Strategy<Value = ScorePair> {
    (0.0f64..=1.0).prop_map(|real| ScorePair {
        real,
        fake: 1.0 - real,
    })
}

proptest! {
    /// Property: the verdict is FAKE iff fake > real; ties go to REAL.
    #[test]
    fn prop_verdict_follows_the_winning_score(pair in score_pair_strategy()) {
        let result = AnalysisResult::from_scores("probe.png", pair);
        if pair.fake > pair.real {
            prop_assert_eq!(result.verdict, Verdict::Fake);
        } else {
            prop_assert_eq!(result.verdict, Verdict::Real);
        }
    }

    /// Property: confidence equals round(max(real, fake) * 100, 2), and both
    /// reported per-label scores are independently rounded from their own
    /// probability.
    #[test]
    fn prop_confidence_is_rounded_winning_probability(pair in score_pair_strategy()) {
        let result = AnalysisResult::from_scores("probe.png", pair);

        prop_assert_eq!(result.confidence, round_pct(pair.real.max(pair.fake)));
        prop_assert_eq!(result.scores[0].score, round_pct(pair.real));
        prop_assert_eq!(result.scores[1].score, round_pct(pair.fake));
        prop_assert!((0.0..=100.0).contains(&result.confidence));
    }

    /// Property: the history never exceeds capacity and always returns the
    /// most recent insertions, newest first.
    #[test]
    fn prop_history_is_bounded_and_ordered(count in 0usize..50) {
        let history = AnalysisHistory::new();
        for i in 0..count {
            let result = AnalysisResult::from_scores(
                format!("r{i}"),
                ScorePair { real: 0.6, fake: 0.4 },
            );
            history.record(result).unwrap();
        }

        let entries = history.list().unwrap();
        prop_assert_eq!(entries.len(), count.min(MAX_HISTORY));

        // Newest first: entry k is insertion count-1-k.
        for (k, entry) in entries.iter().enumerate() {
            let expected = format!("r{}", count - 1 - k);
            prop_assert_eq!(entry.source_name.as_str(), expected.as_str());
        }
    }
}

/// Concurrent `record` calls must never corrupt the store: the capacity
/// invariant holds and every surviving entry is one of the recorded results
/// with no duplicates.
#[test]
fn concurrent_records_never_tear_the_store() {
    let history = AnalysisHistory::new();
    let threads = 8;
    let per_thread = 10;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let history = history.clone();
            std::thread::spawn(move || {
                for i in 0..per_thread {
                    let result = AnalysisResult::from_scores(
                        format!("t{t}-{i}"),
                        ScorePair { real: 0.7, fake: 0.3 },
                    );
                    history.record(result).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let entries = history.list().unwrap();
    assert_eq!(entries.len(), MAX_HISTORY);

    let mut ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), MAX_HISTORY, "duplicate entries after concurrent records");
}

/// A `clear` racing with `record`s must leave the store in a well-defined
/// state: only entries recorded after the clear can survive, and the bound
/// still holds.
#[test]
fn clear_racing_a_record_leaves_a_consistent_store() {
    let history = AnalysisHistory::new();

    let writer = {
        let history = history.clone();
        std::thread::spawn(move || {
            for i in 0..100 {
                let result = AnalysisResult::from_scores(
                    format!("w{i}"),
                    ScorePair { real: 0.8, fake: 0.2 },
                );
                history.record(result).unwrap();
            }
        })
    };

    for _ in 0..20 {
        history.clear().unwrap();
    }
    writer.join().unwrap();

    assert!(history.len().unwrap() <= MAX_HISTORY);
}
