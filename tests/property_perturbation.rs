//! Property-based tests for the deviation-injection engine.
//!
//! Covers the perturbation invariants:
//!
//! # Label substitution
//! - Substituted labels stay inside the pre-perturbation alphabet
//! - Substituted labels always differ from the original (pool permitting)
//! - A single-label alphabet disables substitution entirely
//!
//! # Alphabet invariance
//! - The post-perturbation alphabet is a subset of the pre-perturbation one
//!
//! # Timestamp swaps
//! - A full swap pass swaps disjoint adjacent pairs
//! - Two full swap passes are the identity
//!
//! # Duplication
//! - Appended duplicates never exceed the original trace length
//! - Every duplicate is a one-second-shifted copy of some original event
//!
//! # Determinism
//! - A fixed seed reproduces the perturbed log exactly

use proptest::prelude::*;

use alignlab::{add_deviations, DetRng, DeviationParams, Event, EventLog, Timestamp, Trace};

// ============================================================================
// Generators
// ============================================================================

const LABELS: [&str; 5] = ["a", "b", "c", "d", "e"];

fn arb_trace(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..LABELS.len(), 0..=max_len)
}

fn arb_log() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(arb_trace(8), 1..5)
}

fn build_log(shape: &[Vec<usize>]) -> EventLog {
    EventLog::from_traces(
        shape
            .iter()
            .map(|labels| {
                Trace::from_events(
                    labels
                        .iter()
                        .enumerate()
                        .map(|(i, &l)| Event::new(LABELS[l], Timestamp::from_secs(i as i64)))
                        .collect(),
                )
            })
            .collect(),
    )
}

fn prob() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

// ============================================================================
// Label substitution
// ============================================================================

proptest! {
    #[test]
    fn substitution_stays_in_alphabet_and_differs(shape in arb_log(), seed in 1u64..10_000) {
        let clean = build_log(&shape);
        let alphabet = clean.alphabet();
        prop_assume!(alphabet.len() >= 2);

        let mut noisy = clean.clone();
        let params = DeviationParams::none().with_activity(1.0);
        add_deviations(&mut noisy, &params, &alphabet, &mut DetRng::new(seed));

        for (clean_trace, noisy_trace) in clean.traces().iter().zip(noisy.traces()) {
            for (before, after) in clean_trace.events().iter().zip(noisy_trace.events()) {
                prop_assert!(alphabet.contains(after.label()));
                prop_assert_ne!(before.label(), after.label());
            }
        }
    }

    #[test]
    fn single_label_alphabet_is_a_no_op(len in 0usize..8, seed in 1u64..10_000) {
        let shape = vec![vec![0; len]];
        let clean = build_log(&shape);
        let alphabet = clean.alphabet();

        let mut noisy = clean.clone();
        let params = DeviationParams::none().with_activity(1.0);
        add_deviations(&mut noisy, &params, &alphabet, &mut DetRng::new(seed));
        prop_assert_eq!(clean, noisy);
    }

    #[test]
    fn alphabet_never_grows(shape in arb_log(), p_a in prob(), p_s in prob(), p_d in prob(), seed in 1u64..10_000) {
        let clean = build_log(&shape);
        let alphabet = clean.alphabet();

        let mut noisy = clean.clone();
        let params = DeviationParams::none()
            .with_activity(p_a)
            .with_swap(p_s)
            .with_duplicate(p_d);
        add_deviations(&mut noisy, &params, &alphabet, &mut DetRng::new(seed));
        prop_assert!(noisy.alphabet().is_subset(&alphabet));
    }
}

// ============================================================================
// Timestamp swaps
// ============================================================================

proptest! {
    #[test]
    fn double_full_swap_pass_is_identity(len in 2usize..10, seed in 1u64..10_000) {
        let shape = vec![(0..len).map(|i| i % LABELS.len()).collect::<Vec<_>>()];
        let clean = build_log(&shape);
        let alphabet = clean.alphabet();

        let mut noisy = clean.clone();
        let params = DeviationParams::none().with_swap(1.0);
        let mut rng = DetRng::new(seed);
        add_deviations(&mut noisy, &params, &alphabet, &mut rng);
        add_deviations(&mut noisy, &params, &alphabet, &mut rng);
        prop_assert_eq!(clean, noisy);
    }

    #[test]
    fn swaps_permute_timestamps(shape in arb_log(), p_s in prob(), seed in 1u64..10_000) {
        let clean = build_log(&shape);
        let alphabet = clean.alphabet();

        let mut noisy = clean.clone();
        let params = DeviationParams::none().with_swap(p_s);
        add_deviations(&mut noisy, &params, &alphabet, &mut DetRng::new(seed));

        for (clean_trace, noisy_trace) in clean.traces().iter().zip(noisy.traces()) {
            let mut before: Vec<i64> =
                clean_trace.events().iter().map(|e| e.timestamp().as_secs()).collect();
            let mut after: Vec<i64> =
                noisy_trace.events().iter().map(|e| e.timestamp().as_secs()).collect();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }
    }
}

// ============================================================================
// Duplication
// ============================================================================

proptest! {
    #[test]
    fn duplicates_are_bounded_and_shifted(shape in arb_log(), p_d in prob(), seed in 1u64..10_000) {
        let clean = build_log(&shape);
        let alphabet = clean.alphabet();

        let mut noisy = clean.clone();
        let params = DeviationParams::none().with_duplicate(p_d);
        add_deviations(&mut noisy, &params, &alphabet, &mut DetRng::new(seed));

        for (clean_trace, noisy_trace) in clean.traces().iter().zip(noisy.traces()) {
            let original_len = clean_trace.len();
            let appended = &noisy_trace.events()[original_len..];
            prop_assert!(appended.len() <= original_len);

            // Originals are untouched.
            prop_assert_eq!(clean_trace.events(), &noisy_trace.events()[..original_len]);

            for duplicate in appended {
                let has_source = clean_trace.events().iter().any(|source| {
                    source.label() == duplicate.label()
                        && source.timestamp().plus_secs(1) == duplicate.timestamp()
                });
                prop_assert!(has_source, "duplicate without a one-second-shifted source");
            }
        }
    }
}

// ============================================================================
// Determinism
// ============================================================================

proptest! {
    #[test]
    fn fixed_seed_is_reproducible(shape in arb_log(), p_a in prob(), p_s in prob(), p_d in prob(), seed in 1u64..10_000) {
        let clean = build_log(&shape);
        let alphabet = clean.alphabet();
        let params = DeviationParams::none()
            .with_activity(p_a)
            .with_swap(p_s)
            .with_duplicate(p_d);

        let mut first = clean.clone();
        add_deviations(&mut first, &params, &alphabet, &mut DetRng::new(seed));
        let mut second = clean.clone();
        add_deviations(&mut second, &params, &alphabet, &mut DetRng::new(seed));
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Scenario cases
// ============================================================================

#[test]
fn full_substitution_scenario() {
    // [(A, t0), (B, t1), (C, t2)] with p_a = 1 over alphabet {A, B, C}:
    // every label changes and stays within the alphabet.
    let clean = build_log(&[vec![0, 1, 2]]);
    let alphabet = clean.alphabet();
    let mut noisy = clean.clone();
    let params = DeviationParams::none().with_activity(1.0);
    add_deviations(&mut noisy, &params, &alphabet, &mut DetRng::new(7));

    for (before, after) in clean.traces()[0]
        .events()
        .iter()
        .zip(noisy.traces()[0].events())
    {
        assert_ne!(before.label(), after.label());
        assert!(alphabet.contains(after.label()));
    }
}

#[test]
fn full_swap_scenario() {
    // [(A, t0), (B, t1), (C, t2)] with p_s = 1: the pair (0, 1) swaps and
    // the pass advances past the swapped pair, leaving t2 in place.
    let clean = build_log(&[vec![0, 1, 2]]);
    let alphabet = clean.alphabet();
    let mut noisy = clean.clone();
    let params = DeviationParams::none().with_swap(1.0);
    add_deviations(&mut noisy, &params, &alphabet, &mut DetRng::new(8));

    let times: Vec<i64> = noisy.traces()[0]
        .events()
        .iter()
        .map(|e| e.timestamp().as_secs())
        .collect();
    assert_eq!(times, vec![1, 0, 2]);
}
