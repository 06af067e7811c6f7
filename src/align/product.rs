//! Shortest-path search over the synchronous product of two nets.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use crate::align::AlignError;
use crate::petri::{Marking, PetriNet, Transition};

/// Default cap on Dijkstra expansions before the search gives up; a
/// pathological product fails loudly instead of exhausting memory.
pub const DEFAULT_STATE_CAP: usize = 1_000_000;

/// Cost of firing one transition alone: unit for a labelled move, free for a
/// silent one.
fn move_cost(transition: &Transition) -> u64 {
    u64::from(transition.label.is_some())
}

/// Minimal alignment cost between two nets.
///
/// Dijkstra over pairs of markings. Successors of a state are:
/// moves on `a` alone, moves on `b` alone (unit cost each, silent moves
/// free), and synchronous moves firing equally-labelled transitions in both
/// nets at once (free). The result is the cheapest way to drive both nets
/// from their initial to their final markings.
pub fn align_cost(
    a: &PetriNet,
    a_initial: &Marking,
    a_final: &Marking,
    b: &PetriNet,
    b_initial: &Marking,
    b_final: &Marking,
) -> Result<u64, AlignError> {
    align_cost_capped(a, a_initial, a_final, b, b_initial, b_final, DEFAULT_STATE_CAP)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn align_cost_capped(
    a: &PetriNet,
    a_initial: &Marking,
    a_final: &Marking,
    b: &PetriNet,
    b_initial: &Marking,
    b_final: &Marking,
    state_cap: usize,
) -> Result<u64, AlignError> {
    type State = (Marking, Marking);

    let start: State = (a_initial.clone(), b_initial.clone());
    let mut best: HashMap<State, u64> = HashMap::new();
    best.insert(start.clone(), 0);

    let mut frontier: BinaryHeap<Reverse<(u64, Marking, Marking)>> = BinaryHeap::new();
    frontier.push(Reverse((0, start.0, start.1)));

    let mut expanded = 0usize;
    while let Some(Reverse((cost, ma, mb))) = frontier.pop() {
        let state = (ma, mb);
        match best.get(&state) {
            Some(&known) if known < cost => continue, // stale entry
            _ => {}
        }
        let (ma, mb) = state;

        if &ma == a_final && &mb == b_final {
            return Ok(cost);
        }

        expanded += 1;
        if expanded > state_cap {
            return Err(AlignError::StateCapExceeded(state_cap));
        }

        let mut relax = |next_cost: u64, next_a: Marking, next_b: Marking| {
            match best.entry((next_a.clone(), next_b.clone())) {
                Entry::Occupied(mut slot) => {
                    if next_cost < *slot.get() {
                        slot.insert(next_cost);
                        frontier.push(Reverse((next_cost, next_a, next_b)));
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(next_cost);
                    frontier.push(Reverse((next_cost, next_a, next_b)));
                }
            }
        };

        for ta in a.transitions() {
            if !ma.is_enabled(ta) {
                continue;
            }
            let fired_a = ma.fire(ta);
            relax(cost + move_cost(ta), fired_a.clone(), mb.clone());

            // Synchronous moves share a visible label.
            if ta.label.is_some() {
                for tb in b.transitions() {
                    if tb.label == ta.label && mb.is_enabled(tb) {
                        relax(cost, fired_a.clone(), mb.fire(tb));
                    }
                }
            }
        }
        for tb in b.transitions() {
            if mb.is_enabled(tb) {
                relax(cost + move_cost(tb), ma.clone(), mb.fire(tb));
            }
        }
    }

    Err(AlignError::NoAlignment)
}
