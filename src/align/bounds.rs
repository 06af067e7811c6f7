//! Lower/upper bound computation, brute-force and optimized.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::align::{align_cost, AlignError};
use crate::behavior::{BehaviorGraph, BehaviorNet};
use crate::log::EventLog;
use crate::petri::{Marking, PetriNet};

/// One bound for one trace. `cost` is the minimal (lower bound) or maximal
/// (upper bound) alignment cost over the trace's realizations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundRecord {
    pub cost: f64,
}

impl BoundRecord {
    fn from_cost(cost: u64) -> Self {
        Self { cost: cost as f64 }
    }
}

/// Builds the linear trace net of one realization: a place-transition chain
/// firing the word's labels in order.
#[must_use]
pub fn linear_trace_net(word: &[String]) -> (PetriNet, Marking, Marking) {
    let mut net = PetriNet::new();
    let first = net.add_place();
    let mut current = first;
    for label in word {
        let next = net.add_place();
        net.add_transition(Some(label.clone()), vec![current], vec![next]);
        current = next;
    }
    let initial = net.marking(&[first]);
    let final_marking = net.marking(&[current]);
    (net, initial, final_marking)
}

/// Enumerates the realizations of an acyclic net: every distinct sequence of
/// visible labels along a complete firing sequence from `initial` to
/// `final_marking`.
///
/// Deliberately exhaustive; the running time is exponential in the amount of
/// concurrency and uncertainty, which is the whole point of the brute-force
/// baseline.
#[must_use]
pub fn realizations(
    net: &PetriNet,
    initial: &Marking,
    final_marking: &Marking,
) -> BTreeSet<Vec<String>> {
    let mut words = BTreeSet::new();
    let mut prefix = Vec::new();
    walk(net, initial.clone(), final_marking, &mut prefix, &mut words);
    words
}

fn walk(
    net: &PetriNet,
    marking: Marking,
    final_marking: &Marking,
    prefix: &mut Vec<String>,
    words: &mut BTreeSet<Vec<String>>,
) {
    if &marking == final_marking {
        words.insert(prefix.clone());
    }
    for transition in net.transitions() {
        if !marking.is_enabled(transition) {
            continue;
        }
        let next = marking.fire(transition);
        match &transition.label {
            Some(label) => {
                prefix.push(label.clone());
                walk(net, next, final_marking, prefix, words);
                prefix.pop();
            }
            None => walk(net, next, final_marking, prefix, words),
        }
    }
}

/// Brute-force lower bound: aligns every realization separately and keeps
/// the cheapest.
pub fn alignment_lower_bound_bruteforce(
    behavior_net: &PetriNet,
    bn_initial: &Marking,
    bn_final: &Marking,
    net: &PetriNet,
    initial: &Marking,
    final_marking: &Marking,
) -> Result<BoundRecord, AlignError> {
    bruteforce_bound(behavior_net, bn_initial, bn_final, net, initial, final_marking, u64::min)
}

/// Brute-force upper bound: aligns every realization separately and keeps
/// the most expensive.
pub fn alignment_upper_bound_bruteforce(
    behavior_net: &PetriNet,
    bn_initial: &Marking,
    bn_final: &Marking,
    net: &PetriNet,
    initial: &Marking,
    final_marking: &Marking,
) -> Result<BoundRecord, AlignError> {
    bruteforce_bound(behavior_net, bn_initial, bn_final, net, initial, final_marking, u64::max)
}

#[allow(clippy::too_many_arguments)]
fn bruteforce_bound(
    behavior_net: &PetriNet,
    bn_initial: &Marking,
    bn_final: &Marking,
    net: &PetriNet,
    initial: &Marking,
    final_marking: &Marking,
    pick: fn(u64, u64) -> u64,
) -> Result<BoundRecord, AlignError> {
    let words = realizations(behavior_net, bn_initial, bn_final);
    trace!(realizations = words.len(), "brute-force bound enumeration");
    let mut bound: Option<u64> = None;
    for word in &words {
        let (trace_net, t_initial, t_final) = linear_trace_net(word);
        let cost = align_cost(&trace_net, &t_initial, &t_final, net, initial, final_marking)?;
        bound = Some(bound.map_or(cost, |b| pick(b, cost)));
    }
    bound.map(BoundRecord::from_cost).ok_or(AlignError::NoRealization)
}

/// Optimized lower bound: one product search over the behavior net itself.
/// Computes the same quantity as [`alignment_lower_bound_bruteforce`].
pub fn alignment_lower_bound(
    behavior_net: &PetriNet,
    bn_initial: &Marking,
    bn_final: &Marking,
    net: &PetriNet,
    initial: &Marking,
    final_marking: &Marking,
) -> Result<BoundRecord, AlignError> {
    align_cost(behavior_net, bn_initial, bn_final, net, initial, final_marking)
        .map(BoundRecord::from_cost)
}

/// Per-trace bound pairs for a whole log: (optimized lower bound,
/// brute-force upper bound), each trace measured against the same reference
/// net. The log is read-only here.
pub fn alignment_bounds_log(
    log: &EventLog,
    net: &PetriNet,
    initial: &Marking,
    final_marking: &Marking,
) -> Result<Vec<(BoundRecord, BoundRecord)>, AlignError> {
    let mut results = Vec::with_capacity(log.len());
    for trace in log.traces() {
        let bn = BehaviorNet::new(&BehaviorGraph::new(trace));
        let lower = alignment_lower_bound(
            bn.net(),
            bn.initial_marking(),
            bn.final_marking(),
            net,
            initial,
            final_marking,
        )?;
        let upper = alignment_upper_bound_bruteforce(
            bn.net(),
            bn.initial_marking(),
            bn.final_marking(),
            net,
            initial,
            final_marking,
        )?;
        results.push((lower, upper));
    }
    Ok(results)
}
