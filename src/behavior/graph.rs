//! Behavior graphs: partial orders over uncertain events.

use std::collections::BTreeSet;

use crate::log::{Timestamp, Trace};

/// One event of the trace, reduced to what alignment needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BehaviorNode {
    /// The labels this event may carry (singleton when certain).
    pub labels: BTreeSet<String>,
    /// Whether the event may not have occurred at all.
    pub indeterminate: bool,
    /// Earliest possible instant.
    pub min_time: Timestamp,
    /// Latest possible instant.
    pub max_time: Timestamp,
}

/// The partial order of certain precedence between a trace's events,
/// stored as its transitive reduction.
///
/// `u` precedes `v` exactly when `u.max_time < v.min_time`: for certain
/// timestamps this is the usual strict order, while overlapping uncertainty
/// windows (or equal timestamps, as duplicates can produce) leave the pair
/// unordered and therefore concurrent in the net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorGraph {
    nodes: Vec<BehaviorNode>,
    edges: Vec<(usize, usize)>,
}

impl BehaviorGraph {
    /// Builds the graph for one trace.
    ///
    /// Nodes are ordered by earliest possible instant (ties broken by trace
    /// position) so the construction is deterministic even on unsorted
    /// traces.
    #[must_use]
    pub fn new(trace: &Trace) -> Self {
        let mut order: Vec<usize> = (0..trace.len()).collect();
        order.sort_by_key(|&i| (trace.events()[i].min_time(), i));

        let nodes: Vec<BehaviorNode> = order
            .iter()
            .map(|&i| {
                let event = &trace.events()[i];
                BehaviorNode {
                    labels: event
                        .candidate_labels()
                        .into_iter()
                        .map(str::to_owned)
                        .collect(),
                    indeterminate: event.is_indeterminate(),
                    min_time: event.min_time(),
                    max_time: event.max_time(),
                }
            })
            .collect();

        let n = nodes.len();
        let precedes = |i: usize, j: usize| nodes[i].max_time < nodes[j].min_time;

        // Transitive reduction: keep i -> j only when no k lies strictly
        // between them.
        let mut edges = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if !precedes(i, j) {
                    continue;
                }
                let shortcut = (0..n).any(|k| precedes(i, k) && precedes(k, j));
                if !shortcut {
                    edges.push((i, j));
                }
            }
        }

        Self { nodes, edges }
    }

    /// Number of events in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Edges of the transitive reduction.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub(crate) fn nodes(&self) -> &[BehaviorNode] {
        &self.nodes
    }
}
