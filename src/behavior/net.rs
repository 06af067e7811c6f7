//! Behavior nets: executable form of a behavior graph.

use crate::behavior::BehaviorGraph;
use crate::petri::{Marking, PetriNet};

/// A Petri net whose complete firing sequences are exactly the realizations
/// of one uncertain trace.
///
/// Construction, per node of the (transitively reduced) behavior graph:
///
/// - one place per reduced edge;
/// - nodes without predecessors consume from a dedicated initially-marked
///   place, nodes without successors produce into a dedicated finally-marked
///   place;
/// - one labelled transition per candidate label, all sharing the node's
///   preset and postset;
/// - indeterminate nodes additionally get a silent transition over the same
///   places, which realizes "the event never happened".
#[derive(Debug, Clone)]
pub struct BehaviorNet {
    net: PetriNet,
    initial_marking: Marking,
    final_marking: Marking,
}

impl BehaviorNet {
    /// Compiles a behavior graph into its net.
    #[must_use]
    pub fn new(graph: &BehaviorGraph) -> Self {
        let mut net = PetriNet::new();
        let node_count = graph.node_count();

        let mut presets: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut postsets: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for &(from, to) in graph.edges() {
            let place = net.add_place();
            postsets[from].push(place);
            presets[to].push(place);
        }

        let mut initial_places = Vec::new();
        let mut final_places = Vec::new();
        for index in 0..node_count {
            if presets[index].is_empty() {
                let place = net.add_place();
                presets[index].push(place);
                initial_places.push(place);
            }
            if postsets[index].is_empty() {
                let place = net.add_place();
                postsets[index].push(place);
                final_places.push(place);
            }
        }

        for (index, node) in graph.nodes().iter().enumerate() {
            for label in &node.labels {
                net.add_transition(
                    Some(label.clone()),
                    presets[index].clone(),
                    postsets[index].clone(),
                );
            }
            if node.indeterminate {
                net.add_transition(None, presets[index].clone(), postsets[index].clone());
            }
        }

        let initial_marking = net.marking(&initial_places);
        let final_marking = net.marking(&final_places);
        Self {
            net,
            initial_marking,
            final_marking,
        }
    }

    /// The underlying Petri net.
    #[must_use]
    pub const fn net(&self) -> &PetriNet {
        &self.net
    }

    /// Marking with one token per source place.
    #[must_use]
    pub const fn initial_marking(&self) -> &Marking {
        &self.initial_marking
    }

    /// Marking with one token per sink place.
    #[must_use]
    pub const fn final_marking(&self) -> &Marking {
        &self.final_marking
    }
}
