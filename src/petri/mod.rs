//! Petri nets and markings.
//!
//! The reference process model, the per-realization trace nets, and the
//! behavior nets all share this representation: places are plain indices,
//! transitions carry an optional label (`None` is a silent step), and a
//! [`Marking`] is a token-count vector indexed by place.

mod tree_conv;

pub use tree_conv::net_from_tree;

use serde::{Deserialize, Serialize};

/// A labelled transition with its preset and postset places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Activity label; `None` for silent transitions.
    pub label: Option<String>,
    /// Places consumed from when firing.
    pub pre: Vec<usize>,
    /// Places produced into when firing.
    pub post: Vec<usize>,
}

/// A labelled Petri net.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetriNet {
    place_count: usize,
    transitions: Vec<Transition>,
}

impl PetriNet {
    /// Creates an empty net.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            place_count: 0,
            transitions: Vec::new(),
        }
    }

    /// Adds a place and returns its index.
    pub fn add_place(&mut self) -> usize {
        let place = self.place_count;
        self.place_count += 1;
        place
    }

    /// Adds a transition and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if a preset or postset place does not exist.
    pub fn add_transition(
        &mut self,
        label: Option<String>,
        pre: Vec<usize>,
        post: Vec<usize>,
    ) -> usize {
        assert!(
            pre.iter().chain(&post).all(|&p| p < self.place_count),
            "transition references an unknown place"
        );
        self.transitions.push(Transition { label, pre, post });
        self.transitions.len() - 1
    }

    /// Number of places.
    #[must_use]
    pub const fn place_count(&self) -> usize {
        self.place_count
    }

    /// The transitions.
    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// An empty marking sized for this net.
    #[must_use]
    pub fn empty_marking(&self) -> Marking {
        Marking(vec![0; self.place_count])
    }

    /// A marking with one token in each listed place.
    #[must_use]
    pub fn marking(&self, tokens: &[usize]) -> Marking {
        let mut marking = self.empty_marking();
        for &place in tokens {
            marking.0[place] += 1;
        }
        marking
    }
}

/// A token distribution over the places of one net.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Marking(Vec<u8>);

impl Marking {
    /// Whether the transition can fire: every preset place holds at least
    /// as many tokens as the preset mentions it.
    #[must_use]
    pub fn is_enabled(&self, transition: &Transition) -> bool {
        let mut needed = self.0.clone();
        transition.pre.iter().all(|&p| {
            if needed[p] == 0 {
                false
            } else {
                needed[p] -= 1;
                true
            }
        })
    }

    /// The marking after firing the transition.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the transition is not enabled.
    #[must_use]
    pub fn fire(&self, transition: &Transition) -> Marking {
        debug_assert!(self.is_enabled(transition), "fired a disabled transition");
        let mut tokens = self.0.clone();
        for &p in &transition.pre {
            tokens[p] -= 1;
        }
        for &p in &transition.post {
            tokens[p] += 1;
        }
        Marking(tokens)
    }

    /// Total number of tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.0.iter().map(|&t| usize::from(t)).sum()
    }
}
