//! Process trees and seeded random generation.

use serde::{Deserialize, Serialize};

use crate::util::DetRng;

/// A block-structured process model.
///
/// Leaves are activities; inner nodes compose their children sequentially,
/// exclusively, concurrently, or as a do-redo loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessTree {
    /// A single activity.
    Leaf(String),
    /// An unobservable step.
    Silent,
    /// Children execute left to right.
    Seq(Vec<ProcessTree>),
    /// Exactly one child executes.
    Xor(Vec<ProcessTree>),
    /// All children execute, interleaved.
    And(Vec<ProcessTree>),
    /// `body` executes, then zero or more (`redo` then `body`) rounds.
    Loop {
        body: Box<ProcessTree>,
        redo: Box<ProcessTree>,
    },
}

impl ProcessTree {
    /// Generates a random tree.
    ///
    /// The root is always an operator node, so every generated model has at
    /// least two activities and label substitution has a non-empty pool.
    #[must_use]
    pub fn random(config: &TreeGenConfig, rng: &mut DetRng) -> Self {
        let mut next_label = 0;
        generate(config, rng, 0, &mut next_label)
    }

    /// The distinct activity labels in the tree, in traversal order.
    #[must_use]
    pub fn activities(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_activities(&mut out);
        out
    }

    fn collect_activities<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ProcessTree::Leaf(label) => {
                if !out.contains(&label.as_str()) {
                    out.push(label);
                }
            }
            ProcessTree::Silent => {}
            ProcessTree::Seq(children)
            | ProcessTree::Xor(children)
            | ProcessTree::And(children) => {
                for child in children {
                    child.collect_activities(out);
                }
            }
            ProcessTree::Loop { body, redo } => {
                body.collect_activities(out);
                redo.collect_activities(out);
            }
        }
    }
}

/// Shape parameters for random tree generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeGenConfig {
    /// Maximum nesting depth; nodes at this depth are always leaves.
    pub max_depth: usize,
    /// Minimum children per operator node.
    pub min_children: usize,
    /// Maximum children per operator node.
    pub max_children: usize,
    /// Base probability that an inner position becomes a leaf; grows with
    /// depth until it reaches 1 at `max_depth`.
    pub leaf_bias: f64,
}

impl Default for TreeGenConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            min_children: 2,
            max_children: 3,
            leaf_bias: 0.25,
        }
    }
}

fn generate(
    config: &TreeGenConfig,
    rng: &mut DetRng,
    depth: usize,
    next_label: &mut usize,
) -> ProcessTree {
    let depth_ratio = depth as f64 / config.max_depth.max(1) as f64;
    let leaf_prob = config.leaf_bias + (1.0 - config.leaf_bias) * depth_ratio;
    if depth > 0 && (depth >= config.max_depth || rng.chance(leaf_prob)) {
        let label = format!("a{next_label}");
        *next_label += 1;
        return ProcessTree::Leaf(label);
    }

    let span = config.max_children.max(config.min_children) - config.min_children + 1;
    let arity = config.min_children + rng.next_usize(span);
    let mut children = Vec::with_capacity(arity);
    for _ in 0..arity {
        children.push(generate(config, rng, depth + 1, next_label));
    }

    // Operator mix: sequences dominate, loops are rare.
    match rng.next_usize(10) {
        0..=3 => ProcessTree::Seq(children),
        4..=6 => ProcessTree::Xor(children),
        7..=8 => ProcessTree::And(children),
        _ if children.len() >= 2 => {
            let mut it = children.into_iter();
            let body = Box::new(it.next().expect("checked len"));
            let redo = Box::new(it.next().expect("checked len"));
            ProcessTree::Loop { body, redo }
        }
        _ => ProcessTree::Seq(children),
    }
}
