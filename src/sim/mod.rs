//! Process-model synthesis: random process trees and log playout.
//!
//! Experiments run against synthetic models so that noise levels are the
//! only variable. A [`ProcessTree`] is generated from a seeded RNG, converted
//! to a Petri net by [`crate::petri::net_from_tree`], and played out into a
//! clean event log by [`generate_log`].

mod playout;
mod tree;

pub use playout::generate_log;
pub use tree::{ProcessTree, TreeGenConfig};
