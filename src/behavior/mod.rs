//! Trace representations for alignment under uncertainty.
//!
//! A single (possibly uncertain) trace is first turned into a
//! [`BehaviorGraph`]: a partial order over its events in which `u` precedes
//! `v` exactly when `u` certainly happened before `v`, given the timestamp
//! intervals. The graph is then compiled into a [`BehaviorNet`], a Petri net
//! whose firing sequences are precisely the trace's realizations; the
//! alignment algorithms operate on that net.

mod graph;
mod net;

pub use graph::BehaviorGraph;
pub use net::BehaviorNet;
