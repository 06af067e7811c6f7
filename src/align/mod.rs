//! Alignment-cost bounds over uncertain traces.
//!
//! An alignment explains a trace against a process model through synchronous
//! moves (free), silent moves (free), and log-only or model-only moves (unit
//! cost each). Under uncertainty a trace stands for a *set* of realizations,
//! so conformance is bounded from below (best case over all realizations)
//! and above (worst case).
//!
//! Two interchangeable ways to get the lower bound:
//!
//! - [`alignment_lower_bound_bruteforce`] enumerates every realization,
//!   aligns each one as a linear trace net, and keeps the minimum;
//! - [`alignment_lower_bound`] runs a single shortest-path search over the
//!   product of the behavior net and the model, which explores all
//!   realizations at once.
//!
//! Both compute the same quantity; they differ (wildly) in running time,
//! which is exactly what the benchmark in [`crate::bench`] measures.

mod bounds;
mod product;

pub use bounds::{
    alignment_bounds_log, alignment_lower_bound, alignment_lower_bound_bruteforce,
    alignment_upper_bound_bruteforce, linear_trace_net, realizations, BoundRecord,
};
pub use product::{align_cost, DEFAULT_STATE_CAP};

use thiserror::Error;

/// Errors from bound computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// The product search expanded more states than the cap allows.
    #[error("alignment search exceeded the state cap of {0} expansions")]
    StateCapExceeded(usize),

    /// No interleaving of moves reaches both final markings.
    #[error("no alignment reaches the final markings")]
    NoAlignment,

    /// The behavior net admits no complete firing sequence.
    #[error("behavior net admits no realization")]
    NoRealization,
}
