//! Alignlab: an experiment harness for alignment-based conformance checking
//! over uncertain event data.
//!
//! The harness stresses alignment-cost bound computation by feeding it
//! synthetically perturbed event logs and measuring cost and running time of
//! a brute-force baseline against an optimized variant over the same traces.
//!
//! # Pipeline
//!
//! 1. Generate a random process tree and convert it to a Petri net
//!    ([`sim`], [`petri`]).
//! 2. Simulate a clean event log from the tree ([`sim::generate_log`]).
//! 3. Deep-copy the log, then inject deviations: wrong activity labels,
//!    adjacent timestamp swaps, duplicated events ([`perturb`]).
//! 4. Inject uncertainty: ambiguous labels, timestamp intervals,
//!    indeterminate events ([`uncertainty`]).
//! 5. Build a behavior graph and behavior net per trace ([`behavior`]).
//! 6. Compute lower/upper alignment-cost bounds against the reference net,
//!    brute-force and optimized ([`align`]).
//! 7. Aggregate costs and paired timings ([`experiment`], [`bench`]).
//!
//! # Determinism
//!
//! Every randomized stage draws from an explicit [`util::DetRng`]. A fixed
//! seed reproduces an entire experiment byte-for-byte, which is what makes
//! perturbation bugs and bound disagreements reportable.

#![forbid(unsafe_code)]

pub mod align;
pub mod behavior;
pub mod bench;
pub mod error;
pub mod experiment;
pub mod log;
pub mod perturb;
pub mod petri;
pub mod sim;
pub mod uncertainty;
pub mod util;

pub use align::{alignment_bounds_log, AlignError, BoundRecord};
pub use behavior::{BehaviorGraph, BehaviorNet};
pub use bench::{time_test, Dataset, TimingReport};
pub use error::LabError;
pub use experiment::{
    experiment_qualitative, experiment_quantitative, run_experiments, ExperimentConfig,
    QualitativeParams, QualitativeResult,
};
pub use log::{Event, EventLog, TimeWindow, Timestamp, Trace};
pub use perturb::{add_deviations, DeviationParams, ResortPolicy};
pub use petri::{net_from_tree, Marking, PetriNet};
pub use sim::{generate_log, ProcessTree, TreeGenConfig};
pub use util::DetRng;
