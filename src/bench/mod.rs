//! Paired timing of the brute-force and optimized bound computations.
//!
//! For every trace, the behavior net is built once, then both variants run
//! on that same net against the same reference model; the elapsed time of
//! each call is measured on its own. This keeps the comparison
//! apples-to-apples: any difference comes from the algorithm, not the input.
//!
//! Timing uses wall-clock [`Instant`] brackets immediately around each call.
//! Everything is single-threaded and CPU-bound, so wall time tracks CPU time
//! up to scheduler noise; running traces in parallel would invalidate this
//! and is deliberately unsupported.
//!
//! The comparator records timings only. It does not cross-check that the two
//! variants return equal costs; that correctness oracle lives in the test
//! suite, not the benchmark.

mod stats;

pub use stats::{Comparison, ComparisonConfidence, Stats, StatsError};

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::align::{alignment_lower_bound, alignment_lower_bound_bruteforce};
use crate::behavior::{BehaviorGraph, BehaviorNet};
use crate::error::LabError;
use crate::log::EventLog;
use crate::petri::{Marking, PetriNet};

/// A reference model together with a log to measure against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub net: PetriNet,
    pub initial_marking: Marking,
    pub final_marking: Marking,
    pub log: EventLog,
}

/// Aggregate timings, one entry per dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingReport {
    /// Total brute-force time per dataset.
    pub naive: Vec<Duration>,
    /// Total optimized time per dataset.
    pub improved: Vec<Duration>,
}

impl TimingReport {
    /// Paired statistics over the per-dataset totals, or `None` when the
    /// report is empty.
    #[must_use]
    pub fn comparison(&self) -> Option<Comparison> {
        let naive = Stats::from_samples(&self.naive).ok()?;
        let improved = Stats::from_samples(&self.improved).ok()?;
        Some(Comparison::compute(&naive, &improved))
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs both bound-computation variants over every trace of every dataset
/// and accumulates their running times per dataset.
pub fn time_test(datasets: &[Dataset]) -> Result<TimingReport, LabError> {
    let mut report = TimingReport::default();
    for (index, dataset) in datasets.iter().enumerate() {
        if dataset.log.is_empty() {
            return Err(LabError::EmptyDataset { index });
        }
        let mut naive_total = Duration::ZERO;
        let mut improved_total = Duration::ZERO;

        for trace in dataset.log.traces() {
            let bn = BehaviorNet::new(&BehaviorGraph::new(trace));

            let started = Instant::now();
            alignment_lower_bound_bruteforce(
                bn.net(),
                bn.initial_marking(),
                bn.final_marking(),
                &dataset.net,
                &dataset.initial_marking,
                &dataset.final_marking,
            )?;
            naive_total += started.elapsed();

            let started = Instant::now();
            alignment_lower_bound(
                bn.net(),
                bn.initial_marking(),
                bn.final_marking(),
                &dataset.net,
                &dataset.initial_marking,
                &dataset.final_marking,
            )?;
            improved_total += started.elapsed();
        }

        info!(
            dataset = index,
            naive_us = naive_total.as_micros() as u64,
            improved_us = improved_total.as_micros() as u64,
            "timed dataset"
        );
        report.naive.push(naive_total);
        report.improved.push(improved_total);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{generate_log, ProcessTree};
    use crate::util::DetRng;

    fn small_dataset(seed: u64) -> Dataset {
        let tree = ProcessTree::Seq(vec![
            ProcessTree::Leaf("a".to_owned()),
            ProcessTree::Xor(vec![
                ProcessTree::Leaf("b".to_owned()),
                ProcessTree::Leaf("c".to_owned()),
            ]),
        ]);
        let (net, initial_marking, final_marking) = crate::petri::net_from_tree(&tree);
        let log = generate_log(&tree, 5, &mut DetRng::new(seed));
        Dataset {
            net,
            initial_marking,
            final_marking,
            log,
        }
    }

    #[test]
    fn one_timing_pair_per_dataset() {
        let datasets = vec![small_dataset(1), small_dataset(2)];
        let report = time_test(&datasets).expect("timing succeeds");
        assert_eq!(report.naive.len(), 2);
        assert_eq!(report.improved.len(), 2);
        assert!(report.comparison().is_some());
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let mut dataset = small_dataset(3);
        dataset.log = EventLog::new();
        let error = time_test(&[dataset]).expect_err("empty log must fail");
        assert!(matches!(error, LabError::EmptyDataset { index: 0 }));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = time_test(&[small_dataset(4)]).expect("timing succeeds");
        let json = report.to_json().expect("serializable");
        assert!(json.contains("naive"));
        assert!(json.contains("improved"));
    }
}
