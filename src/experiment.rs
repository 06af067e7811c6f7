//! Experiment drivers: uncertainty orchestration and benchmarking.
//!
//! Two experiments share the perturbation pipeline:
//!
//! - the **qualitative** experiment sweeps uncertainty rates over one model
//!   and log, and reports how the summed lower/upper alignment-cost bounds
//!   degrade;
//! - the **quantitative** experiment fixes the rates and measures the paired
//!   running time of the brute-force baseline against the optimized bound
//!   computation.
//!
//! Both mutate working copies only where documented; the qualitative driver
//! deep-copies the clean log per rate setting, the quantitative driver
//! annotates its datasets in place.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::align::alignment_bounds_log;
use crate::bench::{time_test, Dataset, TimingReport};
use crate::error::LabError;
use crate::log::EventLog;
use crate::perturb::{add_deviations, DeviationParams};
use crate::petri::{net_from_tree, Marking, PetriNet};
use crate::sim::{generate_log, ProcessTree, TreeGenConfig};
use crate::uncertainty::{
    add_indeterminate_events, add_uncertain_activities, add_uncertain_timestamps_relative,
};
use crate::util::DetRng;

/// Default injection rate for the quantitative experiment.
pub const DEFAULT_FIXED_RATE: f64 = 0.05;

/// Parameters of one qualitative sweep.
///
/// The three rate vectors are parallel arrays: index `i` describes one
/// uncertainty setting. Deviations are applied once per setting, with the
/// same probabilities across the sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualitativeParams {
    /// Ambiguous-activity rate per setting.
    pub unc_activities: Vec<f64>,
    /// Ambiguous-timestamp rate per setting; also used as the relative
    /// window half-width.
    pub unc_timestamps: Vec<f64>,
    /// Indeterminate-event rate per setting.
    pub unc_indeterminate: Vec<f64>,
    /// Deviation probabilities applied before uncertainty.
    pub deviations: DeviationParams,
}

impl QualitativeParams {
    fn validated_len(&self) -> Result<usize, LabError> {
        let (a, t, i) = (
            self.unc_activities.len(),
            self.unc_timestamps.len(),
            self.unc_indeterminate.len(),
        );
        if a == t && t == i {
            Ok(a)
        } else {
            Err(LabError::RateLengthMismatch {
                activities: a,
                timestamps: t,
                indeterminate: i,
            })
        }
    }
}

/// Summed bounds per uncertainty setting.
///
/// Both bound kinds are accumulated symmetrically: `lower_sums[i]` is the
/// sum of every trace's lower-bound cost under setting `i`, `upper_sums[i]`
/// the same for upper bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualitativeResult {
    pub lower_sums: Vec<f64>,
    pub upper_sums: Vec<f64>,
}

impl QualitativeResult {
    /// Flattens to the lower sums followed by the upper sums, one scalar per
    /// uncertainty setting each.
    #[must_use]
    pub fn into_flat(self) -> Vec<f64> {
        let mut flat = self.lower_sums;
        flat.extend(self.upper_sums);
        flat
    }
}

/// Sweeps uncertainty settings over one reference model and one clean log.
///
/// Per setting: deep-copy the clean log, inject deviations once, then apply
/// each uncertainty injector only when its rate is strictly positive (a
/// zero-rate call is skipped outright, not run as a degenerate pass), and
/// sum the per-trace bound costs. The activity alphabet is computed once
/// from the clean log, before any mutation, and shared by the perturbation
/// engine and the activity injector.
pub fn experiment_qualitative(
    net: &PetriNet,
    initial_marking: &Marking,
    final_marking: &Marking,
    log: &EventLog,
    params: &QualitativeParams,
    rng: &mut DetRng,
) -> Result<QualitativeResult, LabError> {
    let settings = params.validated_len()?;
    let alphabet = log.alphabet();
    let mut result = QualitativeResult::default();

    for i in 0..settings {
        let mut noisy = log.clone();
        add_deviations(&mut noisy, &params.deviations, &alphabet, rng);
        if params.unc_activities[i] > 0.0 {
            add_uncertain_activities(&mut noisy, params.unc_activities[i], &alphabet, rng);
        }
        if params.unc_timestamps[i] > 0.0 {
            add_uncertain_timestamps_relative(
                &mut noisy,
                params.unc_timestamps[i],
                params.unc_timestamps[i],
                params.unc_timestamps[i],
                rng,
            );
        }
        if params.unc_indeterminate[i] > 0.0 {
            add_indeterminate_events(&mut noisy, params.unc_indeterminate[i], rng);
        }

        let bounds = alignment_bounds_log(&noisy, net, initial_marking, final_marking)?;
        let lower_sum: f64 = bounds.iter().map(|(lower, _)| lower.cost).sum();
        let upper_sum: f64 = bounds.iter().map(|(_, upper)| upper.cost).sum();
        debug!(setting = i, lower_sum, upper_sum, "qualitative setting done");
        result.lower_sums.push(lower_sum);
        result.upper_sums.push(upper_sum);
    }
    Ok(result)
}

/// Annotates every dataset's log with uncertainty at fixed scalar rates (no
/// deviations at this stage), then delegates to the timing comparator.
///
/// Mutates the logs in place; the per-log alphabet is recomputed only when
/// the activity rate is positive, since only that injector needs it.
pub fn experiment_quantitative(
    datasets: &mut [Dataset],
    unc_activities: f64,
    unc_timestamps: f64,
    unc_indeterminate: f64,
    rng: &mut DetRng,
) -> Result<TimingReport, LabError> {
    for dataset in datasets.iter_mut() {
        if unc_activities > 0.0 {
            let alphabet = dataset.log.alphabet();
            add_uncertain_activities(&mut dataset.log, unc_activities, &alphabet, rng);
        }
        if unc_timestamps > 0.0 {
            add_uncertain_timestamps_relative(
                &mut dataset.log,
                unc_timestamps,
                unc_timestamps,
                unc_timestamps,
                rng,
            );
        }
        if unc_indeterminate > 0.0 {
            add_indeterminate_events(&mut dataset.log, unc_indeterminate, rng);
        }
    }
    time_test(datasets)
}

/// Top-level configuration for a self-contained benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Seed for every randomized stage of the run.
    pub seed: u64,
    /// Number of synthetic models (one dataset each).
    pub models: usize,
    /// Traces simulated per model.
    pub traces_per_model: usize,
    /// Uncertainty rate applied to all three injectors.
    pub fixed_rate: f64,
    /// Shape of the random process trees.
    pub tree: TreeGenConfig,
}

impl ExperimentConfig {
    /// Creates a configuration with the given seed and the defaults the
    /// benchmark protocol uses.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            models: 3,
            traces_per_model: 20,
            fixed_rate: DEFAULT_FIXED_RATE,
            tree: TreeGenConfig::default(),
        }
    }

    /// Sets the number of models.
    #[must_use]
    pub const fn with_models(mut self, models: usize) -> Self {
        self.models = models;
        self
    }

    /// Sets the traces simulated per model.
    #[must_use]
    pub const fn with_traces_per_model(mut self, traces: usize) -> Self {
        self.traces_per_model = traces;
        self
    }

    /// Sets the shared injection rate.
    #[must_use]
    pub const fn with_fixed_rate(mut self, rate: f64) -> Self {
        self.fixed_rate = rate;
        self
    }

    /// Creates the deterministic RNG for this configuration.
    #[must_use]
    pub const fn rng(&self) -> DetRng {
        DetRng::new(self.seed)
    }
}

/// Builds `models` synthetic datasets and runs the quantitative experiment
/// over them at the configured fixed rate.
pub fn run_experiments(config: &ExperimentConfig) -> Result<TimingReport, LabError> {
    let mut rng = config.rng();
    let mut datasets = Vec::with_capacity(config.models);
    for _ in 0..config.models {
        let tree = ProcessTree::random(&config.tree, &mut rng);
        let (net, initial_marking, final_marking) = net_from_tree(&tree);
        let log = generate_log(&tree, config.traces_per_model, &mut rng);
        datasets.push(Dataset {
            net,
            initial_marking,
            final_marking,
            log,
        });
    }
    info!(
        models = config.models,
        traces_per_model = config.traces_per_model,
        fixed_rate = config.fixed_rate,
        "running quantitative experiment"
    );
    experiment_quantitative(
        &mut datasets,
        config.fixed_rate,
        config.fixed_rate,
        config.fixed_rate,
        &mut rng,
    )
}
