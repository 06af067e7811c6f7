//! Statistics and comparison helpers for paired timings.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors that can occur while computing statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// No samples were provided.
    EmptySamples,
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::EmptySamples => write!(f, "no samples provided"),
        }
    }
}

impl std::error::Error for StatsError {}

/// Statistical summary of a timing vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub min: Duration,
    pub max: Duration,
    pub mean: Duration,
    pub std_dev: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub p99: Duration,
    pub sample_count: usize,
}

impl Stats {
    /// Computes statistics from samples.
    pub fn from_samples(samples: &[Duration]) -> Result<Self, StatsError> {
        if samples.is_empty() {
            return Err(StatsError::EmptySamples);
        }

        let mut sorted: Vec<u128> = samples.iter().map(Duration::as_nanos).collect();
        sorted.sort_unstable();

        let n = sorted.len();
        let sum: u128 = sorted.iter().copied().sum();
        let mean = sum / n as u128;

        let mean_f64 = mean as f64;
        let variance = sorted
            .iter()
            .map(|&value| {
                let diff = value as f64 - mean_f64;
                diff * diff
            })
            .sum::<f64>()
            / n as f64;

        Ok(Self {
            min: nanos_to_duration(sorted[0]),
            max: nanos_to_duration(sorted[n - 1]),
            mean: nanos_to_duration(mean),
            std_dev: Duration::from_nanos(f64_to_u64_saturating(variance.sqrt())),
            p50: nanos_to_duration(percentile(&sorted, 50)),
            p90: nanos_to_duration(percentile(&sorted, 90)),
            p99: nanos_to_duration(percentile(&sorted, 99)),
            sample_count: n,
        })
    }

    /// Coefficient of variation (std_dev / mean).
    #[must_use]
    pub fn cv(&self) -> f64 {
        let mean = self.mean.as_nanos() as f64;
        if mean == 0.0 {
            return 0.0;
        }
        self.std_dev.as_nanos() as f64 / mean
    }
}

/// Paired comparison of the naive and improved timing vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub naive: Stats,
    pub improved: Stats,
    /// Mean naive time divided by mean improved time; above 1 means the
    /// improved variant is faster.
    pub speedup: f64,
    pub confidence: ComparisonConfidence,
}

/// How trustworthy a speedup figure is, given the variance of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonConfidence {
    /// Clear difference, low variance.
    High,
    /// Likely difference, some variance.
    Medium,
    /// Too close to call.
    Low,
    /// High variance, unreliable.
    Uncertain,
}

impl Comparison {
    /// Computes a comparison between the naive and improved summaries.
    #[must_use]
    pub fn compute(naive: &Stats, improved: &Stats) -> Self {
        let naive_mean = naive.mean.as_nanos() as f64;
        let improved_mean = improved.mean.as_nanos() as f64;
        let speedup = if improved_mean == 0.0 {
            f64::INFINITY
        } else {
            naive_mean / improved_mean
        };

        let avg_cv = (naive.cv() + improved.cv()) / 2.0;
        let diff_pct = (speedup - 1.0).abs();

        let confidence = if avg_cv > 0.5 {
            ComparisonConfidence::Uncertain
        } else if diff_pct < 0.05 {
            ComparisonConfidence::Low
        } else if avg_cv > 0.2 {
            ComparisonConfidence::Medium
        } else {
            ComparisonConfidence::High
        };

        Self {
            naive: naive.clone(),
            improved: improved.clone(),
            speedup,
            confidence,
        }
    }
}

fn percentile(sorted: &[u128], pct: usize) -> u128 {
    let idx = (sorted.len().saturating_sub(1) * pct) / 100;
    sorted[idx]
}

fn nanos_to_duration(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

fn f64_to_u64_saturating(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    if value >= u64::MAX as f64 {
        return u64::MAX;
    }
    value.round() as u64
}
