//! Top-level error type for experiment runs.
//!
//! Mutation passes (deviation and uncertainty injection) are infallible and
//! operate in place; errors only arise from contract violations in the
//! orchestration layer or from the alignment search itself. Any error aborts
//! the current experiment run; there are no retries.

use thiserror::Error;

use crate::align::AlignError;

/// Errors surfaced by the experiment drivers and the timing comparator.
#[derive(Debug, Error)]
pub enum LabError {
    /// The three uncertainty-rate vectors of a qualitative experiment must
    /// be parallel arrays.
    #[error("uncertainty rate vectors must have equal lengths (activities: {activities}, timestamps: {timestamps}, indeterminate: {indeterminate})")]
    RateLengthMismatch {
        activities: usize,
        timestamps: usize,
        indeterminate: usize,
    },

    /// A dataset was supplied without any trace to measure.
    #[error("dataset {index} has an empty event log")]
    EmptyDataset { index: usize },

    /// Bound computation failed for a trace.
    #[error(transparent)]
    Align(#[from] AlignError),
}
