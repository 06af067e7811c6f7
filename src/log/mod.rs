//! Event log data model.
//!
//! An [`EventLog`] is a sequence of [`Trace`]s; a trace is an ordered
//! sequence of [`Event`]s carrying an activity label and a timestamp, plus
//! optional uncertainty metadata. The model is deliberately value-based:
//! `Clone` is the deep copy the experiment drivers take before mutating a
//! log in place.

mod event;
mod trace;

pub use event::{Event, TimeWindow, Timestamp};
pub use trace::Trace;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The set of distinct activity labels observed in a log.
///
/// Kept sorted so that uniform draws from it are deterministic.
pub type Alphabet = BTreeSet<String>;

/// A set of traces. Ordering at the log level carries no meaning; each
/// trace's internal ordering does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    traces: Vec<Trace>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { traces: Vec::new() }
    }

    /// Creates a log from traces.
    #[must_use]
    pub fn from_traces(traces: Vec<Trace>) -> Self {
        Self { traces }
    }

    /// Appends a trace.
    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    /// Number of traces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Whether the log has no traces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Read access to the traces.
    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Mutable access to the traces, for in-place perturbation.
    pub fn traces_mut(&mut self) -> &mut Vec<Trace> {
        &mut self.traces
    }

    /// Computes the activity alphabet over the entire log.
    ///
    /// Perturbation and uncertainty injection take the alphabet as an
    /// explicit argument; compute it once per log and pass it in, so the
    /// snapshot point (before or after perturbation) is a deliberate choice
    /// of the caller rather than an implicit mid-pipeline rescan.
    #[must_use]
    pub fn alphabet(&self) -> Alphabet {
        let mut labels = BTreeSet::new();
        for trace in &self.traces {
            for event in trace.events() {
                labels.insert(event.label().to_owned());
            }
        }
        labels
    }
}
