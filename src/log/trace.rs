//! Traces: ordered sequences of events.

use serde::{Deserialize, Serialize};

use super::Event;

/// An ordered sequence of events.
///
/// Before perturbation, traces carry non-decreasing timestamps. Timestamp
/// swaps may leave a trace out of order; whether it is re-sorted afterwards
/// is a caller decision (see [`crate::perturb::ResortPolicy`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    events: Vec<Event>,
}

impl Trace {
    /// Creates an empty trace.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Creates a trace from events.
    #[must_use]
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trace has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Read access to the events.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Mutable access to the events, for in-place perturbation.
    pub fn events_mut(&mut self) -> &mut Vec<Event> {
        &mut self.events
    }

    /// Re-sorts events in place by recorded timestamp.
    ///
    /// The sort is stable, so events sharing a timestamp keep their relative
    /// order.
    pub fn sort_by_timestamp(&mut self) {
        self.events.sort_by_key(Event::timestamp);
    }

    /// Whether timestamps are non-decreasing.
    #[must_use]
    pub fn is_time_ordered(&self) -> bool {
        self.events
            .windows(2)
            .all(|w| w[0].timestamp() <= w[1].timestamp())
    }
}
