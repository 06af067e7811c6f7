//! Events, timestamps, and uncertainty metadata.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// An absolute point in time, in whole seconds since an arbitrary epoch.
///
/// The deviation model only ever shifts timestamps by whole seconds, so an
/// integer representation keeps determinism byte-exact and comparisons
/// total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from seconds since the epoch.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Seconds since the epoch.
    #[must_use]
    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// This timestamp shifted forward (or backward, if negative) by whole
    /// seconds.
    #[must_use]
    pub const fn plus_secs(self, secs: i64) -> Self {
        Self(self.0 + secs)
    }

    /// Distance to another timestamp, in seconds.
    #[must_use]
    pub const fn secs_until(self, later: Self) -> i64 {
        later.0 - self.0
    }
}

/// An ambiguous timestamp: the event occurred somewhere in
/// `[earliest, latest]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub earliest: Timestamp,
    pub latest: Timestamp,
}

impl TimeWindow {
    /// Creates a window. `earliest` must not exceed `latest`.
    #[must_use]
    pub fn new(earliest: Timestamp, latest: Timestamp) -> Self {
        debug_assert!(earliest <= latest, "inverted time window");
        Self { earliest, latest }
    }
}

/// A single recorded event.
///
/// The activity label and timestamp are first-class fields; any further
/// attributes live in a sorted map. Uncertainty metadata is absent on clean
/// events and added by the injectors in [`crate::uncertainty`]:
///
/// - a candidate-label set when the true label is ambiguous,
/// - a time window when the true instant is ambiguous,
/// - an indeterminate flag when the event may not have occurred at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    label: String,
    timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uncertain_labels: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    window: Option<TimeWindow>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    indeterminate: bool,
}

impl Event {
    /// Creates a certain event.
    #[must_use]
    pub fn new(label: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            label: label.into(),
            timestamp,
            attributes: BTreeMap::new(),
            uncertain_labels: None,
            window: None,
            indeterminate: false,
        }
    }

    /// Adds an auxiliary attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The recorded activity label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the activity label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// The recorded timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Replaces the timestamp. Any uncertainty window is left untouched;
    /// deviation injection runs before uncertainty injection, so windows do
    /// not exist yet when timestamps are swapped.
    pub fn set_timestamp(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Auxiliary attributes.
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// The earliest instant this event may have occurred.
    #[must_use]
    pub fn min_time(&self) -> Timestamp {
        self.window.map_or(self.timestamp, |w| w.earliest)
    }

    /// The latest instant this event may have occurred.
    #[must_use]
    pub fn max_time(&self) -> Timestamp {
        self.window.map_or(self.timestamp, |w| w.latest)
    }

    /// The labels this event may carry: the candidate set when ambiguous,
    /// otherwise the recorded label alone. Sorted.
    #[must_use]
    pub fn candidate_labels(&self) -> Vec<&str> {
        match &self.uncertain_labels {
            Some(set) => set.iter().map(String::as_str).collect(),
            None => vec![self.label.as_str()],
        }
    }

    /// The candidate-label set, if the label is ambiguous.
    #[must_use]
    pub const fn uncertain_labels(&self) -> Option<&BTreeSet<String>> {
        self.uncertain_labels.as_ref()
    }

    /// Marks the label as ambiguous over `labels`. The recorded label is
    /// always included in the stored set.
    pub fn set_uncertain_labels(&mut self, mut labels: BTreeSet<String>) {
        labels.insert(self.label.clone());
        self.uncertain_labels = Some(labels);
    }

    /// The uncertainty window, if the timestamp is ambiguous.
    #[must_use]
    pub const fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    /// Marks the timestamp as ambiguous over `window`.
    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = Some(window);
    }

    /// Whether it is uncertain that this event occurred at all.
    #[must_use]
    pub const fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    /// Sets the indeterminate-occurrence flag.
    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        self.indeterminate = indeterminate;
    }
}
