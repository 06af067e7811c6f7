//! Uncertainty injection.
//!
//! Where [`crate::perturb`] corrupts what was recorded, these injectors make
//! the record ambiguous without changing it: a rate-fraction of events gains
//! a candidate-label set, a timestamp interval, or an indeterminate flag.
//! All three mutate the log in place; callers skip the call entirely when a
//! rate is zero.

use std::collections::BTreeSet;

use tracing::debug;

use crate::log::{Alphabet, EventLog, TimeWindow, Timestamp};
use crate::util::DetRng;

/// Fallback inter-event gap at trace edges, in seconds.
const EDGE_GAP_SECS: i64 = 1;

/// Makes a `rate`-fraction of events label-ambiguous.
///
/// Each selected event's candidate set becomes its recorded label plus one
/// uniformly chosen *different* label from `alphabet`. Events whose pool of
/// different labels is empty are left certain.
pub fn add_uncertain_activities(
    log: &mut EventLog,
    rate: f64,
    alphabet: &Alphabet,
    rng: &mut DetRng,
) {
    let mut annotated = 0usize;
    for trace in log.traces_mut() {
        for event in trace.events_mut() {
            if !rng.chance(rate) {
                continue;
            }
            let pool: Vec<&String> = alphabet.iter().filter(|l| *l != event.label()).collect();
            if let Some(other) = rng.choose(&pool) {
                let candidates: BTreeSet<String> = [(*other).clone()].into();
                event.set_uncertain_labels(candidates);
                annotated += 1;
            }
        }
    }
    debug!(rate, annotated, "injected uncertain activities");
}

/// Makes a `rate`-fraction of events timestamp-ambiguous.
///
/// A selected event at position `i` gains the interval
/// `[t - low * gap_prev, t + high * gap_next]`, where the gaps are the
/// distances to the neighbouring events' recorded timestamps (clamped to at
/// least one second, and one second at trace edges). Offsets are rounded up
/// so any positive factor widens the window by at least a second. The
/// orchestration calls this with `low == high`.
pub fn add_uncertain_timestamps_relative(
    log: &mut EventLog,
    rate: f64,
    low: f64,
    high: f64,
    rng: &mut DetRng,
) {
    let mut annotated = 0usize;
    for trace in log.traces_mut() {
        let times: Vec<Timestamp> = trace.events().iter().map(|e| e.timestamp()).collect();
        for (i, event) in trace.events_mut().iter_mut().enumerate() {
            if !rng.chance(rate) {
                continue;
            }
            let gap_prev = if i == 0 {
                EDGE_GAP_SECS
            } else {
                times[i - 1].secs_until(times[i]).max(EDGE_GAP_SECS)
            };
            let gap_next = if i + 1 == times.len() {
                EDGE_GAP_SECS
            } else {
                times[i].secs_until(times[i + 1]).max(EDGE_GAP_SECS)
            };
            let earliest = event.timestamp().plus_secs(-scaled(low, gap_prev));
            let latest = event.timestamp().plus_secs(scaled(high, gap_next));
            event.set_window(TimeWindow::new(earliest, latest));
            annotated += 1;
        }
    }
    debug!(rate, low, high, annotated, "injected uncertain timestamps");
}

/// Flags a `rate`-fraction of events as possibly not having occurred.
pub fn add_indeterminate_events(log: &mut EventLog, rate: f64, rng: &mut DetRng) {
    let mut annotated = 0usize;
    for trace in log.traces_mut() {
        for event in trace.events_mut() {
            if rng.chance(rate) {
                event.set_indeterminate(true);
                annotated += 1;
            }
        }
    }
    debug!(rate, annotated, "injected indeterminate events");
}

/// `factor * gap`, rounded up to whole seconds; zero only when the factor is
/// not positive.
#[allow(clippy::cast_possible_truncation)]
fn scaled(factor: f64, gap_secs: i64) -> i64 {
    if factor <= 0.0 {
        return 0;
    }
    (factor * gap_secs as f64).ceil() as i64
}
