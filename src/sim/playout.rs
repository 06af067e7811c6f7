//! Log simulation by playing out a process tree.

use tracing::debug;

use crate::log::{Event, EventLog, Timestamp, Trace};
use crate::sim::ProcessTree;
use crate::util::DetRng;

/// Probability of taking another redo round in a loop node.
const LOOP_CONTINUE_PROB: f64 = 0.3;

/// Hard cap on redo rounds, keeping simulated traces short enough for the
/// brute-force baseline to enumerate.
const MAX_LOOP_ROUNDS: usize = 3;

/// Simulates `trace_count` independent, identically distributed traces from
/// the tree.
///
/// Each trace's timestamps start at the epoch and advance one second per
/// event, so clean traces are strictly increasing in time.
#[must_use]
pub fn generate_log(tree: &ProcessTree, trace_count: usize, rng: &mut DetRng) -> EventLog {
    let mut log = EventLog::new();
    for _ in 0..trace_count {
        let labels = sample_word(tree, rng);
        let mut trace = Trace::new();
        for (i, label) in labels.into_iter().enumerate() {
            trace.push(Event::new(label, Timestamp::from_secs(i as i64)));
        }
        log.push(trace);
    }
    debug!(traces = log.len(), "simulated event log");
    log
}

/// Samples one activity sequence from the tree's language.
fn sample_word(tree: &ProcessTree, rng: &mut DetRng) -> Vec<String> {
    match tree {
        ProcessTree::Leaf(label) => vec![label.clone()],
        ProcessTree::Silent => Vec::new(),
        ProcessTree::Seq(children) => {
            let mut word = Vec::new();
            for child in children {
                word.extend(sample_word(child, rng));
            }
            word
        }
        ProcessTree::Xor(children) => match children.len() {
            0 => Vec::new(),
            n => sample_word(&children[rng.next_usize(n)], rng),
        },
        ProcessTree::And(children) => {
            let words: Vec<Vec<String>> = children
                .iter()
                .map(|child| sample_word(child, rng))
                .collect();
            interleave(words, rng)
        }
        ProcessTree::Loop { body, redo } => {
            let mut word = sample_word(body, rng);
            let mut rounds = 0;
            while rounds < MAX_LOOP_ROUNDS && rng.chance(LOOP_CONTINUE_PROB) {
                word.extend(sample_word(redo, rng));
                word.extend(sample_word(body, rng));
                rounds += 1;
            }
            word
        }
    }
}

/// Uniformly interleaves the words while preserving each word's own order.
fn interleave(mut words: Vec<Vec<String>>, rng: &mut DetRng) -> Vec<String> {
    let total: usize = words.iter().map(Vec::len).sum();
    let mut cursors = vec![0usize; words.len()];
    let mut out = Vec::with_capacity(total);
    while out.len() < total {
        let open: Vec<usize> = (0..words.len())
            .filter(|&w| cursors[w] < words[w].len())
            .collect();
        let w = *rng.choose(&open).expect("some word still has elements");
        out.push(std::mem::take(&mut words[w][cursors[w]]));
        cursors[w] += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TreeGenConfig;

    fn seq(labels: &[&str]) -> ProcessTree {
        ProcessTree::Seq(labels.iter().map(|l| ProcessTree::Leaf((*l).to_owned())).collect())
    }

    #[test]
    fn sequence_plays_out_in_order() {
        let tree = seq(&["a", "b", "c"]);
        let mut rng = DetRng::new(1);
        let log = generate_log(&tree, 5, &mut rng);
        for trace in log.traces() {
            let labels: Vec<_> = trace.events().iter().map(Event::label).collect();
            assert_eq!(labels, vec!["a", "b", "c"]);
            assert!(trace.is_time_ordered());
        }
    }

    #[test]
    fn xor_picks_exactly_one_branch() {
        let tree = ProcessTree::Xor(vec![
            ProcessTree::Leaf("a".to_owned()),
            ProcessTree::Leaf("b".to_owned()),
        ]);
        let mut rng = DetRng::new(2);
        let log = generate_log(&tree, 20, &mut rng);
        for trace in log.traces() {
            assert_eq!(trace.len(), 1);
            assert!(matches!(trace.events()[0].label(), "a" | "b"));
        }
    }

    #[test]
    fn and_preserves_per_branch_order() {
        let tree = ProcessTree::And(vec![seq(&["a", "b"]), seq(&["c", "d"])]);
        let mut rng = DetRng::new(3);
        let log = generate_log(&tree, 20, &mut rng);
        for trace in log.traces() {
            let labels: Vec<_> = trace.events().iter().map(Event::label).collect();
            assert_eq!(labels.len(), 4);
            let pos = |l: &str| labels.iter().position(|&x| x == l).unwrap();
            assert!(pos("a") < pos("b"));
            assert!(pos("c") < pos("d"));
        }
    }

    #[test]
    fn playout_is_deterministic() {
        let tree = ProcessTree::random(&TreeGenConfig::default(), &mut DetRng::new(5));
        let log1 = generate_log(&tree, 10, &mut DetRng::new(6));
        let log2 = generate_log(&tree, 10, &mut DetRng::new(6));
        assert_eq!(log1, log2);
    }

    #[test]
    fn timestamps_are_strictly_increasing() {
        let tree = ProcessTree::random(&TreeGenConfig::default(), &mut DetRng::new(8));
        let log = generate_log(&tree, 10, &mut DetRng::new(9));
        for trace in log.traces() {
            for pair in trace.events().windows(2) {
                assert!(pair[0].timestamp() < pair[1].timestamp());
            }
        }
    }
}
