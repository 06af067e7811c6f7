//! Process-tree to Petri-net conversion.
//!
//! Compositional construction: every subtree is wired between an entry and
//! an exit place. Sequences chain through fresh places, exclusive choices
//! share entry and exit, concurrency forks and joins through silent
//! transitions, and loops route the redo child back to the body's entry.

use crate::petri::{Marking, PetriNet};
use crate::sim::ProcessTree;

/// Converts a process tree into a Petri net with its initial and final
/// marking (one token in the entry place, one in the exit place).
#[must_use]
pub fn net_from_tree(tree: &ProcessTree) -> (PetriNet, Marking, Marking) {
    let mut net = PetriNet::new();
    let entry = net.add_place();
    let exit = net.add_place();
    build(&mut net, tree, entry, exit);
    let initial = net.marking(&[entry]);
    let final_ = net.marking(&[exit]);
    (net, initial, final_)
}

fn build(net: &mut PetriNet, tree: &ProcessTree, entry: usize, exit: usize) {
    match tree {
        ProcessTree::Leaf(label) => {
            net.add_transition(Some(label.clone()), vec![entry], vec![exit]);
        }
        ProcessTree::Silent => {
            net.add_transition(None, vec![entry], vec![exit]);
        }
        ProcessTree::Seq(children) => match children.len() {
            0 => {
                net.add_transition(None, vec![entry], vec![exit]);
            }
            _ => {
                let mut from = entry;
                for child in &children[..children.len() - 1] {
                    let to = net.add_place();
                    build(net, child, from, to);
                    from = to;
                }
                build(net, children.last().expect("non-empty"), from, exit);
            }
        },
        ProcessTree::Xor(children) => {
            if children.is_empty() {
                net.add_transition(None, vec![entry], vec![exit]);
            }
            for child in children {
                build(net, child, entry, exit);
            }
        }
        ProcessTree::And(children) => {
            if children.is_empty() {
                net.add_transition(None, vec![entry], vec![exit]);
                return;
            }
            let mut ins = Vec::with_capacity(children.len());
            let mut outs = Vec::with_capacity(children.len());
            for child in children {
                let child_in = net.add_place();
                let child_out = net.add_place();
                build(net, child, child_in, child_out);
                ins.push(child_in);
                outs.push(child_out);
            }
            net.add_transition(None, vec![entry], ins);
            net.add_transition(None, outs, vec![exit]);
        }
        ProcessTree::Loop { body, redo } => {
            let before_body = net.add_place();
            let after_body = net.add_place();
            net.add_transition(None, vec![entry], vec![before_body]);
            build(net, body, before_body, after_body);
            build(net, redo, after_body, before_body);
            net.add_transition(None, vec![after_body], vec![exit]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::petri::Transition;

    fn leaf(label: &str) -> ProcessTree {
        ProcessTree::Leaf(label.to_owned())
    }

    /// Fires the first enabled transition with the given label (or a silent
    /// one for `None`), returning the successor marking.
    fn step(net: &PetriNet, marking: &Marking, label: Option<&str>) -> Marking {
        let t: &Transition = net
            .transitions()
            .iter()
            .find(|t| t.label.as_deref() == label && marking.is_enabled(t))
            .expect("expected an enabled transition");
        marking.fire(t)
    }

    #[test]
    fn sequence_token_game_reaches_final() {
        let tree = ProcessTree::Seq(vec![leaf("a"), leaf("b")]);
        let (net, initial, final_) = net_from_tree(&tree);
        let m = step(&net, &initial, Some("a"));
        let m = step(&net, &m, Some("b"));
        assert_eq!(m, final_);
    }

    #[test]
    fn xor_allows_each_branch() {
        let tree = ProcessTree::Xor(vec![leaf("a"), leaf("b")]);
        let (net, initial, final_) = net_from_tree(&tree);
        assert_eq!(step(&net, &initial, Some("a")), final_);
        assert_eq!(step(&net, &initial, Some("b")), final_);
    }

    #[test]
    fn and_forks_and_joins() {
        let tree = ProcessTree::And(vec![leaf("a"), leaf("b")]);
        let (net, initial, final_) = net_from_tree(&tree);
        let m = step(&net, &initial, None); // fork
        let m = step(&net, &m, Some("b"));
        let m = step(&net, &m, Some("a"));
        let m = step(&net, &m, None); // join
        assert_eq!(m, final_);
    }

    #[test]
    fn loop_can_redo() {
        let tree = ProcessTree::Loop {
            body: Box::new(leaf("a")),
            redo: Box::new(leaf("r")),
        };
        let (net, initial, final_) = net_from_tree(&tree);
        let m = step(&net, &initial, None); // enter
        let m = step(&net, &m, Some("a"));
        let m = step(&net, &m, Some("r"));
        let m = step(&net, &m, Some("a"));
        let m = step(&net, &m, None); // leave
        assert_eq!(m, final_);
    }
}
