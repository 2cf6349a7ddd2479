use std::collections::HashSet;

use crate::ops::traits::GradNumeric;
use crate::tape_data::{NodeData, NodeId};

/// Builds a topological sort of the nodes reachable from `root`.
///
/// Depth-first post-order: a node is appended only after all of its parents,
/// and the visited set makes each node appear exactly once even when it is
/// reachable through several paths (diamond fan-in, `a + a`). The returned
/// list therefore runs from leaves to `root`; `backward` walks it in reverse.
///
/// Uses an explicit stack instead of recursion so that long chains (a sum
/// over many terms) do not exhaust the call stack. The visiting order is the
/// same as the recursive formulation: parents in operand order.
pub(crate) fn topological_sort<T: GradNumeric>(nodes: &[NodeData<T>], root: NodeId) -> Vec<NodeId> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted_list = Vec::new();
    // (node, parents already expanded)
    let mut stack = vec![(root, false)];

    while let Some((node_id, expanded)) = stack.pop() {
        if expanded {
            sorted_list.push(node_id);
            continue;
        }
        if !visited.insert(node_id) {
            continue;
        }
        stack.push((node_id, true));
        if let Some(grad_fn) = nodes[node_id.0].grad_fn.as_ref() {
            // Reversed so the first operand is popped (and visited) first.
            for input_id in grad_fn.inputs().into_iter().rev() {
                if !visited.contains(&input_id) {
                    stack.push((input_id, false));
                }
            }
        }
    }

    sorted_list
}
