//! Reverse-mode automatic differentiation over the scalar tape.
//!
//! Every operation records its local gradient rule as a [`BackwardOp`] on the
//! node it produces. [`backward`] sorts the nodes reachable from a root
//! topologically and applies those rules from the root back to the leaves,
//! accumulating into each parent's `grad`.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

use log::{debug, trace};

use crate::ops::traits::GradNumeric;
use crate::tape_data::{NodeId, TapeData};
use crate::value::Value;

pub use backward_op::{BackwardOp, OpKind};
pub use grad_check::{check_grad, check_grad_with_config, GradCheckError};

/// Computes the gradient of `root` with respect to itself and every ancestor.
///
/// `root.grad` is set to 1. Every other reachable node keeps the gradient it
/// already holds and has contributions added to it: running `backward` twice
/// without resetting doubles the ancestors' gradients. Use
/// [`Value::zero_grad`], [`Tape::zero_grad`](crate::Tape::zero_grad) or
/// [`Module::zero_grad`](crate::nn::Module::zero_grad) between independent passes.
///
/// # Panics
/// Panics if `root` was discarded by [`Tape::truncate`](crate::Tape::truncate).
pub fn backward<T: GradNumeric>(root: &Value<T>) {
    let mut guard = root.tape().write_data();
    guard.live_node(root.id, root.epoch);
    propagate(&mut guard, root.id());
}

pub(crate) fn propagate<T: GradNumeric>(tape: &mut TapeData<T>, root: NodeId) {
    let sorted_nodes = graph::topological_sort(&tape.nodes, root);
    debug!("backward from {}: {} reachable nodes", root, sorted_nodes.len());

    tape.node_mut(root).grad = T::one();

    let config = tape.config;
    for node_id in sorted_nodes.into_iter().rev() {
        let node = tape.node(node_id);
        if let Some(grad_fn) = node.grad_fn {
            let grad_output = node.grad;
            trace!("{} {}: upstream grad {}", node_id, grad_fn.kind(), grad_output);
            grad_fn.backward(grad_output, &mut tape.nodes, &config);
        }
    }
}
