use std::fmt;

use crate::config::{DivisorGrad, TapeConfig};
use crate::ops::traits::GradNumeric;
use crate::tape_data::{NodeData, NodeId};

/// Label of the operation that produced a node. Diagnostic only; the backward
/// pass dispatches on [`BackwardOp`], never on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Sub,
    Neg,
    Mul,
    Div,
    Relu,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OpKind::Add => "+",
            OpKind::Sub => "-",
            OpKind::Neg => "neg",
            OpKind::Mul => "*",
            OpKind::Div => "/",
            OpKind::Relu => "ReLU",
        };
        f.write_str(label)
    }
}

/// The local gradient rule of an interior node, together with its parent links.
///
/// Every operation that records an interior node stores one of these variants
/// in the node's `grad_fn`. The operands are referenced by [`NodeId`]; the
/// operand *data* needed by the rule is read back from the tape when the
/// rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackwardOp {
    Add { lhs: NodeId, rhs: NodeId },
    Sub { lhs: NodeId, rhs: NodeId },
    /// Only recorded under [`Negation::Tracked`](crate::config::Negation::Tracked).
    Neg { input: NodeId },
    Mul { lhs: NodeId, rhs: NodeId },
    Div { lhs: NodeId, rhs: NodeId },
    Relu { input: NodeId },
}

impl BackwardOp {
    pub fn kind(&self) -> OpKind {
        match self {
            BackwardOp::Add { .. } => OpKind::Add,
            BackwardOp::Sub { .. } => OpKind::Sub,
            BackwardOp::Neg { .. } => OpKind::Neg,
            BackwardOp::Mul { .. } => OpKind::Mul,
            BackwardOp::Div { .. } => OpKind::Div,
            BackwardOp::Relu { .. } => OpKind::Relu,
        }
    }

    /// Returns the parent nodes in operand order.
    ///
    /// A node used as both operands (`a + a`) appears twice; the traversal's
    /// visited set handles the duplicate, and [`BackwardOp::backward`]
    /// contributes once per operand slot.
    pub fn inputs(&self) -> Vec<NodeId> {
        match *self {
            BackwardOp::Add { lhs, rhs }
            | BackwardOp::Sub { lhs, rhs }
            | BackwardOp::Mul { lhs, rhs }
            | BackwardOp::Div { lhs, rhs } => vec![lhs, rhs],
            BackwardOp::Neg { input } | BackwardOp::Relu { input } => vec![input],
        }
    }

    /// Adds this node's contribution into its parents' gradients.
    ///
    /// `grad_output` is the gradient already accumulated into the node that
    /// owns this rule. Must run exactly once per node per backward pass.
    pub(crate) fn backward<T: GradNumeric>(
        &self,
        grad_output: T,
        nodes: &mut [NodeData<T>],
        config: &TapeConfig,
    ) {
        let g = grad_output;
        match *self {
            BackwardOp::Add { lhs, rhs } => {
                nodes[lhs.0].grad += g;
                nodes[rhs.0].grad += g;
            }
            BackwardOp::Sub { lhs, rhs } => {
                nodes[lhs.0].grad += g;
                nodes[rhs.0].grad += -g;
            }
            BackwardOp::Neg { input } => {
                nodes[input.0].grad += -g;
            }
            BackwardOp::Mul { lhs, rhs } => {
                let a = nodes[lhs.0].data;
                let b = nodes[rhs.0].data;
                nodes[lhs.0].grad += g * b;
                nodes[rhs.0].grad += g * a;
            }
            BackwardOp::Div { lhs, rhs } => {
                let a = nodes[lhs.0].data;
                let b = nodes[rhs.0].data;
                nodes[lhs.0].grad += g / b;
                let divisor_grad = g * a * -T::one() / (b * b);
                match config.divisor_grad {
                    DivisorGrad::Assign => nodes[rhs.0].grad = divisor_grad,
                    DivisorGrad::Accumulate => nodes[rhs.0].grad += divisor_grad,
                }
            }
            BackwardOp::Relu { input } => {
                if nodes[input.0].data > T::zero() {
                    nodes[input.0].grad += g;
                }
            }
        }
    }
}
