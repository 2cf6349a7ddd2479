//! The differentiable scalar handle.

mod operators;
mod traits;

#[cfg(test)]
mod tests;

use crate::autograd::{self, OpKind};
use crate::error::AutogradError;
use crate::ops::activation::relu_op;
use crate::ops::traits::GradNumeric;
use crate::tape::Tape;
use crate::tape_data::NodeId;

/// A node of the computation graph: a scalar with recorded provenance.
///
/// A `Value` is a handle `(tape, node id)`. Cloning it clones the handle, not
/// the node, so the same node can be used as an operand any number of times
/// (fan-out). Equality and hashing are by identity: two values holding the
/// same number are still different nodes.
///
/// `grad` changes through [`Value::backward`] or an explicit reset with
/// [`Value::zero_grad`]. A computed node's `data` is fixed once recorded; a
/// leaf's can be overwritten with [`Value::set_data`].
pub struct Value<T: GradNumeric = f64> {
    pub(crate) tape: Tape<T>,
    pub(crate) id: NodeId,
    pub(crate) epoch: u32,
}

impl<T: GradNumeric> Value<T> {
    /// Records a leaf holding `data` on `tape`. Same as [`Tape::leaf`].
    pub fn new(tape: &Tape<T>, data: T) -> Self {
        tape.leaf(data)
    }

    /// Handle to a node that is live on `tape`.
    pub(crate) fn from_parts(tape: Tape<T>, id: NodeId) -> Self {
        let epoch = tape.read_data().node(id).epoch;
        Value { tape, id, epoch }
    }

    /// Forward value.
    pub fn data(&self) -> T {
        self.tape.read_data().live_node(self.id, self.epoch).data
    }

    /// Gradient accumulated by the backward passes run so far.
    pub fn grad(&self) -> T {
        self.tape.read_data().live_node(self.id, self.epoch).grad
    }

    /// Overwrites the forward value of a leaf, e.g. for a parameter update
    /// between passes.
    ///
    /// Nodes already computed from this leaf keep their recorded data, but
    /// the `mul`/`div` rules read operand data when backward runs: update
    /// parameters after `backward`, then record a fresh forward pass.
    ///
    /// # Errors
    /// `NotALeaf` if this value was produced by an operation; its data is
    /// fixed once recorded.
    pub fn set_data(&self, data: T) -> Result<(), AutogradError> {
        let mut guard = self.tape.write_data();
        let node = guard.live_node_mut(self.id, self.epoch);
        if let Some(op) = node.grad_fn {
            return Err(AutogradError::NotALeaf {
                id: self.id.index(),
                op: op.kind().to_string(),
            });
        }
        node.data = data;
        Ok(())
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tape(&self) -> &Tape<T> {
        &self.tape
    }

    /// Label of the producing operation, `None` for leaves.
    pub fn op(&self) -> Option<OpKind> {
        self.tape.read_data().live_node(self.id, self.epoch).grad_fn.map(|op| op.kind())
    }

    pub fn is_leaf(&self) -> bool {
        self.op().is_none()
    }

    /// The nodes this value was derived from, in operand order.
    ///
    /// `a + a` lists `a` twice. A detached negation has no parents.
    pub fn parents(&self) -> Vec<Value<T>> {
        let grad_fn = self.tape.read_data().live_node(self.id, self.epoch).grad_fn;
        grad_fn
            .map(|op| op.inputs())
            .unwrap_or_default()
            .into_iter()
            .map(|id| Value::from_parts(self.tape.clone(), id))
            .collect()
    }

    /// Resets this node's gradient to zero.
    pub fn zero_grad(&self) {
        self.tape.write_data().live_node_mut(self.id, self.epoch).grad = T::zero();
    }

    /// Backpropagates from this value; see [`autograd::backward`].
    pub fn backward(&self) {
        autograd::backward(self);
    }

    /// Rectified linear unit, `max(self, 0)`.
    pub fn relu(&self) -> Value<T> {
        relu_op(self)
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Value<T>) -> bool {
        self.id == other.id && self.epoch == other.epoch && self.tape.ptr_eq(&other.tape)
    }

    /// Ensures `other` lives on the same tape as `self`.
    pub(crate) fn check_same_tape(&self, other: &Value<T>, operation: &str) -> Result<(), AutogradError> {
        if self.tape.ptr_eq(&other.tape) {
            Ok(())
        } else {
            Err(AutogradError::TapeMismatch {
                operation: operation.to_string(),
            })
        }
    }
}
