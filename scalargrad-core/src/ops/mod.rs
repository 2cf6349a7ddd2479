//! # Scalar Operations Module (`ops`)
//!
//! Every operation of the engine lives here, one file per operation.
//!
//! ## Structure:
//!
//! - **`_op` Functions:** Each operation has a core function (`add_op`, `relu_op`, ...)
//!   that computes the forward value and records the new node together with
//!   its [`BackwardOp`](crate::autograd::BackwardOp) on the tape. Binary ops
//!   return `Result` because their operands may come from different tapes;
//!   unary ops cannot fail.
//! - **Operators:** `std::ops` overloads on [`Value`](crate::Value) delegate to
//!   the `_op` functions (see `value/operators.rs`).
//! - **Traits (`ops::traits`):** [`GradNumeric`](traits::GradNumeric), the
//!   bound on element types.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: add, sub, neg, mul, div, and the `sum_op` fold.
//! - [`activation`]: relu.

pub mod activation;
pub mod arithmetic;
pub mod traits;

use crate::autograd::BackwardOp;
use crate::error::AutogradError;
use crate::tape_data::NodeId;
use crate::value::Value;
use traits::GradNumeric;

pub use activation::relu_op;
pub use arithmetic::{add_op, div_op, mul_op, neg_op, sub_op, sum_op};

/// Records the result of a binary operation.
///
/// Checks that both operands share a tape, computes the forward value with
/// `forward`, and stores the node with the rule built by `build_grad_fn`.
/// Operands are never mutated.
pub(crate) fn apply_binary_op<T, F, B>(
    a: &Value<T>,
    b: &Value<T>,
    op_name: &str,
    forward: F,
    build_grad_fn: B,
) -> Result<Value<T>, AutogradError>
where
    T: GradNumeric,
    F: FnOnce(T, T) -> T,
    B: FnOnce(NodeId, NodeId) -> BackwardOp,
{
    a.check_same_tape(b, op_name)?;

    let mut guard = a.tape.write_data();
    let out_data = forward(guard.live_node(a.id, a.epoch).data, guard.live_node(b.id, b.epoch).data);
    let id = guard.push_node(out_data, build_grad_fn(a.id, b.id));
    drop(guard);

    Ok(Value::from_parts(a.tape.clone(), id))
}

/// Records the result of a unary operation; see [`apply_binary_op`].
pub(crate) fn apply_unary_op<T, F, B>(a: &Value<T>, forward: F, build_grad_fn: B) -> Value<T>
where
    T: GradNumeric,
    F: FnOnce(T) -> T,
    B: FnOnce(NodeId) -> BackwardOp,
{
    let mut guard = a.tape.write_data();
    let out_data = forward(guard.live_node(a.id, a.epoch).data);
    let id = guard.push_node(out_data, build_grad_fn(a.id));
    drop(guard);

    Value::from_parts(a.tape.clone(), id)
}
