// scalargrad-core/src/ops/arithmetic/add.rs

use crate::autograd::BackwardOp;
use crate::error::AutogradError;
use crate::ops::apply_binary_op;
use crate::ops::traits::GradNumeric;
use crate::tape::Tape;
use crate::value::Value;

/// Records `a + b`.
///
/// Backward: `a.grad += g`, `b.grad += g`. When `a` and `b` are the same
/// node it receives both contributions.
pub fn add_op<T: GradNumeric>(a: &Value<T>, b: &Value<T>) -> Result<Value<T>, AutogradError> {
    apply_binary_op(a, b, "add", |x, y| x + y, |lhs, rhs| BackwardOp::Add { lhs, rhs })
}

/// Folds `values` with [`add_op`], left to right.
///
/// A single value is returned as is (no node recorded); an empty slice yields
/// a fresh zero leaf on `tape`.
pub fn sum_op<T: GradNumeric>(tape: &Tape<T>, values: &[Value<T>]) -> Result<Value<T>, AutogradError> {
    let mut iter = values.iter();
    let first = match iter.next() {
        Some(first) => first.clone(),
        None => return Ok(tape.leaf(T::zero())),
    };
    iter.try_fold(first, |acc, v| add_op(&acc, v))
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
