use crate::autograd::BackwardOp;
use crate::error::AutogradError;
use crate::ops::apply_binary_op;
use crate::ops::traits::GradNumeric;
use crate::value::Value;

/// Records `a - b`.
///
/// Backward: `a.grad += g`, `b.grad += -g`.
pub fn sub_op<T: GradNumeric>(a: &Value<T>, b: &Value<T>) -> Result<Value<T>, AutogradError> {
    apply_binary_op(a, b, "sub", |x, y| x - y, |lhs, rhs| BackwardOp::Sub { lhs, rhs })
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
