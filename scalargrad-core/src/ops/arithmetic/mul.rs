use crate::autograd::BackwardOp;
use crate::error::AutogradError;
use crate::ops::apply_binary_op;
use crate::ops::traits::GradNumeric;
use crate::value::Value;

/// Records `a * b`.
///
/// Backward: `a.grad += g * b`, `b.grad += g * a`. The operands' data is
/// read when backward runs, so a leaf updated with
/// [`Value::set_data`] in between contributes its new value.
pub fn mul_op<T: GradNumeric>(a: &Value<T>, b: &Value<T>) -> Result<Value<T>, AutogradError> {
    apply_binary_op(a, b, "mul", |x, y| x * y, |lhs, rhs| BackwardOp::Mul { lhs, rhs })
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
