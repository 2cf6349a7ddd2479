use crate::autograd::BackwardOp;
use crate::ops::apply_unary_op;
use crate::ops::traits::GradNumeric;
use crate::value::Value;

/// Applies the Rectified Linear Unit: `max(a, 0)`.
///
/// Backward: `a.grad += g` when `a.data() > 0`, nothing otherwise (the
/// derivative at exactly zero is taken as 0).
pub fn relu_op<T: GradNumeric>(a: &Value<T>) -> Value<T> {
    apply_unary_op(
        a,
        |x| if x > T::zero() { x } else { T::zero() },
        |input| BackwardOp::Relu { input },
    )
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
