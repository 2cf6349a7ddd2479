use crate::autograd::BackwardOp;
use crate::error::AutogradError;
use crate::ops::apply_binary_op;
use crate::ops::traits::GradNumeric;
use crate::value::Value;

/// Records `a / b`.
///
/// No check is made on `b`: dividing by a zero-valued node yields `±inf` or
/// `NaN` following the float type's own rules.
///
/// Backward: `a.grad += g / b`. The divisor's gradient `-g * a / b²` is
/// *assigned* to `b.grad` under the default
/// [`DivisorGrad::Assign`](crate::config::DivisorGrad::Assign), discarding
/// contributions `b` received from other consumers; it is accumulated under
/// [`DivisorGrad::Accumulate`](crate::config::DivisorGrad::Accumulate).
/// Both rules read the operands' data when backward runs, not when the
/// quotient is recorded.
pub fn div_op<T: GradNumeric>(a: &Value<T>, b: &Value<T>) -> Result<Value<T>, AutogradError> {
    apply_binary_op(a, b, "div", |x, y| x / y, |lhs, rhs| BackwardOp::Div { lhs, rhs })
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
