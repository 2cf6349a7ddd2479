use crate::autograd::BackwardOp;
use crate::config::Negation;
use crate::ops::apply_unary_op;
use crate::ops::traits::GradNumeric;
use crate::value::Value;

/// Records `-a`.
///
/// Under the default [`Negation::Detached`] the result is a fresh leaf
/// holding `-a.data()`: `a` is not recorded as a parent and no gradient
/// reaches it through the negation. Under [`Negation::Tracked`] the result is
/// an interior node with backward `a.grad += -g`.
pub fn neg_op<T: GradNumeric>(a: &Value<T>) -> Value<T> {
    match a.tape.config().negation {
        Negation::Detached => a.tape.leaf(-a.data()),
        Negation::Tracked => apply_unary_op(a, |x| -x, |input| BackwardOp::Neg { input }),
    }
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
