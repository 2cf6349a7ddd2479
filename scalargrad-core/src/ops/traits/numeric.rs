use num_traits::{Float, NumAssignOps};
use std::fmt::{Debug, Display};

/// A trait representing the element types a [`Value`](crate::Value) can carry.
///
/// Bounds the scalar kernels of every operation and of the backward pass. It
/// is strictly reserved to floating-point types (`f32`, `f64`): division by a
/// zero operand must produce the host's `inf`/`NaN` rather than trap.
pub trait GradNumeric:
    Float // Includes Num + Copy + zero()/one() + comparisons
    + NumAssignOps // AddAssign etc. for gradient accumulation
    + Debug
    + Display
    + 'static
{
}

impl GradNumeric for f32 {}
impl GradNumeric for f64 {}

#[cfg(test)]
mod tests {
    use super::*;

    fn process_numeric<T: GradNumeric>(value: T) -> T {
        let mut acc = T::zero();
        acc += value;
        acc
    }

    #[test]
    fn test_f32_impl_grad_numeric() {
        assert_eq!(process_numeric(1.5f32), 1.5);
    }

    #[test]
    fn test_f64_impl_grad_numeric() {
        assert_eq!(process_numeric(-2.0f64), -2.0);
    }
}
