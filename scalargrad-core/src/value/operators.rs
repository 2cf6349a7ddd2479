// src/value/operators.rs
//
// std::ops overloads for Value: x + y, x - y, x * y, x / y, -x, for every
// owned/borrowed combination and with plain numbers on either side. A number
// is promoted to a leaf on the other operand's tape.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Value;
use crate::error::AutogradError;
use crate::ops::arithmetic::{add_op, div_op, mul_op, neg_op, sub_op};
use crate::ops::traits::GradNumeric;

/// Unwraps the result of a binary op inside an operator overload.
///
/// # Panics
/// Panics if the operands were recorded on different tapes. Use the `*_op`
/// functions to get the error as a value instead.
fn expect_same_tape<T: GradNumeric>(result: Result<Value<T>, AutogradError>) -> Value<T> {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

macro_rules! impl_value_binary_op {
    ($trait:ident, $method:ident, $op_fn:ident) => {
        impl<'a, 'b, T: GradNumeric> $trait<&'b Value<T>> for &'a Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: &'b Value<T>) -> Value<T> {
                expect_same_tape($op_fn(self, rhs))
            }
        }

        impl<T: GradNumeric> $trait<Value<T>> for Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: Value<T>) -> Value<T> {
                expect_same_tape($op_fn(&self, &rhs))
            }
        }

        impl<'b, T: GradNumeric> $trait<&'b Value<T>> for Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: &'b Value<T>) -> Value<T> {
                expect_same_tape($op_fn(&self, rhs))
            }
        }

        impl<'a, T: GradNumeric> $trait<Value<T>> for &'a Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: Value<T>) -> Value<T> {
                expect_same_tape($op_fn(self, &rhs))
            }
        }

        impl<'a, T: GradNumeric> $trait<T> for &'a Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: T) -> Value<T> {
                let rhs = self.tape.leaf(rhs);
                expect_same_tape($op_fn(self, &rhs))
            }
        }

        impl<T: GradNumeric> $trait<T> for Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: T) -> Value<T> {
                let rhs = self.tape.leaf(rhs);
                expect_same_tape($op_fn(&self, &rhs))
            }
        }
    };
}

impl_value_binary_op!(Add, add, add_op);
impl_value_binary_op!(Sub, sub, sub_op);
impl_value_binary_op!(Mul, mul, mul_op);
impl_value_binary_op!(Div, div, div_op);

// Number on the left-hand side: `2.0 - &x`. Generic impls over `T` are ruled
// out by coherence, so each float type gets its own set.
macro_rules! impl_scalar_lhs_op {
    ($scalar:ty; $($trait:ident, $method:ident, $op_fn:ident);+ $(;)?) => {
        $(
            impl<'a> $trait<&'a Value<$scalar>> for $scalar {
                type Output = Value<$scalar>;

                fn $method(self, rhs: &'a Value<$scalar>) -> Value<$scalar> {
                    let lhs = rhs.tape.leaf(self);
                    expect_same_tape($op_fn(&lhs, rhs))
                }
            }

            impl $trait<Value<$scalar>> for $scalar {
                type Output = Value<$scalar>;

                fn $method(self, rhs: Value<$scalar>) -> Value<$scalar> {
                    let lhs = rhs.tape.leaf(self);
                    expect_same_tape($op_fn(&lhs, &rhs))
                }
            }
        )+
    };
}

impl_scalar_lhs_op!(f32; Add, add, add_op; Sub, sub, sub_op; Mul, mul, mul_op; Div, div, div_op);
impl_scalar_lhs_op!(f64; Add, add, add_op; Sub, sub, sub_op; Mul, mul, mul_op; Div, div, div_op);

impl<'a, T: GradNumeric> Neg for &'a Value<T> {
    type Output = Value<T>;

    fn neg(self) -> Value<T> {
        neg_op(self)
    }
}

impl<T: GradNumeric> Neg for Value<T> {
    type Output = Value<T>;

    fn neg(self) -> Value<T> {
        neg_op(&self)
    }
}
