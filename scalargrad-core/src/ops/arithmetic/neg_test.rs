use super::*;
use crate::autograd::OpKind;
use crate::config::TapeConfig;
use crate::error::AutogradError;
use crate::ops::arithmetic::{add_op, mul_op};
use crate::tape::Tape;

#[test]
fn test_neg_detached_is_a_leaf() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(2.5);
    let n = neg_op(&a);
    assert_eq!(n.data(), -2.5);
    assert!(n.is_leaf());
    assert!(n.parents().is_empty());
    assert_eq!(n.op(), None);
}

#[test]
fn test_neg_detached_blocks_gradient() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let a = tape.leaf(2.0);
    let b = tape.leaf(3.0);
    // y = a * (-b): b is unreachable from y
    let y = mul_op(&a, &neg_op(&b))?;
    y.backward();
    assert_eq!(y.data(), -6.0);
    assert_eq!(a.grad(), -3.0);
    assert_eq!(b.grad(), 0.0);
    Ok(())
}

#[test]
fn test_neg_tracked_propagates() -> Result<(), AutogradError> {
    let tape: Tape = Tape::with_config(TapeConfig::new().with_negation(Negation::Tracked));
    let a = tape.leaf(2.0);
    let b = tape.leaf(3.0);
    let nb = neg_op(&b);
    assert_eq!(nb.op(), Some(OpKind::Neg));
    assert_eq!(nb.parents(), vec![b.clone()]);

    let y = add_op(&mul_op(&a, &nb)?, &nb)?;
    y.backward();
    // y = -ab - b
    assert_eq!(a.grad(), -3.0);
    assert_eq!(b.grad(), -3.0);
    Ok(())
}

#[test]
fn test_neg_operator() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(-1.25);
    let n = -&a;
    assert_eq!(n.data(), 1.25);
    let nn = -n;
    assert_eq!(nn.data(), -1.25);
    assert_ne!(nn, a);
}
