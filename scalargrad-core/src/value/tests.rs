use super::*;
use crate::config::TapeConfig;
use std::collections::HashSet;

#[test]
fn test_value_identity_not_data_equality() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(2.0);
    let b = tape.leaf(2.0);
    let a_again = a.clone();
    assert_ne!(a, b);
    assert_eq!(a, a_again);
    assert!(a.ptr_eq(&a_again));

    let set: HashSet<Value> = [a.clone(), b.clone(), a_again].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_value_on_another_tape_with_same_index_differs() {
    let a = Tape::<f64>::new().leaf(1.0);
    let b = Tape::<f64>::new().leaf(1.0);
    assert_eq!(a.id(), b.id());
    assert_ne!(a, b);
}

#[test]
fn test_display_and_debug() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(1.5);
    assert_eq!(a.to_string(), "Value(data=1.5)");
    let dbg = format!("{:?}", &a * 2.0);
    assert!(dbg.contains("data: 3.0"), "{}", dbg);
    assert!(dbg.contains("op: Mul"), "{}", dbg);
    assert!(format!("{:?}", a).contains("\"leaf\""));
}

#[test]
fn test_operators_all_ownership_forms() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(6.0);
    let b = tape.leaf(3.0);

    assert_eq!((&a + &b).data(), 9.0);
    assert_eq!((a.clone() - b.clone()).data(), 3.0);
    assert_eq!((a.clone() * &b).data(), 18.0);
    assert_eq!((&a / b.clone()).data(), 2.0);
}

#[test]
fn test_literal_promotion_on_both_sides() {
    let tape: Tape = Tape::new();
    let x = tape.leaf(4.0);

    let y = &x + 1.0;
    assert_eq!(y.data(), 5.0);
    let parents = y.parents();
    let leaf = &parents[1];
    assert!(leaf.is_leaf());
    assert_eq!(leaf.data(), 1.0);

    assert_eq!((2.0 - &x).data(), -2.0);
    assert_eq!((3.0 * x.clone()).data(), 12.0);
    assert_eq!((1.0 / &x).data(), 0.25);
    assert_eq!((x.clone() / 8.0).data(), 0.5);

    // promoted leaves live on the operand's tape
    let z = 10.0 - &x;
    assert!(z.tape().ptr_eq(&tape));
    z.backward();
    assert_eq!(x.grad(), -1.0);
}

#[test]
fn test_literal_promotion_f32() {
    let tape: Tape<f32> = Tape::new();
    let x = tape.leaf(2.0f32);
    let y = 1.5f32 * &x + 0.5f32;
    assert_eq!(y.data(), 3.5);
    y.backward();
    assert_eq!(x.grad(), 1.5);
}

#[test]
#[should_panic(expected = "different tapes")]
fn test_operator_panics_on_tape_mismatch() {
    let a = Tape::<f64>::new().leaf(1.0);
    let b = Tape::<f64>::new().leaf(1.0);
    let _ = &a + &b;
}

#[test]
fn test_concrete_scenario() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(1.0);
    let b = tape.leaf(-2.0);

    let c = &a + &b;
    assert_eq!(c.data(), a.data() + b.data());
    c.backward();
    assert_eq!(a.grad(), 1.0);
    assert_eq!(b.grad(), 1.0);

    let d = &a - &b;
    a.zero_grad();
    b.zero_grad();
    d.backward();
    assert_eq!(d.data(), a.data() - b.data());
    assert_eq!(a.grad(), 1.0);
    assert_eq!(b.grad(), -1.0);

    let e = &a * &b;
    a.zero_grad();
    b.zero_grad();
    e.backward();
    assert_eq!(e.data(), a.data() * b.data());
    assert_eq!(a.grad(), b.data());
    assert_eq!(b.grad(), a.data());

    let f = c.relu();
    a.zero_grad();
    b.zero_grad();
    c.zero_grad();
    f.backward();
    assert_eq!(f.data(), 0.0);
    assert_eq!(a.grad(), 0.0);
    assert_eq!(b.grad(), 0.0);
}

#[test]
fn test_fan_out_accumulates() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(7.0);
    let d = &a + &a;
    d.backward();
    assert_eq!(a.grad(), 2.0);
}

#[test]
fn test_diamond_fan_in() {
    // b and c both consume a; d consumes both.
    let tape: Tape = Tape::new();
    let a = tape.leaf(3.0);
    let b = &a * 2.0;
    let c = &a * &a;
    let d = &b + &c;
    d.backward();
    // d = 2a + a², d' = 2 + 2a
    assert_eq!(a.grad(), 8.0);
    assert_eq!(b.grad(), 1.0);
    assert_eq!(c.grad(), 1.0);
}

#[test]
fn test_backward_rerun_accumulates() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(2.0);
    let b = tape.leaf(5.0);
    let y = &a * &b;

    y.backward();
    assert_eq!(a.grad(), 5.0);
    assert_eq!(b.grad(), 2.0);

    // root is re-seeded to 1, ancestors keep accumulating
    y.backward();
    assert_eq!(y.grad(), 1.0);
    assert_eq!(a.grad(), 10.0);
    assert_eq!(b.grad(), 4.0);

    y.backward();
    assert_eq!(a.grad(), 15.0);
}

#[test]
fn test_backward_only_touches_ancestors() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(1.0);
    let b = tape.leaf(2.0);
    let bystander = tape.leaf(3.0);
    let later = &a * &bystander;
    let y = &a + &b;
    y.backward();
    assert_eq!(bystander.grad(), 0.0);
    assert_eq!(later.grad(), 0.0);
    assert_eq!(a.grad(), 1.0);
}

#[test]
fn test_backward_on_leaf_seeds_itself() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(4.0);
    a.backward();
    assert_eq!(a.grad(), 1.0);
}

#[test]
fn test_parents_and_ops() {
    let tape: Tape = Tape::with_config(TapeConfig::corrected());
    let a = tape.leaf(1.0);
    let b = tape.leaf(2.0);
    assert_eq!((&a / &b).op(), Some(OpKind::Div));
    assert_eq!((&a / &b).parents(), vec![a.clone(), b.clone()]);
    assert_eq!((-&a).op(), Some(OpKind::Neg));
    assert_eq!(a.relu().parents(), vec![a.clone()]);
    assert!(a.parents().is_empty());
}

#[test]
fn test_set_data_on_leaf_keeps_consumers() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let w = tape.leaf(1.0);
    let y = &w * 3.0;
    w.set_data(2.0)?;
    assert_eq!(w.data(), 2.0);
    assert_eq!(y.data(), 3.0);
    Ok(())
}

#[test]
fn test_set_data_rejects_computed_nodes() {
    let tape: Tape = Tape::new();
    let a = tape.leaf(2.0);
    let b = tape.leaf(3.0);
    let y = &a * &b;
    let z = &y + 1.0;

    assert_eq!(
        y.set_data(100.0),
        Err(AutogradError::NotALeaf {
            id: y.id().index(),
            op: "*".to_string(),
        })
    );
    assert_eq!(y.data(), 6.0);
    assert_eq!(z.data(), 7.0);
    assert!(matches!(z.set_data(0.0), Err(AutogradError::NotALeaf { .. })));
}

#[test]
fn test_mul_rule_reads_operand_data_at_backward_time() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let a = tape.leaf(2.0);
    let b = tape.leaf(3.0);
    let y = &a * &b;
    a.set_data(10.0)?;
    y.backward();
    // recorded product is still 6, the local rule sees a = 10
    assert_eq!(y.data(), 6.0);
    assert_eq!(b.grad(), 10.0);
    assert_eq!(a.grad(), 3.0);
    Ok(())
}
