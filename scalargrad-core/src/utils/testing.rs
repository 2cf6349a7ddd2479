use crate::ops::traits::GradNumeric;
use crate::value::Value;

/// Checks that each value's `data` is within `tolerance` of `expected`.
/// Panics with the first offending index otherwise.
pub fn check_data_near<T: GradNumeric>(actual: &[Value<T>], expected: &[T], tolerance: T) {
    let data: Vec<T> = actual.iter().map(|v| v.data()).collect();
    check_slice_near(&data, expected, tolerance, "data");
}

/// Same as [`check_data_near`], on gradients.
pub fn check_grads_near<T: GradNumeric>(actual: &[Value<T>], expected: &[T], tolerance: T) {
    let grads: Vec<T> = actual.iter().map(|v| v.grad()).collect();
    check_slice_near(&grads, expected, tolerance, "grad");
}

fn check_slice_near<T: GradNumeric>(actual: &[T], expected: &[T], tolerance: T, what: &str) {
    assert_eq!(actual.len(), expected.len(), "Length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let diff = (*a - *e).abs();
        if !(diff <= tolerance) {
            panic!(
                "{} mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                what, i, a, e, diff, tolerance
            );
        }
    }
}
