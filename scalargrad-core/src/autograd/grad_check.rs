use approx::relative_eq;
use log::debug;
use thiserror::Error;

use crate::config::TapeConfig;
use crate::error::AutogradError;
use crate::tape::Tape;
use crate::value::Value;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Function under check returned a value recorded on another tape")]
    OutputOnForeignTape,

    #[error("Numerical gradient is NaN or infinite for input {input_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },

    #[error("Function execution failed during gradient check: {0}")]
    Autograd(#[from] AutogradError),
}

/// Checks analytical gradients against central finite differences, on a tape
/// with the default [`TapeConfig`].
///
/// See [`check_grad_with_config`].
pub fn check_grad<F>(func: F, inputs: &[f64], epsilon: f64, tolerance: f64) -> Result<(), GradCheckError>
where
    F: Fn(&[Value<f64>]) -> Result<Value<f64>, AutogradError>,
{
    check_grad_with_config(TapeConfig::default(), func, inputs, epsilon, tolerance)
}

/// Checks analytical gradients against central finite differences.
///
/// `func` is evaluated once on leaves holding `inputs` and differentiated with
/// `backward`. Then, for each input `i`, it is re-evaluated on fresh tapes
/// with input `i` shifted by `±epsilon`, and `(f(x+ε) - f(x-ε)) / 2ε` is
/// compared with the analytical gradient (absolute or relative tolerance).
/// Inputs are checked in order; the first mismatch is returned.
pub fn check_grad_with_config<F>(
    config: TapeConfig,
    func: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Value<f64>]) -> Result<Value<f64>, AutogradError>,
{
    let analytical = analytical_grads(config, &func, inputs)?;

    for (input_index, &analytical_grad) in analytical.iter().enumerate() {
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index,
                value: analytical_grad,
            });
        }

        let mut shifted = inputs.to_vec();
        shifted[input_index] = inputs[input_index] + epsilon;
        let loss_plus = evaluate(config, &func, &shifted)?;
        shifted[input_index] = inputs[input_index] - epsilon;
        let loss_minus = evaluate(config, &func, &shifted)?;

        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index,
                loss_plus,
                loss_minus,
            });
        }

        debug!(
            "grad_check input {}: analytical {} numerical {}",
            input_index, analytical_grad, numerical_grad
        );
        if !relative_eq!(
            analytical_grad,
            numerical_grad,
            epsilon = tolerance,
            max_relative = tolerance
        ) {
            return Err(GradCheckError::GradientMismatch {
                input_index,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }
    Ok(())
}

fn analytical_grads<F>(config: TapeConfig, func: &F, inputs: &[f64]) -> Result<Vec<f64>, GradCheckError>
where
    F: Fn(&[Value<f64>]) -> Result<Value<f64>, AutogradError>,
{
    let tape = Tape::with_config(config);
    let leaves: Vec<Value<f64>> = inputs.iter().map(|&x| tape.leaf(x)).collect();
    let output = func(&leaves)?;
    if !output.tape().ptr_eq(&tape) {
        return Err(GradCheckError::OutputOnForeignTape);
    }
    output.backward();
    Ok(leaves.iter().map(|leaf| leaf.grad()).collect())
}

fn evaluate<F>(config: TapeConfig, func: &F, inputs: &[f64]) -> Result<f64, GradCheckError>
where
    F: Fn(&[Value<f64>]) -> Result<Value<f64>, AutogradError>,
{
    let tape = Tape::with_config(config);
    let leaves: Vec<Value<f64>> = inputs.iter().map(|&x| tape.leaf(x)).collect();
    Ok(func(&leaves)?.data())
}
