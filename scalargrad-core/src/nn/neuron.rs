use std::fmt;

use log::trace;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use super::init::LayerConfig;
use super::module::Module;
use crate::error::AutogradError;
use crate::ops::traits::GradNumeric;
use crate::ops::{add_op, mul_op, relu_op, sum_op};
use crate::tape::Tape;
use crate::value::Value;

/// A single unit: `act(Σ wᵢ·xᵢ + b)`, where `act` is ReLU or the identity.
#[derive(Clone)]
pub struct Neuron<T: GradNumeric = f64> {
    weights: Vec<Value<T>>,
    bias: Option<Value<T>>,
    nonlin: bool,
    tape: Tape<T>,
}

impl<T: GradNumeric> Neuron<T> {
    /// Creates a neuron with `nin` weights drawn from `config.init`, followed
    /// by the bias if `config.use_bias` is set.
    ///
    /// # Errors
    /// `InvalidConfig` if the init range is invalid.
    pub fn new<R>(
        tape: &Tape<T>,
        nin: usize,
        nonlin: bool,
        config: &LayerConfig<T>,
        rng: &mut R,
    ) -> Result<Self, AutogradError>
    where
        T: SampleUniform,
        R: Rng + ?Sized,
    {
        let weights = config
            .init
            .sample_n(nin, rng)?
            .into_iter()
            .map(|w| tape.leaf(w))
            .collect();
        let bias = if config.use_bias {
            let b = config.init.sample_n(1, rng)?;
            Some(tape.leaf(b[0]))
        } else {
            None
        };
        Ok(Neuron {
            weights,
            bias,
            nonlin,
            tape: tape.clone(),
        })
    }

    /// Builds a neuron around existing parameter values.
    ///
    /// # Errors
    /// `TapeMismatch` if a parameter lives on another tape than `tape`.
    pub fn from_values(
        tape: &Tape<T>,
        weights: Vec<Value<T>>,
        bias: Option<Value<T>>,
        nonlin: bool,
    ) -> Result<Self, AutogradError> {
        for p in weights.iter().chain(bias.iter()) {
            if !p.tape().ptr_eq(tape) {
                return Err(AutogradError::TapeMismatch {
                    operation: "Neuron::from_values".to_string(),
                });
            }
        }
        Ok(Neuron {
            weights,
            bias,
            nonlin,
            tape: tape.clone(),
        })
    }

    pub fn weights(&self) -> &[Value<T>] {
        &self.weights
    }

    pub fn bias(&self) -> Option<&Value<T>> {
        self.bias.as_ref()
    }

    pub fn is_nonlinear(&self) -> bool {
        self.nonlin
    }

    /// Number of inputs expected by [`forward`](Module::forward).
    pub fn nin(&self) -> usize {
        self.weights.len()
    }
}

impl<T: GradNumeric> Module<T> for Neuron<T> {
    type Output = Value<T>;

    fn forward(&self, input: &[Value<T>]) -> Result<Value<T>, AutogradError> {
        if input.len() != self.weights.len() {
            return Err(AutogradError::InputWidthMismatch {
                expected: self.weights.len(),
                actual: input.len(),
                operation: "Neuron::forward".to_string(),
            });
        }

        let products = self
            .weights
            .iter()
            .zip(input)
            .map(|(w, x)| mul_op(w, x))
            .collect::<Result<Vec<_>, _>>()?;
        let mut act = sum_op(&self.tape, &products)?;
        if let Some(b) = &self.bias {
            act = add_op(&act, b)?;
        }
        trace!("neuron pre-activation {}", act.data());

        Ok(if self.nonlin { relu_op(&act) } else { act })
    }

    fn parameters(&self) -> Vec<Value<T>> {
        self.weights.iter().chain(self.bias.iter()).cloned().collect()
    }

    fn named_parameters(&self) -> Vec<(String, Value<T>)> {
        let mut named: Vec<(String, Value<T>)> = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, w)| (format!("weights.{}", i), w.clone()))
            .collect();
        if let Some(b) = &self.bias {
            named.push(("bias".to_string(), b.clone()));
        }
        named
    }

    fn tape(&self) -> &Tape<T> {
        &self.tape
    }
}

impl<T: GradNumeric> fmt::Debug for Neuron<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.nonlin { "ReLU" } else { "Linear" };
        write!(f, "{}Neuron({})", kind, self.weights.len())
    }
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests;
