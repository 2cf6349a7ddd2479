use std::fmt;

use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use super::init::LayerConfig;
use super::module::{prefixed, Module};
use super::neuron::Neuron;
use crate::error::AutogradError;
use crate::ops::traits::GradNumeric;
use crate::tape::Tape;
use crate::value::Value;

/// `nout` independent neurons reading the same `nin` inputs.
#[derive(Clone)]
pub struct Layer<T: GradNumeric = f64> {
    neurons: Vec<Neuron<T>>,
    nin: usize,
    tape: Tape<T>,
}

impl<T: GradNumeric> Layer<T> {
    /// Creates the neurons in order, each drawing its parameters from `rng`.
    pub fn new<R>(
        tape: &Tape<T>,
        nin: usize,
        nout: usize,
        nonlin: bool,
        config: &LayerConfig<T>,
        rng: &mut R,
    ) -> Result<Self, AutogradError>
    where
        T: SampleUniform,
        R: Rng + ?Sized,
    {
        let neurons = (0..nout)
            .map(|_| Neuron::new(tape, nin, nonlin, config, &mut *rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Layer {
            neurons,
            nin,
            tape: tape.clone(),
        })
    }

    pub fn neurons(&self) -> &[Neuron<T>] {
        &self.neurons
    }

    pub fn nin(&self) -> usize {
        self.nin
    }

    pub fn nout(&self) -> usize {
        self.neurons.len()
    }
}

impl<T: GradNumeric> Module<T> for Layer<T> {
    type Output = Vec<Value<T>>;

    /// One output per neuron, in neuron order.
    fn forward(&self, input: &[Value<T>]) -> Result<Vec<Value<T>>, AutogradError> {
        if input.len() != self.nin {
            return Err(AutogradError::InputWidthMismatch {
                expected: self.nin,
                actual: input.len(),
                operation: "Layer::forward".to_string(),
            });
        }
        self.neurons.iter().map(|n| n.forward(input)).collect()
    }

    fn parameters(&self) -> Vec<Value<T>> {
        self.neurons.iter().flat_map(|n| n.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, Value<T>)> {
        let mut named = Vec::new();
        for (i, n) in self.neurons.iter().enumerate() {
            named.extend(prefixed(&format!("neurons.{}", i), n.named_parameters()));
        }
        named
    }

    fn tape(&self) -> &Tape<T> {
        &self.tape
    }
}

impl<T: GradNumeric> fmt::Debug for Layer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer of [")?;
        for (i, n) in self.neurons.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", n)?;
        }
        write!(f, "]")
    }
}
