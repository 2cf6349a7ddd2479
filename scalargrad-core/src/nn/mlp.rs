use std::fmt;

use log::debug;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use super::init::LayerConfig;
use super::layer::Layer;
use super::module::{prefixed, Module};
use crate::error::AutogradError;
use crate::ops::traits::GradNumeric;
use crate::tape::Tape;
use crate::value::Value;

/// Multi-layer perceptron: layers applied in sequence.
///
/// Every layer except the last applies ReLU; the last one is linear.
#[derive(Clone)]
pub struct Mlp<T: GradNumeric = f64> {
    layers: Vec<Layer<T>>,
    tape: Tape<T>,
}

impl<T: GradNumeric> Mlp<T> {
    /// Builds a network reading `nin` inputs, with one layer per entry of
    /// `nouts`. Layers are created in order from `rng`, so a seeded source
    /// gives reproducible parameters.
    ///
    /// # Errors
    /// `InvalidArchitecture` for an empty schedule or a zero width, and
    /// `InvalidConfig` for an invalid init range.
    pub fn new<R>(
        tape: &Tape<T>,
        nin: usize,
        nouts: &[usize],
        config: &LayerConfig<T>,
        rng: &mut R,
    ) -> Result<Self, AutogradError>
    where
        T: SampleUniform,
        R: Rng + ?Sized,
    {
        if nouts.is_empty() {
            return Err(AutogradError::InvalidArchitecture(
                "layer schedule must not be empty".to_string(),
            ));
        }
        if nin == 0 || nouts.contains(&0) {
            return Err(AutogradError::InvalidArchitecture(format!(
                "widths must be positive, got input {} and layers {:?}",
                nin, nouts
            )));
        }
        config.init.validate()?;

        let last = nouts.len() - 1;
        let mut layers = Vec::with_capacity(nouts.len());
        let mut width = nin;
        for (i, &nout) in nouts.iter().enumerate() {
            layers.push(Layer::new(tape, width, nout, i != last, config, &mut *rng)?);
            width = nout;
        }

        let mlp = Mlp {
            layers,
            tape: tape.clone(),
        };
        debug!(
            "built MLP {} -> {:?} with {} parameters",
            nin,
            nouts,
            mlp.num_parameters()
        );
        Ok(mlp)
    }

    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }

    pub fn nin(&self) -> usize {
        self.layers[0].nin()
    }

    /// Threads `input` through every layer and returns all outputs of the
    /// final layer.
    pub fn forward_all(&self, input: &[Value<T>]) -> Result<Vec<Value<T>>, AutogradError> {
        if input.len() != self.nin() {
            return Err(AutogradError::InputWidthMismatch {
                expected: self.nin(),
                actual: input.len(),
                operation: "Mlp::forward".to_string(),
            });
        }
        let mut x = input.to_vec();
        for layer in &self.layers {
            x = layer.forward(&x)?;
        }
        Ok(x)
    }
}

impl<T: GradNumeric> Module<T> for Mlp<T> {
    type Output = Value<T>;

    /// Returns the first output of the final layer; with the usual `[…, 1]`
    /// schedule that is the network's only output.
    fn forward(&self, input: &[Value<T>]) -> Result<Value<T>, AutogradError> {
        let mut outputs = self.forward_all(input)?;
        // construction guarantees a non-empty final layer
        Ok(outputs.swap_remove(0))
    }

    fn parameters(&self) -> Vec<Value<T>> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, Value<T>)> {
        let mut named = Vec::new();
        for (i, l) in self.layers.iter().enumerate() {
            named.extend(prefixed(&format!("layers.{}", i), l.named_parameters()));
        }
        named
    }

    fn tape(&self) -> &Tape<T> {
        &self.tape
    }
}

impl<T: GradNumeric> fmt::Debug for Mlp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MLP of [")?;
        for (i, l) in self.layers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", l)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
