use rand::Rng;
use rand::distributions::uniform::SampleUniform;
use rand_distr::{Distribution, Uniform};

use crate::error::AutogradError;
use crate::ops::traits::GradNumeric;

/// Uniform distribution on `[low, high)` used to initialize parameters.
///
/// The default range is `[-1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformInit<T: GradNumeric = f64> {
    pub low: T,
    pub high: T,
}

impl<T: GradNumeric> UniformInit<T> {
    pub fn new(low: T, high: T) -> Self {
        UniformInit { low, high }
    }

    /// Checks that the range is finite, non-empty, and that its width
    /// `high - low` is finite too.
    ///
    /// # Errors
    /// Returns `AutogradError::InvalidConfig` otherwise.
    pub fn validate(&self) -> Result<(), AutogradError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(AutogradError::InvalidConfig(format!(
                "uniform init bounds must be finite, got [{}, {})",
                self.low, self.high
            )));
        }
        if self.low >= self.high {
            return Err(AutogradError::InvalidConfig(format!(
                "uniform init requires low < high, got [{}, {})",
                self.low, self.high
            )));
        }
        if !(self.high - self.low).is_finite() {
            return Err(AutogradError::InvalidConfig(format!(
                "uniform init range [{}, {}) is too wide to sample",
                self.low, self.high
            )));
        }
        Ok(())
    }

    /// Draws `n` samples, in order, from `rng`.
    pub fn sample_n<R>(&self, n: usize, rng: &mut R) -> Result<Vec<T>, AutogradError>
    where
        T: SampleUniform,
        R: Rng + ?Sized,
    {
        self.validate()?;
        let dist = Uniform::new(self.low, self.high);
        Ok((0..n).map(|_| dist.sample(rng)).collect())
    }
}

impl<T: GradNumeric> Default for UniformInit<T> {
    fn default() -> Self {
        UniformInit {
            low: -T::one(),
            high: T::one(),
        }
    }
}

/// Construction options shared by neurons, layers and networks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerConfig<T: GradNumeric = f64> {
    /// Distribution for weights and biases.
    pub init: UniformInit<T>,
    /// Whether each neuron carries a bias parameter.
    pub use_bias: bool,
}

impl<T: GradNumeric> LayerConfig<T> {
    pub fn with_init(mut self, init: UniformInit<T>) -> Self {
        self.init = init;
        self
    }

    pub fn with_bias(mut self, use_bias: bool) -> Self {
        self.use_bias = use_bias;
        self
    }
}

impl<T: GradNumeric> Default for LayerConfig<T> {
    fn default() -> Self {
        LayerConfig {
            init: UniformInit::default(),
            use_bias: true,
        }
    }
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
