use crate::error::AutogradError;
use crate::ops::traits::GradNumeric;
use crate::tape::Tape;
use crate::value::Value;

/// The base trait for all network components (neurons, layers, networks).
///
/// A module owns parameter [`Value`]s recorded on a single [`Tape`]; calling
/// [`forward`](Module::forward) records new nodes on that tape.
pub trait Module<T: GradNumeric = f64>: std::fmt::Debug {
    /// What a forward pass produces: a single value or one per output unit.
    type Output;

    /// Performs a forward pass.
    ///
    /// # Errors
    /// `InputWidthMismatch` if `input` does not have the expected width, and
    /// `TapeMismatch` if an input was recorded on another tape.
    fn forward(&self, input: &[Value<T>]) -> Result<Self::Output, AutogradError>;

    /// Returns every learnable parameter, in a fixed order.
    ///
    /// The returned handles share nodes with the module, so gradients read
    /// through them are the module's gradients.
    fn parameters(&self) -> Vec<Value<T>>;

    /// Same order as [`parameters`](Module::parameters), with hierarchical
    /// names such as `layers.0.neurons.1.weights.2`.
    fn named_parameters(&self) -> Vec<(String, Value<T>)>;

    /// The tape holding this module's parameters.
    fn tape(&self) -> &Tape<T>;

    /// Promotes plain numbers to leaves on the module's tape, then calls
    /// [`forward`](Module::forward).
    fn forward_literals(&self, input: &[T]) -> Result<Self::Output, AutogradError> {
        let tape = self.tape();
        let values: Vec<Value<T>> = input.iter().map(|&x| tape.leaf(x)).collect();
        self.forward(&values)
    }

    /// Sets the gradient of every parameter to zero.
    fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }

    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }
}

/// Prefixes each name with `prefix.`.
pub(crate) fn prefixed<T: GradNumeric>(
    prefix: &str,
    named: Vec<(String, Value<T>)>,
) -> impl Iterator<Item = (String, Value<T>)> + '_ {
    named
        .into_iter()
        .map(move |(name, value)| (format!("{}.{}", prefix, name), value))
}
