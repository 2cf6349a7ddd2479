//! Tape configuration.
//!
//! Two local gradient rules of the engine are inconsistent with the rest of the
//! operation set: the divisor's gradient in `div` is assigned rather than
//! accumulated, and `neg` produces a fresh leaf that is cut off from the graph.
//! Both are kept by default; [`TapeConfig`] selects the accumulating forms.

/// How `div(a, b)` writes the divisor's gradient during backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisorGrad {
    /// `b.grad = -g * a / b²`, overwriting anything already accumulated into `b`.
    #[default]
    Assign,
    /// `b.grad += -g * a / b²`, like every other rule.
    Accumulate,
}

/// What `neg(a)` records on the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Negation {
    /// A new leaf holding `-a`; no parent link, gradient stops here.
    #[default]
    Detached,
    /// An interior node with parent `a` and rule `a.grad += -g`.
    Tracked,
}

/// Configuration fixed when a [`Tape`](crate::Tape) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TapeConfig {
    pub divisor_grad: DivisorGrad,
    pub negation: Negation,
}

impl TapeConfig {
    /// The default rules: assigning divisor gradient, detached negation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Both rules switched to their accumulating, graph-connected forms.
    pub fn corrected() -> Self {
        Self {
            divisor_grad: DivisorGrad::Accumulate,
            negation: Negation::Tracked,
        }
    }

    pub fn with_divisor_grad(mut self, divisor_grad: DivisorGrad) -> Self {
        self.divisor_grad = divisor_grad;
        self
    }

    pub fn with_negation(mut self, negation: Negation) -> Self {
        self.negation = negation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_original_rules() {
        let config = TapeConfig::default();
        assert_eq!(config.divisor_grad, DivisorGrad::Assign);
        assert_eq!(config.negation, Negation::Detached);
        assert_eq!(config, TapeConfig::new());
    }

    #[test]
    fn test_builder_setters() {
        let config = TapeConfig::new().with_divisor_grad(DivisorGrad::Accumulate);
        assert_eq!(config.divisor_grad, DivisorGrad::Accumulate);
        assert_eq!(config.negation, Negation::Detached);

        let config = config.with_negation(Negation::Tracked);
        assert_eq!(config, TapeConfig::corrected());
    }
}
