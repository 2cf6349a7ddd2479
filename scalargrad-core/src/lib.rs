//! Scalar reverse-mode automatic differentiation.
//!
//! Arithmetic on [`Value`]s is recorded on a [`Tape`]; calling
//! [`Value::backward`] propagates derivatives to every ancestor of the result.
//! The [`nn`] module builds small feed-forward networks on top of it.

pub mod autograd;
pub mod config;
pub mod error;
pub mod nn;
pub mod ops;
pub mod tape;
pub mod tape_data;
pub mod utils;
pub mod value;

pub use autograd::{backward, OpKind};
pub use config::{DivisorGrad, Negation, TapeConfig};
pub use error::AutogradError;
pub use ops::traits::GradNumeric;
pub use tape::{Checkpoint, Tape};
pub use tape_data::NodeId;
pub use value::Value;

// Re-export traits required by public functions/structs
pub use num_traits;
