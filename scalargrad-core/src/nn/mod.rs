//! Feed-forward networks built from scalar [`Value`](crate::Value)s.
//!
//! [`Neuron`] → [`Layer`] → [`Mlp`], all implementing [`Module`]. Parameters
//! are leaves on the tape passed at construction and are drawn from a
//! caller-provided random source.

pub mod init;
pub mod layer;
pub mod mlp;
pub mod module;
pub mod neuron;

pub use init::{LayerConfig, UniformInit};
pub use layer::Layer;
pub use mlp::Mlp;
pub use module::Module;
pub use neuron::Neuron;
