use thiserror::Error;

/// Custom error type for the scalargrad engine and its `nn` layer.
///
/// The numeric core has no recoverable failure: division by zero follows the
/// host floating-point convention. Errors only arise when values from two
/// different tapes are combined, when the data of a computed node is
/// overwritten, or when a network is built or called with inconsistent
/// widths.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum AutogradError {
    #[error("Operands of '{operation}' were recorded on different tapes")]
    TapeMismatch { operation: String },

    #[error("Input width mismatch during {operation}: expected {expected}, got {actual}")]
    InputWidthMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Cannot overwrite the data of node #{id}: it was computed by '{op}', only leaves are writable")]
    NotALeaf { id: usize, op: String },

    #[error("Invalid architecture: {0}")]
    InvalidArchitecture(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
