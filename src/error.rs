//! Error types for DNC construction and stepping

use thiserror::Error;

/// Errors surfaced by the memory module. Every variant is a caller or
/// configuration mistake: the addressing math itself has no failure modes
/// (numerical degeneracies are absorbed by the zero-norm fallback in
/// content addressing).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DncError {
    /// A dimension in the configuration is zero
    #[error("invalid configuration: {field} must be nonzero")]
    InvalidDimension { field: &'static str },

    /// Controller emits the wrong total output width
    #[error("controller output length {actual} does not match required {expected} (output_dim + interface len)")]
    ControllerOutputMismatch { expected: usize, actual: usize },

    /// Interface vector handed to the memory module has the wrong length
    #[error("interface vector length {actual} does not match expected {expected}")]
    InterfaceLengthMismatch { expected: usize, actual: usize },

    /// Input vector does not match the configured input dimension
    #[error("input length {actual} does not match configured input dimension {expected}")]
    InputLengthMismatch { expected: usize, actual: usize },
}
