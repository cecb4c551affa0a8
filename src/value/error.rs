//! Defines the error types for the value module.
use thiserror::Error;

/// Raised when a value would violate a shape invariant (e.g. a column whose
/// length differs from its table's index).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Range index step must be non-zero")]
    ZeroStep,
}
