//! Defines the error types for the results module.
use crate::value::ShapeError;
use thiserror::Error;

/// A failed `build_result` call. Builders never return a partially assembled
/// artifact alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResultError {
    #[error("Output '{output}' has length {actual}, which does not match the expected length {expected}")]
    LengthMismatch { output: String, expected: usize, actual: usize },
    #[error(
        "Cannot combine multiple already-tabular outputs; at most one raw table output is supported \
         (tables: {tables:?}, other outputs: {others:?})"
    )]
    MultipleTabularOutputs { tables: Vec<String>, others: Vec<String> },
    #[error("Incompatible indexes: {0}")]
    IncompatibleIndexes(String),
    #[error("Output '{output}' is a {kind} and cannot be assembled into a {target}")]
    UnsupportedOutput { output: String, kind: &'static str, target: &'static str },
}

impl ResultError {
    /// Attributes a shape violation to the output that caused it.
    pub(crate) fn from_shape(output: &str, err: ShapeError) -> Self {
        match err {
            ShapeError::LengthMismatch { expected, actual } => {
                ResultError::LengthMismatch { output: output.to_string(), expected, actual }
            }
            ShapeError::ZeroStep => ResultError::IncompatibleIndexes(format!("output '{}': {}", output, err)),
        }
    }
}
