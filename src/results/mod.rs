//! Strategies that assemble a completed run's outputs into one artifact.
//!
//! Each builder consumes the full output mapping once, at the end of a run, and
//! either returns a complete value or fails. Builders hold no mutable state and
//! are safe to share across threads.
mod error;
mod frame;
mod matrix;
mod strict;

pub use error::ResultError;
pub use frame::PandasDataFrameResult;
pub use matrix::NumpyMatrixResult;
pub use strict::StrictIndexTypePandasDataFrameResult;

use crate::value::{OutputMapping, Value};
use std::sync::Arc;

pub trait ResultBuilder {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError>;
}

impl<B: ResultBuilder + ?Sized> ResultBuilder for Box<B> {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError> {
        (**self).build_result(outputs)
    }
}

impl<B: ResultBuilder + ?Sized> ResultBuilder for Arc<B> {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError> {
        (**self).build_result(outputs)
    }
}

impl<B: ResultBuilder + ?Sized> ResultBuilder for &B {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError> {
        (**self).build_result(outputs)
    }
}

/// Returns the outputs unchanged, as a `Value::Map`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictResult;

impl ResultBuilder for DictResult {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError> {
        Ok(Value::Map(outputs))
    }
}
