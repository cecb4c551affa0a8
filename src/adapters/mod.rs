//! Adapters: the object a graph engine talks to for type checks, node
//! execution and final result assembly.
//!
//! An adapter is a `ResultBuilder` plus the hooks the engine calls before and
//! during execution. The provided adapters delegate result-building to an
//! injected builder.
mod node;

pub use node::{BoxError, Node, NodeError, NodeFn};

use crate::config::ResultBuilderKind;
use crate::results::{PandasDataFrameResult, ResultBuilder, ResultError};
use crate::type_system::{check_input_type, TypeAnnotation};
use crate::value::{OutputMapping, Value};

pub trait GraphAdapter: ResultBuilder {
    /// Whether `candidate` may be bound to an input declared as `declared`.
    fn check_input_type(&self, declared: &TypeAnnotation, candidate: &Value) -> bool;

    /// Whether a node producing `node_type` can feed an input declared as `input_type`.
    fn check_node_type_equivalence(&self, node_type: &TypeAnnotation, input_type: &TypeAnnotation) -> bool {
        node_type == input_type
    }

    fn execute_node(&self, node: &Node, kwargs: &OutputMapping) -> Result<Value, NodeError> {
        node.call(kwargs)
    }
}

/// Delegates result-building to the builder it was constructed with.
#[derive(Debug, Clone)]
pub struct SimplePythonGraphAdapter<B> {
    result_builder: B,
}

impl<B: ResultBuilder> SimplePythonGraphAdapter<B> {
    pub fn new(result_builder: B) -> Self {
        Self { result_builder }
    }

    pub fn result_builder(&self) -> &B {
        &self.result_builder
    }
}

impl SimplePythonGraphAdapter<Box<dyn ResultBuilder + Send + Sync>> {
    /// Builds an adapter around the builder selected by `kind`.
    pub fn from_kind(kind: ResultBuilderKind) -> Self {
        Self::new(kind.into_builder())
    }
}

impl<B: ResultBuilder> ResultBuilder for SimplePythonGraphAdapter<B> {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError> {
        self.result_builder.build_result(outputs)
    }
}

impl<B: ResultBuilder> GraphAdapter for SimplePythonGraphAdapter<B> {
    fn check_input_type(&self, declared: &TypeAnnotation, candidate: &Value) -> bool {
        check_input_type(declared, candidate)
    }
}

/// Builds tables with `PandasDataFrameResult`.
#[derive(Debug, Clone, Default)]
pub struct SimplePythonDataFrameGraphAdapter {
    inner: SimplePythonGraphAdapter<PandasDataFrameResult>,
}

impl SimplePythonDataFrameGraphAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SimplePythonGraphAdapter<PandasDataFrameResult> {
    fn default() -> Self {
        Self::new(PandasDataFrameResult)
    }
}

impl ResultBuilder for SimplePythonDataFrameGraphAdapter {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError> {
        self.inner.build_result(outputs)
    }
}

impl GraphAdapter for SimplePythonDataFrameGraphAdapter {
    fn check_input_type(&self, declared: &TypeAnnotation, candidate: &Value) -> bool {
        check_input_type(declared, candidate)
    }
}
