//! Defines the `Node` a graph engine hands to its adapter for execution.

use crate::type_system::TypeAnnotation;
use crate::value::{OutputMapping, Value};
use std::fmt;
use thiserror::Error;

/// The error type a node callable may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A node callable: receives its bound inputs by name.
pub type NodeFn = Box<dyn Fn(&OutputMapping) -> Result<Value, BoxError> + Send + Sync>;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("node '{node}' failed: {source}")]
    Failed {
        node: String,
        #[source]
        source: BoxError,
    },
}

/// A single computation step: a name, its declared output type and the callable.
pub struct Node {
    name: String,
    output_type: TypeAnnotation,
    callable: NodeFn,
}

impl Node {
    pub fn new<F>(name: impl Into<String>, output_type: TypeAnnotation, callable: F) -> Self
    where
        F: Fn(&OutputMapping) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self { name: name.into(), output_type, callable: Box::new(callable) }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn output_type(&self) -> &TypeAnnotation { &self.output_type }

    /// Calls the node with `kwargs`, tagging any failure with the node's name.
    pub fn call(&self, kwargs: &OutputMapping) -> Result<Value, NodeError> {
        (self.callable)(kwargs).map_err(|source| NodeError::Failed { node: self.name.clone(), source })
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("output_type", &self.output_type)
            .finish_non_exhaustive()
    }
}
