//! Result assembly and input type checking for a dataflow graph engine.
//!
//! After a run the engine hands every requested output to a `ResultBuilder`,
//! which assembles them into one artifact: a mapping, a matrix or a table
//! whose row index is reconciled across outputs. Before a run the engine asks
//! its `GraphAdapter` whether each caller-supplied input satisfies the
//! declared type of the node that consumes it.

// --- MODULE DECLARATIONS ---
pub mod adapters;
pub mod analysis;
pub mod config;
pub mod display;
pub mod results;
pub mod type_system;
pub mod value;

pub use adapters::{GraphAdapter, Node, NodeError, SimplePythonDataFrameGraphAdapter, SimplePythonGraphAdapter};
pub use config::{ConfigError, ResultBuilderKind};
pub use results::{
    DictResult, NumpyMatrixResult, PandasDataFrameResult, ResultBuilder, ResultError,
    StrictIndexTypePandasDataFrameResult,
};
pub use type_system::{check_input_type, Container, RuntimeType, TypeAnnotation};
pub use value::{Index, Matrix, OutputMapping, Scalar, Series, Table, Value};
