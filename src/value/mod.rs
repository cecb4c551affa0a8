//! The values flowing out of a graph run.
//!
//! Only shape, presence of an index and the index kind/dtype are ever inspected
//! by the result builders; cell contents are moved around untouched.
pub mod error;
pub mod frame;
pub mod index;
pub mod period;
pub mod scalar;

pub use error::ShapeError;
pub use frame::{Matrix, Series, Table};
pub use index::{DType, Index, IndexKind, IndexLabels};
pub use period::{Frequency, Period};
pub use scalar::Scalar;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Output name -> value, in the order the graph produced them.
pub type OutputMapping = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Scalar(Scalar),
    /// 1-D positional array with no index of its own.
    Vector(Vec<Scalar>),
    Series(Series),
    Table(Table),
    /// A standalone index with no payload.
    Index(Index),
    /// A plain positional sequence with no natural index.
    List(Vec<Value>),
    Map(OutputMapping),
    Matrix(Matrix),
}

impl Value {
    /// Number of rows/elements; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Scalar(_) => None,
            Value::Vector(v) => Some(v.len()),
            Value::Series(s) => Some(s.len()),
            Value::Table(t) => Some(t.num_rows()),
            Value::Index(i) => Some(i.len()),
            Value::List(l) => Some(l.len()),
            Value::Map(m) => Some(m.len()),
            Value::Matrix(m) => Some(m.shape().0),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Vector(_) => "vector",
            Value::Series(_) => "series",
            Value::Table(_) => "table",
            Value::Index(_) => "index",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Matrix(_) => "matrix",
        }
    }

    /// The index this value aligns on, if it carries one. Vectors are
    /// positional and standalone indexes are payloads; both return `None`.
    pub fn natural_index(&self) -> Option<Index> {
        match self {
            Value::Series(s) => Some(s.index().clone()),
            Value::Table(t) => Some(t.index().clone()),
            _ => None,
        }
    }

    /// Elements of a list when every element is a scalar.
    pub(crate) fn scalar_elements(items: &[Value]) -> Option<Vec<Scalar>> {
        items
            .iter()
            .map(|item| match item {
                Value::Scalar(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }
}

macro_rules! scalar_value_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self { Value::Scalar(v.into()) }
        })*
    };
}

scalar_value_from!(Scalar, i64, i32, f64, bool, &str, String, Period);

impl From<Series> for Value {
    fn from(v: Series) -> Self { Value::Series(v) }
}

impl From<Table> for Value {
    fn from(v: Table) -> Self { Value::Table(v) }
}

impl From<Index> for Value {
    fn from(v: Index) -> Self { Value::Index(v) }
}

impl From<Matrix> for Value {
    fn from(v: Matrix) -> Self { Value::Matrix(v) }
}
