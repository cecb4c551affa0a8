//! Declared types and the runtime types of values.
use crate::value::{Scalar, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The runtime kind of a `Value`, plus the `Object` top type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeType {
    Object,
    None,
    Bool,
    Int,
    Float,
    Str,
    Timestamp,
    Period,
    Vector,
    Matrix,
    Series,
    Table,
    Index,
    List,
    Map,
}

impl RuntimeType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Scalar(s) => match s {
                Scalar::Null => RuntimeType::None,
                Scalar::Bool(_) => RuntimeType::Bool,
                Scalar::Int(_) => RuntimeType::Int,
                Scalar::Float(_) => RuntimeType::Float,
                Scalar::Str(_) => RuntimeType::Str,
                Scalar::Timestamp(_) => RuntimeType::Timestamp,
                Scalar::Period(_) => RuntimeType::Period,
            },
            Value::Vector(_) => RuntimeType::Vector,
            Value::Matrix(_) => RuntimeType::Matrix,
            Value::Series(_) => RuntimeType::Series,
            Value::Table(_) => RuntimeType::Table,
            Value::Index(_) => RuntimeType::Index,
            Value::List(_) => RuntimeType::List,
            Value::Map(_) => RuntimeType::Map,
        }
    }

    /// Immediate supertype; `None` only for `Object`.
    pub fn supertype(&self) -> Option<RuntimeType> {
        match self {
            RuntimeType::Object => None,
            RuntimeType::Bool => Some(RuntimeType::Int),
            _ => Some(RuntimeType::Object),
        }
    }

    /// Walks the supertype chain. `Int` and `Float` are unrelated.
    pub fn is_subtype_of(&self, other: RuntimeType) -> bool {
        let mut current = Some(*self);
        while let Some(t) = current {
            if t == other {
                return true;
            }
            current = t.supertype();
        }
        false
    }

    pub fn name(&self) -> &'static str {
        match self {
            RuntimeType::Object => "object",
            RuntimeType::None => "none",
            RuntimeType::Bool => "bool",
            RuntimeType::Int => "int",
            RuntimeType::Float => "float",
            RuntimeType::Str => "str",
            RuntimeType::Timestamp => "timestamp",
            RuntimeType::Period => "period",
            RuntimeType::Vector => "vector",
            RuntimeType::Matrix => "matrix",
            RuntimeType::Series => "series",
            RuntimeType::Table => "table",
            RuntimeType::Index => "index",
            RuntimeType::List => "list",
            RuntimeType::Map => "map",
        }
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outer kind of a generic container whose parameters are erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    List,
    Mapping,
}

impl Container {
    /// The runtime type an instance of this container must have.
    pub fn runtime_type(&self) -> RuntimeType {
        match self {
            Container::List => RuntimeType::List,
            Container::Mapping => RuntimeType::Map,
        }
    }
}

/// A declared input type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeAnnotation {
    Any,
    /// An unconstrained type variable; matches anything.
    TypeVar(String),
    Generic(Container),
    Union(Vec<TypeAnnotation>),
    Exact(RuntimeType),
}

impl TypeAnnotation {
    pub fn exact(t: RuntimeType) -> Self {
        TypeAnnotation::Exact(t)
    }

    pub fn type_var(name: impl Into<String>) -> Self {
        TypeAnnotation::TypeVar(name.into())
    }

    pub fn union(alternatives: impl IntoIterator<Item = TypeAnnotation>) -> Self {
        TypeAnnotation::Union(alternatives.into_iter().collect())
    }
}

impl From<RuntimeType> for TypeAnnotation {
    fn from(t: RuntimeType) -> Self {
        TypeAnnotation::Exact(t)
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAnnotation::Any => f.write_str("Any"),
            TypeAnnotation::TypeVar(name) => write!(f, "~{}", name),
            TypeAnnotation::Generic(Container::List) => f.write_str("List[...]"),
            TypeAnnotation::Generic(Container::Mapping) => f.write_str("Mapping[...]"),
            TypeAnnotation::Union(alternatives) => {
                f.write_str("Union[")?;
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", alt)?;
                }
                f.write_str("]")
            }
            TypeAnnotation::Exact(t) => write!(f, "{}", t),
        }
    }
}
