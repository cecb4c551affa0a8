//! Single-cell values and the hashable key used to align them by label.
use super::period::Period;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell: a bare graph output, a vector element or a table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Timestamp(NaiveDateTime),
    Period(Period),
}

impl Scalar {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(v) => Some(*v),
            Scalar::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self { Scalar::Int(v) }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self { Scalar::Int(v as i64) }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self { Scalar::Float(v) }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self { Scalar::Bool(v) }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self { Scalar::Str(v.to_string()) }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self { Scalar::Str(v) }
}

impl From<NaiveDateTime> for Scalar {
    fn from(v: NaiveDateTime) -> Self { Scalar::Timestamp(v) }
}

impl From<Period> for Scalar {
    fn from(v: Period) -> Self { Scalar::Period(v) }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "NaN"),
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{:?}", v),
            Scalar::Str(v) => write!(f, "{}", v),
            Scalar::Timestamp(v) => write!(f, "{}", v),
            Scalar::Period(v) => write!(f, "{}", v),
        }
    }
}

/// Hashable identity of a label. Floats compare by bit pattern, so `0.0` and
/// `-0.0` are distinct labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum LabelKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(String),
    Timestamp(NaiveDateTime),
    Period(Period),
}

impl From<&Scalar> for LabelKey {
    fn from(s: &Scalar) -> Self {
        match s {
            Scalar::Null => LabelKey::Null,
            Scalar::Bool(v) => LabelKey::Bool(*v),
            Scalar::Int(v) => LabelKey::Int(*v),
            Scalar::Float(v) => LabelKey::Float(v.to_bits()),
            Scalar::Str(v) => LabelKey::Str(v.clone()),
            Scalar::Timestamp(v) => LabelKey::Timestamp(*v),
            Scalar::Period(v) => LabelKey::Period(*v),
        }
    }
}
