//! Ordered label sequences attached to series and tables.
//!
//! The kind and element dtype of an index are derived from the storage
//! variant of its labels, so a kind/dtype pair that cannot occur is never
//! representable.
use super::error::ShapeError;
use super::period::{Frequency, Period};
use super::scalar::{LabelKey, Scalar};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The structural family of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndexKind {
    RangeInteger,
    ExplicitInteger,
    Float,
    Datetime,
    Period,
    Generic,
}

impl IndexKind {
    pub fn name(&self) -> &'static str {
        match self {
            IndexKind::RangeInteger => "RangeIndex",
            IndexKind::ExplicitInteger => "Int64Index",
            IndexKind::Float => "Float64Index",
            IndexKind::Datetime => "DatetimeIndex",
            IndexKind::Period => "PeriodIndex",
            IndexKind::Generic => "Index",
        }
    }

    /// Datetime and period indexes are the time-based kinds.
    pub fn is_time(&self) -> bool {
        matches!(self, IndexKind::Datetime | IndexKind::Period)
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element dtype of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DType {
    Int64,
    Float64,
    DatetimeNs,
    Period(Frequency),
    Object,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Int64 => f.write_str("int64"),
            DType::Float64 => f.write_str("float64"),
            DType::DatetimeNs => f.write_str("datetime64[ns]"),
            DType::Period(freq) => write!(f, "period[{}]", freq),
            DType::Object => f.write_str("object"),
        }
    }
}

/// Storage of index labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexLabels {
    /// `start..stop` by `step`, never materialized.
    Range { start: i64, stop: i64, step: i64 },
    Int(Vec<i64>),
    Float(Vec<f64>),
    Datetime(Vec<NaiveDateTime>),
    /// Periods are stored by their start date; all share `freq`.
    Period { freq: Frequency, starts: Vec<NaiveDate> },
    Object(Vec<Scalar>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    labels: IndexLabels,
    name: Option<String>,
}

impl Index {
    /// The default `0..len` range index.
    pub fn range(len: usize) -> Self {
        Self::from_labels(IndexLabels::Range { start: 0, stop: len as i64, step: 1 })
    }

    pub fn range_with_step(start: i64, stop: i64, step: i64) -> Result<Self, ShapeError> {
        if step == 0 {
            return Err(ShapeError::ZeroStep);
        }
        Ok(Self::from_labels(IndexLabels::Range { start, stop, step }))
    }

    pub fn int(labels: Vec<i64>) -> Self {
        Self::from_labels(IndexLabels::Int(labels))
    }

    pub fn float(labels: Vec<f64>) -> Self {
        Self::from_labels(IndexLabels::Float(labels))
    }

    pub fn datetime(labels: Vec<NaiveDateTime>) -> Self {
        Self::from_labels(IndexLabels::Datetime(labels))
    }

    /// Builds a period index; every date is normalized to the start of the
    /// period of `freq` containing it.
    pub fn period(freq: Frequency, dates: Vec<NaiveDate>) -> Self {
        let starts = dates.into_iter().map(|d| Period::containing(freq, d).start).collect();
        Self::from_labels(IndexLabels::Period { freq, starts })
    }

    pub fn object(labels: Vec<Scalar>) -> Self {
        Self::from_labels(IndexLabels::Object(labels))
    }

    pub fn from_labels(labels: IndexLabels) -> Self {
        Self { labels, name: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn labels_storage(&self) -> &IndexLabels {
        &self.labels
    }

    pub fn kind(&self) -> IndexKind {
        match &self.labels {
            IndexLabels::Range { .. } => IndexKind::RangeInteger,
            IndexLabels::Int(_) => IndexKind::ExplicitInteger,
            IndexLabels::Float(_) => IndexKind::Float,
            IndexLabels::Datetime(_) => IndexKind::Datetime,
            IndexLabels::Period { .. } => IndexKind::Period,
            IndexLabels::Object(_) => IndexKind::Generic,
        }
    }

    pub fn dtype(&self) -> DType {
        match &self.labels {
            IndexLabels::Range { .. } | IndexLabels::Int(_) => DType::Int64,
            IndexLabels::Float(_) => DType::Float64,
            IndexLabels::Datetime(_) => DType::DatetimeNs,
            IndexLabels::Period { freq, .. } => DType::Period(*freq),
            IndexLabels::Object(_) => DType::Object,
        }
    }

    pub fn len(&self) -> usize {
        match &self.labels {
            IndexLabels::Range { start, stop, step } => range_len(*start, *stop, *step),
            IndexLabels::Int(v) => v.len(),
            IndexLabels::Float(v) => v.len(),
            IndexLabels::Datetime(v) => v.len(),
            IndexLabels::Period { starts, .. } => starts.len(),
            IndexLabels::Object(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label at position `i`, as a cell value.
    pub fn label(&self, i: usize) -> Option<Scalar> {
        if i >= self.len() {
            return None;
        }
        let label = match &self.labels {
            IndexLabels::Range { start, step, .. } => Scalar::Int((*start as i128 + *step as i128 * i as i128) as i64),
            IndexLabels::Int(v) => Scalar::Int(v[i]),
            IndexLabels::Float(v) => Scalar::Float(v[i]),
            IndexLabels::Datetime(v) => Scalar::Timestamp(v[i]),
            IndexLabels::Period { freq, starts } => Scalar::Period(Period { freq: *freq, start: starts[i] }),
            IndexLabels::Object(v) => v[i].clone(),
        };
        Some(label)
    }

    pub fn labels(&self) -> Vec<Scalar> {
        (0..self.len()).filter_map(|i| self.label(i)).collect()
    }

    /// A range index expanded into explicit integer labels. Any other kind is
    /// returned unchanged.
    pub fn materialized(&self) -> Index {
        match &self.labels {
            IndexLabels::Range { .. } => Index {
                labels: IndexLabels::Int(self.labels().iter().filter_map(Scalar::as_i64).collect()),
                name: self.name.clone(),
            },
            _ => self.clone(),
        }
    }

    pub fn has_duplicates(&self) -> bool {
        if matches!(self.labels, IndexLabels::Range { .. }) {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.len());
        self.labels().iter().any(|l| !seen.insert(LabelKey::from(l)))
    }

    /// Labels of `self` followed by the labels of `other` not already present.
    ///
    /// The name survives only when both indexes carry the same name. When the
    /// union is exactly `other`, `other` is returned so range indexes stay ranges.
    pub fn union(&self, other: &Index) -> Index {
        let mut seen: HashSet<LabelKey> = HashSet::with_capacity(self.len() + other.len());
        let mut merged = Vec::with_capacity(self.len() + other.len());
        for label in self.labels().into_iter().chain(other.labels()) {
            if seen.insert(LabelKey::from(&label)) {
                merged.push(label);
            }
        }

        let name = if self.name == other.name { self.name.clone() } else { None };
        if merged.len() == self.len() {
            return Index { labels: self.labels.clone(), name };
        }
        if merged == other.labels() {
            return Index { labels: other.labels.clone(), name };
        }
        Index { labels: self.labels.collect_like(merged), name }
    }
}

impl IndexLabels {
    /// Rebuilds storage of the same variant from cell values. Values that do
    /// not fit the variant are skipped.
    fn collect_like(&self, values: Vec<Scalar>) -> IndexLabels {
        match self {
            IndexLabels::Range { .. } | IndexLabels::Int(_) => {
                IndexLabels::Int(values.iter().filter_map(Scalar::as_i64).collect())
            }
            IndexLabels::Float(_) => IndexLabels::Float(
                values
                    .iter()
                    .filter_map(|v| match v {
                        Scalar::Float(f) => Some(*f),
                        _ => None,
                    })
                    .collect(),
            ),
            IndexLabels::Datetime(_) => IndexLabels::Datetime(
                values
                    .iter()
                    .filter_map(|v| match v {
                        Scalar::Timestamp(t) => Some(*t),
                        _ => None,
                    })
                    .collect(),
            ),
            IndexLabels::Period { freq, .. } => IndexLabels::Period {
                freq: *freq,
                starts: values
                    .iter()
                    .filter_map(|v| match v {
                        Scalar::Period(p) => Some(p.start),
                        _ => None,
                    })
                    .collect(),
            },
            IndexLabels::Object(_) => IndexLabels::Object(values),
        }
    }
}

fn range_len(start: i64, stop: i64, step: i64) -> usize {
    if (step > 0 && stop > start) || (step < 0 && stop < start) {
        // Span and step in u64 so ranges crossing zero cannot overflow.
        let span = stop.abs_diff(start);
        ((span - 1) / step.unsigned_abs() + 1) as usize
    } else {
        0
    }
}

const DISPLAY_LABELS: usize = 5;

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:::{}[", self.kind(), self.dtype())?;
        let len = self.len();
        for i in 0..len.min(DISPLAY_LABELS) {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(label) = self.label(i) {
                write!(f, "{}", label)?;
            }
        }
        if len > DISPLAY_LABELS {
            write!(f, ", ... ({} total)", len)?;
        }
        f.write_str("]")?;
        if let Some(name) = &self.name {
            write!(f, " name='{}'", name)?;
        }
        Ok(())
    }
}
