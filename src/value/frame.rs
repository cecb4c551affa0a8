//! Labelled columns, tables and positional matrices.
use super::error::ShapeError;
use super::index::Index;
use super::scalar::{LabelKey, Scalar};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single column of cells carrying its own index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    values: Vec<Scalar>,
    index: Index,
}

impl Series {
    /// A series over the default `0..len` range index.
    pub fn new(values: Vec<Scalar>) -> Self {
        let index = Index::range(values.len());
        Self { values, index }
    }

    pub fn with_index(values: Vec<Scalar>, index: Index) -> Result<Self, ShapeError> {
        if values.len() != index.len() {
            return Err(ShapeError::LengthMismatch { expected: index.len(), actual: values.len() });
        }
        Ok(Self { values, index })
    }

    pub fn from_values<T: Into<Scalar>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::new(values.into_iter().map(Into::into).collect())
    }

    pub fn values(&self) -> &[Scalar] { &self.values }
    pub fn index(&self) -> &Index { &self.index }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn into_parts(self) -> (Vec<Scalar>, Index) {
        (self.values, self.index)
    }

    /// Re-aligns the cells onto `target` by label; labels absent from this
    /// series become `Scalar::Null`. Duplicate labels resolve to their last
    /// occurrence, callers reject them beforehand.
    pub fn reindex(self, target: &Index) -> Vec<Scalar> {
        if &self.index == target {
            return self.values;
        }
        let positions: HashMap<LabelKey, usize> = self
            .index
            .labels()
            .iter()
            .enumerate()
            .map(|(pos, label)| (LabelKey::from(label), pos))
            .collect();
        target
            .labels()
            .iter()
            .map(|label| {
                positions
                    .get(&LabelKey::from(label))
                    .and_then(|&pos| self.values.get(pos).cloned())
                    .unwrap_or(Scalar::Null)
            })
            .collect()
    }
}

/// Named columns sharing one index. Column order is insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    index: Index,
    columns: IndexMap<String, Vec<Scalar>>,
}

impl Table {
    /// An empty table over `index`.
    pub fn new(index: Index) -> Self {
        Self { index, columns: IndexMap::new() }
    }

    /// Builds a table from columns over the default range index.
    pub fn from_columns<I, K>(columns: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = (K, Vec<Scalar>)>,
        K: Into<String>,
    {
        let mut columns = columns.into_iter().peekable();
        let len = columns.peek().map_or(0, |(_, values)| values.len());
        let mut table = Self::new(Index::range(len));
        for (name, values) in columns {
            table.insert_column(name, values)?;
        }
        Ok(table)
    }

    /// Adds or replaces a column; its length must equal the index length.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Scalar>) -> Result<(), ShapeError> {
        if values.len() != self.index.len() {
            return Err(ShapeError::LengthMismatch { expected: self.index.len(), actual: values.len() });
        }
        self.columns.insert(name.into(), values);
        Ok(())
    }

    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Scalar>) -> Result<Self, ShapeError> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    pub fn index(&self) -> &Index { &self.index }
    pub fn num_rows(&self) -> usize { self.index.len() }
    pub fn num_columns(&self) -> usize { self.columns.len() }

    pub fn column(&self, name: &str) -> Option<&[Scalar]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Scalar])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// A dense row-major 2-D array of cells, with no index semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Scalar>,
}

impl Matrix {
    /// Stacks equal-length columns side by side.
    pub fn from_columns(columns: Vec<Vec<Scalar>>) -> Result<Self, ShapeError> {
        let rows = columns.first().map_or(0, Vec::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(ShapeError::LengthMismatch { expected: rows, actual: bad.len() });
        }
        let cols = columns.len();
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for column in &columns {
                data.push(column[r].clone());
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Scalar> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    pub fn row(&self, row: usize) -> Option<&[Scalar]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &Scalar> + '_ {
        let cols = self.cols;
        self.data.iter().skip(col).step_by(cols.max(1)).take(if col < cols { self.rows } else { 0 })
    }
}
