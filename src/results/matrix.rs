//! Positional stacking of vector outputs into a matrix.
use super::{ResultBuilder, ResultError};
use crate::value::{Matrix, OutputMapping, Scalar, Value};

/// Stacks every output as one column of a matrix, in output order.
///
/// Vector-like outputs must all share the longest length; scalars are
/// broadcast to it. When every output is a scalar the matrix has one row.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumpyMatrixResult;

/// An output reduced to what matrix assembly needs.
enum MatrixColumn {
    Broadcast(Scalar),
    Values(Vec<Scalar>),
}

impl NumpyMatrixResult {
    pub fn build_matrix(&self, outputs: OutputMapping) -> Result<Matrix, ResultError> {
        let mut columns = Vec::with_capacity(outputs.len());
        for (name, value) in outputs {
            let column = Self::to_column(&name, value)?;
            columns.push((name, column));
        }

        let num_rows = columns
            .iter()
            .filter_map(|(_, c)| match c {
                MatrixColumn::Values(v) => Some(v.len()),
                MatrixColumn::Broadcast(_) => None,
            })
            .max()
            .unwrap_or(1);

        let mut stacked = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            match column {
                MatrixColumn::Broadcast(s) => stacked.push(vec![s; num_rows]),
                MatrixColumn::Values(v) if v.len() == num_rows => stacked.push(v),
                MatrixColumn::Values(v) => {
                    return Err(ResultError::LengthMismatch { output: name, expected: num_rows, actual: v.len() });
                }
            }
        }
        Matrix::from_columns(stacked).map_err(|e| ResultError::from_shape("<matrix>", e))
    }

    fn to_column(name: &str, value: Value) -> Result<MatrixColumn, ResultError> {
        let unsupported = |kind| ResultError::UnsupportedOutput { output: name.to_string(), kind, target: "matrix" };
        match value {
            Value::Scalar(s) => Ok(MatrixColumn::Broadcast(s)),
            Value::Vector(v) => Ok(MatrixColumn::Values(v)),
            Value::Series(s) => Ok(MatrixColumn::Values(s.into_parts().0)),
            Value::Index(i) => Ok(MatrixColumn::Values(i.labels())),
            Value::List(items) => Value::scalar_elements(&items)
                .map(MatrixColumn::Values)
                .ok_or_else(|| unsupported("nested list")),
            other => Err(unsupported(other.kind_name())),
        }
    }
}

impl ResultBuilder for NumpyMatrixResult {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError> {
        self.build_matrix(outputs).map(Value::Matrix)
    }
}
