//! Table assembly that refuses to re-align indexes.
use super::frame::{IndexPolicy, PandasDataFrameResult};
use super::{ResultBuilder, ResultError};
use crate::value::{OutputMapping, Table, Value};

/// Like [`PandasDataFrameResult`], but every real index must be identical
/// (same kind, dtype, labels and name) to the first one encountered. Nothing
/// is ever re-aligned, so no cell is ever filled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictIndexTypePandasDataFrameResult;

impl StrictIndexTypePandasDataFrameResult {
    pub fn build_table(&self, outputs: OutputMapping) -> Result<Table, ResultError> {
        PandasDataFrameResult::build_with(outputs, IndexPolicy::Exact)
    }
}

impl ResultBuilder for StrictIndexTypePandasDataFrameResult {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError> {
        self.build_table(outputs).map(Value::Table)
    }
}
