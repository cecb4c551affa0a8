//! Assembly of outputs into one table aligned on a single index.
use super::{ResultBuilder, ResultError};
use crate::analysis::index_types::{self, IndexTypes, SignatureGroups};
use crate::value::{Index, OutputMapping, Table, Value};
use tracing::debug;

/// Builds a table with one column per output.
///
/// At most one real index signature may be present among the outputs; scalars
/// are broadcast against it and standalone indexes become positional columns.
/// Outputs sharing a signature but not labels are aligned on the union of
/// their labels, with missing cells set to `Scalar::Null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PandasDataFrameResult;

/// How the winning index is chosen once signatures agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexPolicy {
    /// Union of all real indexes, in first-seen order.
    Union,
    /// The first real index; every other one must equal it exactly.
    Exact,
}

impl PandasDataFrameResult {
    pub fn pandas_index_types(outputs: &OutputMapping) -> IndexTypes {
        index_types::pandas_index_types(outputs)
    }

    pub fn check_pandas_index_types_match(
        all_index_types: &SignatureGroups,
        time_indexes: &SignatureGroups,
        no_indexes: &SignatureGroups,
    ) -> bool {
        index_types::check_pandas_index_types_match(all_index_types, time_indexes, no_indexes)
    }

    pub fn build_table(&self, outputs: OutputMapping) -> Result<Table, ResultError> {
        Self::build_with(outputs, IndexPolicy::Union)
    }

    pub(crate) fn build_with(mut outputs: OutputMapping, policy: IndexPolicy) -> Result<Table, ResultError> {
        // --- PHASE 1: RAW TABLES ---
        // A lone table passes through; a table next to anything else cannot be merged.
        let tables: Vec<String> = outputs
            .iter()
            .filter(|(_, v)| matches!(v, Value::Table(_)))
            .map(|(k, _)| k.clone())
            .collect();
        if !tables.is_empty() {
            if outputs.len() == 1 {
                if let Some((_, Value::Table(table))) = outputs.pop() {
                    return Ok(table);
                }
            }
            let others = outputs.keys().filter(|k| !tables.contains(k)).cloned().collect();
            return Err(ResultError::MultipleTabularOutputs { tables, others });
        }

        // --- PHASE 2: SCALARS ONLY ---
        // Nothing to align against: one row, one column per scalar.
        if outputs.values().all(Value::is_scalar) {
            return Self::single_row(outputs);
        }

        if let Some((name, value)) = outputs.iter().find(|(_, v)| matches!(v, Value::Map(_) | Value::Matrix(_))) {
            return Err(unsupported(name, value.kind_name()));
        }

        // --- PHASE 3: INDEX RECONCILIATION ---
        let index = Self::resolve_index(&outputs, policy)?;

        // --- PHASE 4: ASSEMBLY ---
        let table = Self::assemble(outputs, index)?;
        debug!(rows = table.num_rows(), columns = table.num_columns(), index = %table.index(), "Assembled table");
        Ok(table)
    }

    /// Signature groups of the outputs that take part in alignment. Standalone
    /// indexes are positional payloads and are left out.
    fn alignment_index_types(outputs: &OutputMapping) -> IndexTypes {
        index_types::pandas_index_types(outputs.iter().filter(|(_, v)| !matches!(v, Value::Index(_))))
    }

    fn resolve_index(outputs: &OutputMapping, policy: IndexPolicy) -> Result<Index, ResultError> {
        let types = Self::alignment_index_types(outputs);
        if !types.indexes_match() {
            let mut msg = format!("index types could not be reconciled: {}", types.describe());
            if policy == IndexPolicy::Exact {
                let indexes: Vec<String> = outputs
                    .iter()
                    .filter_map(|(name, v)| v.natural_index().map(|i| format!("'{}' = {}", name, i)))
                    .collect();
                if !indexes.is_empty() {
                    msg.push_str("; indexes: ");
                    msg.push_str(&indexes.join(", "));
                }
            }
            return Err(ResultError::IncompatibleIndexes(msg));
        }

        let mut indexed = outputs.iter().filter_map(|(name, v)| v.natural_index().map(|i| (name, i)));
        let (first_name, mut winning) = indexed
            .next()
            .ok_or_else(|| ResultError::IncompatibleIndexes("no output carries an index to align against".into()))?;

        for (name, index) in indexed {
            if index == winning {
                continue;
            }
            match policy {
                IndexPolicy::Exact => {
                    debug!(output = %name, canonical = %first_name, "Index values differ from canonical index");
                    return Err(ResultError::IncompatibleIndexes(format!(
                        "index of output '{}' ({}) is not identical to index of output '{}' ({})",
                        name, index, first_name, winning
                    )));
                }
                IndexPolicy::Union => {
                    if index.has_duplicates() || winning.has_duplicates() {
                        return Err(ResultError::IncompatibleIndexes(format!(
                            "index of output '{}' ({}) differs from {} and duplicate labels prevent alignment",
                            name, index, winning
                        )));
                    }
                    winning = winning.union(&index);
                }
            }
        }
        Ok(winning)
    }

    fn assemble(outputs: OutputMapping, index: Index) -> Result<Table, ResultError> {
        let rows = index.len();
        let mut table = Table::new(index);
        for (name, value) in outputs {
            let column = match value {
                Value::Scalar(s) => vec![s; rows],
                Value::Vector(v) => v,
                Value::Series(s) => s.reindex(table.index()),
                Value::Index(i) => i.labels(),
                Value::List(items) => {
                    Value::scalar_elements(&items).ok_or_else(|| unsupported(&name, "nested list"))?
                }
                other => return Err(unsupported(&name, other.kind_name())),
            };
            table
                .insert_column(name.clone(), column)
                .map_err(|e| ResultError::from_shape(&name, e))?;
        }
        Ok(table)
    }

    fn single_row(outputs: OutputMapping) -> Result<Table, ResultError> {
        let rows = usize::from(!outputs.is_empty());
        let mut table = Table::new(Index::range(rows));
        for (name, value) in outputs {
            let column = match value {
                Value::Scalar(s) => vec![s],
                other => return Err(unsupported(&name, other.kind_name())),
            };
            table
                .insert_column(name.clone(), column)
                .map_err(|e| ResultError::from_shape(&name, e))?;
        }
        Ok(table)
    }
}

fn unsupported(output: &str, kind: &'static str) -> ResultError {
    ResultError::UnsupportedOutput { output: output.to_string(), kind, target: "table" }
}

impl ResultBuilder for PandasDataFrameResult {
    fn build_result(&self, outputs: OutputMapping) -> Result<Value, ResultError> {
        self.build_table(outputs).map(Value::Table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Scalar, Series};
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::rstest;

    fn ints(values: &[i64]) -> Vec<Scalar> {
        values.iter().map(|&v| Scalar::Int(v)).collect()
    }

    fn series(values: &[i64]) -> Value {
        Value::Series(Series::new(ints(values)))
    }

    fn table(columns: &[(&str, Vec<i64>)]) -> Table {
        Table::from_columns(columns.iter().map(|(k, v)| (*k, ints(v)))).unwrap()
    }

    fn outputs(entries: Vec<(&str, Value)>) -> OutputMapping {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn month_starts() -> Vec<NaiveDateTime> {
        (1..=3)
            .map(|m| NaiveDate::from_ymd_opt(2022, m, 1).unwrap().and_hms_opt(0, 0, 0).unwrap())
            .collect()
    }

    #[rstest]
    #[case::single_scalar(outputs(vec![("a", Value::from(1))]), table(&[("a", vec![1])]))]
    #[case::single_series(outputs(vec![("a", series(&[1, 2, 3]))]), table(&[("a", vec![1, 2, 3])]))]
    #[case::single_dataframe(
        outputs(vec![("a", Value::Table(table(&[("a", vec![1, 2, 3]), ("b", vec![11, 12, 13])])))]),
        table(&[("a", vec![1, 2, 3]), ("b", vec![11, 12, 13])])
    )]
    #[case::multiple_scalars(
        outputs(vec![("a", Value::from(1)), ("bar", Value::from(2))]),
        table(&[("a", vec![1]), ("bar", vec![2])])
    )]
    #[case::multiple_series(
        outputs(vec![("a", series(&[1, 2, 3])), ("b", series(&[11, 12, 13]))]),
        table(&[("a", vec![1, 2, 3]), ("b", vec![11, 12, 13])])
    )]
    #[case::multiple_series_with_scalar(
        outputs(vec![("a", series(&[1, 2, 3])), ("b", series(&[11, 12, 13])), ("c", Value::from(1))]),
        table(&[("a", vec![1, 2, 3]), ("b", vec![11, 12, 13]), ("c", vec![1, 1, 1])])
    )]
    #[case::multiple_series_with_index(
        outputs(vec![("a", series(&[1, 2, 3])), ("b", series(&[11, 12, 13])), ("c", Value::Index(Index::range(3)))]),
        table(&[("a", vec![1, 2, 3]), ("b", vec![11, 12, 13]), ("c", vec![0, 1, 2])])
    )]
    #[case::vector_and_list_by_position(
        outputs(vec![
            ("s", series(&[1, 2])),
            ("a", Value::Vector(ints(&[4, 5]))),
            ("b", Value::List(vec![Value::from(7), Value::from(8)])),
        ]),
        table(&[("s", vec![1, 2]), ("a", vec![4, 5]), ("b", vec![7, 8])])
    )]
    fn test_build_result(#[case] outputs: OutputMapping, #[case] expected: Table) {
        let actual = PandasDataFrameResult.build_table(outputs).unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::multiple_dataframes(outputs(vec![
        ("a", Value::Table(table(&[("a", vec![1, 2, 3]), ("b", vec![11, 12, 13])]))),
        ("b", Value::Table(table(&[("c", vec![1, 3, 5]), ("d", vec![14, 15, 16])]))),
    ]))]
    #[case::multiple_series_with_dataframe(outputs(vec![
        ("a", series(&[1, 2, 3])),
        ("b", series(&[11, 12, 13])),
        ("c", Value::Table(table(&[("d", vec![0, 0, 0])]))),
    ]))]
    fn test_build_result_rejects_tables(#[case] outputs: OutputMapping) {
        let err = PandasDataFrameResult.build_table(outputs).unwrap_err();
        assert!(matches!(err, ResultError::MultipleTabularOutputs { .. }), "got {:?}", err);
    }

    #[test]
    fn test_multiple_tabular_error_names_outputs() {
        let outputs = outputs(vec![("s", series(&[1])), ("t", Value::Table(table(&[("d", vec![0])])))]);
        let err = PandasDataFrameResult.build_table(outputs).unwrap_err();
        assert_eq!(err, ResultError::MultipleTabularOutputs { tables: vec!["t".into()], others: vec!["s".into()] });
    }

    #[test]
    fn test_time_index_with_scalar_broadcasts() {
        let ts = Series::with_index(ints(&[1, 2, 3]), Index::datetime(month_starts())).unwrap();
        let outputs = outputs(vec![("a", Value::Series(ts)), ("b", Value::from(4))]);
        let actual = PandasDataFrameResult.build_table(outputs).unwrap();
        assert_eq!(actual.index(), &Index::datetime(month_starts()));
        assert_eq!(actual.column("b").unwrap(), &ints(&[4, 4, 4])[..]);
    }

    #[test]
    fn test_conflicting_signatures_are_rejected() {
        let ts = Series::with_index(ints(&[1, 2, 3]), Index::datetime(month_starts())).unwrap();
        let outputs = outputs(vec![("a", series(&[1, 2, 3])), ("b", Value::Series(ts))]);
        let err = PandasDataFrameResult.build_table(outputs).unwrap_err();
        let ResultError::IncompatibleIndexes(msg) = err else { panic!("unexpected error {:?}", err) };
        assert!(msg.contains("RangeIndex:::int64 -> [a]"), "{}", msg);
        assert!(msg.contains("DatetimeIndex:::datetime64[ns] -> [b]"), "{}", msg);
    }

    #[test]
    fn test_scalars_and_lists_without_index_are_rejected() {
        let outputs = outputs(vec![("a", Value::from(1)), ("b", Value::List(vec![Value::from(2)]))]);
        let err = PandasDataFrameResult.build_table(outputs).unwrap_err();
        assert!(matches!(err, ResultError::IncompatibleIndexes(_)));
    }

    #[test]
    fn test_vectors_without_index_are_rejected() {
        let outputs = outputs(vec![("a", Value::Vector(ints(&[4, 5]))), ("b", Value::Vector(ints(&[6, 7])))]);
        let err = PandasDataFrameResult.build_table(outputs).unwrap_err();
        assert!(matches!(err, ResultError::IncompatibleIndexes(_)), "got {:?}", err);
    }

    #[rstest]
    #[case::short_vector(
        outputs(vec![("a", series(&[1, 2, 3])), ("b", Value::Vector(ints(&[7, 8])))]),
        ResultError::LengthMismatch { output: "b".into(), expected: 3, actual: 2 }
    )]
    #[case::ragged_vectors(
        outputs(vec![("s", series(&[1, 2, 3])), ("a", Value::Vector(ints(&[1, 2, 3]))), ("b", Value::Vector(ints(&[7])))]),
        ResultError::LengthMismatch { output: "b".into(), expected: 3, actual: 1 }
    )]
    #[case::long_vector(
        outputs(vec![("a", series(&[1])), ("b", Value::Vector(ints(&[7, 8])))]),
        ResultError::LengthMismatch { output: "b".into(), expected: 1, actual: 2 }
    )]
    fn test_vector_length_must_match_index(#[case] outputs: OutputMapping, #[case] expected: ResultError) {
        assert_eq!(PandasDataFrameResult.build_table(outputs).unwrap_err(), expected);
    }

    #[test]
    fn test_vector_assigned_by_position_against_explicit_index() {
        let s = Series::with_index(ints(&[1, 2, 3]), Index::int(vec![10, 20, 30])).unwrap();
        let outputs = outputs(vec![("a", Value::Series(s)), ("b", Value::Vector(ints(&[7, 8, 9])))]);
        let actual = PandasDataFrameResult.build_table(outputs).unwrap();
        assert_eq!(actual.index(), &Index::int(vec![10, 20, 30]));
        assert_eq!(actual.column("b").unwrap(), &ints(&[7, 8, 9])[..]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = Series::with_index(ints(&[1, 2]), Index::int(vec![0, 1])).unwrap();
        let b = Series::with_index(ints(&[20, 30]), Index::int(vec![1, 2])).unwrap();
        let outputs = outputs(vec![("a", Value::Series(a)), ("b", Value::Series(b)), ("c", Value::from(5))]);
        let first = PandasDataFrameResult.build_result(outputs.clone()).unwrap();
        let second = PandasDataFrameResult.build_result(outputs).unwrap();
        assert_eq!(first, second);
        let Value::Table(table) = first else { panic!("expected a table") };
        assert_eq!(table.index(), &Index::int(vec![0, 1, 2]));
        assert_eq!(table.column("c").unwrap(), &ints(&[5, 5, 5])[..]);
    }

    #[test]
    fn test_loose_signature_error_lists_groups_only() {
        let outputs = outputs(vec![
            ("a", Value::Series(Series::with_index(ints(&[1]), Index::int(vec![0])).unwrap())),
            ("b", Value::Series(Series::with_index(ints(&[1]), Index::float(vec![0.0])).unwrap())),
        ]);
        let Err(ResultError::IncompatibleIndexes(msg)) = PandasDataFrameResult.build_table(outputs) else {
            panic!("expected an index mismatch");
        };
        assert!(!msg.contains("indexes:"), "{}", msg);
    }

    #[test]
    fn test_same_signature_different_labels_are_aligned() {
        let a = Series::with_index(ints(&[1, 2]), Index::int(vec![0, 1])).unwrap();
        let b = Series::with_index(ints(&[20, 30]), Index::int(vec![1, 2])).unwrap();
        let outputs = outputs(vec![("a", Value::Series(a)), ("b", Value::Series(b))]);
        let actual = PandasDataFrameResult.build_table(outputs).unwrap();
        assert_eq!(actual.index(), &Index::int(vec![0, 1, 2]));
        assert_eq!(actual.column("a").unwrap(), &[Scalar::Int(1), Scalar::Int(2), Scalar::Null][..]);
        assert_eq!(actual.column("b").unwrap(), &[Scalar::Null, Scalar::Int(20), Scalar::Int(30)][..]);
    }

    #[test]
    fn test_duplicate_labels_block_alignment() {
        let a = Series::with_index(ints(&[1, 2]), Index::int(vec![0, 0])).unwrap();
        let b = Series::with_index(ints(&[3]), Index::int(vec![1])).unwrap();
        let outputs = outputs(vec![("a", Value::Series(a)), ("b", Value::Series(b))]);
        assert!(matches!(
            PandasDataFrameResult.build_table(outputs),
            Err(ResultError::IncompatibleIndexes(_))
        ));
    }

    #[test]
    fn test_index_payload_length_must_match() {
        let outputs = outputs(vec![("a", series(&[1, 2, 3])), ("i", Value::Index(Index::range(2)))]);
        let err = PandasDataFrameResult.build_table(outputs).unwrap_err();
        assert_eq!(err, ResultError::LengthMismatch { output: "i".into(), expected: 3, actual: 2 });
    }

    #[test]
    fn test_map_output_is_unsupported() {
        let outputs = outputs(vec![("a", series(&[1])), ("m", Value::Map(OutputMapping::new()))]);
        let err = PandasDataFrameResult.build_table(outputs).unwrap_err();
        assert!(matches!(err, ResultError::UnsupportedOutput { kind: "map", .. }));
    }

    #[test]
    fn test_empty_outputs_build_empty_table() {
        let actual = PandasDataFrameResult.build_table(OutputMapping::new()).unwrap();
        assert_eq!(actual.num_rows(), 0);
        assert_eq!(actual.num_columns(), 0);
    }

    #[test]
    fn test_column_order_follows_outputs() {
        let outputs = outputs(vec![("z", series(&[1])), ("a", Value::from(2)), ("m", series(&[3]))]);
        let actual = PandasDataFrameResult.build_table(outputs).unwrap();
        assert_eq!(actual.column_names().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }
}
