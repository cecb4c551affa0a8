//! Classifies the indexes carried by a run's outputs and decides whether they
//! can be aligned into one table.
use crate::value::{DType, Index, IndexKind, Value};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Pairs an index kind with its element dtype. Two outputs can share a table
/// row axis only when their signatures agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexSignature {
    Indexed { kind: IndexKind, dtype: DType },
    /// Bare scalars and raw sequences.
    NoIndex,
}

impl IndexSignature {
    pub fn of(index: &Index) -> Self {
        IndexSignature::Indexed { kind: index.kind(), dtype: index.dtype() }
    }

    /// Signature of a value. Standalone indexes report their materialized
    /// kind, so a standalone range index classifies as `Int64Index`.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Index(index) => Self::of(&index.materialized()),
            other => other.natural_index().map_or(IndexSignature::NoIndex, |i| Self::of(&i)),
        }
    }

    pub fn is_time(&self) -> bool {
        matches!(self, IndexSignature::Indexed { kind, .. } if kind.is_time())
    }

    pub fn is_no_index(&self) -> bool {
        matches!(self, IndexSignature::NoIndex)
    }
}

impl fmt::Display for IndexSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSignature::Indexed { kind, dtype } => write!(f, "{}:::{}", kind, dtype),
            IndexSignature::NoIndex => f.write_str("no-index"),
        }
    }
}

/// Output names sharing a signature, in output order.
pub type OutputNames = SmallVec<[String; 4]>;
pub type SignatureGroups = BTreeMap<IndexSignature, OutputNames>;

/// The three views built over a run's outputs. Every output name appears in
/// exactly one group of `all_index_types`; the other two are restrictions of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexTypes {
    pub all_index_types: SignatureGroups,
    pub time_indexes: SignatureGroups,
    pub no_indexes: SignatureGroups,
}

impl IndexTypes {
    pub fn indexes_match(&self) -> bool {
        check_pandas_index_types_match(&self.all_index_types, &self.time_indexes, &self.no_indexes)
    }

    /// `sig -> [names]` pairs joined with `; `, for error messages.
    pub fn describe(&self) -> String {
        describe_groups(&self.all_index_types)
    }

    pub fn into_parts(self) -> (SignatureGroups, SignatureGroups, SignatureGroups) {
        (self.all_index_types, self.time_indexes, self.no_indexes)
    }
}

/// Builds the signature groups for `outputs`.
pub fn pandas_index_types<'a, I>(outputs: I) -> IndexTypes
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut types = IndexTypes::default();
    for (name, value) in outputs {
        let signature = IndexSignature::of_value(value);
        if signature.is_time() {
            types.time_indexes.entry(signature).or_default().push(name.clone());
        } else if signature.is_no_index() {
            types.no_indexes.entry(signature).or_default().push(name.clone());
        }
        types.all_index_types.entry(signature).or_default().push(name.clone());
    }
    types
}

/// Decides whether the classified outputs can be merged on one index.
///
/// Exactly one real signature is required; any number of `no-index` outputs
/// may ride along and are broadcast against it.
pub fn check_pandas_index_types_match(
    all_index_types: &SignatureGroups,
    time_indexes: &SignatureGroups,
    no_indexes: &SignatureGroups,
) -> bool {
    let real_signatures = all_index_types.keys().filter(|s| !s.is_no_index()).count();
    let types_match = real_signatures == 1;

    if time_indexes.len() > 1 {
        warn!(
            time_indexes = %describe_groups(time_indexes),
            "Time/datetime index type mismatches detected; these outputs cannot be aligned"
        );
    }
    debug!(
        all_index_types = %describe_groups(all_index_types),
        no_index_outputs = no_indexes.values().map(|names| names.len()).sum::<usize>(),
        real_signatures,
        types_match,
        "Checked index types"
    );
    types_match
}

fn describe_groups(groups: &SignatureGroups) -> String {
    groups
        .iter()
        .map(|(sig, names)| format!("{} -> [{}]", sig, names.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
