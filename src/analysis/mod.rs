//! Static inspection of a completed run's outputs before they are assembled.
pub mod index_types;

pub use index_types::{
    check_pandas_index_types_match, pandas_index_types, IndexSignature, IndexTypes, OutputNames,
    SignatureGroups,
};
