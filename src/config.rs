//! Typed selection of a result builder.
//!
//! Hosts embed `ResultBuilderKind` in their own configuration and turn it into
//! a builder (or an adapter) once at startup.

use crate::results::{
    DictResult, NumpyMatrixResult, PandasDataFrameResult, ResultBuilder, StrictIndexTypePandasDataFrameResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown result builder '{0}'; expected one of: dict, numpy_matrix, pandas_data_frame, strict_pandas_data_frame")]
    UnknownResultBuilder(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultBuilderKind {
    Dict,
    NumpyMatrix,
    #[default]
    PandasDataFrame,
    StrictPandasDataFrame,
}

impl ResultBuilderKind {
    pub const ALL: [ResultBuilderKind; 4] = [
        ResultBuilderKind::Dict,
        ResultBuilderKind::NumpyMatrix,
        ResultBuilderKind::PandasDataFrame,
        ResultBuilderKind::StrictPandasDataFrame,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultBuilderKind::Dict => "dict",
            ResultBuilderKind::NumpyMatrix => "numpy_matrix",
            ResultBuilderKind::PandasDataFrame => "pandas_data_frame",
            ResultBuilderKind::StrictPandasDataFrame => "strict_pandas_data_frame",
        }
    }

    pub fn into_builder(self) -> Box<dyn ResultBuilder + Send + Sync> {
        match self {
            ResultBuilderKind::Dict => Box::new(DictResult),
            ResultBuilderKind::NumpyMatrix => Box::new(NumpyMatrixResult),
            ResultBuilderKind::PandasDataFrame => Box::new(PandasDataFrameResult),
            ResultBuilderKind::StrictPandasDataFrame => Box::new(StrictIndexTypePandasDataFrameResult),
        }
    }
}

impl FromStr for ResultBuilderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownResultBuilder(s.to_string()))
    }
}

impl fmt::Display for ResultBuilderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{OutputMapping, Value};
    use rstest::rstest;

    #[rstest]
    #[case("dict", ResultBuilderKind::Dict)]
    #[case("numpy_matrix", ResultBuilderKind::NumpyMatrix)]
    #[case(" Pandas_Data_Frame ", ResultBuilderKind::PandasDataFrame)]
    #[case("strict_pandas_data_frame", ResultBuilderKind::StrictPandasDataFrame)]
    fn test_parse(#[case] input: &str, #[case] expected: ResultBuilderKind) {
        assert_eq!(input.parse::<ResultBuilderKind>(), Ok(expected));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "polars".parse::<ResultBuilderKind>(),
            Err(ConfigError::UnknownResultBuilder("polars".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for kind in ResultBuilderKind::ALL {
            assert_eq!(kind.to_string().parse::<ResultBuilderKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_embedded_in_host_config() {
        #[derive(Deserialize)]
        struct HostConfig {
            #[serde(default)]
            result_builder: ResultBuilderKind,
        }

        let explicit: HostConfig = serde_json::from_str(r#"{"result_builder": "numpy_matrix"}"#).unwrap();
        assert_eq!(explicit.result_builder, ResultBuilderKind::NumpyMatrix);

        let defaulted: HostConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted.result_builder, ResultBuilderKind::PandasDataFrame);

        assert!(serde_json::from_str::<HostConfig>(r#"{"result_builder": "csv"}"#).is_err());
    }

    #[test]
    fn test_into_builder() {
        let outputs: OutputMapping = [("a".to_string(), Value::from(1))].into_iter().collect();
        let built = ResultBuilderKind::Dict.into_builder().build_result(outputs.clone()).unwrap();
        assert_eq!(built, Value::Map(outputs));
    }
}
