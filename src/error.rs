use std::path::PathBuf;

use thiserror::Error;

use crate::data::ratio::RatioError;

/// Faults raised while reading a benchmark log into a [`Dataset`].
///
/// Every variant aborts the whole file: a dataset is either complete or
/// not produced at all.
///
/// [`Dataset`]: crate::data::model::Dataset
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {}: {source}", .path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A group header or metric carries a value that does not parse.
    #[error("line {line}{}: bad {field} value '{token}'", group_suffix(.group))]
    MalformedValue {
        /// 1-based line number.
        line: usize,
        /// `n` of the group being read, if one was open.
        group: Option<u64>,
        field: String,
        token: String,
    },

    #[error("line {line}: {field} appears before the first n= header")]
    OrphanMetric { line: usize, field: String },

    #[error("line {line} (n={group}): {field} already recorded for this group")]
    DuplicateMetric {
        line: usize,
        group: u64,
        field: String,
    },

    #[error("series {field} has no value for n={group}")]
    MissingValue { field: String, group: u64 },

    #[error("series {field} is not part of this dataset")]
    UnknownSeries { field: String },

    #[error("zero denominator ({field}) at n={group}")]
    DivisionByZero { field: String, group: u64 },

    #[error(transparent)]
    Ratio(#[from] RatioError),
}

fn group_suffix(group: &Option<u64>) -> String {
    match group {
        Some(n) => format!(" (n={n})"),
        None => String::new(),
    }
}

/// Faults raised while writing an exported table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV output: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet output: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("column {column} has {actual} values, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
}
