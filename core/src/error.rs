use std::path::PathBuf;

use thiserror::Error;

/// Which table a structural error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Performances,
    Injuries,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Performances => f.write_str("performance log"),
            TableKind::Injuries => f.write_str("injury table"),
        }
    }
}

/// Structural failures of the chart pipeline. Bad cells are never errors,
/// they are dropped by the normalizer.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("{table} is missing required column '{column}'")]
    MissingColumn { table: TableKind, column: &'static str },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ChartError {
    /// True when the performance log lacks its date or load column: the caller
    /// shows the neutral "no data" notice instead of a chart.
    pub fn is_missing_column(&self) -> bool {
        matches!(
            self,
            ChartError::MissingColumn {
                table: TableKind::Performances,
                ..
            }
        )
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {}: {}", .path.display(), .source)]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("unknown exercise '{0}'")]
    UnknownExercise(String),
    #[error("row {index} out of range for '{exercise}' ({len} rows)")]
    RowOutOfRange {
        exercise: String,
        index: usize,
        len: usize,
    },
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("coefficient must be at least {min}, got {got}")]
    CoefficientTooSmall { min: f64, got: f64 },
    #[error("sets factor must be a positive number, got {0}")]
    InvalidSetsFactor(f64),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("a user name is required")]
    MissingUserName,
}
