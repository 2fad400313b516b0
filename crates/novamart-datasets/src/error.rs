//! Dataset loading errors.

use std::fmt;

use novamart_domain::DomainError;
use thiserror::Error;

use crate::catalog::Dataset;

/// What went wrong while loading a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// A required file is absent.
    MissingFile,
    /// A required column is absent, or the table has the wrong shape.
    SchemaMismatch,
    /// A cell could not be read as its column's type, or violates an invariant.
    ParseError,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingFile => "missing file",
            Self::SchemaMismatch => "schema mismatch",
            Self::ParseError => "parse error",
        })
    }
}

/// Fatal dataset loading error. The dashboard cannot start without the
/// full bundle, so callers are expected to stop on this.
#[derive(Debug, Clone, Error)]
#[error("{kind} in {table}: {detail}")]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub table: &'static str,
    pub detail: String,
}

impl LoadError {
    pub fn new(kind: LoadErrorKind, dataset: Dataset, detail: impl Into<String>) -> Self {
        Self {
            kind,
            table: dataset.table_name(),
            detail: detail.into(),
        }
    }

    pub fn missing_file(dataset: Dataset, detail: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::MissingFile, dataset, detail)
    }

    pub fn schema(dataset: Dataset, detail: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::SchemaMismatch, dataset, detail)
    }

    pub fn parse(dataset: Dataset, detail: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::ParseError, dataset, detail)
    }

    /// Map a domain invariant failure onto the load taxonomy: shape problems
    /// are schema mismatches, bad cell values are parse errors.
    pub fn from_domain(dataset: Dataset, err: &DomainError) -> Self {
        let kind = match err {
            DomainError::NotSquare { .. } | DomainError::MissingColumns(_) => {
                LoadErrorKind::SchemaMismatch
            }
            _ => LoadErrorKind::ParseError,
        };
        Self::new(kind, dataset, err.to_string())
    }
}

/// Result type for dataset loading.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_table() {
        let err = LoadError::missing_file(Dataset::Funnel, "funnel_data.csv not found");
        assert_eq!(
            err.to_string(),
            "missing file in funnel: funnel_data.csv not found"
        );
    }

    #[test]
    fn test_domain_errors_map_to_kinds() {
        let shape = LoadError::from_domain(
            Dataset::Correlation,
            &DomainError::NotSquare { labels: 3, rows: 2 },
        );
        assert_eq!(shape.kind, LoadErrorKind::SchemaMismatch);

        let value = LoadError::from_domain(
            Dataset::LearningCurve,
            &DomainError::OutOfRange {
                column: "train_score".to_string(),
                value: 1.5,
            },
        );
        assert_eq!(value.kind, LoadErrorKind::ParseError);
    }
}
