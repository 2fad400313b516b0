//! Analytics error types.

use novamart_datasets::LoadError;
use novamart_domain::DomainError;
use thiserror::Error;

/// Analytics errors.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Attribution model name is not one of the five known models
    #[error("Invalid attribution model: {0}")]
    InvalidModel(String),

    /// Time bucket name is not Day, Week, Month or Quarter
    #[error("Invalid time bucket: {0}")]
    InvalidBucket(String),

    /// No labels to evaluate
    #[error("Empty input: no labels to evaluate")]
    EmptyInput,

    /// A ground-truth label outside {0, 1}
    #[error("Label {label} at index {index} is not 0 or 1")]
    LabelDomain { index: usize, label: i64 },

    /// Labels and probabilities differ in length
    #[error("Length mismatch: {labels} labels, {probabilities} probabilities")]
    LengthMismatch { labels: usize, probabilities: usize },

    /// Curve needs both classes present
    #[error("Labels contain a single class; curve is undefined")]
    DegenerateLabels,

    /// Column not in the table's schema
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Dataset load error
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl From<DomainError> for AnalyticsError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidModel(name) => Self::InvalidModel(name),
            other => Self::InvalidParameter(other.to_string()),
        }
    }
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
