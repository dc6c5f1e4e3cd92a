//! Error types for the aggregation engine and its file loaders.

use thiserror::Error;

/// Result type used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// An aggregation would divide by zero: no posts, or nothing left after validation.
    #[error("no posts to aggregate")]
    EmptyInput,

    #[error("post {id}: sentiment label '{label}' is not one of positive, negative, neutral")]
    InvalidSentimentLabel { id: String, label: String },

    #[error("post {id}: timestamp '{value}' cannot be truncated to a calendar day")]
    MalformedTimestamp { id: String, value: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl EngineError {
    /// Returns `true` for errors caused by a single malformed record.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidSentimentLabel { .. } | EngineError::MalformedTimestamp { .. }
        )
    }
}
