//! Error types surfaced by translation, execution and decoding.

use crate::access::DataType;
use thiserror::Error;

/// Boxed provider failure kept as the `source()` of [`QueryError::ExecutionFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while running an entity query
#[derive(Error, Debug)]
pub enum QueryError {
    /// The translator met an IR node it has no textual form for
    #[error("Unsupported expression kind: {kind}")]
    UnsupportedExpressionKind { kind: String },

    /// The cursor provider could not run or continue a statement
    #[error("Execution failed: {context}: {source}")]
    ExecutionFailed {
        context: String,
        #[source]
        source: BoxError,
    },

    /// A row value cannot be coerced into the field it is mapped to
    #[error("Schema mismatch on column '{column}': expected {expected:?}, got {actual:?}")]
    SchemaMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
}

impl QueryError {
    pub fn unsupported(kind: impl Into<String>) -> Self {
        QueryError::UnsupportedExpressionKind { kind: kind.into() }
    }

    /// Wrap a provider failure.
    pub fn execution(context: impl Into<String>, source: anyhow::Error) -> Self {
        QueryError::ExecutionFailed {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
