//! Query pipeline error types
//!
//! Error codes:
//! - QUERY_EMPTY_AGGREGATION
//! - QUERY_DUPLICATE_KEY
//! - QUERY_MISSING_REFERENCE
//! - QUERY_INVALID_COMPARISON
//!
//! None of these is fatal. Each error is local to the query that raised it.

use thiserror::Error;

use crate::index::IndexError;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query pipeline errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Average, min-by or max-by over zero elements
    #[error("Cannot compute {aggregate} over an empty collection")]
    EmptyAggregation { aggregate: &'static str },

    /// Keyed collection without a merge strategy hit a collision
    #[error("Duplicate key in keyed collection: {key}")]
    DuplicateKey { key: String },

    /// Dangling customer or product reference
    #[error(transparent)]
    MissingReference(#[from] IndexError),

    /// Sort key absent without a missing-value policy, or keys of different kinds
    #[error("Invalid comparison: {reason}")]
    InvalidComparison { reason: String },
}

impl QueryError {
    pub fn empty_aggregation(aggregate: &'static str) -> Self {
        Self::EmptyAggregation { aggregate }
    }

    pub fn duplicate_key(key: impl ToString) -> Self {
        Self::DuplicateKey {
            key: key.to_string(),
        }
    }

    pub fn invalid_comparison(reason: impl Into<String>) -> Self {
        Self::InvalidComparison {
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::EmptyAggregation { .. } => "QUERY_EMPTY_AGGREGATION",
            QueryError::DuplicateKey { .. } => "QUERY_DUPLICATE_KEY",
            QueryError::MissingReference(inner) => inner.code(),
            QueryError::InvalidComparison { .. } => "QUERY_INVALID_COMPARISON",
        }
    }
}
