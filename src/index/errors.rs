//! Relation index errors

use thiserror::Error;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors raised while building a relation index
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// An order names an entity that is not in the snapshot
    #[error("Order {order} references missing {kind} {id}")]
    MissingReference {
        order: String,
        kind: &'static str,
        id: String,
    },
}

impl IndexError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            IndexError::MissingReference { .. } => "QUERY_MISSING_REFERENCE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_display() {
        let err = IndexError::MissingReference {
            order: "O4".to_string(),
            kind: "customer",
            id: "C9".to_string(),
        };
        assert_eq!(err.to_string(), "Order O4 references missing customer C9");
        assert_eq!(err.code(), "QUERY_MISSING_REFERENCE");
    }
}
