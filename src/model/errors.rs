//! Snapshot validation errors

use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while assembling a snapshot
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Product {id} has an invalid price: {price}")]
    NegativePrice { id: String, price: f64 },

    #[error("Product {id} has an empty category")]
    EmptyCategory { id: String },

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::DuplicateId { .. } => "MODEL_DUPLICATE_ID",
            ModelError::NegativePrice { .. } => "MODEL_NEGATIVE_PRICE",
            ModelError::EmptyCategory { .. } => "MODEL_EMPTY_CATEGORY",
            ModelError::Json(_) => "MODEL_INVALID_JSON",
        }
    }
}
