//! Materializer errors

use thiserror::Error;

/// Result type for materialization
pub type MaterializeResult<T> = Result<T, MaterializeError>;

/// Failure to serialize pipeline output
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Failed to serialize {shape} output: {source}")]
    Serialize {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Two keys rendered to the same string
    #[error("Mapping key rendered twice: {key}")]
    KeyCollision { key: String },
}

impl MaterializeError {
    pub(crate) fn serialize(shape: &'static str, source: serde_json::Error) -> Self {
        Self::Serialize { shape, source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MaterializeError::Serialize { .. } => "RESULT_SERIALIZE_FAILED",
            MaterializeError::KeyCollision { .. } => "RESULT_KEY_COLLISION",
        }
    }
}
