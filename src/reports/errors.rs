//! Report errors
//!
//! A report run can fail in the pipeline, while materializing, or while
//! building its discount. The wrapped error keeps its own code.

use thiserror::Error;

use crate::index::IndexError;
use crate::pricing::PricingError;
use crate::query::QueryError;
use crate::result::MaterializeError;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Unknown report '{name}'")]
    UnknownReport { name: String },

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

impl From<IndexError> for ReportError {
    fn from(err: IndexError) -> Self {
        ReportError::Query(err.into())
    }
}

impl ReportError {
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::UnknownReport { .. } => "REPORT_UNKNOWN",
            ReportError::Query(err) => err.code(),
            ReportError::Pricing(err) => err.code(),
            ReportError::Materialize(err) => err.code(),
        }
    }
}
