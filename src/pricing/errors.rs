//! Pricing errors

use thiserror::Error;

pub type PricingResult<T> = Result<T, PricingError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Discount percent must be within 0..=100, got {percent}")]
    InvalidPercent { percent: f64 },
}

impl PricingError {
    pub fn code(&self) -> &'static str {
        match self {
            PricingError::InvalidPercent { .. } => "PRICING_INVALID_PERCENT",
        }
    }
}
