//! Pricing subsystem for orderstream
//!
//! The only operations in the crate that change entity state. Selection of
//! the products to reprice stays in the query pipeline; this module applies
//! a validated discount to an explicit set of product ids.
//!
//! # Invariants
//!
//! - A discount is a percentage in `0..=100`
//! - Prices stay finite and non-negative
//! - Products outside the id set are untouched

mod discount;
mod errors;

pub use discount::{apply_discount, Discount};
pub use errors::{PricingError, PricingResult};
