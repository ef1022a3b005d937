//! Report catalogue for orderstream
//!
//! Named pipelines over one snapshot, each answering one business
//! question: premium products, orders by category, revenue per month, the
//! most expensive product per category, and so on.
//!
//! # Execution Flow
//!
//! 1. Resolve the report by name
//! 2. Build a relation index over the snapshot
//! 3. Run the pipeline with parameters from config
//! 4. Materialize the result
//!
//! Reports never mutate the snapshot. `discount-preview` shows the price a
//! discount would produce; `pricing::apply_discount` is the mutation.

pub mod catalogue;
mod errors;
mod params;
mod report;

pub use catalogue::DiscountCandidate;
pub use errors::{ReportError, ReportResult};
pub use params::ReportParams;
pub use report::{Report, ReportInfo};
