//! Result materialization for orderstream
//!
//! Turns pipeline output into one of three shapes: an ordered sequence, a
//! key-ordered mapping, or a single scalar. Materialization carries no
//! business logic; it only serializes what the pipeline produced.
//!
//! # Invariants
//!
//! - Sequences keep pipeline order
//! - Mapping keys are rendered with `Display` and iterate in key order

mod errors;
mod output;

pub use errors::{MaterializeError, MaterializeResult};
pub use output::{Materializer, QueryOutput};
