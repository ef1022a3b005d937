//! orderstream - a deterministic in-memory query and aggregation engine
//!
//! Loads a snapshot of customers, orders and products, indexes the
//! relations between them, and answers questions through composable,
//! non-mutating pipelines: select, join, distinct, sort, top-K, group,
//! aggregate and collect.

pub mod cli;
pub mod index;
pub mod model;
pub mod observability;
pub mod pricing;
pub mod query;
pub mod reports;
pub mod result;
