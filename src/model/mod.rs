//! Entity model for orderstream
//!
//! Customers, orders and products as plain owned records, plus the
//! `Snapshot` that holds one loaded copy of each collection.
//!
//! # Invariants
//!
//! - Ids are unique within their collection
//! - Product prices are finite and non-negative, categories non-empty
//! - An order's products form a set

mod entity;
mod errors;
mod ids;
mod snapshot;

pub use entity::{Customer, Entity, Order, Product};
pub use errors::{ModelError, ModelResult};
pub use ids::{CustomerId, OrderId, ProductId};
pub use snapshot::{InMemorySource, Snapshot, SnapshotSource};
