//! Relation index subsystem for orderstream
//!
//! Indexes are derived state built from a snapshot so that joins do not
//! rescan the full collections.
//!
//! # Design Principles
//!
//! - Derived state: the snapshot is the source of truth
//! - Disposable: rebuilt per query session, never patched in place
//! - Deterministic: group contents follow snapshot order
//!
//! # Invariants
//!
//! - Build fails loudly on a dangling customer or product id
//! - Every indexed order resolves to exactly one customer

mod errors;
mod relation;

pub use errors::{IndexError, IndexResult};
pub use relation::RelationIndex;
