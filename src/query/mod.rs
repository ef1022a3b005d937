//! Query pipeline subsystem for orderstream
//!
//! Pipelines are built from small stages over borrowed entities:
//!
//! 1. Select with a `Predicate`
//! 2. Join or flatten through the `RelationIndex`
//! 3. Deduplicate with `distinct` where a set is wanted
//! 4. Order with `sort` / `top_k`
//! 5. Group with `group_by`, reduce with an `Aggregation`
//! 6. Collect into a keyed map under an explicit `MergeStrategy`
//!
//! # Design Principles
//!
//! - Non-mutating: stages return new collections of references
//! - Deterministic: selection, joins and groups keep source order
//! - Explicit: every collision and missing key has a named policy
//!
//! # Invariants
//!
//! - Sorting is stable
//! - Top-K returns `min(k, n)` elements
//! - Average, min-by and max-by over nothing fail with `EmptyAggregation`

mod aggregate;
mod collect;
mod errors;
mod grouping;
mod join;
mod predicate;
mod select;
mod sorter;

pub use aggregate::{
    average, max_by, min_by, sum, summarize, Aggregated, Aggregation, Projection, SummaryStatistics,
};
pub use collect::{to_map, MergeStrategy};
pub use errors::{QueryError, QueryResult};
pub use grouping::{group_by, Grouped};
pub use join::{customers_of_orders, orders_of_products, products_of_orders};
pub use predicate::{category_is, Predicate};
pub use select::{any, distinct, select};
pub use sorter::{sort, top_k, MissingKeys, OrderBy, SortDirection, SortValue};
