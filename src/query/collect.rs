//! Keyed collection with an explicit collision policy
//!
//! There is no default policy: every call to `to_map` names what happens
//! when two elements produce the same key.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use super::errors::{QueryError, QueryResult};
use super::sorter::{OrderBy, SortValue};

/// Collision policy for `to_map`
pub enum MergeStrategy<'m, V> {
    /// A later value replaces the earlier one
    LastWins,
    /// Fail with `DuplicateKey`
    Reject,
    /// Combine `(existing, incoming)` into one value
    Merge(Box<dyn Fn(V, V) -> V + 'm>),
}

impl<'m, V: 'm> MergeStrategy<'m, V> {
    pub fn merge(combine: impl Fn(V, V) -> V + 'm) -> Self {
        MergeStrategy::Merge(Box::new(combine))
    }

    /// Keeps the value with the greater key.
    ///
    /// On equal keys the value already in the map stays. A value without a
    /// key never replaces one that has a key.
    pub fn max_by<K: Into<SortValue>>(key: impl Fn(&V) -> K + 'm) -> Self {
        Self::merge(move |existing, incoming| {
            let current = key(&existing).into();
            let candidate = key(&incoming).into();
            match candidate.compare(&current) {
                Some(std::cmp::Ordering::Greater) => incoming,
                _ => existing,
            }
        })
    }

    /// Keeps the value that `order_by` ranks last, existing value on ties
    pub fn max_by_order(order_by: OrderBy<'m, V>) -> Self {
        Self::merge(move |existing, incoming| {
            match (order_by.key_of(&existing), order_by.key_of(&incoming)) {
                (Some(current), Some(candidate)) => match candidate.compare(&current) {
                    Some(std::cmp::Ordering::Greater) => incoming,
                    _ => existing,
                },
                (None, Some(_)) => incoming,
                _ => existing,
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            MergeStrategy::LastWins => "last_wins",
            MergeStrategy::Reject => "reject",
            MergeStrategy::Merge(_) => "merge",
        }
    }
}

impl<V> fmt::Debug for MergeStrategy<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeStrategy::LastWins => "LastWins",
            MergeStrategy::Reject => "Reject",
            MergeStrategy::Merge(_) => "Merge",
        };
        f.write_str(name)
    }
}

/// Collects `items` into a map keyed by `key`, valued by `value`.
///
/// Collisions are resolved by `strategy`. Under `Reject` the first
/// colliding key aborts the collection.
pub fn to_map<'a, T: 'a, K, V>(
    items: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&'a T) -> K,
    value: impl Fn(&'a T) -> V,
    strategy: &MergeStrategy<'_, V>,
) -> QueryResult<BTreeMap<K, V>>
where
    K: Ord + fmt::Display,
{
    let mut map = BTreeMap::new();

    for item in items {
        let incoming = value(item);
        match map.entry(key(item)) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => match strategy {
                MergeStrategy::LastWins => {
                    slot.insert(incoming);
                }
                MergeStrategy::Reject => {
                    return Err(QueryError::duplicate_key(slot.key()));
                }
                MergeStrategy::Merge(combine) => {
                    let (key, existing) = slot.remove_entry();
                    map.insert(key, combine(existing, incoming));
                }
            },
        }
    }

    Ok(map)
}
