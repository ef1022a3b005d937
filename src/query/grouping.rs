//! Grouping with optional per-group reduction

use std::collections::BTreeMap;

use super::aggregate::{Aggregated, Aggregation};
use super::errors::QueryResult;

/// Elements partitioned by key.
///
/// Keys iterate in ascending order. Inside a group, elements keep the order
/// in which they were seen.
#[derive(Debug, Clone)]
pub struct Grouped<'a, K, T> {
    groups: BTreeMap<K, Vec<&'a T>>,
}

impl<'a, K: Ord, T> Grouped<'a, K, T> {
    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The group for `key`, if any element produced it
    pub fn get(&self, key: &K) -> Option<&[&'a T]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Iterates groups in key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[&'a T])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Total number of grouped elements
    pub fn element_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Applies `f` to each group
    pub fn map_values<V>(&self, mut f: impl FnMut(&[&'a T]) -> V) -> BTreeMap<K, V>
    where
        K: Clone,
    {
        self.groups
            .iter()
            .map(|(key, members)| (key.clone(), f(members)))
            .collect()
    }

    /// Projects each member, keeping group order
    pub fn map_members<V>(&self, mut f: impl FnMut(&T) -> V) -> BTreeMap<K, Vec<V>>
    where
        K: Clone,
    {
        self.map_values(|members| members.iter().map(|m| f(*m)).collect())
    }

    /// Size of each group
    pub fn counts(&self) -> BTreeMap<K, usize>
    where
        K: Clone,
    {
        self.map_values(|members| members.len())
    }

    /// Reduces every group with the same strategy.
    ///
    /// Groups are never empty, so empty-input failures cannot occur here;
    /// key failures from min-by and max-by still propagate.
    pub fn aggregate(&self, aggregation: &Aggregation<'_, T>) -> QueryResult<BTreeMap<K, Aggregated<'a, T>>>
    where
        K: Clone,
    {
        self.groups
            .iter()
            .map(|(key, members)| Ok((key.clone(), aggregation.apply(members)?)))
            .collect()
    }

    /// Releases the underlying map
    pub fn into_map(self) -> BTreeMap<K, Vec<&'a T>> {
        self.groups
    }
}

/// Partitions `items` by `key`
pub fn group_by<'a, K: Ord, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
) -> Grouped<'a, K, T> {
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    Grouped { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId};
    use crate::query::{OrderBy, Projection};

    fn catalogue() -> Vec<Product> {
        vec![
            Product::new(1, "Atlas", "Books", 120.0),
            Product::new(2, "Kite", "Toys", 30.0),
            Product::new(3, "Primer", "Books", 90.0),
            Product::new(4, "Rattle", "Baby", 15.0),
            Product::new(5, "Codex", "Books", 300.0),
        ]
    }

    #[test]
    fn test_group_completeness() {
        let products = catalogue();
        let grouped = group_by(&products, |p| p.category.clone());

        assert_eq!(grouped.element_count(), products.len());
        for product in &products {
            let group = grouped.get(&product.category).unwrap();
            assert_eq!(group.iter().filter(|p| p.id == product.id).count(), 1);
        }
    }

    #[test]
    fn test_group_preserves_insertion_order() {
        let products = catalogue();
        let grouped = group_by(&products, |p| p.category.clone());

        let books: Vec<ProductId> = grouped.get(&"Books".to_string()).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(books, vec![ProductId(1), ProductId(3), ProductId(5)]);

        let keys: Vec<&String> = grouped.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Baby", "Books", "Toys"]);
    }

    #[test]
    fn test_counts_and_members() {
        let products = catalogue();
        let grouped = group_by(&products, |p| p.category.clone());

        assert_eq!(grouped.counts()["Books"], 3);
        assert_eq!(grouped.counts()["Baby"], 1);

        let names = grouped.map_members(|p| p.name.clone());
        assert_eq!(names["Books"], vec!["Atlas", "Primer", "Codex"]);
    }

    #[test]
    fn test_group_then_reduce() {
        let products = catalogue();
        let grouped = group_by(&products, |p| p.category.clone());

        let totals = grouped
            .aggregate(&Aggregation::Sum(Projection::new(|p: &Product| p.price)))
            .unwrap();
        assert_eq!(totals["Books"].as_number(), Some(510.0));

        let priciest = grouped
            .aggregate(&Aggregation::MaxBy(OrderBy::asc("price", |p: &Product| p.price)))
            .unwrap();
        assert_eq!(priciest["Books"].as_element().unwrap().id, ProductId(5));
        assert_eq!(priciest["Toys"].as_element().unwrap().id, ProductId(2));
    }

    #[test]
    fn test_group_empty_input() {
        let products: Vec<Product> = Vec::new();
        let grouped = group_by(&products, |p| p.category.clone());
        assert!(grouped.is_empty());
        assert_eq!(grouped.len(), 0);
    }
}
