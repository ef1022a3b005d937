//! Selection and identity-based dedup
//!
//! Selection keeps the matching elements in source order. It never
//! mutates, reorders or deduplicates.

use std::collections::HashSet;

use crate::model::Entity;

use super::predicate::Predicate;

/// Returns the elements matching `predicate`, in source order
pub fn select<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    predicate: &Predicate<'_, T>,
) -> Vec<&'a T> {
    items.into_iter().filter(|item| predicate.test(item)).collect()
}

/// Returns true if any element matches
pub fn any<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, predicate: &Predicate<'_, T>) -> bool {
    items.into_iter().any(|item| predicate.test(item))
}

/// Removes repeated entities by id, keeping each first occurrence.
///
/// Two entities with the same id are the same entity here even if some of
/// their fields differ.
pub fn distinct<'a, E: Entity + 'a>(items: impl IntoIterator<Item = &'a E>) -> Vec<&'a E> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.key())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId};

    fn catalogue() -> Vec<Product> {
        vec![
            Product::new(1, "Atlas", "Books", 120.0),
            Product::new(2, "Primer", "Books", 90.0),
            Product::new(3, "Kite", "Toys", 50.0),
            Product::new(4, "Codex", "Books", 300.0),
        ]
    }

    #[test]
    fn test_select_preserves_order() {
        let products = catalogue();
        let books = select(&products, &Predicate::in_category("Books"));

        let ids: Vec<ProductId> = books.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId(1), ProductId(2), ProductId(4)]);
    }

    #[test]
    fn test_select_does_not_mutate() {
        let products = catalogue();
        let before = products.clone();

        let _ = select(&products, &Predicate::price_above(100.0));
        assert_eq!(products, before);
    }

    #[test]
    fn test_chained_selection() {
        let products = vec![
            Product::new(1, "A", "Books", 120.0),
            Product::new(2, "B", "Books", 90.0),
            Product::new(3, "C", "Toys", 50.0),
        ];

        let books = select(&products, &Predicate::in_category("Books"));
        let premium = select(books, &Predicate::price_above(100.0));

        assert_eq!(premium.len(), 1);
        assert_eq!(premium[0].id, ProductId(1));
    }

    #[test]
    fn test_select_keeps_duplicates() {
        let products = catalogue();
        let doubled: Vec<&Product> = products.iter().chain(products.iter()).collect();

        let toys = select(doubled, &Predicate::in_category("Toys"));
        assert_eq!(toys.len(), 2);
    }

    #[test]
    fn test_any() {
        let products = catalogue();
        assert!(any(&products, &Predicate::in_category("Toys")));
        assert!(!any(&products, &Predicate::in_category("Baby")));
    }

    #[test]
    fn test_distinct_by_identity() {
        let a = Product::new(1, "Atlas", "Books", 120.0);
        let a_repriced = Product::new(1, "Atlas", "Books", 99.0);
        let b = Product::new(2, "Primer", "Books", 90.0);

        let unique = distinct([&a, &b, &a_repriced, &b]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].price, 120.0);
        assert_eq!(unique[1].id, ProductId(2));
    }
}
