//! Relation index over a snapshot
//!
//! # API
//!
//! - `build(snapshot)` - Index every relation, failing on dangling ids
//! - `orders_of_customer(id)` - Customer → orders
//! - `orders_containing(id)` - Product → orders
//! - `products_of(id)` - Order → products
//! - `customer_of(order)` - Order → customer

use std::collections::HashMap;

use crate::model::{Customer, CustomerId, Entity, Order, OrderId, Product, ProductId, Snapshot};

use crate::observability::{log_event, Event, QueryMetrics};

use super::errors::{IndexError, IndexResult};

/// Lookup structures derived from one snapshot.
///
/// The index borrows the snapshot it was built from, so it cannot outlive
/// it or observe a mutation of it. Rebuild it after the collections change.
#[derive(Debug)]
pub struct RelationIndex<'a> {
    customers: HashMap<CustomerId, &'a Customer>,
    products: HashMap<ProductId, &'a Product>,
    orders: HashMap<OrderId, &'a Order>,

    /// Orders per customer, in snapshot order
    orders_by_customer: HashMap<CustomerId, Vec<&'a Order>>,

    /// Orders per product, in snapshot order
    orders_by_product: HashMap<ProductId, Vec<&'a Order>>,

    /// Products per order, in product id order
    products_by_order: HashMap<OrderId, Vec<&'a Product>>,
}

impl<'a> RelationIndex<'a> {
    /// Builds every relation in one pass over the orders.
    ///
    /// Cost is O(orders + sum of products per order). Fails with
    /// `MissingReference` on the first order whose customer or product is
    /// absent from the snapshot.
    pub fn build(snapshot: &'a Snapshot) -> IndexResult<Self> {
        let customers: HashMap<_, _> = snapshot.customers().iter().map(|c| (c.id, c)).collect();
        let products: HashMap<_, _> = snapshot.products().iter().map(|p| (p.id, p)).collect();

        let mut orders = HashMap::with_capacity(snapshot.orders().len());
        let mut orders_by_customer: HashMap<CustomerId, Vec<&'a Order>> = HashMap::new();
        let mut orders_by_product: HashMap<ProductId, Vec<&'a Order>> = HashMap::new();
        let mut products_by_order = HashMap::with_capacity(snapshot.orders().len());

        for order in snapshot.orders() {
            if !customers.contains_key(&order.customer_id) {
                return Err(missing::<Customer>(order, order.customer_id));
            }

            let mut lines = Vec::with_capacity(order.product_ids.len());
            for product_id in &order.product_ids {
                let product = products
                    .get(product_id)
                    .copied()
                    .ok_or_else(|| missing::<Product>(order, *product_id))?;
                lines.push(product);
                orders_by_product.entry(*product_id).or_default().push(order);
            }

            orders.insert(order.id, order);
            orders_by_customer.entry(order.customer_id).or_default().push(order);
            products_by_order.insert(order.id, lines);
        }

        QueryMetrics::global().increment_index_builds();
        let counts = [customers.len(), orders.len(), products.len()].map(|n| n.to_string());
        log_event(
            Event::IndexBuilt,
            &[
                ("customers", counts[0].as_str()),
                ("orders", counts[1].as_str()),
                ("products", counts[2].as_str()),
            ],
        );

        Ok(Self {
            customers,
            products,
            orders,
            orders_by_customer,
            orders_by_product,
            products_by_order,
        })
    }

    pub fn customer(&self, id: CustomerId) -> Option<&'a Customer> {
        self.customers.get(&id).copied()
    }

    pub fn product(&self, id: ProductId) -> Option<&'a Product> {
        self.products.get(&id).copied()
    }

    pub fn order(&self, id: OrderId) -> Option<&'a Order> {
        self.orders.get(&id).copied()
    }

    /// Orders placed by the customer; empty if none
    pub fn orders_of_customer(&self, id: CustomerId) -> &[&'a Order] {
        self.orders_by_customer.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Orders that contain the product; empty if none
    pub fn orders_containing(&self, id: ProductId) -> &[&'a Order] {
        self.orders_by_product.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Products on the order; empty for unknown orders
    pub fn products_of(&self, id: OrderId) -> &[&'a Product] {
        self.products_by_order.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The customer who placed the order.
    ///
    /// Every indexed order has a resolved customer, so this only returns
    /// `None` for an order that did not come from the indexed snapshot.
    pub fn customer_of(&self, order: &Order) -> Option<&'a Customer> {
        self.customer(order.customer_id)
    }

    /// Number of indexed orders
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

fn missing<E: Entity>(order: &Order, id: E::Key) -> IndexError {
    IndexError::MissingReference {
        order: order.id.to_string(),
        kind: E::KIND,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![Customer::new(1, "Ann", 1), Customer::new(2, "Bob", 2)],
            vec![
                Order::new(10, date(2021, 3, 15), 1).with_products([100, 101]),
                Order::new(11, date(2021, 3, 10), 2).with_products([101]),
                Order::new(12, date(2021, 2, 1), 1),
            ],
            vec![
                Product::new(100, "Atlas", "Books", 120.0),
                Product::new(101, "Rattle", "Baby", 15.0),
                Product::new(102, "Kite", "Toys", 30.0),
            ],
        )
        .unwrap()
    }

    fn ids<E: Entity>(items: &[&E]) -> Vec<E::Key> {
        items.iter().map(|e| e.key()).collect()
    }

    #[test]
    fn test_orders_of_customer() {
        let snapshot = snapshot();
        let index = RelationIndex::build(&snapshot).unwrap();

        assert_eq!(ids(index.orders_of_customer(CustomerId(1))), vec![OrderId(10), OrderId(12)]);
        assert_eq!(ids(index.orders_of_customer(CustomerId(2))), vec![OrderId(11)]);
        assert!(index.orders_of_customer(CustomerId(3)).is_empty());
    }

    #[test]
    fn test_orders_containing_product() {
        let snapshot = snapshot();
        let index = RelationIndex::build(&snapshot).unwrap();

        assert_eq!(ids(index.orders_containing(ProductId(101))), vec![OrderId(10), OrderId(11)]);
        assert_eq!(ids(index.orders_containing(ProductId(100))), vec![OrderId(10)]);
        assert!(index.orders_containing(ProductId(102)).is_empty());
    }

    #[test]
    fn test_products_of_order() {
        let snapshot = snapshot();
        let index = RelationIndex::build(&snapshot).unwrap();

        assert_eq!(ids(index.products_of(OrderId(10))), vec![ProductId(100), ProductId(101)]);
        assert!(index.products_of(OrderId(12)).is_empty());
        assert!(index.products_of(OrderId(99)).is_empty());
    }

    #[test]
    fn test_customer_of_order() {
        let snapshot = snapshot();
        let index = RelationIndex::build(&snapshot).unwrap();

        let order = index.order(OrderId(11)).unwrap();
        assert_eq!(index.customer_of(order).unwrap().name, "Bob");
        assert_eq!(index.order_count(), 3);
    }

    #[test]
    fn test_missing_customer_surfaces() {
        let snapshot = Snapshot::new(vec![], vec![Order::new(1, date(2021, 1, 1), 5)], vec![]).unwrap();

        let err = RelationIndex::build(&snapshot).unwrap_err();
        assert_eq!(
            err,
            IndexError::MissingReference {
                order: "O1".to_string(),
                kind: "customer",
                id: "C5".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_product_surfaces() {
        let snapshot = Snapshot::new(
            vec![Customer::new(1, "Ann", 1)],
            vec![Order::new(1, date(2021, 1, 1), 1).with_products([7])],
            vec![],
        )
        .unwrap();

        let err = RelationIndex::build(&snapshot).unwrap_err();
        assert!(err.to_string().contains("missing product P7"));
    }
}
