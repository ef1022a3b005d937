//! Domain records: customers, products and orders
//!
//! Ownership is one-directional. An order holds the id of its customer and
//! the ids of its products; nothing points back at an order. Reverse
//! traversal goes through the rebuildable `RelationIndex`.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{CustomerId, OrderId, ProductId};

/// A record with a stable identity inside its collection
pub trait Entity {
    /// Identity type
    type Key: Copy + Ord + Hash + fmt::Display;

    /// Collection name used in error messages and logs
    const KIND: &'static str;

    /// Returns the entity's identity
    fn key(&self) -> Self::Key;
}

/// A customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    /// Loyalty level, 1 to 3
    pub tier: u8,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>, tier: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
        }
    }
}

impl Entity for Customer {
    type Key = CustomerId;
    const KIND: &'static str = "customer";

    fn key(&self) -> CustomerId {
        self.id
    }
}

/// A product in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

impl Entity for Product {
    type Key = ProductId;
    const KIND: &'static str = "product";

    fn key(&self) -> ProductId {
        self.id
    }
}

/// An order placed by one customer for a set of distinct products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_date: NaiveDate,
    /// Absent while the order is undelivered
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    pub status: String,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub product_ids: BTreeSet<ProductId>,
}

impl Order {
    /// Creates an undelivered order with status `NEW` and no products
    pub fn new(id: impl Into<OrderId>, order_date: NaiveDate, customer_id: impl Into<CustomerId>) -> Self {
        Self {
            id: id.into(),
            order_date,
            delivery_date: None,
            status: "NEW".to_string(),
            customer_id: customer_id.into(),
            product_ids: BTreeSet::new(),
        }
    }

    /// Sets the delivery date and marks the order delivered
    pub fn delivered_on(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self.status = "DELIVERED".to_string();
        self
    }

    /// Sets the status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Adds products; repeated ids collapse into one
    pub fn with_products<I, P>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProductId>,
    {
        self.product_ids.extend(products.into_iter().map(Into::into));
        self
    }

    /// Returns true if the order contains the product
    pub fn contains(&self, product: ProductId) -> bool {
        self.product_ids.contains(&product)
    }
}

impl Entity for Order {
    type Key = OrderId;
    const KIND: &'static str = "order";

    fn key(&self) -> OrderId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_order_products_are_a_set() {
        let order = Order::new(1, date(2021, 3, 15), 1).with_products([3, 1, 3, 2]);
        let ids: Vec<u64> = order.product_ids.iter().map(|p| p.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_delivered_on_sets_status() {
        let order = Order::new(1, date(2021, 3, 15), 1).delivered_on(date(2021, 3, 18));
        assert_eq!(order.delivery_date, Some(date(2021, 3, 18)));
        assert_eq!(order.status, "DELIVERED");
    }

    #[test]
    fn test_order_deserializes_without_delivery_date() {
        let json = r#"{"id":4,"order_date":"2021-02-10","status":"NEW","customer_id":2,"product_ids":[5,6]}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId(4));
        assert_eq!(order.delivery_date, None);
        assert!(order.contains(ProductId(5)));
        assert!(!order.contains(ProductId(7)));
    }

    #[test]
    fn test_entity_keys() {
        assert_eq!(Customer::new(2, "Ann", 1).key(), CustomerId(2));
        assert_eq!(Product::new(9, "Atlas", "Books", 10.0).key(), ProductId(9));
        assert_eq!(Product::KIND, "product");
    }
}
