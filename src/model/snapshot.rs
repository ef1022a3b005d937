//! Snapshot of the three entity collections
//!
//! A snapshot is what the persistence collaborator hands over: every
//! customer, order and product, already loaded. The query engine reads it
//! and never creates or destroys entities.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::entity::{Customer, Entity, Order, Product};
use super::errors::{ModelError, ModelResult};

/// The loading contract of the persistence collaborator
pub trait SnapshotSource {
    /// Every customer in the store
    fn load_all_customers(&self) -> Vec<Customer>;

    /// Every order, with customer and product ids populated
    fn load_all_orders(&self) -> Vec<Order>;

    /// Every product in the store
    fn load_all_products(&self) -> Vec<Product>;
}

/// A source backed by vectors held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
}

impl InMemorySource {
    pub fn new(customers: Vec<Customer>, orders: Vec<Order>, products: Vec<Product>) -> Self {
        Self {
            customers,
            orders,
            products,
        }
    }
}

impl SnapshotSource for InMemorySource {
    fn load_all_customers(&self) -> Vec<Customer> {
        self.customers.clone()
    }

    fn load_all_orders(&self) -> Vec<Order> {
        self.orders.clone()
    }

    fn load_all_products(&self) -> Vec<Product> {
        self.products.clone()
    }
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    customers: Vec<Customer>,
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    products: Vec<Product>,
}

/// Validated, read-only view of the three collections
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    customers: Vec<Customer>,
    orders: Vec<Order>,
    products: Vec<Product>,
}

impl Snapshot {
    /// Assembles a snapshot, rejecting duplicate ids and invalid products.
    ///
    /// Referential integrity between orders and the other collections is
    /// checked when the relation index is built, not here.
    pub fn new(
        customers: Vec<Customer>,
        orders: Vec<Order>,
        products: Vec<Product>,
    ) -> ModelResult<Self> {
        ensure_unique(&customers)?;
        ensure_unique(&orders)?;
        ensure_unique(&products)?;

        for product in &products {
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(ModelError::NegativePrice {
                    id: product.id.to_string(),
                    price: product.price,
                });
            }
            if product.category.trim().is_empty() {
                return Err(ModelError::EmptyCategory {
                    id: product.id.to_string(),
                });
            }
        }

        Ok(Self {
            customers,
            orders,
            products,
        })
    }

    /// Loads every collection from the source
    pub fn load<S: SnapshotSource + ?Sized>(source: &S) -> ModelResult<Self> {
        Self::new(
            source.load_all_customers(),
            source.load_all_orders(),
            source.load_all_products(),
        )
    }

    /// Parses a snapshot from `{"customers":[..],"orders":[..],"products":[..]}`
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::new(raw.customers, raw.orders, raw.products)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Mutable access to products, for the explicit pricing operations only
    pub(crate) fn products_mut(&mut self) -> &mut [Product] {
        &mut self.products
    }
}

fn ensure_unique<E>(items: &[E]) -> ModelResult<()>
where
    E: Entity,
    E::Key: Hash + Eq + Display,
{
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.key()) {
            return Err(ModelError::DuplicateId {
                kind: E::KIND,
                id: item.key().to_string(),
            });
        }
    }
    Ok(())
}
