//! Join and flatten across relations
//!
//! Expand-down joins fan out through the relation index and keep every
//! duplicate. Callers that want a set apply `distinct` afterwards.

use crate::index::{IndexError, RelationIndex};
use crate::model::{Customer, Entity, Order, Product};

/// Every order containing any of `products`.
///
/// The result has one entry per (product, order) pair, so an order holding
/// two of the products appears twice.
pub fn orders_of_products<'a, 'p>(
    index: &RelationIndex<'a>,
    products: impl IntoIterator<Item = &'p Product>,
) -> Vec<&'a Order> {
    products
        .into_iter()
        .flat_map(|product| index.orders_containing(product.id).iter().copied())
        .collect()
}

/// Every product of any of `orders`, one entry per (order, product) pair
pub fn products_of_orders<'a, 'o>(
    index: &RelationIndex<'a>,
    orders: impl IntoIterator<Item = &'o Order>,
) -> Vec<&'a Product> {
    orders
        .into_iter()
        .flat_map(|order| index.products_of(order.id).iter().copied())
        .collect()
}

/// The customer of each order, in order sequence.
///
/// No fan-out: the result has exactly one customer per order. An order the
/// index does not know fails with `MissingReference`.
pub fn customers_of_orders<'a, 'o>(
    index: &RelationIndex<'a>,
    orders: impl IntoIterator<Item = &'o Order>,
) -> Result<Vec<&'a Customer>, IndexError> {
    orders
        .into_iter()
        .map(|order| {
            index
                .customer_of(order)
                .ok_or_else(|| IndexError::MissingReference {
                    order: order.id.to_string(),
                    kind: Customer::KIND,
                    id: order.customer_id.to_string(),
                })
        })
        .collect()
}
