//! Report pipelines
//!
//! Each function composes query stages over one snapshot and returns typed
//! results. Functions that follow order → product references take the
//! snapshot's `RelationIndex`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::index::RelationIndex;
use crate::model::{CustomerId, Order, OrderId, Product, ProductId, Snapshot};
use crate::pricing::Discount;
use crate::query::{
    any, average, distinct, group_by, orders_of_products, products_of_orders, select, sort, sum, summarize,
    to_map, top_k, Aggregation, MergeStrategy, OrderBy, Predicate, Projection, QueryResult, SummaryStatistics,
};

fn price() -> Projection<'static, Product> {
    Projection::new(|p: &Product| p.price)
}

/// Products of `category` priced strictly above `min_price`
pub fn premium_in_category<'a>(snapshot: &'a Snapshot, category: &str, min_price: f64) -> Vec<&'a Product> {
    let predicate = Predicate::in_category(category).and(Predicate::price_above(min_price));
    select(snapshot.products(), &predicate)
}

/// Orders containing a product of `category`.
///
/// Not deduplicated: an order with two matching products appears twice.
pub fn orders_with_category<'a>(snapshot: &'a Snapshot, index: &RelationIndex<'a>, category: &str) -> Vec<&'a Order> {
    let products = select(snapshot.products(), &Predicate::in_category(category));
    orders_of_products(index, products)
}

/// A product picked for a discount, with its price before and after
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountCandidate {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub discounted_price: f64,
}

/// Products of `category` with the price `discount` would give them.
///
/// Nothing is repriced; `pricing::apply_discount` does that.
pub fn discount_candidates(snapshot: &Snapshot, category: &str, discount: &Discount) -> Vec<DiscountCandidate> {
    select(snapshot.products(), &Predicate::in_category(category))
        .into_iter()
        .map(|p| DiscountCandidate {
            id: p.id,
            name: p.name.clone(),
            price: p.price,
            discounted_price: discount.apply(p.price),
        })
        .collect()
}

/// Products ordered by a customer of `tier` between `from` and `to`
/// inclusive. Each product appears once, in product order.
pub fn products_for_tier_between<'a>(
    snapshot: &'a Snapshot,
    index: &RelationIndex<'a>,
    tier: u8,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<&'a Product> {
    let in_range = Predicate::placed_between(from, to);
    let qualifying = Predicate::new(|order: &Order| {
        in_range.test(order) && index.customer_of(order).map_or(false, |c| c.tier == tier)
    });

    let ordered = Predicate::new(|product: &Product| any(index.orders_containing(product.id).iter().copied(), &qualifying));
    select(snapshot.products(), &ordered)
}

/// The `k` cheapest products of `category`, ties in product order
pub fn cheapest_in_category<'a>(snapshot: &'a Snapshot, category: &str, k: usize) -> QueryResult<Vec<&'a Product>> {
    let candidates = select(snapshot.products(), &Predicate::in_category(category));
    top_k(candidates, k, &OrderBy::asc("price", |p: &Product| p.price))
}

/// The `k` most recently placed orders
pub fn most_recent_orders(snapshot: &Snapshot, k: usize) -> QueryResult<Vec<&Order>> {
    top_k(snapshot.orders(), k, &OrderBy::desc("order_date", |o: &Order| o.order_date))
}

/// Distinct products of the orders placed on `date`
pub fn products_ordered_on<'a>(snapshot: &'a Snapshot, index: &RelationIndex<'a>, date: NaiveDate) -> Vec<&'a Product> {
    let orders = select(snapshot.orders(), &Predicate::placed_on(date));
    distinct(products_of_orders(index, orders))
}

/// Sum of product prices over every order placed in the month.
///
/// A product on two orders counts twice.
pub fn revenue_for_month(snapshot: &Snapshot, index: &RelationIndex<'_>, year: i32, month: u32) -> f64 {
    let orders = select(snapshot.orders(), &Predicate::placed_in_month(year, month));
    sum(products_of_orders(index, orders), &price())
}

/// Average price of the distinct products ordered on `date`.
///
/// Fails with `EmptyAggregation` when nothing was ordered that day.
pub fn average_price_on(snapshot: &Snapshot, index: &RelationIndex<'_>, date: NaiveDate) -> QueryResult<f64> {
    average(products_ordered_on(snapshot, index, date), &price())
}

/// Price statistics for `category`; zero count when the category is empty
pub fn category_statistics(snapshot: &Snapshot, category: &str) -> SummaryStatistics {
    summarize(select(snapshot.products(), &Predicate::in_category(category)), &price())
}

/// Number of products on each order
pub fn product_count_by_order(snapshot: &Snapshot) -> QueryResult<BTreeMap<OrderId, usize>> {
    to_map(snapshot.orders(), |o| o.id, |o| o.product_ids.len(), &MergeStrategy::Reject)
}

/// Orders of each customer that placed at least one, in snapshot order
pub fn orders_by_customer(snapshot: &Snapshot) -> BTreeMap<CustomerId, Vec<&Order>> {
    group_by(snapshot.orders(), |o| o.customer_id).into_map()
}

pub fn order_ids_by_customer(snapshot: &Snapshot) -> BTreeMap<CustomerId, Vec<OrderId>> {
    group_by(snapshot.orders(), |o| o.customer_id).map_members(|o| o.id)
}

/// Total product price of each order
pub fn order_totals(snapshot: &Snapshot, index: &RelationIndex<'_>) -> QueryResult<BTreeMap<OrderId, f64>> {
    let price = price();
    to_map(
        snapshot.orders(),
        |o| o.id,
        |o| sum(index.products_of(o.id).iter().copied(), &price),
        &MergeStrategy::Reject,
    )
}

pub fn product_names_by_category(snapshot: &Snapshot) -> BTreeMap<String, Vec<String>> {
    group_by(snapshot.products(), |p| p.category.clone()).map_members(|p| p.name.clone())
}

/// The most expensive product per category, first seen on equal prices
pub fn most_expensive_by_category(snapshot: &Snapshot) -> QueryResult<BTreeMap<String, &Product>> {
    to_map(
        snapshot.products(),
        |p| p.category.clone(),
        |p| p,
        &MergeStrategy::max_by(|p: &&Product| p.price),
    )
}

/// Name of the most expensive product per category
pub fn most_expensive_name_by_category(snapshot: &Snapshot) -> QueryResult<BTreeMap<String, String>> {
    let grouped = group_by(snapshot.products(), |p| p.category.clone());
    let priciest = grouped.aggregate(&Aggregation::MaxBy(OrderBy::asc("price", |p: &Product| p.price)))?;

    Ok(priciest
        .into_iter()
        .filter_map(|(category, winner)| winner.as_element().map(|p| (category, p.name.clone())))
        .collect())
}

/// Orders not yet delivered, or delivered more than `days` after they were
/// placed. Sorted by delivery date with undelivered orders last.
pub fn undelivered_or_late(snapshot: &Snapshot, days: i64) -> QueryResult<Vec<&Order>> {
    let late = Predicate::new(move |o: &Order| match o.delivery_date {
        Some(delivered) => (delivered - o.order_date).num_days() > days,
        None => true,
    });

    let ordering = OrderBy::asc_opt("delivery_date", |o: &Order| o.delivery_date).missing_last();
    sort(select(snapshot.orders(), &late), &ordering)
}
