//! Predicate combinators
//!
//! A `Predicate` is a boxed test over one element. Predicates compose with
//! `and`, `or` and `not`, and a two-argument test can be bound to an
//! auxiliary value with `Predicate::bind`.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::model::{Customer, Order, Product};

/// A boolean test over `T`
pub struct Predicate<'p, T> {
    test: Box<dyn Fn(&T) -> bool + 'p>,
}

impl<'p, T: 'p> Predicate<'p, T> {
    /// Wraps a closure
    pub fn new(test: impl Fn(&T) -> bool + 'p) -> Self {
        Self {
            test: Box::new(test),
        }
    }

    /// Matches every element
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Applies a two-argument test with `value` as its second argument.
    ///
    /// The test is defined once and the value is supplied separately, as in
    /// "category equals X" with X chosen by the caller.
    pub fn bind<V: 'p>(test: impl Fn(&T, &V) -> bool + 'p, value: V) -> Self {
        Self::new(move |item| test(item, &value))
    }

    /// Evaluates the predicate
    pub fn test(&self, item: &T) -> bool {
        (self.test)(item)
    }

    /// Both predicates must match; `other` is skipped when `self` fails
    pub fn and<'q>(self, other: Predicate<'q, T>) -> Predicate<'q, T>
    where
        'p: 'q,
        T: 'q,
    {
        Predicate::new(move |item| self.test(item) && other.test(item))
    }

    /// Either predicate must match; `other` is skipped when `self` holds
    pub fn or<'q>(self, other: Predicate<'q, T>) -> Predicate<'q, T>
    where
        'p: 'q,
        T: 'q,
    {
        Predicate::new(move |item| self.test(item) || other.test(item))
    }

    /// Negation
    pub fn not(self) -> Self {
        Self::new(move |item| !self.test(item))
    }
}

impl<T> fmt::Debug for Predicate<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

/// Category equality as a two-argument test, for use with `Predicate::bind`
#[allow(clippy::ptr_arg)]
pub fn category_is(product: &Product, category: &String) -> bool {
    product.category == *category
}

impl Predicate<'static, Product> {
    /// Exact, case-sensitive category match
    pub fn in_category(category: impl Into<String>) -> Self {
        Self::bind(category_is, category.into())
    }

    /// Price strictly greater than `min`
    pub fn price_above(min: f64) -> Self {
        Self::new(move |p: &Product| p.price > min)
    }

    /// Price less than or equal to `max`
    pub fn price_at_most(max: f64) -> Self {
        Self::new(move |p: &Product| p.price <= max)
    }
}

impl Predicate<'static, Order> {
    /// Placed on exactly `date`
    pub fn placed_on(date: NaiveDate) -> Self {
        Self::new(move |o: &Order| o.order_date == date)
    }

    /// Placed within `from..=to`
    pub fn placed_between(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(move |o: &Order| o.order_date >= from && o.order_date <= to)
    }

    /// Placed in the given calendar month (1-12)
    pub fn placed_in_month(year: i32, month: u32) -> Self {
        Self::new(move |o: &Order| o.order_date.year() == year && o.order_date.month() == month)
    }

    /// No delivery date recorded
    pub fn undelivered() -> Self {
        Self::new(|o: &Order| o.delivery_date.is_none())
    }
}

impl Predicate<'static, Customer> {
    /// Loyalty tier equality
    pub fn tier(tier: u8) -> Self {
        Self::new(move |c: &Customer| c.tier == tier)
    }
}
