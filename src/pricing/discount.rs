//! Percentage discounts

use std::collections::BTreeSet;

use serde::Serialize;

use super::errors::{PricingError, PricingResult};
use crate::model::{ProductId, Snapshot};
use crate::observability::{Event, Logger, QueryMetrics};

/// A validated percentage discount
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Discount {
    percent: f64,
}

impl Discount {
    /// Creates a discount of `percent` percent.
    ///
    /// Rejects values outside `0..=100` and NaN.
    pub fn percent(percent: f64) -> PricingResult<Self> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(PricingError::InvalidPercent { percent });
        }
        Ok(Self { percent })
    }

    pub fn value(&self) -> f64 {
        self.percent
    }

    /// The discounted price
    pub fn apply(&self, price: f64) -> f64 {
        price * (100.0 - self.percent) / 100.0
    }
}

/// Applies `discount` to every product of `snapshot` whose id is in `ids`.
///
/// Returns the number of repriced products. Ids that name no product are
/// ignored.
pub fn apply_discount(
    snapshot: &mut Snapshot,
    ids: impl IntoIterator<Item = ProductId>,
    discount: &Discount,
) -> usize {
    let ids: BTreeSet<ProductId> = ids.into_iter().collect();

    let mut repriced = 0;
    for product in snapshot.products_mut() {
        if ids.contains(&product.id) {
            product.price = discount.apply(product.price);
            repriced += 1;
        }
    }

    QueryMetrics::global().add_discounts_applied(repriced as u64);
    let percent = discount.value().to_string();
    let products = repriced.to_string();
    Logger::info(
        Event::DiscountApplied.as_str(),
        &[("percent", percent.as_str()), ("products", products.as_str())],
    );

    repriced
}
