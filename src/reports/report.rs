//! Named reports
//!
//! `Report` maps a command-line name to one catalogue pipeline and
//! materializes its result.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::catalogue;
use super::errors::{ReportError, ReportResult};
use super::params::ReportParams;
use crate::index::RelationIndex;
use crate::model::Snapshot;
use crate::observability::{ObservationScope, QueryMetrics};
use crate::pricing::Discount;
use crate::result::{Materializer, QueryOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    PremiumBooks,
    OrdersWithCategory,
    DiscountPreview,
    TierProductsInRange,
    CheapestInCategory,
    MostRecentOrders,
    ProductsOrderedOn,
    MonthlyRevenue,
    AveragePriceOn,
    CategoryStatistics,
    ProductCountByOrder,
    OrdersByCustomer,
    OrderIdsByCustomer,
    OrderTotals,
    ProductNamesByCategory,
    MostExpensiveByCategory,
    MostExpensiveNameByCategory,
    LateDeliveries,
}

/// Catalogue entry as printed by `list`
#[derive(Debug, Clone, Serialize)]
pub struct ReportInfo {
    pub name: &'static str,
    pub description: &'static str,
}

impl Report {
    pub const ALL: [Report; 18] = [
        Report::PremiumBooks,
        Report::OrdersWithCategory,
        Report::DiscountPreview,
        Report::TierProductsInRange,
        Report::CheapestInCategory,
        Report::MostRecentOrders,
        Report::ProductsOrderedOn,
        Report::MonthlyRevenue,
        Report::AveragePriceOn,
        Report::CategoryStatistics,
        Report::ProductCountByOrder,
        Report::OrdersByCustomer,
        Report::OrderIdsByCustomer,
        Report::OrderTotals,
        Report::ProductNamesByCategory,
        Report::MostExpensiveByCategory,
        Report::MostExpensiveNameByCategory,
        Report::LateDeliveries,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Report::PremiumBooks => "premium-books",
            Report::OrdersWithCategory => "orders-with-category",
            Report::DiscountPreview => "discount-preview",
            Report::TierProductsInRange => "tier-products-in-range",
            Report::CheapestInCategory => "cheapest-in-category",
            Report::MostRecentOrders => "most-recent-orders",
            Report::ProductsOrderedOn => "products-ordered-on",
            Report::MonthlyRevenue => "monthly-revenue",
            Report::AveragePriceOn => "average-price-on",
            Report::CategoryStatistics => "category-statistics",
            Report::ProductCountByOrder => "product-count-by-order",
            Report::OrdersByCustomer => "orders-by-customer",
            Report::OrderIdsByCustomer => "order-ids-by-customer",
            Report::OrderTotals => "order-totals",
            Report::ProductNamesByCategory => "product-names-by-category",
            Report::MostExpensiveByCategory => "most-expensive-by-category",
            Report::MostExpensiveNameByCategory => "most-expensive-name-by-category",
            Report::LateDeliveries => "late-deliveries",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Report::PremiumBooks => "Products of a category priced above a threshold",
            Report::OrdersWithCategory => "Orders containing a product of a category",
            Report::DiscountPreview => "Products of a category with their discounted price",
            Report::TierProductsInRange => "Products ordered by customers of a tier within a date range",
            Report::CheapestInCategory => "Cheapest products of a category",
            Report::MostRecentOrders => "Most recently placed orders",
            Report::ProductsOrderedOn => "Distinct products ordered on a date",
            Report::MonthlyRevenue => "Total product price of orders placed in a month",
            Report::AveragePriceOn => "Average price of distinct products ordered on a date",
            Report::CategoryStatistics => "Count, sum, min, max and average price of a category",
            Report::ProductCountByOrder => "Order id to product count",
            Report::OrdersByCustomer => "Customer id to orders",
            Report::OrderIdsByCustomer => "Customer id to order ids",
            Report::OrderTotals => "Order id to total product price",
            Report::ProductNamesByCategory => "Category to product names",
            Report::MostExpensiveByCategory => "Category to most expensive product",
            Report::MostExpensiveNameByCategory => "Category to name of the most expensive product",
            Report::LateDeliveries => "Orders undelivered or delivered late, by delivery date",
        }
    }

    pub fn catalogue() -> Vec<ReportInfo> {
        Self::ALL
            .iter()
            .map(|report| ReportInfo {
                name: report.name(),
                description: report.description(),
            })
            .collect()
    }

    /// Runs the report against `snapshot`.
    ///
    /// Builds a fresh relation index per run. Logs `REPORT_BEGIN` and
    /// `REPORT_COMPLETE` or `REPORT_FAILED`, and counts the run.
    pub fn execute(&self, snapshot: &Snapshot, params: &ReportParams) -> ReportResult<QueryOutput> {
        let scope = ObservationScope::with_fields("REPORT", &[("report", self.name())]);

        match self.run(snapshot, params) {
            Ok(output) => {
                QueryMetrics::global().record_report(output.len() as u64);
                let rows = output.len().to_string();
                scope.complete_with_fields(&[("rows", rows.as_str()), ("shape", output.shape())]);
                Ok(output)
            }
            Err(err) => {
                QueryMetrics::global().increment_reports_failed();
                scope.fail(err.code(), &err.to_string());
                Err(err)
            }
        }
    }

    fn run(&self, snapshot: &Snapshot, params: &ReportParams) -> ReportResult<QueryOutput> {
        let index = RelationIndex::build(snapshot)?;
        let p = params;

        let output = match self {
            Report::PremiumBooks => Materializer::sequence(catalogue::premium_in_category(
                snapshot,
                &p.premium_category,
                p.premium_min_price,
            ))?,
            Report::OrdersWithCategory => {
                Materializer::sequence(catalogue::orders_with_category(snapshot, &index, &p.order_category))?
            }
            Report::DiscountPreview => {
                let discount = Discount::percent(p.discount_percent)?;
                Materializer::sequence(catalogue::discount_candidates(snapshot, &p.discount_category, &discount))?
            }
            Report::TierProductsInRange => Materializer::sequence(catalogue::products_for_tier_between(
                snapshot,
                &index,
                p.tier,
                p.tier_from,
                p.tier_to,
            ))?,
            Report::CheapestInCategory => Materializer::sequence(catalogue::cheapest_in_category(
                snapshot,
                &p.cheapest_category,
                p.cheapest_count,
            )?)?,
            Report::MostRecentOrders => {
                Materializer::sequence(catalogue::most_recent_orders(snapshot, p.recent_count)?)?
            }
            Report::ProductsOrderedOn => {
                Materializer::sequence(catalogue::products_ordered_on(snapshot, &index, p.ordered_on))?
            }
            Report::MonthlyRevenue => Materializer::scalar(catalogue::revenue_for_month(
                snapshot,
                &index,
                p.revenue_year,
                p.revenue_month,
            ))?,
            Report::AveragePriceOn => {
                Materializer::scalar(catalogue::average_price_on(snapshot, &index, p.average_on)?)?
            }
            Report::CategoryStatistics => {
                let stats = catalogue::category_statistics(snapshot, &p.statistics_category);
                // An empty category has no average; report it as null
                let average = stats.average().ok();
                Materializer::scalar(serde_json::json!({
                    "count": stats.count,
                    "sum": stats.sum,
                    "min": stats.min,
                    "max": stats.max,
                    "average": average,
                }))?
            }
            Report::ProductCountByOrder => Materializer::mapping(catalogue::product_count_by_order(snapshot)?)?,
            Report::OrdersByCustomer => Materializer::mapping(catalogue::orders_by_customer(snapshot))?,
            Report::OrderIdsByCustomer => Materializer::mapping(catalogue::order_ids_by_customer(snapshot))?,
            Report::OrderTotals => Materializer::mapping(catalogue::order_totals(snapshot, &index)?)?,
            Report::ProductNamesByCategory => Materializer::mapping(catalogue::product_names_by_category(snapshot))?,
            Report::MostExpensiveByCategory => {
                Materializer::mapping(catalogue::most_expensive_by_category(snapshot)?)?
            }
            Report::MostExpensiveNameByCategory => {
                Materializer::mapping(catalogue::most_expensive_name_by_category(snapshot)?)?
            }
            Report::LateDeliveries => {
                Materializer::sequence(catalogue::undelivered_or_late(snapshot, p.late_after_days)?)?
            }
        };

        Ok(output)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Report {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|report| report.name() == s)
            .ok_or_else(|| ReportError::UnknownReport { name: s.to_string() })
    }
}
