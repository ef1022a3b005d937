//! Report parameters
//!
//! Loaded from the `reports` section of the config file. Every field has a
//! default, so an absent section runs the stock catalogue.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParams {
    #[serde(default = "default_premium_category")]
    pub premium_category: String,

    /// Exclusive lower bound
    #[serde(default = "default_premium_min_price")]
    pub premium_min_price: f64,

    #[serde(default = "default_order_category")]
    pub order_category: String,

    #[serde(default = "default_discount_category")]
    pub discount_category: String,

    #[serde(default = "default_discount_percent")]
    pub discount_percent: f64,

    #[serde(default = "default_tier")]
    pub tier: u8,

    /// Inclusive
    #[serde(default = "default_tier_from")]
    pub tier_from: NaiveDate,

    /// Inclusive
    #[serde(default = "default_tier_to")]
    pub tier_to: NaiveDate,

    #[serde(default = "default_cheapest_category")]
    pub cheapest_category: String,

    #[serde(default = "default_top_k")]
    pub cheapest_count: usize,

    #[serde(default = "default_top_k")]
    pub recent_count: usize,

    #[serde(default = "default_ordered_on")]
    pub ordered_on: NaiveDate,

    #[serde(default = "default_revenue_year")]
    pub revenue_year: i32,

    #[serde(default = "default_revenue_month")]
    pub revenue_month: u32,

    #[serde(default = "default_ordered_on")]
    pub average_on: NaiveDate,

    #[serde(default = "default_statistics_category")]
    pub statistics_category: String,

    /// Days between order and delivery before a delivery counts as late
    #[serde(default = "default_late_after_days")]
    pub late_after_days: i64,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn default_premium_category() -> String {
    "Books".to_string()
}

fn default_premium_min_price() -> f64 {
    100.0
}

fn default_order_category() -> String {
    "Baby".to_string()
}

fn default_discount_category() -> String {
    "Toys".to_string()
}

fn default_discount_percent() -> f64 {
    10.0
}

fn default_tier() -> u8 {
    2
}

fn default_tier_from() -> NaiveDate {
    date(2021, 2, 1)
}

fn default_tier_to() -> NaiveDate {
    date(2021, 4, 1)
}

fn default_cheapest_category() -> String {
    "Books".to_string()
}

fn default_top_k() -> usize {
    3
}

fn default_ordered_on() -> NaiveDate {
    date(2021, 3, 15)
}

fn default_revenue_year() -> i32 {
    2021
}

fn default_revenue_month() -> u32 {
    2
}

fn default_statistics_category() -> String {
    "Books".to_string()
}

fn default_late_after_days() -> i64 {
    5
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            premium_category: default_premium_category(),
            premium_min_price: default_premium_min_price(),
            order_category: default_order_category(),
            discount_category: default_discount_category(),
            discount_percent: default_discount_percent(),
            tier: default_tier(),
            tier_from: default_tier_from(),
            tier_to: default_tier_to(),
            cheapest_category: default_cheapest_category(),
            cheapest_count: default_top_k(),
            recent_count: default_top_k(),
            ordered_on: default_ordered_on(),
            revenue_year: default_revenue_year(),
            revenue_month: default_revenue_month(),
            average_on: default_ordered_on(),
            statistics_category: default_statistics_category(),
            late_after_days: default_late_after_days(),
        }
    }
}

impl ReportParams {
    /// Checks the parameters, returning a message for the first bad field
    pub fn validate(&self) -> Result<(), String> {
        if !self.premium_min_price.is_finite() || self.premium_min_price < 0.0 {
            return Err(format!(
                "reports.premium_min_price must be a non-negative number, got {}",
                self.premium_min_price
            ));
        }

        if !(0.0..=100.0).contains(&self.discount_percent) {
            return Err(format!(
                "reports.discount_percent must be within 0..=100, got {}",
                self.discount_percent
            ));
        }

        if self.tier_from > self.tier_to {
            return Err(format!(
                "reports.tier_from ({}) is after reports.tier_to ({})",
                self.tier_from, self.tier_to
            ));
        }

        if !(1..=12).contains(&self.revenue_month) {
            return Err(format!(
                "reports.revenue_month must be within 1..=12, got {}",
                self.revenue_month
            ));
        }

        if self.late_after_days < 0 {
            return Err(format!(
                "reports.late_after_days must not be negative, got {}",
                self.late_after_days
            ));
        }

        let categories = [
            ("premium_category", &self.premium_category),
            ("order_category", &self.order_category),
            ("discount_category", &self.discount_category),
            ("cheapest_category", &self.cheapest_category),
            ("statistics_category", &self.statistics_category),
        ];
        for (field, value) in categories {
            if value.trim().is_empty() {
                return Err(format!("reports.{} must not be empty", field));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let params: ReportParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ReportParams::default());
        assert_eq!(params.tier_from, date(2021, 2, 1));
        assert_eq!(params.tier_to, date(2021, 4, 1));
        assert_eq!(params.discount_percent, 10.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let params: ReportParams =
            serde_json::from_str(r#"{"premium_category":"Toys","ordered_on":"2021-02-10"}"#).unwrap();
        assert_eq!(params.premium_category, "Toys");
        assert_eq!(params.ordered_on, date(2021, 2, 10));
        assert_eq!(params.average_on, date(2021, 3, 15));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut params = ReportParams::default();
        params.discount_percent = 150.0;
        assert!(params.validate().unwrap_err().contains("discount_percent"));

        let mut params = ReportParams::default();
        params.premium_min_price = -1.0;
        assert!(params.validate().unwrap_err().contains("premium_min_price"));

        let mut params = ReportParams::default();
        params.tier_from = date(2021, 5, 1);
        assert!(params.validate().unwrap_err().contains("tier_from"));

        let mut params = ReportParams::default();
        params.revenue_month = 13;
        assert!(params.validate().is_err());

        let mut params = ReportParams::default();
        params.order_category = "  ".to_string();
        assert!(params.validate().unwrap_err().contains("order_category"));
    }
}
