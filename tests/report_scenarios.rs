//! Report Scenario Tests
//!
//! Every catalogue report run against the bundled sample snapshot, checked
//! against hand-computed answers.

use orderstream::index::RelationIndex;
use orderstream::model::{Entity, ProductId, Snapshot};
use orderstream::pricing::{apply_discount, Discount};
use orderstream::query::{select, Predicate};
use orderstream::reports::{catalogue, Report, ReportParams};
use orderstream::result::QueryOutput;
use serde_json::{json, Value};

// =============================================================================
// Test Utilities
// =============================================================================

const SAMPLE: &str = include_str!("../data/sample_snapshot.json");

fn sample() -> Snapshot {
    Snapshot::from_json(SAMPLE).expect("sample snapshot is valid")
}

fn keys<E: Entity>(items: &[&E]) -> Vec<String> {
    items.iter().map(|e| e.key().to_string()).collect()
}

fn run(report: Report) -> QueryOutput {
    report.execute(&sample(), &ReportParams::default()).unwrap()
}

fn sequence_ids(output: &QueryOutput) -> Vec<u64> {
    output
        .as_sequence()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect()
}

fn approx(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap();
    assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
}

// =============================================================================
// Selection Reports
// =============================================================================

#[test]
fn test_premium_books() {
    assert_eq!(sequence_ids(&run(Report::PremiumBooks)), vec![5, 10]);
}

#[test]
fn test_orders_with_baby_products_keep_duplicates() {
    assert_eq!(sequence_ids(&run(Report::OrdersWithCategory)), vec![2, 5, 11, 3, 8, 9]);
}

#[test]
fn test_tier_two_products_in_range() {
    assert_eq!(sequence_ids(&run(Report::TierProductsInRange)), vec![1, 3, 4, 5, 7, 8, 9]);
}

#[test]
fn test_tier_range_is_inclusive() {
    let snapshot = sample();
    let index = RelationIndex::build(&snapshot).unwrap();
    let params = ReportParams::default();

    // O2 was placed on the last day of the range
    let products = catalogue::products_for_tier_between(
        &snapshot,
        &index,
        params.tier,
        params.tier_from,
        "2021-02-28".parse().unwrap(),
    );
    assert_eq!(keys(&products), vec!["P1", "P3", "P5", "P7"]);
}

// =============================================================================
// Ordering Reports
// =============================================================================

#[test]
fn test_cheapest_books() {
    assert_eq!(sequence_ids(&run(Report::CheapestInCategory)), vec![8, 6, 5]);
}

#[test]
fn test_most_recent_orders() {
    assert_eq!(sequence_ids(&run(Report::MostRecentOrders)), vec![3, 12, 6]);
}

#[test]
fn test_late_deliveries_put_undelivered_last() {
    assert_eq!(sequence_ids(&run(Report::LateDeliveries)), vec![11, 1, 5, 3, 6, 9]);
}

// =============================================================================
// Flatten and Aggregate Reports
// =============================================================================

#[test]
fn test_products_ordered_on_date_are_distinct() {
    assert_eq!(sequence_ids(&run(Report::ProductsOrderedOn)), vec![5, 9, 6]);
}

#[test]
fn test_february_revenue() {
    let output = run(Report::MonthlyRevenue);
    approx(output.as_scalar().unwrap(), 222.48 + 493.2 + 682.85);
}

#[test]
fn test_average_price_on_date() {
    let output = run(Report::AveragePriceOn);
    approx(output.as_scalar().unwrap(), (458.20 + 157.21 + 95.50) / 3.0);
}

#[test]
fn test_book_statistics() {
    let output = run(Report::CategoryStatistics);
    let stats = output.as_scalar().unwrap();

    assert_eq!(stats["count"], 4);
    approx(&stats["sum"], 458.20 + 95.50 + 24.99 + 458.20);
    assert_eq!(stats["min"], json!(24.99));
    assert_eq!(stats["max"], json!(458.2));
}

#[test]
fn test_statistics_for_empty_category() {
    let params = ReportParams {
        statistics_category: "Garden".to_string(),
        ..ReportParams::default()
    };
    let output = Report::CategoryStatistics.execute(&sample(), &params).unwrap();
    let stats = output.as_scalar().unwrap();

    assert_eq!(stats["count"], 0);
    assert_eq!(stats["average"], Value::Null);
}

// =============================================================================
// Keyed Reports
// =============================================================================

#[test]
fn test_product_count_by_order() {
    let output = run(Report::ProductCountByOrder);
    let mapping = output.as_mapping().unwrap();

    assert_eq!(mapping.len(), 12);
    assert_eq!(mapping["O1"], 3);
    assert_eq!(mapping["O4"], 1);
}

#[test]
fn test_order_ids_by_customer() {
    let output = run(Report::OrderIdsByCustomer);
    let mapping = output.as_mapping().unwrap();

    assert_eq!(mapping["C1"], json!([5, 9]));
    assert_eq!(mapping["C4"], json!([8, 11]));
    assert_eq!(mapping.len(), 6);
}

#[test]
fn test_orders_by_customer_hold_whole_orders() {
    let output = run(Report::OrdersByCustomer);
    let orders = output.as_mapping().unwrap()["C5"].as_array().unwrap().clone();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1]["status"], "DELIVERED");
}

#[test]
fn test_order_totals() {
    let output = run(Report::OrderTotals);
    let mapping = output.as_mapping().unwrap();

    approx(&mapping["O2"], 493.2);
    approx(&mapping["O6"], 12.66 + 536.80);
}

#[test]
fn test_product_names_by_category() {
    let output = run(Report::ProductNamesByCategory);
    assert_eq!(output.as_mapping().unwrap()["Baby"], json!(["dolorum quis", "ipsa et"]));
}

#[test]
fn test_most_expensive_book_tie_keeps_first() {
    let output = run(Report::MostExpensiveByCategory);
    assert_eq!(output.as_mapping().unwrap()["Books"]["id"], 5);

    let output = run(Report::MostExpensiveNameByCategory);
    assert_eq!(output.as_mapping().unwrap()["Books"], "laborum excepturi");
    assert_eq!(output.as_mapping().unwrap()["Toys"], "voluptatem placeat totam");
}

// =============================================================================
// Discount
// =============================================================================

#[test]
fn test_discount_preview_does_not_reprice() {
    let snapshot = sample();
    let output = Report::DiscountPreview.execute(&snapshot, &ReportParams::default()).unwrap();

    assert_eq!(sequence_ids(&output), vec![2, 4]);
    approx(&output.as_sequence().unwrap()[0]["discounted_price"], 12.66 * 90.0 / 100.0);
    assert_eq!(snapshot.products()[1].price, 12.66);
}

#[test]
fn test_select_then_apply_discount() {
    let mut snapshot = sample();
    let toys: Vec<ProductId> = select(snapshot.products(), &Predicate::in_category("Toys"))
        .iter()
        .map(|p| p.id)
        .collect();

    let repriced = apply_discount(&mut snapshot, toys, &Discount::percent(10.0).unwrap());
    assert_eq!(repriced, 2);

    // Reports over the mutated snapshot see the new prices
    let index = RelationIndex::build(&snapshot).unwrap();
    let totals = catalogue::order_totals(&snapshot, &index).unwrap();
    let expected = 12.66 * 90.0 / 100.0 + 536.80 * 90.0 / 100.0;
    assert!((totals[&orderstream::model::OrderId(6)] - expected).abs() < 1e-9);
}
