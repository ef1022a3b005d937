//! Query metrics
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL: QueryMetrics = QueryMetrics::new();

/// Counters for report runs, index builds and pricing.
///
/// All counters use relaxed atomics; values are exact once the counting
/// threads are joined.
#[derive(Debug, Default)]
pub struct QueryMetrics {
    reports_executed: AtomicU64,
    reports_failed: AtomicU64,
    rows_returned: AtomicU64,
    index_builds: AtomicU64,
    discounts_applied: AtomicU64,
}

impl QueryMetrics {
    pub const fn new() -> Self {
        Self {
            reports_executed: AtomicU64::new(0),
            reports_failed: AtomicU64::new(0),
            rows_returned: AtomicU64::new(0),
            index_builds: AtomicU64::new(0),
            discounts_applied: AtomicU64::new(0),
        }
    }

    /// The process-wide registry
    pub fn global() -> &'static QueryMetrics {
        &GLOBAL
    }

    /// Records a successful report and the rows it produced
    pub fn record_report(&self, rows: u64) {
        self.reports_executed.fetch_add(1, Ordering::Relaxed);
        self.rows_returned.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn increment_reports_failed(&self) {
        self.reports_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_index_builds(&self) {
        self.index_builds.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds repriced products
    pub fn add_discounts_applied(&self, products: u64) {
        self.discounts_applied.fetch_add(products, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reports_executed: self.reports_executed.load(Ordering::Relaxed),
            reports_failed: self.reports_failed.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
            index_builds: self.index_builds.load(Ordering::Relaxed),
            discounts_applied: self.discounts_applied.load(Ordering::Relaxed),
        }
    }

}

/// A point-in-time copy of every counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub reports_executed: u64,
    pub reports_failed: u64,
    pub rows_returned: u64,
    pub index_builds: u64,
    pub discounts_applied: u64,
}

impl MetricsSnapshot {
    /// Counter names and values as log fields, sorted by name
    pub fn fields(&self) -> [(&'static str, String); 5] {
        [
            ("discounts_applied", self.discounts_applied.to_string()),
            ("index_builds", self.index_builds.to_string()),
            ("reports_executed", self.reports_executed.to_string()),
            ("reports_failed", self.reports_failed.to_string()),
            ("rows_returned", self.rows_returned.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = QueryMetrics::new().snapshot();
        assert_eq!(snapshot.reports_executed, 0);
        assert_eq!(snapshot.rows_returned, 0);
        assert_eq!(snapshot.discounts_applied, 0);
    }

    #[test]
    fn test_record_report() {
        let metrics = QueryMetrics::new();
        metrics.record_report(3);
        metrics.record_report(4);
        metrics.increment_reports_failed();
        metrics.increment_index_builds();
        metrics.add_discounts_applied(2);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.reports_executed, 2);
        assert_eq!(snapshot.rows_returned, 7);
        assert_eq!(snapshot.reports_failed, 1);
        assert_eq!(snapshot.index_builds, 1);
        assert_eq!(snapshot.discounts_applied, 2);
    }

    #[test]
    fn test_snapshot_fields() {
        let metrics = QueryMetrics::new();
        metrics.record_report(5);

        let fields = metrics.snapshot().fields();
        assert!(fields.windows(2).all(|pair| pair[0].0 < pair[1].0));
        assert!(fields.contains(&("reports_executed", "1".to_string())));
        assert!(fields.contains(&("rows_returned", "5".to_string())));
        assert!(fields.contains(&("reports_failed", "0".to_string())));
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let metrics = Arc::new(QueryMetrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_report(1);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.reports_executed, 800);
        assert_eq!(snapshot.rows_returned, 800);
    }
}
