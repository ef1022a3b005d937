//! Observable events
//!
//! Every log line the crate writes outside an `ObservationScope` names one
//! of these events.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file parsed and validated
    ConfigLoaded,
    /// Snapshot collections loaded and validated
    SnapshotLoaded,
    /// Relation index derived from a snapshot
    IndexBuilt,
    /// Report pipeline started
    ReportBegin,
    /// Report pipeline produced output
    ReportComplete,
    /// Report pipeline returned an error
    ReportFailed,
    /// Prices rewritten by a discount
    DiscountApplied,
    /// Counter totals at the end of a command
    MetricsReported,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SnapshotLoaded => "SNAPSHOT_LOADED",
            Event::IndexBuilt => "INDEX_BUILT",
            Event::ReportBegin => "REPORT_BEGIN",
            Event::ReportComplete => "REPORT_COMPLETE",
            Event::ReportFailed => "REPORT_FAILED",
            Event::DiscountApplied => "DISCOUNT_APPLIED",
            Event::MetricsReported => "METRICS",
        }
    }

    /// Events that describe a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::ReportFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
