//! Observability subsystem for orderstream
//!
//! - Structured JSON line logging with a process-wide minimum severity
//! - Typed lifecycle events
//! - Monotonic counters
//! - Scope-based begin/complete tracing
//!
//! # Principles
//!
//! 1. Observability is read-only: it never changes query results
//! 2. No async or background threads
//! 3. Deterministic field ordering
//!
//! ```ignore
//! use orderstream::observability::{Event, Logger, QueryMetrics};
//!
//! Logger::info(Event::IndexBuilt.as_str(), &[("orders", "42")]);
//! QueryMetrics::global().increment_index_builds();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity, UnknownSeverity};
pub use metrics::{MetricsSnapshot, QueryMetrics};
pub use scope::{ObservationScope, Timer};

/// Logs a lifecycle event with fields.
///
/// Failure events are logged at ERROR, everything else at INFO.
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
