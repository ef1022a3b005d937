//! Begin/complete logging around one unit of work
//!
//! - `{NAME}_BEGIN` on creation
//! - `{NAME}_COMPLETE` with `elapsed_ms` on `complete`
//! - `{NAME}_FAILED` on `fail`
//! - `{NAME}_INCOMPLETE` if dropped without either

use std::cell::Cell;
use std::time::Instant;

use super::logger::Logger;

/// A scope that logs its own start and end
///
/// ```ignore
/// let scope = ObservationScope::with_fields("REPORT", &[("report", "late-deliveries")]);
/// let output = run()?;
/// scope.complete_with_fields(&[("rows", "4")]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    timer: Timer,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Creates a scope whose fields are repeated on every line it logs
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            completed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            timer: Timer::new(),
        }
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        let elapsed = self.timer.elapsed_ms();

        let mut fields = self.field_refs();
        fields.push(("elapsed_ms", elapsed.as_str()));
        fields.extend(extra_fields.iter().copied());

        Logger::info(&format!("{}_COMPLETE", self.name), &fields);
    }

    /// Logs `{NAME}_FAILED` at ERROR with the error code and message
    pub fn fail(self, code: &str, reason: &str) {
        self.completed.set(true);

        let mut fields = self.field_refs();
        fields.push(("code", code));
        fields.push(("reason", reason));

        Logger::error(&format!("{}_FAILED", self.name), &fields);
    }

    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            let mut fields = self.field_refs();
            fields.push(("reason", "scope dropped without completion"));
            Logger::warn(&format!("{}_INCOMPLETE", self.name), &fields);
        }
    }
}

/// Wall-clock timer for `elapsed_ms` fields
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_complete() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.is_completed());
        scope.complete();
    }

    #[test]
    fn test_scope_with_fields() {
        let scope = ObservationScope::with_fields("REPORT", &[("report", "order-totals")]);
        scope.complete_with_fields(&[("rows", "3")]);
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST");
        scope.fail("QUERY_EMPTY_AGGREGATION", "nothing to average");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::new("TEST");
        drop(scope);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let ms: u64 = timer.elapsed_ms().parse().unwrap();
        assert!(ms >= 10);
    }
}
