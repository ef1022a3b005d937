//! Aggregation strategies
//!
//! Every reduction the pipeline supports is a variant of `Aggregation`,
//! applied through `Aggregation::apply`. Empty-input and tie-break rules
//! live here and nowhere else:
//!
//! | Strategy  | Empty input              | Ties                |
//! |-----------|--------------------------|---------------------|
//! | `Count`   | `0`                      | n/a                 |
//! | `Sum`     | `0.0`                    | n/a                 |
//! | `Average` | `EmptyAggregation`       | n/a                 |
//! | `Summary` | zero count, no min/max   | n/a                 |
//! | `MinBy`   | `EmptyAggregation`       | first element wins  |
//! | `MaxBy`   | `EmptyAggregation`       | first element wins  |

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::errors::{QueryError, QueryResult};
use super::sorter::{OrderBy, SortValue};

/// A numeric projection of an element, such as its price
pub struct Projection<'f, T> {
    project: Box<dyn Fn(&T) -> f64 + 'f>,
}

impl<'f, T> Projection<'f, T> {
    pub fn new(project: impl Fn(&T) -> f64 + 'f) -> Self {
        Self {
            project: Box::new(project),
        }
    }

    pub fn apply(&self, item: &T) -> f64 {
        (self.project)(item)
    }
}

/// Count, sum, min, max and average of a projection, gathered in one pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SummaryStatistics {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: None,
            max: None,
        }
    }

    /// Folds one value in
    pub fn accept(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Gathers statistics over a sequence of values
    pub fn of(values: impl IntoIterator<Item = f64>) -> Self {
        let mut stats = Self::new();
        for value in values {
            stats.accept(value);
        }
        stats
    }

    /// Mean of the accepted values; fails when nothing was accepted
    pub fn average(&self) -> QueryResult<f64> {
        if self.count == 0 {
            return Err(QueryError::empty_aggregation("average"));
        }
        Ok(self.sum / self.count as f64)
    }
}

impl Default for SummaryStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Tagged reduction strategies
pub enum Aggregation<'f, T> {
    Count,
    Sum(Projection<'f, T>),
    Average(Projection<'f, T>),
    Summary(Projection<'f, T>),
    MinBy(OrderBy<'f, T>),
    MaxBy(OrderBy<'f, T>),
}

/// The outcome of applying an `Aggregation`
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregated<'a, T> {
    Count(usize),
    Number(f64),
    Summary(SummaryStatistics),
    Element(&'a T),
}

impl<'a, T> Aggregated<'a, T> {
    /// The numeric value of a count, sum or average
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Aggregated::Count(n) => Some(*n as f64),
            Aggregated::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The element picked by min-by or max-by
    pub fn as_element(&self) -> Option<&'a T> {
        match self {
            Aggregated::Element(item) => Some(*item),
            _ => None,
        }
    }

    pub fn as_summary(&self) -> Option<&SummaryStatistics> {
        match self {
            Aggregated::Summary(stats) => Some(stats),
            _ => None,
        }
    }
}

impl<'f, T> Aggregation<'f, T> {
    /// Strategy name used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::Count => "count",
            Aggregation::Sum(_) => "sum",
            Aggregation::Average(_) => "average",
            Aggregation::Summary(_) => "summary",
            Aggregation::MinBy(_) => "min_by",
            Aggregation::MaxBy(_) => "max_by",
        }
    }

    /// Reduces `items` with this strategy
    pub fn apply<'a>(&self, items: &[&'a T]) -> QueryResult<Aggregated<'a, T>> {
        match self {
            Aggregation::Count => Ok(Aggregated::Count(items.len())),
            Aggregation::Sum(projection) => Ok(Aggregated::Number(sum(items.iter().copied(), projection))),
            Aggregation::Average(projection) => {
                average(items.iter().copied(), projection).map(Aggregated::Number)
            }
            Aggregation::Summary(projection) => {
                Ok(Aggregated::Summary(summarize(items.iter().copied(), projection)))
            }
            Aggregation::MinBy(order_by) => pick(items, order_by, Ordering::Less, "min_by").map(Aggregated::Element),
            Aggregation::MaxBy(order_by) => pick(items, order_by, Ordering::Greater, "max_by").map(Aggregated::Element),
        }
    }
}

impl<T> fmt::Debug for Aggregation<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sum of a projection; `0.0` for no elements
pub fn sum<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, projection: &Projection<'_, T>) -> f64 {
    items.into_iter().map(|item| projection.apply(item)).sum()
}

/// Mean of a projection; fails with `EmptyAggregation` for no elements
pub fn average<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    projection: &Projection<'_, T>,
) -> QueryResult<f64> {
    summarize(items, projection).average()
}

/// Summary statistics of a projection in one pass
pub fn summarize<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    projection: &Projection<'_, T>,
) -> SummaryStatistics {
    SummaryStatistics::of(items.into_iter().map(|item| projection.apply(item)))
}

/// The smallest element under `order_by`; the first one wins a tie
pub fn min_by<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    order_by: &OrderBy<'_, T>,
) -> QueryResult<&'a T> {
    let items: Vec<&'a T> = items.into_iter().collect();
    pick(&items, order_by, Ordering::Less, "min_by")
}

/// The largest element under `order_by`; the first one wins a tie
pub fn max_by<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    order_by: &OrderBy<'_, T>,
) -> QueryResult<&'a T> {
    let items: Vec<&'a T> = items.into_iter().collect();
    pick(&items, order_by, Ordering::Greater, "max_by")
}

/// Scans once, replacing the current pick only on a strict improvement.
///
/// The rule's direction is ignored: `wanted` alone says whether smaller or
/// larger keys win. Elements without a key are skipped under
/// `MissingKeys::Last` and rejected otherwise.
fn pick<'a, T>(
    items: &[&'a T],
    order_by: &OrderBy<'_, T>,
    wanted: Ordering,
    aggregate: &'static str,
) -> QueryResult<&'a T> {
    let keys = order_by.extract_keys(items)?;

    let mut best: Option<(&SortValue, &'a T)> = None;
    for (key, &item) in keys.iter().zip(items) {
        let Some(key) = key else {
            continue;
        };
        match best {
            Some((current, _)) if key.compare(current) != Some(wanted) => {}
            _ => best = Some((key, item)),
        }
    }

    best.map(|(_, item)| item)
        .ok_or_else(|| QueryError::empty_aggregation(aggregate))
}
