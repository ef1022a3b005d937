//! Ordering and top-K selection
//!
//! Sorting extracts every key first, checks them, then runs a stable sort,
//! so ties keep their source order and a bad key is reported instead of
//! silently misordering the result.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use super::errors::{QueryError, QueryResult};

/// A comparable sort key
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Integer(i64),
    Date(NaiveDate),
    Text(String),
}

impl SortValue {
    fn kind(&self) -> &'static str {
        match self {
            SortValue::Number(_) => "number",
            SortValue::Integer(_) => "integer",
            SortValue::Date(_) => "date",
            SortValue::Text(_) => "text",
        }
    }

    /// Compares two keys of the same kind.
    ///
    /// Numbers use the IEEE total order with `-0.0` and `0.0` equal. Keys
    /// of different kinds are not comparable and yield `None`.
    pub fn compare(&self, other: &SortValue) -> Option<Ordering> {
        match (self, other) {
            // Adding 0.0 maps -0.0 to 0.0
            (SortValue::Number(a), SortValue::Number(b)) => Some((a + 0.0).total_cmp(&(b + 0.0))),
            (SortValue::Integer(a), SortValue::Integer(b)) => Some(a.cmp(b)),
            (SortValue::Date(a), SortValue::Date(b)) => Some(a.cmp(b)),
            (SortValue::Text(a), SortValue::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Number(value)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Integer(value)
    }
}

impl From<u8> for SortValue {
    fn from(value: u8) -> Self {
        SortValue::Integer(i64::from(value))
    }
}

impl From<NaiveDate> for SortValue {
    fn from(value: NaiveDate) -> Self {
        SortValue::Date(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        SortValue::Text(value)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// What to do with elements whose key is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeys {
    /// Fail with `InvalidComparison`
    #[default]
    Reject,
    /// Place them after every keyed element, in either direction
    Last,
}

/// A comparison rule: key extractor, direction and missing-key policy
pub struct OrderBy<'k, T> {
    key: Box<dyn Fn(&T) -> Option<SortValue> + 'k>,
    direction: SortDirection,
    missing: MissingKeys,
    label: &'static str,
}

impl<'k, T> OrderBy<'k, T> {
    /// Ascending by a key that is always present
    pub fn asc<K: Into<SortValue>>(label: &'static str, key: impl Fn(&T) -> K + 'k) -> Self {
        Self::by(label, SortDirection::Asc, move |item| Some(key(item).into()))
    }

    /// Descending by a key that is always present
    pub fn desc<K: Into<SortValue>>(label: &'static str, key: impl Fn(&T) -> K + 'k) -> Self {
        Self::by(label, SortDirection::Desc, move |item| Some(key(item).into()))
    }

    /// Ascending by a key that may be absent
    pub fn asc_opt<K: Into<SortValue>>(
        label: &'static str,
        key: impl Fn(&T) -> Option<K> + 'k,
    ) -> Self {
        Self::by(label, SortDirection::Asc, move |item| key(item).map(Into::into))
    }

    /// Descending by a key that may be absent
    pub fn desc_opt<K: Into<SortValue>>(
        label: &'static str,
        key: impl Fn(&T) -> Option<K> + 'k,
    ) -> Self {
        Self::by(label, SortDirection::Desc, move |item| key(item).map(Into::into))
    }

    fn by(
        label: &'static str,
        direction: SortDirection,
        key: impl Fn(&T) -> Option<SortValue> + 'k,
    ) -> Self {
        Self {
            key: Box::new(key),
            direction,
            missing: MissingKeys::Reject,
            label,
        }
    }

    /// Sort elements without a key after all others
    pub fn missing_last(mut self) -> Self {
        self.missing = MissingKeys::Last;
        self
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn missing_keys(&self) -> MissingKeys {
        self.missing
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Extracts the key of one element
    pub fn key_of(&self, item: &T) -> Option<SortValue> {
        (self.key)(item)
    }

    /// Extracts and checks every key.
    ///
    /// Fails if a key is absent under `MissingKeys::Reject`, or if two
    /// present keys are of different kinds.
    pub(crate) fn extract_keys<'a>(&self, items: &[&'a T]) -> QueryResult<Vec<Option<SortValue>>> {
        let mut keys = Vec::with_capacity(items.len());
        let mut kind: Option<&'static str> = None;

        for (position, item) in items.iter().enumerate() {
            let key = self.key_of(item);
            match &key {
                None if self.missing == MissingKeys::Reject => {
                    return Err(QueryError::invalid_comparison(format!(
                        "element {} has no '{}' key and no missing-key policy is set",
                        position, self.label
                    )));
                }
                None => {}
                Some(value) => match kind {
                    None => kind = Some(value.kind()),
                    Some(expected) if expected != value.kind() => {
                        return Err(QueryError::invalid_comparison(format!(
                            "'{}' mixes {} and {} keys",
                            self.label,
                            expected,
                            value.kind()
                        )));
                    }
                    Some(_) => {}
                },
            }
            keys.push(key);
        }

        Ok(keys)
    }

    /// Compares two extracted keys under this rule.
    ///
    /// Absent keys compare greater than present ones regardless of
    /// direction. Keys must already have passed `extract_keys`.
    pub(crate) fn compare_keys(&self, a: &Option<SortValue>, b: &Option<SortValue>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ordering = a.compare(b).unwrap_or(Ordering::Equal);
                match self.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }
}

impl<T> fmt::Debug for OrderBy<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBy")
            .field("label", &self.label)
            .field("direction", &self.direction)
            .field("missing", &self.missing)
            .finish()
    }
}

/// Sorts elements by `order_by`.
///
/// Sort is stable: elements with equal keys keep their source order.
pub fn sort<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    order_by: &OrderBy<'_, T>,
) -> QueryResult<Vec<&'a T>> {
    let items: Vec<&'a T> = items.into_iter().collect();
    let keys = order_by.extract_keys(&items)?;

    let mut ranked: Vec<(Option<SortValue>, &'a T)> = keys.into_iter().zip(items).collect();
    ranked.sort_by(|(a, _), (b, _)| order_by.compare_keys(a, b));

    Ok(ranked.into_iter().map(|(_, item)| item).collect())
}

/// The first `k` elements under `order_by`.
///
/// Sorts fully, then truncates. Returns every element when fewer than `k`
/// exist and nothing when `k` is 0.
pub fn top_k<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    k: usize,
    order_by: &OrderBy<'_, T>,
) -> QueryResult<Vec<&'a T>> {
    let mut sorted = sort(items, order_by)?;
    sorted.truncate(k);
    Ok(sorted)
}
