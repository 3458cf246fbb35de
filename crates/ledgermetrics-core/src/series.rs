//! Label keys, samples and the pivot from snapshots to series.
//!
//! Extractors build a [`SampleTable`] (`timestamp => label key => value`) because
//! that is the order in which ledger reports are read: one date column at a time.
//! Exposition wants the transpose, one series per label key, which is what
//! [`pivot`] produces.

use crate::Timestamp;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Label name for the account dimension.
pub const ACCOUNT_LABEL: &str = "account";
/// Label name for the currency dimension.
pub const CURRENCY_LABEL: &str = "currency";
/// Label name for the target currency dimension of exchange rates.
pub const TARGET_CURRENCY_LABEL: &str = "target_currency";

/// The ordered `(name, value)` pairs identifying one series within a metric.
///
/// Label order is significant: it is preserved in exposition output and two
/// keys are the same series only when their pairs match in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelKey {
    labels: Vec<(&'static str, String)>,
}

impl LabelKey {
    /// Create an empty label key.
    #[must_use]
    pub const fn new() -> Self {
        Self { labels: Vec::new() }
    }

    /// Append a label.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.labels.push((name, value.into()));
        self
    }

    /// The `{account, currency}` key used by balance, transaction and budget metrics.
    #[must_use]
    pub fn account_currency(account: impl Into<String>, currency: impl Into<String>) -> Self {
        Self::new()
            .with(ACCOUNT_LABEL, account)
            .with(CURRENCY_LABEL, currency)
    }

    /// The `{currency, target_currency}` key used by the exchange-rate metric.
    #[must_use]
    pub fn currency_target(currency: impl Into<String>, target_currency: impl Into<String>) -> Self {
        Self::new()
            .with(CURRENCY_LABEL, currency)
            .with(TARGET_CURRENCY_LABEL, target_currency)
    }

    /// Iterate over the labels in order.
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.labels.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Look up a label value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value.as_str())
    }

    /// The label names, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.labels.iter().map(|(name, _)| *name)
    }
}

/// A single observation of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// When the value was observed.
    pub timestamp: Timestamp,
    /// The observed value.
    pub value: Decimal,
}

impl Sample {
    /// Create a new sample.
    pub const fn new(timestamp: Timestamp, value: Decimal) -> Self {
        Self { timestamp, value }
    }
}

/// The samples of one series.
pub type Series = Vec<Sample>;

/// All series of one metric, keyed by label key.
pub type SeriesMap = BTreeMap<LabelKey, Series>;

/// Snapshots of a metric: `timestamp => label key => value`.
///
/// Timestamps iterate in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleTable {
    by_timestamp: BTreeMap<Timestamp, BTreeMap<LabelKey, Decimal>>,
}

impl SampleTable {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_timestamp: BTreeMap::new(),
        }
    }

    /// Record a value, replacing any earlier value for the same timestamp and key.
    pub fn insert(&mut self, timestamp: Timestamp, key: LabelKey, value: Decimal) -> Option<Decimal> {
        self.by_timestamp
            .entry(timestamp)
            .or_default()
            .insert(key, value)
    }

    /// Replace the whole snapshot for a timestamp.
    pub fn insert_snapshot(&mut self, timestamp: Timestamp, snapshot: BTreeMap<LabelKey, Decimal>) {
        self.by_timestamp.insert(timestamp, snapshot);
    }

    /// Look up a single value.
    pub fn get(&self, timestamp: Timestamp, key: &LabelKey) -> Option<Decimal> {
        self.by_timestamp
            .get(&timestamp)
            .and_then(|snapshot| snapshot.get(key))
            .copied()
    }

    /// The snapshot recorded at a timestamp.
    pub fn snapshot(&self, timestamp: Timestamp) -> Option<&BTreeMap<LabelKey, Decimal>> {
        self.by_timestamp.get(&timestamp)
    }

    /// Iterate over snapshots in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, &BTreeMap<LabelKey, Decimal>)> {
        self.by_timestamp.iter().map(|(ts, snapshot)| (*ts, snapshot))
    }

    /// Timestamps that have at least one snapshot.
    pub fn timestamps(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.by_timestamp.keys().copied()
    }

    /// Total number of samples across all timestamps.
    pub fn len(&self) -> usize {
        self.by_timestamp.values().map(BTreeMap::len).sum()
    }

    /// Check if the table holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turn `timestamp => key => value` into `key => [(timestamp, value)]`.
///
/// This is a pure reshape: no sample is dropped or aggregated, and each series
/// lists its samples in chronological order.
///
/// # Example
///
/// ```
/// use ledgermetrics_core::{parse_date, pivot, LabelKey, SampleTable};
/// use rust_decimal_macros::dec;
///
/// let key = LabelKey::account_currency("Expenses:Food", "SEK");
/// let mut table = SampleTable::new();
/// table.insert(parse_date("2024-02-01").unwrap(), key.clone(), dec!(20));
/// table.insert(parse_date("2024-01-01").unwrap(), key.clone(), dec!(10));
///
/// let series = pivot(&table);
/// let values: Vec<_> = series[&key].iter().map(|s| s.value).collect();
/// assert_eq!(values, vec![dec!(10), dec!(20)]);
/// ```
pub fn pivot(table: &SampleTable) -> SeriesMap {
    let mut pivoted = SeriesMap::new();
    for (timestamp, snapshot) in table.iter() {
        for (key, value) in snapshot {
            pivoted
                .entry(key.clone())
                .or_default()
                .push(Sample::new(timestamp, *value));
        }
    }
    pivoted
}
