//! Cross-rate tables over time.

use crate::{QuoteBook, RateTable, Resolution};
use ledgermetrics_core::{pivot, ConversionError, LabelKey, SampleTable, SeriesMap, Timestamp};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Target currencies used when none are configured.
pub const DEFAULT_TARGET_CURRENCIES: [&str; 4] = ["SEK", "USD", "EUR", "RUB"];

/// Produces, for every timestamp, the rate from each known currency into each
/// target currency.
///
/// Quotes are projected forward: a rate quoted at T0 stays in effect at every
/// later timestamp until the same pair is quoted again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxResolver {
    targets: Vec<String>,
}

impl Default for FxResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_CURRENCIES)
    }
}

impl FxResolver {
    /// Create a resolver for the given target currencies.
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    /// The target currencies.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Resolve the full cross-rate table for every requested timestamp and
    /// every quote date.
    ///
    /// Fails on the first `(currency, target)` pair that no chain of quotes
    /// connects.
    pub fn resolve(
        &self,
        book: &QuoteBook,
        timestamps: impl IntoIterator<Item = Timestamp>,
    ) -> Result<SampleTable, ConversionError> {
        let timestamps: BTreeSet<Timestamp> = timestamps.into_iter().chain(book.dates()).collect();

        let mut latest = RateTable::new();
        let mut table = SampleTable::new();

        for timestamp in timestamps {
            if let Some(quotes) = book.quotes_on(timestamp) {
                latest.merge(quotes);
            }

            let snapshot = self.cross_rates(&latest, timestamp)?;
            tracing::trace!(%timestamp, rates = snapshot.len(), "resolved cross rates");
            table.insert_snapshot(timestamp, snapshot);
        }

        tracing::debug!(
            timestamps = table.timestamps().count(),
            samples = table.len(),
            "resolved exchange rates"
        );
        Ok(table)
    }

    /// Like [`resolve`](Self::resolve), pivoted into one series per
    /// `{currency, target_currency}`.
    pub fn series(
        &self,
        book: &QuoteBook,
        timestamps: impl IntoIterator<Item = Timestamp>,
    ) -> Result<SeriesMap, ConversionError> {
        Ok(pivot(&self.resolve(book, timestamps)?))
    }

    /// The cross-rate table for one rate table snapshot.
    ///
    /// Covers every target currency and every currency with a quote of its
    /// own, each converted into every target currency.
    pub fn cross_rates(
        &self,
        latest: &RateTable,
        timestamp: Timestamp,
    ) -> Result<BTreeMap<LabelKey, Decimal>, ConversionError> {
        let mut rates = BTreeMap::new();

        for target in &self.targets {
            let currencies = self.targets.iter().map(String::as_str).chain(latest.sources());
            for currency in currencies {
                match latest.resolve(currency, target) {
                    Resolution::Resolved(rate) => {
                        rates.insert(LabelKey::currency_target(currency, target.as_str()), rate);
                    }
                    Resolution::Unreachable => {
                        return Err(ConversionError::new(timestamp, currency, target.as_str()));
                    }
                }
            }
        }

        Ok(rates)
    }
}
