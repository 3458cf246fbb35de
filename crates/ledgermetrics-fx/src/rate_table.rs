//! Direct quotes and the search for cross rates between them.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of looking for a rate between two currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A chain of quotes connects the currencies at this rate.
    Resolved(Decimal),
    /// No chain of quotes connects the currencies.
    Unreachable,
}

impl Resolution {
    /// The rate, if one was found.
    pub const fn rate(self) -> Option<Decimal> {
        match self {
            Self::Resolved(rate) => Some(rate),
            Self::Unreachable => None,
        }
    }
}

/// Direct quotes indexed as `from => to => rate`.
///
/// Used both for the quotes given on a single date and for the running
/// "latest known quote" table the resolver carries from one timestamp to the
/// next. Iteration is in lexicographic currency order, which makes the cross
/// rate search deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<String, BTreeMap<String, Decimal>>,
}

impl RateTable {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Record a direct quote, returning the rate it replaced.
    pub fn insert(
        &mut self,
        currency: impl Into<String>,
        target: impl Into<String>,
        rate: Decimal,
    ) -> Option<Decimal> {
        self.rates
            .entry(currency.into())
            .or_default()
            .insert(target.into(), rate)
    }

    /// Overlay newer quotes on this table.
    ///
    /// Only the `(from, to)` pairs present in `newer` change; every other pair
    /// keeps its previous rate.
    pub fn merge(&mut self, newer: &Self) {
        for (currency, targets) in &newer.rates {
            let entry = self.rates.entry(currency.clone()).or_default();
            for (target, rate) in targets {
                entry.insert(target.clone(), *rate);
            }
        }
    }

    /// The directly quoted rate from `currency` to `target`.
    pub fn direct(&self, currency: &str, target: &str) -> Option<Decimal> {
        self.rates.get(currency)?.get(target).copied()
    }

    /// Currencies that have at least one quote of their own.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Number of `(from, to)` pairs.
    pub fn len(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    /// Check if the table holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// A single hop: identity, direct quote, or the inverse of the reverse quote.
    fn hop(&self, currency: &str, target: &str) -> Option<Decimal> {
        if currency == target {
            return Some(Decimal::ONE);
        }
        if let Some(rate) = self.direct(currency, target) {
            return Some(rate);
        }
        // A zero quote has no inverse
        self.direct(target, currency)
            .and_then(|rate| Decimal::ONE.checked_div(rate))
    }

    /// Find the rate from `currency` to `target`.
    ///
    /// Each currency on the search frontier is first checked for a single hop
    /// to `target`. Failing that, the search continues depth-first through the
    /// currencies it is directly quoted in, smallest code first, multiplying
    /// rates along the path. The first path found wins. Every currency is
    /// expanded at most once, so cyclic quote graphs terminate.
    ///
    /// # Example
    ///
    /// ```
    /// use ledgermetrics_fx::{RateTable, Resolution};
    /// use rust_decimal_macros::dec;
    ///
    /// let mut table = RateTable::new();
    /// table.insert("A", "B", dec!(2));
    /// table.insert("B", "C", dec!(3));
    ///
    /// assert_eq!(table.resolve("A", "C"), Resolution::Resolved(dec!(6)));
    /// assert_eq!(table.resolve("A", "Z"), Resolution::Unreachable);
    /// ```
    pub fn resolve(&self, currency: &str, target: &str) -> Resolution {
        let mut visited = BTreeSet::new();
        let mut frontier = vec![(currency, Decimal::ONE)];

        while let Some((current, rate)) = frontier.pop() {
            if !visited.insert(current) {
                continue;
            }

            if let Some(hop) = self.hop(current, target) {
                if let Some(total) = rate.checked_mul(hop) {
                    return Resolution::Resolved(total);
                }
                tracing::warn!(
                    currency,
                    target,
                    via = current,
                    "cross rate overflows, path dropped"
                );
                continue;
            }

            let Some(intermediates) = self.rates.get(current) else {
                continue;
            };
            // Reversed so the smallest code is popped first
            for (intermediate, step) in intermediates.iter().rev() {
                if visited.contains(intermediate.as_str()) {
                    continue;
                }
                match rate.checked_mul(*step) {
                    Some(next) => frontier.push((intermediate.as_str(), next)),
                    None => tracing::warn!(
                        currency,
                        target,
                        via = intermediate.as_str(),
                        "cross rate overflows, path dropped"
                    ),
                }
            }
        }

        Resolution::Unreachable
    }
}
