//! Readers for hledger CSV reports.
//!
//! Each reader turns one report into a [`Report`]: the dates found in its
//! header plus a [`SampleTable`] keyed by `{account, currency}`.
//!
//! - [`extract_balances`] - `balance --daily --cumulative`, point-in-time balances
//! - [`extract_transactions`] - `balance --daily`, per-period sums
//! - [`extract_budget`] - `balance --budget --monthly`, monthly budget targets
//!
//! # Example
//!
//! ```
//! use ledgermetrics_core::LabelKey;
//! use ledgermetrics_extract::extract_balances;
//!
//! let report = extract_balances("account,2024-01-01\nChecking,1000 SEK\ntotal,1000 SEK\n").unwrap();
//! let series = report.series();
//! assert_eq!(series.len(), 1);
//! assert!(series.contains_key(&LabelKey::account_currency("Checking", "SEK")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod account_report;
mod budget;

pub use account_report::{extract_balances, extract_transactions};
pub use budget::{extract_budget, extract_budget_matrix};

use ledgermetrics_core::{pivot, ParseError, SampleTable, SeriesMap, Timestamp};
use thiserror::Error;

/// Errors that can occur while reading a report.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The report is not valid CSV, or its rows disagree on length.
    #[error("malformed CSV report: {0}")]
    Csv(#[from] csv::Error),

    /// A header, cell or row does not match the expected grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The samples read from one report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Every date named in the report header, in header order.
    pub dates: Vec<Timestamp>,
    /// The recorded samples.
    pub samples: SampleTable,
}

impl Report {
    /// Pivot the samples into one series per `{account, currency}`.
    pub fn series(&self) -> SeriesMap {
        pivot(&self.samples)
    }
}
