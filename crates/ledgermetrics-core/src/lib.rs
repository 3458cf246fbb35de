//! Core types for ledgermetrics
//!
//! This crate provides the fundamental types shared by the extractors, the
//! exchange-rate resolver and the exposition writer:
//!
//! - [`Amount`] - A decimal number with a currency
//! - [`Cell`] - A parsed report cell (empty, the `"0"` sentinel, or an amount)
//! - [`Timestamp`] - A day-granularity instant parsed from `YYYY-MM` or `YYYY-MM-DD`
//! - [`LabelKey`] - The ordered label set identifying one series within a metric
//! - [`SampleTable`] - `timestamp => label key => value`, the shape extractors produce
//! - [`SeriesMap`] - `label key => [(timestamp, value)]`, the shape exposition needs
//!
//! # Example
//!
//! ```
//! use ledgermetrics_core::{parse_balance, parse_date, pivot, Cell, LabelKey, SampleTable};
//! use rust_decimal_macros::dec;
//!
//! let mut table = SampleTable::new();
//! let Cell::Amount(amount) = parse_balance("1,000.50 SEK").unwrap() else {
//!     panic!("expected an amount");
//! };
//! let key = LabelKey::account_currency("Assets:Checking", amount.currency.as_str());
//! table.insert(parse_date("2024-01").unwrap(), key.clone(), amount.number);
//!
//! let series = pivot(&table);
//! assert_eq!(series[&key][0].value, dec!(1000.50));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod amount;
pub mod date;
pub mod error;
pub mod series;

pub use amount::{parse_balance, parse_balances, Amount, Cell};
pub use date::{parse_date, Timestamp};
pub use error::{ConversionError, ParseError};
pub use series::{pivot, LabelKey, Sample, SampleTable, Series, SeriesMap};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
