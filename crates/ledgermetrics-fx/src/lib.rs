//! Exchange-rate resolution for ledgermetrics.
//!
//! hledger's `prices` command lists every market price in the journal as
//! `P <date> <currency> <rate> <currency>`. Quotes are sparse: a pair may be
//! quoted once a month while balances change daily, and many pairs are never
//! quoted directly at all. This crate rebuilds, for every timestamp, a complete
//! table of rates from every quoted currency into a fixed set of target
//! currencies.
//!
//! - [`QuoteBook`] - quotes parsed from `hledger prices`, grouped by date
//! - [`RateTable`] - the latest direct quote per `(from, to)` pair
//! - [`FxResolver`] - walks timestamps, forward-fills quotes and resolves cross rates
//!
//! # Example
//!
//! ```
//! use ledgermetrics_core::{parse_date, LabelKey};
//! use ledgermetrics_fx::{FxResolver, QuoteBook};
//! use rust_decimal_macros::dec;
//!
//! let book = QuoteBook::parse("P 2024-01-01 EUR 11.5 SEK\nP 2024-01-01 USD 10 SEK\n").unwrap();
//! let resolver = FxResolver::new(["SEK", "EUR"]);
//! let later = parse_date("2024-02-01").unwrap();
//!
//! let rates = resolver.resolve(&book, [later]).unwrap();
//! assert_eq!(rates.get(later, &LabelKey::currency_target("USD", "SEK")), Some(dec!(10)));
//! assert_eq!(rates.get(later, &LabelKey::currency_target("SEK", "SEK")), Some(dec!(1)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod quote;
mod rate_table;
mod resolver;

pub use quote::{parse_quote, Quote, QuoteBook};
pub use rate_table::{RateTable, Resolution};
pub use resolver::{FxResolver, DEFAULT_TARGET_CURRENCIES};
