//! Export hledger data as OpenMetrics.
//!
//! This crate runs four hledger reports, derives time series from them and
//! writes those series in the OpenMetrics text format:
//!
//! - `hledger_balance` - daily balance for every `(account, currency)`
//! - `hledger_transactions` - daily sum of transactions for every `(account, currency)`
//! - `hledger_fx_rate` - rate from every quoted currency into each target currency
//! - `hledger_budget` - monthly budget for every `(account, currency)`
//!
//! # Example Usage
//!
//! ```bash
//! ledgermetrics --file household.journal > ledger.om
//! LEDGERMETRICS_TARGET_CURRENCIES=EUR,USD ledgermetrics
//! RUST_LOG=ledgermetrics=debug ledgermetrics
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod config;
pub mod exposition;
pub mod metrics;
pub mod source;

pub use config::{ConfigError, ExportConfig};
pub use metrics::{derive_metrics, fetch_reports, ExportError, Metric, RawReports};
pub use source::{Hledger, LedgerSource, Query, SourceError};
