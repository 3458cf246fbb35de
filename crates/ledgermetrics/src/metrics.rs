//! From raw hledger reports to named metrics.

use crate::source::{LedgerSource, Query, SourceError};
use ledgermetrics_core::{ConversionError, ParseError, SeriesMap, Timestamp};
use ledgermetrics_extract::{extract_balances, extract_budget, extract_transactions, ExtractError};
use ledgermetrics_fx::{FxResolver, QuoteBook};
use thiserror::Error;

/// Name of the balance metric.
pub const BALANCE_METRIC: &str = "hledger_balance";
/// Name of the transactions metric.
pub const TRANSACTIONS_METRIC: &str = "hledger_transactions";
/// Name of the exchange-rate metric.
pub const FX_RATE_METRIC: &str = "hledger_fx_rate";
/// Name of the budget metric.
pub const BUDGET_METRIC: &str = "hledger_budget";

/// Errors from deriving the metrics.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A report could not be fetched.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A report could not be read.
    #[error("{report} report: {source}")]
    Extract {
        /// Which report.
        report: &'static str,
        /// What went wrong.
        #[source]
        source: ExtractError,
    },

    /// The price list could not be read.
    #[error("prices: {0}")]
    Prices(#[from] ParseError),

    /// Some currency has no path to a target currency.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl ExportError {
    fn extract(report: &'static str) -> impl FnOnce(ExtractError) -> Self {
        move |source| Self::Extract { report, source }
    }
}

/// A named, documented family of series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    /// Metric name.
    pub name: &'static str,
    /// One-line description.
    pub help: &'static str,
    /// The series, keyed by label set.
    pub series: SeriesMap,
}

impl Metric {
    /// Create a new metric.
    pub const fn new(name: &'static str, help: &'static str, series: SeriesMap) -> Self {
        Self { name, help, series }
    }

    /// Total number of samples across all series.
    pub fn sample_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }
}

/// The raw output of every hledger report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReports {
    /// Cumulative daily balances (CSV).
    pub balances: String,
    /// Daily transaction sums (CSV).
    pub transactions: String,
    /// Market prices (`P` lines).
    pub prices: String,
    /// Monthly budget (CSV).
    pub budget: String,
}

/// Run all reports concurrently.
///
/// When several fail, the first error in the order balances, transactions,
/// prices, budget is returned.
pub fn fetch_reports(source: &impl LedgerSource) -> Result<RawReports, SourceError> {
    let ((balances, transactions), (prices, budget)) = rayon::join(
        || {
            rayon::join(
                || source.query(Query::Balances),
                || source.query(Query::Transactions),
            )
        },
        || {
            rayon::join(
                || source.query(Query::Prices),
                || source.query(Query::Budget),
            )
        },
    );

    Ok(RawReports {
        balances: balances?,
        transactions: transactions?,
        prices: prices?,
        budget: budget?,
    })
}

/// Derive every metric from the raw reports, in output order.
///
/// Exchange rates are resolved for every date in the balance and transaction
/// report headers, plus every date with a quote. Budget months start on the
/// 1st and may predate the first quote, so they are left out.
pub fn derive_metrics(
    reports: &RawReports,
    resolver: &FxResolver,
) -> Result<Vec<Metric>, ExportError> {
    let balances =
        extract_balances(&reports.balances).map_err(ExportError::extract("balance"))?;
    let transactions =
        extract_transactions(&reports.transactions).map_err(ExportError::extract("transactions"))?;
    let budget = extract_budget(&reports.budget).map_err(ExportError::extract("budget"))?;
    let book = QuoteBook::parse(&reports.prices)?;

    let timestamps: Vec<Timestamp> = balances
        .dates
        .iter()
        .chain(&transactions.dates)
        .copied()
        .collect();
    let fx_rates = resolver.series(&book, timestamps)?;

    let metrics = vec![
        Metric::new(
            BALANCE_METRIC,
            "daily balance for every (account, currency)",
            balances.series(),
        ),
        Metric::new(
            TRANSACTIONS_METRIC,
            "daily sum of all transactions for every (account, currency)",
            transactions.series(),
        ),
        Metric::new(
            FX_RATE_METRIC,
            "exchange rate from every existing currency to all target currencies",
            fx_rates,
        ),
        Metric::new(
            BUDGET_METRIC,
            "monthly budget for (account, currency)",
            budget.series(),
        ),
    ];

    for metric in &metrics {
        tracing::info!(
            metric = metric.name,
            series = metric.series.len(),
            samples = metric.sample_count(),
            "derived metric"
        );
    }
    Ok(metrics)
}
