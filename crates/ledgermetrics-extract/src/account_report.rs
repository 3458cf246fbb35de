//! Per-account daily reports.
//!
//! Both the cumulative balance report and the transaction report come out of
//! `hledger balance --daily --output-format csv`; they share one layout:
//!
//! ```text
//! "account","2024-01-01","2024-01-02"
//! "Assets:Checking","1000 SEK","1,250.50 SEK"
//! "total","1000 SEK","1,250.50 SEK"
//! ```
//!
//! The `total` row is an aggregate of the real accounts and is dropped.

use crate::{ExtractError, Report};
use ledgermetrics_core::{parse_balances, parse_date, LabelKey, ParseError, SampleTable};

/// Account name hledger gives its aggregate row.
const TOTAL_ACCOUNT: &str = "total";

/// Read a cumulative balance report: each cell is the balance as of its date.
pub fn extract_balances(content: &str) -> Result<Report, ExtractError> {
    extract_account_report(content, "balance")
}

/// Read a transaction report: each cell is the sum of postings on its date.
pub fn extract_transactions(content: &str) -> Result<Report, ExtractError> {
    extract_account_report(content, "transactions")
}

fn extract_account_report(content: &str, name: &str) -> Result<Report, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    // First column is the account, every other column a date
    let dates = reader
        .headers()?
        .iter()
        .skip(1)
        .map(parse_date)
        .collect::<Result<Vec<_>, _>>()?;

    let mut samples = SampleTable::new();
    let mut rows = 0;

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let account = record
            .get(0)
            .filter(|account| !account.is_empty())
            .ok_or(ParseError::MissingAccount { row })?;

        if account == TOTAL_ACCOUNT {
            continue;
        }
        rows += 1;

        for (date, raw) in dates.iter().zip(record.iter().skip(1)) {
            for cell in parse_balances(raw)? {
                if let Some(amount) = cell.into_amount() {
                    samples.insert(
                        *date,
                        LabelKey::account_currency(account, amount.currency),
                        amount.number,
                    );
                }
            }
        }
    }

    tracing::debug!(
        report = name,
        dates = dates.len(),
        rows,
        samples = samples.len(),
        "extracted account report"
    );

    Ok(Report { dates, samples })
}
