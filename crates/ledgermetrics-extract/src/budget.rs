//! Monthly budget reports.
//!
//! `hledger balance --budget --monthly --output-format csv` interleaves its
//! columns: after the account column, every date column is followed by a
//! companion column for the same month.
//!
//! ```text
//! "Account","2024-01","budget","2024-02","budget"
//! "Expenses:Food","80 SEK","100 SEK","120 SEK","100 SEK, 10 EUR"
//! "Total:","80 SEK","100 SEK","120 SEK","100 SEK, 10 EUR"
//! ```
//!
//! When the companion column is labelled `budget` the target is read from it;
//! otherwise the cell under the date itself holds the target. The last row is
//! always an aggregate and is dropped.

use crate::{ExtractError, Report};
use ledgermetrics_core::{
    parse_balances, parse_date, LabelKey, ParseError, SampleTable, Timestamp,
};

/// Header hledger gives the budget half of each month.
const BUDGET_COLUMN: &str = "budget";

/// Read a budget report from CSV text.
pub fn extract_budget(content: &str) -> Result<Report, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let rows = reader
        .records()
        .map(|result| result.map(|record| record.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()?;

    extract_budget_matrix(&rows)
}

/// Read a budget report from an already-split matrix, header row first.
///
/// # Example
///
/// ```
/// use ledgermetrics_core::LabelKey;
/// use ledgermetrics_extract::extract_budget_matrix;
///
/// let matrix = vec![
///     vec!["", "2024-01", "x", "2024-02", "x"],
///     vec!["Food", "100 SEK", "", "200 SEK", ""],
///     vec!["total", "300 SEK", "", "300 SEK", ""],
/// ];
/// let series = extract_budget_matrix(&matrix).unwrap().series();
/// assert_eq!(series.len(), 1);
/// assert_eq!(series[&LabelKey::account_currency("Food", "SEK")].len(), 2);
/// ```
pub fn extract_budget_matrix<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Report, ExtractError> {
    let Some((header, body)) = rows.split_first() else {
        return Ok(Report::default());
    };

    let groups = budget_groups(header)?;
    let accounts = body.split_last().map_or(&[][..], |(_total, accounts)| accounts);

    let mut samples = SampleTable::new();
    for (row, cells) in accounts.iter().enumerate() {
        let account = cells
            .first()
            .map(AsRef::<str>::as_ref)
            .filter(|account| !account.is_empty())
            .ok_or(ParseError::MissingAccount { row })?;

        for &(timestamp, column) in &groups {
            let raw = cells.get(column).map_or("", AsRef::<str>::as_ref);
            for cell in parse_balances(raw)? {
                // Cells without a currency carry no target for this month
                if let Some(amount) = cell.into_amount() {
                    samples.insert(
                        timestamp,
                        LabelKey::account_currency(account, amount.currency),
                        amount.number,
                    );
                }
            }
        }
    }

    tracing::debug!(
        months = groups.len(),
        rows = accounts.len(),
        samples = samples.len(),
        "extracted budget report"
    );

    Ok(Report {
        dates: groups.iter().map(|&(timestamp, _)| timestamp).collect(),
        samples,
    })
}

/// Pair every date column with the column holding its budget.
fn budget_groups<S: AsRef<str>>(header: &[S]) -> Result<Vec<(Timestamp, usize)>, ParseError> {
    header
        .iter()
        .enumerate()
        .skip(1)
        .step_by(2)
        .map(|(column, raw)| {
            let timestamp = parse_date(raw.as_ref())?;
            let data_column = match header.get(column + 1) {
                Some(label) if label.as_ref().eq_ignore_ascii_case(BUDGET_COLUMN) => column + 1,
                _ => column,
            };
            Ok((timestamp, data_column))
        })
        .collect()
}
