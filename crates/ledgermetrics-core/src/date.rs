//! Report dates.

use crate::ParseError;
use chrono::NaiveDate;

/// A calendar instant at day granularity.
///
/// Month columns (`2024-01`) and day columns (`2024-01-01`) normalize to the
/// same value, so they compare equal.
pub type Timestamp = NaiveDate;

/// Parse a `YYYY-MM` or `YYYY-MM-DD` date.
///
/// `YYYY-MM` resolves to the first day of the month.
///
/// # Example
///
/// ```
/// use ledgermetrics_core::parse_date;
///
/// assert_eq!(parse_date("2024-01").unwrap(), parse_date("2024-01-01").unwrap());
/// assert!(parse_date("January").is_err());
/// ```
pub fn parse_date(raw: &str) -> Result<Timestamp, ParseError> {
    let invalid = || ParseError::InvalidDate {
        raw: raw.to_string(),
    };

    match raw.split('-').count() {
        2 => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").map_err(|_| invalid()),
        3 => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
