//! Error types shared across the workspace.

use crate::Timestamp;
use thiserror::Error;

/// Error returned when a report cell, header, row or quote line does not
/// match the expected grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A cell that should hold `"<amount> <currency>"`.
    #[error("unexpected balance: \"{raw}\"")]
    InvalidAmount {
        /// The offending cell text.
        raw: String,
    },

    /// A date that is neither `YYYY-MM` nor `YYYY-MM-DD`.
    #[error("invalid date: \"{raw}\"")]
    InvalidDate {
        /// The offending date text.
        raw: String,
    },

    /// A price line that is not `P <date> <currency> <rate> <currency>`.
    #[error("invalid price quote: \"{line}\"")]
    InvalidQuote {
        /// The offending line.
        line: String,
    },

    /// A report row without an account column.
    #[error("row {row} has no account column")]
    MissingAccount {
        /// Zero-based row index, not counting the header.
        row: usize,
    },
}

/// Error returned when no chain of quotes connects a currency to a target
/// currency at some timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{timestamp}: can not convert {currency} to {target_currency}")]
pub struct ConversionError {
    /// The timestamp whose rate table was incomplete.
    pub timestamp: Timestamp,
    /// The source currency.
    pub currency: String,
    /// The target currency.
    pub target_currency: String,
}

impl ConversionError {
    /// Create a new conversion error.
    pub fn new(
        timestamp: Timestamp,
        currency: impl Into<String>,
        target_currency: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            currency: currency.into(),
            target_currency: target_currency.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_messages_carry_context() {
        let err = ParseError::InvalidAmount {
            raw: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected balance: \"abc\"");

        let err = ConversionError::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "BTC", "SEK");
        assert_eq!(err.to_string(), "2024-03-01: can not convert BTC to SEK");
    }
}
