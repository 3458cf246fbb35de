//! Amounts and report cells.
//!
//! hledger renders every amount in its CSV reports as `"<number> <commodity>"`,
//! where the number may carry thousands separators and the commodity may be
//! quoted when it contains spaces. A cell holding only `"0"` or nothing at all
//! means there is no data for that account and date.

use crate::ParseError;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Separator between the amounts of a multi-commodity cell.
const MULTI_AMOUNT_SEPARATOR: &str = ", ";

/// An amount is a quantity paired with a currency.
///
/// # Examples
///
/// ```
/// use ledgermetrics_core::Amount;
/// use rust_decimal_macros::dec;
///
/// let amount = Amount::new(dec!(100.00), "SEK");
/// assert_eq!(amount.number, dec!(100.00));
/// assert_eq!(amount.currency, "SEK");
/// assert_eq!(amount.to_string(), "100.00 SEK");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    /// The decimal quantity
    pub number: Decimal,
    /// The currency code (e.g., "SEK", "EUR", "Gift Card")
    pub currency: String,
}

impl Amount {
    /// Create a new amount.
    #[must_use]
    pub fn new(number: Decimal, currency: impl Into<String>) -> Self {
        Self {
            number,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency)
    }
}

/// A parsed report cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// The cell was empty.
    Empty,
    /// The cell held the `"0"` sentinel. It carries no currency.
    Zero,
    /// The cell held an amount.
    Amount(Amount),
}

impl Cell {
    /// The amount, if the cell holds real data.
    #[must_use]
    pub fn into_amount(self) -> Option<Amount> {
        match self {
            Self::Amount(amount) => Some(amount),
            Self::Empty | Self::Zero => None,
        }
    }

    /// The currency, if the cell holds real data.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        match self {
            Self::Amount(amount) => Some(&amount.currency),
            Self::Empty | Self::Zero => None,
        }
    }
}

/// Regex fragment matching an amount: optional minus, digits with optional
/// comma grouping and an optional fraction.
pub const NUMBER_PATTERN: &str = r"-?[0-9]+(?:,[0-9]+)*(?:\.[0-9]+)?";

/// Regex fragment matching a currency: a bare token or a double-quoted phrase.
pub const CURRENCY_PATTERN: &str = r#"[()\-\w]+|"[()\-\w ]+""#;

fn balance_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"^(?P<amount>{NUMBER_PATTERN}) (?P<currency>{CURRENCY_PATTERN})$"
        ))
        .expect("balance pattern is valid")
    })
}

/// Parse a number, stripping thousands separators.
///
/// Numbers are `Decimal`s, limited to about 28 significant digits. A number
/// too large for that range does not parse and the cell is reported as an
/// invalid amount.
pub fn parse_number(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.replace(',', "")).ok()
}

/// Strip the quotes hledger puts around multi-word commodities.
pub fn unquote_currency(raw: &str) -> String {
    raw.replace('"', "")
}

/// Parse a single report cell.
///
/// # Example
///
/// ```
/// use ledgermetrics_core::{parse_balance, Amount, Cell};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_balance("").unwrap(), Cell::Empty);
/// assert_eq!(parse_balance("0").unwrap(), Cell::Zero);
/// assert_eq!(
///     parse_balance("-1,250.5 \"Gift Card\"").unwrap(),
///     Cell::Amount(Amount::new(dec!(-1250.5), "Gift Card")),
/// );
/// ```
pub fn parse_balance(raw: &str) -> Result<Cell, ParseError> {
    match raw {
        "" => return Ok(Cell::Empty),
        "0" => return Ok(Cell::Zero),
        _ => {}
    }

    let invalid = || ParseError::InvalidAmount {
        raw: raw.to_string(),
    };

    let captures = balance_regex().captures(raw).ok_or_else(invalid)?;
    let number = parse_number(&captures["amount"]).ok_or_else(invalid)?;
    let currency = unquote_currency(&captures["currency"]);

    Ok(Cell::Amount(Amount::new(number, currency)))
}

/// Parse a cell that may hold several `", "`-separated amounts.
pub fn parse_balances(raw: &str) -> Result<Vec<Cell>, ParseError> {
    raw.split(MULTI_AMOUNT_SEPARATOR).map(parse_balance).collect()
}
