//! Price quotes as listed by `hledger prices`.

use crate::RateTable;
use ledgermetrics_core::amount::{parse_number, unquote_currency, CURRENCY_PATTERN};
use ledgermetrics_core::{ParseError, Timestamp};
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Rates are unsigned: digits with optional comma grouping and fraction.
const RATE_PATTERN: &str = r"[0-9]+(?:,[0-9]+)*(?:\.[0-9]+)?";

fn quote_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"^P (?P<date>[0-9]{{4}}-[0-9]{{2}}-[0-9]{{2}}) (?P<currency>{CURRENCY_PATTERN}) (?P<rate>{RATE_PATTERN}) (?P<target>{CURRENCY_PATTERN})$"
        ))
        .expect("quote pattern is valid")
    })
}

/// A dated quote: one unit of `currency` is worth `rate` units of `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Date of the quote.
    pub date: Timestamp,
    /// The quoted currency.
    pub currency: String,
    /// Units of `target` per unit of `currency`.
    pub rate: Decimal,
    /// The currency the rate is expressed in.
    pub target: String,
}

/// Parse one `P <date> <currency> <rate> <currency>` line.
///
/// # Example
///
/// ```
/// use ledgermetrics_fx::parse_quote;
/// use rust_decimal_macros::dec;
///
/// let quote = parse_quote("P 2024-01-15 \"Gift Card\" 1,000.5 SEK").unwrap();
/// assert_eq!(quote.currency, "Gift Card");
/// assert_eq!(quote.rate, dec!(1000.5));
/// assert_eq!(quote.target, "SEK");
/// ```
pub fn parse_quote(line: &str) -> Result<Quote, ParseError> {
    let invalid = || ParseError::InvalidQuote {
        line: line.to_string(),
    };

    let captures = quote_regex().captures(line.trim_end()).ok_or_else(invalid)?;
    let date = Timestamp::parse_from_str(&captures["date"], "%Y-%m-%d").map_err(|_| invalid())?;
    let rate = parse_number(&captures["rate"]).ok_or_else(invalid)?;

    Ok(Quote {
        date,
        currency: unquote_currency(&captures["currency"]),
        rate,
        target: unquote_currency(&captures["target"]),
    })
}

/// Quotes grouped by date.
///
/// When the same pair is quoted more than once on one date, the last line wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBook {
    by_date: BTreeMap<Timestamp, RateTable>,
}

impl QuoteBook {
    /// Create an empty quote book.
    pub const fn new() -> Self {
        Self {
            by_date: BTreeMap::new(),
        }
    }

    /// Parse the output of `hledger prices`.
    ///
    /// Blank lines are ignored; any other line that is not a quote is an error.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut book = Self::new();
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            book.insert(parse_quote(line)?);
        }

        tracing::debug!(
            dates = book.by_date.len(),
            quotes = book.len(),
            "parsed price quotes"
        );
        Ok(book)
    }

    /// Add a quote.
    pub fn insert(&mut self, quote: Quote) {
        self.by_date
            .entry(quote.date)
            .or_default()
            .insert(quote.currency, quote.target, quote.rate);
    }

    /// The quotes given on a date, if any.
    pub fn quotes_on(&self, date: Timestamp) -> Option<&RateTable> {
        self.by_date.get(&date)
    }

    /// Every date with at least one quote, in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.by_date.keys().copied()
    }

    /// Number of distinct `(date, from, to)` quotes.
    pub fn len(&self) -> usize {
        self.by_date.values().map(RateTable::len).sum()
    }

    /// Check if the book holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_quote() {
        assert_eq!(
            parse_quote("P 2024-03-01 EUR 11.25 SEK").unwrap(),
            Quote {
                date: date(2024, 3, 1),
                currency: "EUR".to_string(),
                rate: dec!(11.25),
                target: "SEK".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_quote_tokens() {
        let quote = parse_quote("P 2024-03-01 VWRL(LSE) 1,234 \"Pound Sterling\"\r").unwrap();
        assert_eq!(quote.currency, "VWRL(LSE)");
        assert_eq!(quote.rate, dec!(1234));
        assert_eq!(quote.target, "Pound Sterling");
    }

    #[test]
    fn test_rejects_malformed_quotes() {
        for line in [
            "2024-03-01 EUR 11.25 SEK",
            "P 2024-3-1 EUR 11.25 SEK",
            "P 2024-02-30 EUR 11.25 SEK",
            "P 2024-03-01 EUR -11.25 SEK",
            "P 2024-03-01 EUR SEK",
            "P 2024-03-01 EUR 11.25",
        ] {
            assert_eq!(
                parse_quote(line),
                Err(ParseError::InvalidQuote {
                    line: line.to_string()
                }),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_book_groups_by_date() {
        let book = QuoteBook::parse(
            "P 2024-01-01 EUR 11 SEK\n\
             P 2024-01-01 USD 10 SEK\n\
             \n\
             P 2024-02-01 EUR 12 SEK\n\
             P 2024-02-01 EUR 12.5 SEK\n",
        )
        .unwrap();

        assert_eq!(book.dates().collect::<Vec<_>>(), vec![date(2024, 1, 1), date(2024, 2, 1)]);
        assert_eq!(book.len(), 3);

        let january = book.quotes_on(date(2024, 1, 1)).unwrap();
        assert_eq!(january.direct("EUR", "SEK"), Some(dec!(11)));
        assert_eq!(january.direct("USD", "SEK"), Some(dec!(10)));

        // last quote of the day wins
        let february = book.quotes_on(date(2024, 2, 1)).unwrap();
        assert_eq!(february.direct("EUR", "SEK"), Some(dec!(12.5)));
        assert_eq!(february.direct("USD", "SEK"), None);
    }

    #[test]
    fn test_book_rejects_garbage() {
        let err = QuoteBook::parse("P 2024-01-01 EUR 11 SEK\nnot a price\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidQuote {
                line: "not a price".to_string()
            }
        );
    }
}
