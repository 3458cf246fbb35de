//! OpenMetrics text exposition.
//!
//! Every metric is a gauge; samples carry an explicit timestamp in epoch
//! seconds, taken at local midnight of the sample's date:
//!
//! ```text
//! # TYPE hledger_balance gauge
//! # HELP hledger_balance daily balance for every (account, currency)
//! hledger_balance{account="Assets:Checking",currency="SEK"} 1000.000 1704063600
//! # EOF
//! ```

use crate::metrics::Metric;
use chrono::{Local, NaiveTime, TimeZone};
use ledgermetrics_core::{LabelKey, Timestamp};
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::io::{self, Write};

/// Write a full exposition: every metric in order, then `# EOF`.
pub fn write_exposition<W: Write>(out: &mut W, metrics: &[Metric]) -> io::Result<()> {
    for metric in metrics {
        write_metric(out, metric)?;
    }
    writeln!(out, "# EOF")
}

/// Write one metric family.
pub fn write_metric<W: Write>(out: &mut W, metric: &Metric) -> io::Result<()> {
    writeln!(out, "# TYPE {} gauge", metric.name)?;
    writeln!(out, "# HELP {} {}", metric.name, metric.help)?;

    for (key, series) in &metric.series {
        let labels = format_labels(key);
        for sample in series {
            writeln!(
                out,
                "{}{} {} {}",
                metric.name,
                labels,
                format_value(sample.value),
                epoch_seconds(sample.timestamp)
            )?;
        }
    }
    Ok(())
}

/// Seconds since the epoch at local midnight of `timestamp`.
///
/// If midnight does not exist locally, the UTC midnight is used; if it is
/// ambiguous, the earlier instant.
pub fn epoch_seconds(timestamp: Timestamp) -> i64 {
    let midnight = timestamp.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| midnight.and_utc().timestamp(), |local| local.timestamp())
}

/// A value with exactly three decimals.
pub fn format_value(value: Decimal) -> String {
    format!("{:.3}", value.round_dp(3))
}

fn format_labels(key: &LabelKey) -> String {
    let labels: Vec<String> = key
        .labels()
        .map(|(name, value)| format!("{name}=\"{}\"", escape_label_value(value)))
        .collect();
    format!("{{{}}}", labels.join(","))
}

fn escape_label_value(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '\n']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str(r"\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str(r"\n"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgermetrics_core::{Sample, SeriesMap};
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn render(metrics: &[Metric]) -> String {
        let mut out = Vec::new();
        write_exposition(&mut out, metrics).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(dec!(1000)), "1000.000");
        assert_eq!(format_value(dec!(-12.5)), "-12.500");
        assert_eq!(format_value(dec!(0.1)), "0.100");
        assert_eq!(format_value(dec!(0.0909090909)), "0.091");
    }

    #[test]
    fn test_escape_label_value() {
        assert_eq!(escape_label_value("Assets:Checking"), "Assets:Checking");
        assert_eq!(escape_label_value(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_label_value("a\nb"), r"a\nb");
    }

    #[test]
    fn test_epoch_seconds_is_local_midnight() {
        let day = date(2024, 1, 1);
        let expected = Local
            .from_local_datetime(&day.and_hms_opt(0, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .timestamp();
        assert_eq!(epoch_seconds(day), expected);
        assert_eq!(epoch_seconds(date(2024, 1, 2)) - epoch_seconds(day), 86_400);
    }

    #[test]
    fn test_balance_exposition() {
        let mut series = SeriesMap::new();
        series.insert(
            LabelKey::account_currency("Checking", "SEK"),
            vec![Sample::new(date(2024, 1, 1), dec!(1000))],
        );
        let metric = Metric::new(
            "hledger_balance",
            "daily balance for every (account, currency)",
            series,
        );

        assert_eq!(
            render(&[metric]),
            format!(
                "# TYPE hledger_balance gauge\n\
                 # HELP hledger_balance daily balance for every (account, currency)\n\
                 hledger_balance{{account=\"Checking\",currency=\"SEK\"}} 1000.000 {}\n\
                 # EOF\n",
                epoch_seconds(date(2024, 1, 1))
            )
        );
    }

    #[test]
    fn test_series_are_grouped_by_label_set() {
        let mut series = SeriesMap::new();
        series.insert(
            LabelKey::currency_target("USD", "SEK"),
            vec![
                Sample::new(date(2024, 1, 1), dec!(10)),
                Sample::new(date(2024, 1, 2), dec!(10.5)),
            ],
        );
        series.insert(
            LabelKey::currency_target("EUR", "SEK"),
            vec![Sample::new(date(2024, 1, 1), dec!(11))],
        );
        let output = render(&[Metric::new("hledger_fx_rate", "rates", series)]);

        let samples: Vec<&str> = output
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.rsplit_once(' ').unwrap().0)
            .collect();
        assert_eq!(
            samples,
            [
                "hledger_fx_rate{currency=\"EUR\",target_currency=\"SEK\"} 11.000",
                "hledger_fx_rate{currency=\"USD\",target_currency=\"SEK\"} 10.000",
                "hledger_fx_rate{currency=\"USD\",target_currency=\"SEK\"} 10.500",
            ]
        );
    }

    #[test]
    fn test_empty_metric_still_has_headers() {
        let output = render(&[Metric::new("hledger_budget", "budget", SeriesMap::new())]);
        assert_eq!(
            output,
            "# TYPE hledger_budget gauge\n# HELP hledger_budget budget\n# EOF\n"
        );
    }
}
