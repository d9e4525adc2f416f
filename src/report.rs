use std::io::{self, Write};

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::accounting::query::FilteredResult;
use crate::accounting::series::DailySeries;
use crate::data::format_date;

const BAR_WIDTH: u32 = 30;
const CHART_TITLE: &str = "Incomes vs. Expenses Over Time";

/// Prints the matching rows followed by the summary figures.
pub fn write_transactions(
    out: &mut dyn Write,
    result: &FilteredResult,
    start: &NaiveDate,
    end: &NaiveDate,
    date_format: &str,
) -> io::Result<()> {
    if result.is_empty() {
        return writeln!(out, "No transactions found in the given date range");
    }

    writeln!(
        out,
        "Transactions from {} to {}",
        format_date(start, date_format),
        format_date(end, date_format)
    )?;
    writeln!(out, "{:<10}  {:>12}  {:<8}  Description", "Date", "Amount", "Category")?;
    for record in result.records() {
        writeln!(
            out,
            "{:<10}  {:>12.2}  {:<8}  {}",
            format_date(record.date(), date_format),
            record.amount(),
            record.category().to_string(),
            record.description()
        )?;
    }

    writeln!(out, "\nSummary:")?;
    writeln!(out, "{}", result.summary())
}

/// Text rendition of the daily series, one line per day.
pub fn write_chart(out: &mut dyn Write, series: &DailySeries, date_format: &str) -> io::Result<()> {
    let peak = series.peak();

    writeln!(out, "{}", CHART_TITLE)?;
    for date in series.dates() {
        let income = series.income_on(date);
        let expense = series.expense_on(date);
        writeln!(
            out,
            "{:<10}  income {:>10.2} {:<width$}  expense {:>10.2} {}",
            format_date(date, date_format),
            income,
            bar(income, peak, '+'),
            expense,
            bar(expense, peak, '-'),
            width = BAR_WIDTH as usize
        )?;
    }

    Ok(())
}

fn bar(amount: Decimal, peak: Decimal, fill: char) -> String {
    if peak.is_zero() {
        return String::new();
    }

    let len = amount
        .checked_div(peak)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(BAR_WIDTH)))
        .and_then(|len| len.round().to_usize())
        .unwrap_or(0);
    std::iter::repeat(fill).take(len).collect()
}
