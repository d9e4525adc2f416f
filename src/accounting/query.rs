use std::fmt;

use chrono::NaiveDate;
use getset::Getters;
use log::debug;
use rust_decimal::Decimal;

use super::storage::Storage;
use super::{checked_sum, LedgerError, Result, TransactionRecord};
use crate::data;

/// Records of a closed date interval, in file order, with their totals.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct FilteredResult {
    records: Vec<TransactionRecord>,
    total_income: Decimal,
    total_expense: Decimal,
    net_savings: Decimal,
}

impl FilteredResult {
    pub fn from_records(records: Vec<TransactionRecord>) -> Result<FilteredResult> {
        let total_income = checked_sum(records.iter().filter(|r| r.is_income()).map(|r| r.amount()))?;
        let total_expense = checked_sum(records.iter().filter(|r| r.is_expense()).map(|r| r.amount()))?;
        let net_savings = total_income.checked_sub(total_expense).ok_or(LedgerError::Overflow)?;

        Ok(FilteredResult {
            records,
            total_income,
            total_expense,
            net_savings,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_income: self.total_income,
            total_expense: self.total_expense,
            net_savings: self.net_savings,
        }
    }
}

/// The three summary figures, displayed with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_savings: Decimal,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Income: ${:.2}", self.total_income)?;
        writeln!(f, "Total Expense: ${:.2}", self.total_expense)?;
        write!(f, "Net Savings: ${:.2}", self.net_savings)
    }
}

pub struct RangeQuery<'a> {
    storage: &'a Storage,
}

impl<'a> RangeQuery<'a> {
    pub fn new(storage: &'a Storage) -> RangeQuery<'a> {
        RangeQuery { storage }
    }

    /// Both bounds are inclusive. `start > end` is not an error, it simply matches nothing.
    pub fn query(&self, start: &str, end: &str) -> Result<FilteredResult> {
        let date_format = self.storage.config().date_format();
        let start = data::parse_date(start, date_format)?;
        let end = data::parse_date(end, date_format)?;

        self.query_range(start, end)
    }

    pub fn query_range(&self, start: NaiveDate, end: NaiveDate) -> Result<FilteredResult> {
        let records: Vec<TransactionRecord> = self
            .storage
            .load_all()?
            .into_iter()
            .filter(|record| start <= *record.date() && *record.date() <= end)
            .collect();

        debug!("range query, start={}, end={}, matches={}", start, end, records.len());

        FilteredResult::from_records(records)
    }
}
