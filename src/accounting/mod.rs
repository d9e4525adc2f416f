use std::fmt;

use chrono::NaiveDate;
use getset::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod ledger;
pub mod query;
pub mod series;
pub mod storage;


pub type Result<T, E = LedgerError> = std::result::Result<T, E>;

/// Number of fraction digits amounts are kept with.
pub const PRECISION: u32 = 2;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("date '{input}' does not match the expected format: {source}")]
    Format {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("malformed row at line {line}: {reason}")]
    Parse { line: u64, reason: String },
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("cannot build a daily series from zero records")]
    EmptyInput,
    #[error("amount total does not fit in a decimal")]
    Overflow,
}

/// Adds up amounts, failing instead of panicking when the total overflows.
pub fn checked_sum<'a>(amounts: impl IntoIterator<Item = &'a Decimal>) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(*amount))
        .ok_or(LedgerError::Overflow)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Income,
    Expense,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Income => f.write_str("Income"),
            Category::Expense => f.write_str("Expense"),
        }
    }
}

/// One ledger entry. Amounts are expected to be non-negative; checking that is
/// left to whoever collects the input.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct TransactionRecord {
    date: NaiveDate,
    amount: Decimal,
    category: Category,
    description: String,
}

impl TransactionRecord {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
    ) -> TransactionRecord {
        TransactionRecord {
            date,
            amount: amount.round_dp(PRECISION),
            category,
            description: description.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.category == Category::Income
    }

    pub fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }
}
