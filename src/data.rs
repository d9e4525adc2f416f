use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounting::{Category, LedgerError, Result, TransactionRecord};

/// A ledger row exactly as it sits in the backing file. The date stays as text
/// here, its format belongs to the storage configuration.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionRow {
    pub date: String,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}

impl TransactionRow {
    pub fn from_record(record: &TransactionRecord, date_format: &str) -> TransactionRow {
        TransactionRow {
            date: format_date(record.date(), date_format),
            amount: *record.amount(),
            category: *record.category(),
            description: record.description().clone(),
        }
    }

    /// Decodes the row, `line` is only used to locate the failure.
    pub fn into_record(self, date_format: &str, line: u64) -> Result<TransactionRecord> {
        let date = NaiveDate::parse_from_str(&self.date, date_format).map_err(|err| LedgerError::Parse {
            line,
            reason: format!("invalid date '{}': {}", self.date, err),
        })?;

        Ok(TransactionRecord::new(date, self.amount, self.category, self.description))
    }
}

pub fn parse_date(input: &str, date_format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, date_format).map_err(|source| LedgerError::Format {
        input: input.to_string(),
        source,
    })
}

pub fn format_date(date: &NaiveDate, date_format: &str) -> String {
    date.format(date_format).to_string()
}
