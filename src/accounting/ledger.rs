use chrono::{Local, NaiveDate};
use getset::Getters;
use log::info;
use rust_decimal::Decimal;

use super::storage::{Storage, StorageConfig};
use super::{Category, Result, TransactionRecord};
use crate::data;

/// Write side of the ledger. Inputs are trusted to be validated already.
#[derive(Getters)]
#[getset(get = "pub")]
pub struct Ledger {
    storage: Storage,
}

impl Ledger {
    /// Opens the ledger, creating its backing file if needed.
    pub fn open(config: StorageConfig) -> Result<Ledger> {
        let storage = Storage::new(config);
        storage.initialize()?;

        Ok(Ledger { storage })
    }

    pub fn add_transaction(
        &self,
        date: NaiveDate,
        amount: Decimal,
        category: Category,
        description: &str,
    ) -> Result<TransactionRecord> {
        let record = TransactionRecord::new(date, amount, category, description);

        // The file may have been removed since the ledger was opened.
        self.storage.initialize()?;
        self.storage.append_record(&record)?;

        info!(
            "entry added successfully, date={}, amount={}, category={}",
            record.date(),
            record.amount(),
            record.category()
        );

        Ok(record)
    }

    /// Same as `add_transaction` with the date given as text; an empty date means today.
    pub fn add_transaction_str(
        &self,
        date: &str,
        amount: Decimal,
        category: Category,
        description: &str,
    ) -> Result<TransactionRecord> {
        let date = if date.trim().is_empty() {
            Local::now().date_naive()
        } else {
            data::parse_date(date, self.storage.config().date_format())?
        };

        self.add_transaction(date, amount, category, description)
    }
}
