use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use getset::Getters;
use log::{debug, info};

use super::{LedgerError, Result, TransactionRecord};
use crate::data::TransactionRow;

pub const DEFAULT_FILE: &str = "finance_data.csv";
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";
pub const FILE_ENV_VAR: &str = "TALLYBOOK_FILE";

/// Where the ledger lives and how its dates are written.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct StorageConfig {
    path: PathBuf,
    date_format: String,
}

impl StorageConfig {
    pub const COLUMNS: [&'static str; 4] = ["Date", "Amount", "Category", "Description"];

    pub fn new(path: impl Into<PathBuf>) -> StorageConfig {
        StorageConfig {
            path: path.into(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Uses `TALLYBOOK_FILE` when set, the default file name otherwise.
    pub fn from_env() -> StorageConfig {
        match env::var(FILE_ENV_VAR) {
            Ok(path) if !path.is_empty() => StorageConfig::new(path),
            _ => StorageConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::new(DEFAULT_FILE)
    }
}

/// Append-only CSV file holding every transaction.
#[derive(Getters)]
#[getset(get = "pub")]
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    pub fn new(config: StorageConfig) -> Storage {
        Storage { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Creates the file with just the header row when it does not exist yet.
    pub fn initialize(&self) -> Result<()> {
        if self.path().exists() {
            return Ok(());
        }

        let mut csv_writer = csv::Writer::from_path(self.path()).map_err(from_csv)?;
        csv_writer.write_record(StorageConfig::COLUMNS).map_err(from_csv)?;
        csv_writer.flush()?;

        info!("created ledger file, path={}", self.path().display());

        Ok(())
    }

    pub fn append_record(&self, record: &TransactionRecord) -> Result<()> {
        let file = OpenOptions::new().append(true).open(self.path())?;
        let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        let row = TransactionRow::from_record(record, &self.config.date_format);
        csv_writer.serialize(&row).map_err(from_csv)?;
        csv_writer.flush()?;

        debug!("appended row, row={:?}", row);

        Ok(())
    }

    /// Reads every data row in file order. The first row that fails to decode
    /// aborts the whole load.
    pub fn load_all(&self) -> Result<Vec<TransactionRecord>> {
        let file = File::open(self.path())?;
        let mut csv_reader = csv::ReaderBuilder::new().from_reader(file);
        let headers = csv_reader.headers().map_err(from_csv)?.clone();

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let raw = result.map_err(from_csv)?;
            let line = raw.position().map_or(0, |pos| pos.line());
            let row: TransactionRow = raw.deserialize(Some(&headers)).map_err(|err| LedgerError::Parse {
                line,
                reason: err.to_string(),
            })?;

            records.push(row.into_record(&self.config.date_format, line)?);
        }

        debug!("loaded ledger, path={}, rows={}", self.path().display(), records.len());

        Ok(records)
    }
}

fn from_csv(err: csv::Error) -> LedgerError {
    if err.is_io_error() {
        return LedgerError::Io(io::Error::from(err));
    }

    LedgerError::Parse {
        line: err.position().map_or(0, |pos| pos.line()),
        reason: err.to_string(),
    }
}
