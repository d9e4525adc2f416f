use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::accounting::ledger::Ledger;
use crate::accounting::query::RangeQuery;
use crate::accounting::series::build_daily_series;
use crate::accounting::storage::{Storage, StorageConfig};
use crate::accounting::Category;
use crate::{data, report};

pub const USAGE: &str = "\
usage:
  tallybook add <income|expense> <amount> <description> [dd-mm-yyyy]
  tallybook view <start dd-mm-yyyy> <end dd-mm-yyyy> [--plot]";

#[derive(Debug, PartialEq, Error)]
pub enum CommandError {
    #[error("invalid arguments\n{}", USAGE)]
    Usage,
    #[error("invalid category '{0}', enter 'I' for Income or 'E' for Expense")]
    InvalidCategory(String),
    #[error("invalid amount '{0}', amount must be a non-negative number")]
    InvalidAmount(String),
}

#[enum_dispatch]
pub trait ExecutableCommand {
    fn execute(&self, config: &StorageConfig, out: &mut dyn Write) -> Result<()>;
}

#[enum_dispatch(ExecutableCommand)]
#[derive(Debug, PartialEq)]
pub enum Command {
    Add,
    View,
}

impl Command {
    /// Parses the arguments following the program name.
    pub fn parse(args: &[String]) -> Result<Command, CommandError> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match args.as_slice() {
            ["add", category, amount, description] => Ok(Command::Add(Add::new(category, amount, description, None)?)),
            ["add", category, amount, description, date] => {
                Ok(Command::Add(Add::new(category, amount, description, Some(*date))?))
            },
            ["view", start, end] => Ok(Command::View(View::new(start, end, false))),
            ["view", start, end, "--plot"] => Ok(Command::View(View::new(start, end, true))),
            _ => Err(CommandError::Usage),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Add {
    category: Category,
    amount: Decimal,
    description: String,
    date: Option<String>,
}

impl Add {
    pub fn new(category: &str, amount: &str, description: &str, date: Option<&str>) -> Result<Add, CommandError> {
        Ok(Add {
            category: parse_category(category)?,
            amount: parse_amount(amount)?,
            description: description.to_string(),
            date: date.map(str::to_string),
        })
    }
}

impl ExecutableCommand for Add {
    fn execute(&self, config: &StorageConfig, out: &mut dyn Write) -> Result<()> {
        let ledger = Ledger::open(config.clone())?;
        let date = self.date.as_deref().unwrap_or_default();
        ledger.add_transaction_str(date, self.amount, self.category, &self.description)?;

        writeln!(out, "Entry added successfully!")?;

        Ok(())
    }
}

#[derive(Debug, PartialEq)]
pub struct View {
    start: String,
    end: String,
    plot: bool,
}

impl View {
    pub fn new(start: &str, end: &str, plot: bool) -> View {
        View {
            start: start.to_string(),
            end: end.to_string(),
            plot,
        }
    }
}

impl ExecutableCommand for View {
    fn execute(&self, config: &StorageConfig, out: &mut dyn Write) -> Result<()> {
        let date_format = config.date_format();
        let start = data::parse_date(&self.start, date_format)?;
        let end = data::parse_date(&self.end, date_format)?;

        let storage = Storage::new(config.clone());
        storage.initialize()?;
        let result = RangeQuery::new(&storage).query_range(start, end)?;

        report::write_transactions(out, &result, &start, &end, date_format)?;

        if self.plot && !result.is_empty() {
            let series = build_daily_series(result.records())?;
            writeln!(out)?;
            report::write_chart(out, &series, date_format)?;
        }

        Ok(())
    }
}

/// Accepts `I`/`E` or the full category name, in any case.
pub fn parse_category(input: &str) -> Result<Category, CommandError> {
    match input.trim().to_lowercase().as_str() {
        "i" | "income" => Ok(Category::Income),
        "e" | "expense" => Ok(Category::Expense),
        _ => Err(CommandError::InvalidCategory(input.to_string())),
    }
}

pub fn parse_amount(input: &str) -> Result<Decimal, CommandError> {
    match Decimal::from_str(input.trim()) {
        Ok(amount) if amount >= dec!(0) => Ok(amount),
        _ => Err(CommandError::InvalidAmount(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn run(command: &str, config: &StorageConfig) -> Result<String> {
        let mut out = Vec::new();
        Command::parse(&args(command))?.execute(config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("I"), Ok(Category::Income));
        assert_eq!(parse_category("expense"), Ok(Category::Expense));
        assert_eq!(parse_category(" Income "), Ok(Category::Income));
        assert_eq!(parse_category("x"), Err(CommandError::InvalidCategory("x".to_string())));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5"), Ok(dec!(12.5)));
        assert_eq!(parse_amount("0"), Ok(dec!(0)));
        assert_eq!(parse_amount("-1"), Err(CommandError::InvalidAmount("-1".to_string())));
        assert_eq!(parse_amount("abc"), Err(CommandError::InvalidAmount("abc".to_string())));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse(&args("add income 1000 Salary 01-01-2024")),
            Ok(Command::Add(Add {
                category: Category::Income,
                amount: dec!(1000),
                description: "Salary".to_string(),
                date: Some("01-01-2024".to_string()),
            }))
        );
        assert_eq!(
            Command::parse(&args("view 01-01-2024 31-01-2024 --plot")),
            Ok(Command::View(View::new("01-01-2024", "31-01-2024", true)))
        );
        assert_eq!(Command::parse(&args("view 01-01-2024")), Err(CommandError::Usage));
        assert_eq!(Command::parse(&args("remove 1")), Err(CommandError::Usage));
    }

    #[test]
    fn test_add_then_view() -> Result<()> {
        let dir = TempDir::new()?;
        let config = StorageConfig::new(dir.path().join("finance_data.csv"));

        assert_eq!(run("add I 1000 Salary 01-01-2024", &config)?, "Entry added successfully!\n");
        run("add E 200 Groceries 03-01-2024", &config)?;

        let text = run("view 01-01-2024 03-01-2024 --plot", &config)?;
        assert!(text.starts_with("Transactions from 01-01-2024 to 03-01-2024\n"));
        assert!(text.contains("Net Savings: $800.00\n"));
        assert!(text.contains("Incomes vs. Expenses Over Time\n"));
        assert_eq!(text.lines().filter(|line| line.contains("  income ")).count(), 3);

        let text = run("view 02-01-2024 02-01-2024 --plot", &config)?;
        assert_eq!(text, "No transactions found in the given date range\n");

        Ok(())
    }

    #[test]
    fn test_view_rejects_bad_dates() -> Result<()> {
        let dir = TempDir::new()?;
        let config = StorageConfig::new(dir.path().join("finance_data.csv"));

        assert!(run("view 2024-01-01 03-01-2024", &config).is_err());

        Ok(())
    }

    #[test]
    fn test_view_on_fresh_install() -> Result<()> {
        let dir = TempDir::new()?;
        let config = StorageConfig::new(dir.path().join("finance_data.csv"));

        let text = run("view 01-01-2024 31-12-2024 --plot", &config)?;

        assert_eq!(text, "No transactions found in the given date range\n");
        assert_eq!(std::fs::read_to_string(config.path())?, "Date,Amount,Category,Description\n");

        Ok(())
    }
}
