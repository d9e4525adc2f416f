use std::collections::BTreeMap;

use chrono::NaiveDate;
use getset::Getters;
use rust_decimal::Decimal;

use super::{Category, LedgerError, Result, TransactionRecord};

/// Per-day income and expense sums over a contiguous date axis.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    income_by_date: BTreeMap<NaiveDate, Decimal>,
    expense_by_date: BTreeMap<NaiveDate, Decimal>,
}

impl DailySeries {
    pub fn income_on(&self, date: &NaiveDate) -> Decimal {
        self.income_by_date.get(date).copied().unwrap_or_default()
    }

    pub fn expense_on(&self, date: &NaiveDate) -> Decimal {
        self.expense_by_date.get(date).copied().unwrap_or_default()
    }

    pub fn peak(&self) -> Decimal {
        self.income_by_date
            .values()
            .chain(self.expense_by_date.values())
            .copied()
            .max()
            .unwrap_or_default()
    }
}

/// Builds the daily series spanning the earliest to the latest record date,
/// days without transactions count as zero.
pub fn build_daily_series(records: &[TransactionRecord]) -> Result<DailySeries> {
    let (Some(min_date), Some(max_date)) = (
        records.iter().map(|r| *r.date()).min(),
        records.iter().map(|r| *r.date()).max(),
    ) else {
        return Err(LedgerError::EmptyInput);
    };

    let dates: Vec<NaiveDate> = min_date.iter_days().take_while(|date| *date <= max_date).collect();

    let mut income_by_date: BTreeMap<NaiveDate, Decimal> = dates.iter().map(|date| (*date, Decimal::ZERO)).collect();
    let mut expense_by_date = income_by_date.clone();

    for record in records {
        let sums = match record.category() {
            Category::Income => &mut income_by_date,
            Category::Expense => &mut expense_by_date,
        };
        let sum = sums.entry(*record.date()).or_default();
        *sum = sum.checked_add(*record.amount()).ok_or(LedgerError::Overflow)?;
    }

    Ok(DailySeries {
        dates,
        income_by_date,
        expense_by_date,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn record(day: u32, amount: Decimal, category: Category) -> TransactionRecord {
        TransactionRecord::new(march(day), amount, category, "")
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(build_daily_series(&[]), Err(LedgerError::EmptyInput)));
    }

    #[test]
    fn test_gap_fill() -> anyhow::Result<()> {
        let series = build_daily_series(&[
            record(1, dec!(100), Category::Income),
            record(5, dec!(40), Category::Expense),
        ])?;

        assert_eq!(*series.dates(), (1..=5).map(march).collect::<Vec<_>>());
        for day in 2..=4 {
            assert_eq!(series.income_on(&march(day)), Decimal::ZERO);
            assert_eq!(series.expense_on(&march(day)), Decimal::ZERO);
        }
        assert_eq!(series.income_on(&march(1)), dec!(100));
        assert_eq!(series.expense_on(&march(1)), Decimal::ZERO);
        assert_eq!(series.income_on(&march(5)), Decimal::ZERO);
        assert_eq!(series.expense_on(&march(5)), dec!(40));
        assert_eq!(series.income_by_date().len(), 5);
        assert_eq!(series.expense_by_date().len(), 5);

        Ok(())
    }

    #[test]
    fn test_same_day_amounts_are_summed() -> anyhow::Result<()> {
        let series = build_daily_series(&[
            record(2, dec!(10), Category::Expense),
            record(2, dec!(5.5), Category::Expense),
            record(2, dec!(300), Category::Income),
            record(2, dec!(1), Category::Income),
        ])?;

        assert_eq!(*series.dates(), vec![march(2)]);
        assert_eq!(series.income_on(&march(2)), dec!(301));
        assert_eq!(series.expense_on(&march(2)), dec!(15.5));
        assert_eq!(series.peak(), dec!(301));

        Ok(())
    }

    #[test]
    fn test_unordered_input_spans_min_to_max() -> anyhow::Result<()> {
        let series = build_daily_series(&[
            record(20, dec!(1), Category::Income),
            record(18, dec!(2), Category::Expense),
            record(19, dec!(3), Category::Income),
        ])?;

        assert_eq!(*series.dates(), vec![march(18), march(19), march(20)]);

        Ok(())
    }

    #[test]
    fn test_axis_crosses_month_end() -> anyhow::Result<()> {
        let series = build_daily_series(&[
            TransactionRecord::new(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(), dec!(1), Category::Income, ""),
            record(1, dec!(1), Category::Expense),
        ])?;

        assert_eq!(series.dates().len(), 3);
        assert_eq!(series.dates()[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        Ok(())
    }

    #[test]
    fn test_same_day_overflow_is_an_error() {
        let series = build_daily_series(&[
            record(3, Decimal::MAX, Category::Expense),
            record(3, Decimal::MAX, Category::Expense),
        ]);

        assert!(matches!(series, Err(LedgerError::Overflow)));
    }
}
