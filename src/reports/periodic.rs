//! Period reports
//!
//! Buckets expenses and incomes into chart series for the current month, the
//! trailing quarter, or the current calendar year, and derives the savings
//! rate from those buckets.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::totals::group_by_label;
use crate::models::{Expense, Income, Money};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// The current calendar month, one bucket per category/source
    #[default]
    Month,
    /// The current month and the two before it, one bucket per month
    Quarter,
    /// The current calendar year, one bucket per quarter
    Year,
}

impl ReportPeriod {
    /// Parse a period name; only the exact names are recognized
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A labeled value in a chart series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartItem {
    pub label: String,
    pub value: Money,
}

impl ChartItem {
    pub fn new(label: impl Into<String>, value: Money) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Income and expense series for one period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub incomes: Vec<ChartItem>,
    pub expenses: Vec<ChartItem>,
}

impl PeriodTotals {
    pub fn total_income(&self) -> Money {
        self.incomes.iter().map(|i| i.value).sum()
    }

    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().map(|i| i.value).sum()
    }

    /// Percentage of income left after expenses; 0 when there is no income
    pub fn saving_rate(&self) -> f64 {
        let income = self.total_income();
        if income.is_zero() {
            return 0.0;
        }
        let savings = income - self.total_expenses();
        savings.cents() as f64 * 100.0 / income.cents() as f64
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }
}

/// Chart series for a period named by string
///
/// Unknown period names produce empty series rather than an error.
pub fn monthly_totals(
    expenses: &[Expense],
    incomes: &[Income],
    period: &str,
    today: NaiveDate,
) -> PeriodTotals {
    match ReportPeriod::parse(period) {
        Some(period) => period_totals(expenses, incomes, period, today),
        None => PeriodTotals::default(),
    }
}

/// Savings rate over the buckets of a period named by string
pub fn saving_rate(expenses: &[Expense], incomes: &[Income], period: &str, today: NaiveDate) -> f64 {
    monthly_totals(expenses, incomes, period, today).saving_rate()
}

/// Chart series for a period
pub fn period_totals(
    expenses: &[Expense],
    incomes: &[Income],
    period: ReportPeriod,
    today: NaiveDate,
) -> PeriodTotals {
    match period {
        ReportPeriod::Month => current_month(expenses, incomes, today),
        ReportPeriod::Quarter => trailing_quarter(expenses, incomes, today),
        ReportPeriod::Year => calendar_year(expenses, incomes, today),
    }
}

fn current_month(expenses: &[Expense], incomes: &[Income], today: NaiveDate) -> PeriodTotals {
    let (year, month) = (today.year(), today.month());

    let expense_groups = group_by_label(
        expenses
            .iter()
            .filter(|e| in_month(e.date, year, month))
            .map(|e| (e.category.as_str(), e.amount)),
    );
    let income_groups = group_by_label(
        incomes
            .iter()
            .filter(|i| in_month(i.date, year, month))
            .map(|i| (i.source.as_str(), i.amount)),
    );

    PeriodTotals {
        incomes: income_groups
            .into_iter()
            .map(|(label, value)| ChartItem { label, value })
            .collect(),
        expenses: expense_groups
            .into_iter()
            .map(|(label, value)| ChartItem { label, value })
            .collect(),
    }
}

fn trailing_quarter(expenses: &[Expense], incomes: &[Income], today: NaiveDate) -> PeriodTotals {
    let mut totals = PeriodTotals::default();

    // Oldest first
    for back in (0..3).rev() {
        let (year, month) = months_before(today, back);
        let label = MONTH_ABBREVIATIONS[(month - 1) as usize];

        totals
            .expenses
            .push(ChartItem::new(label, sum_expenses(expenses, |d| in_month(d, year, month))));
        totals
            .incomes
            .push(ChartItem::new(label, sum_incomes(incomes, |d| in_month(d, year, month))));
    }

    totals
}

fn calendar_year(expenses: &[Expense], incomes: &[Income], today: NaiveDate) -> PeriodTotals {
    let year = today.year();
    let mut totals = PeriodTotals::default();

    for quarter in 1..=4u32 {
        let label = format!("Q{}", quarter);
        let in_quarter = |d: NaiveDate| d.year() == year && (d.month() - 1) / 3 + 1 == quarter;

        totals
            .expenses
            .push(ChartItem::new(label.clone(), sum_expenses(expenses, in_quarter)));
        totals
            .incomes
            .push(ChartItem::new(label, sum_incomes(incomes, in_quarter)));
    }

    totals
}

fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// (year, month) of the calendar month `back` months before `today`
fn months_before(today: NaiveDate, back: u32) -> (i32, u32) {
    let index = today.year() * 12 + today.month0() as i32 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn sum_expenses(expenses: &[Expense], keep: impl Fn(NaiveDate) -> bool) -> Money {
    expenses.iter().filter(|e| keep(e.date)).map(|e| e.amount).sum()
}

fn sum_incomes(incomes: &[Income], keep: impl Fn(NaiveDate) -> bool) -> Money {
    incomes.iter().filter(|i| keep(i.date)).map(|i| i.amount).sum()
}
