//! Reports overview
//!
//! Bundles the headline numbers for one period so the CLI can print them in a
//! single block.

use chrono::NaiveDate;
use serde::Serialize;

use super::periodic::{period_totals, PeriodTotals, ReportPeriod};
use super::totals::{by_category, category_shares, total_expenses, total_income, CategoryShare};
use crate::models::{Expense, Income, Money};

/// Totals, period series and savings rate for one period
#[derive(Debug, Clone, Serialize)]
pub struct ReportsOverview {
    /// Period the series cover
    pub period: ReportPeriod,
    /// Date the period is anchored on
    pub as_of: NaiveDate,
    /// All-time income
    pub total_income: Money,
    /// All-time expenses
    pub total_expenses: Money,
    /// Series for the period
    pub totals: PeriodTotals,
    /// Savings rate over the period series
    pub saving_rate: f64,
    /// All-time expense shares by category
    pub category_shares: Vec<CategoryShare>,
}

impl ReportsOverview {
    pub fn generate(
        expenses: &[Expense],
        incomes: &[Income],
        period: ReportPeriod,
        today: NaiveDate,
    ) -> Self {
        let totals = period_totals(expenses, incomes, period, today);
        let saving_rate = totals.saving_rate();

        Self {
            period,
            as_of: today,
            total_income: total_income(incomes),
            total_expenses: total_expenses(expenses),
            totals,
            saving_rate,
            category_shares: category_shares(&by_category(expenses)),
        }
    }

    /// Net of all-time income and expenses
    pub fn balance(&self) -> Money {
        self.total_income - self.total_expenses
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Reports Overview ({}, as of {})\n", self.period, self.as_of));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:   {:>14}\n",
            self.total_income.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "Total Expenses: {:>14}\n",
            self.total_expenses.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "Balance:        {:>14}\n",
            self.balance().format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Saving Rate:    {:>13.1}%\n\n", self.saving_rate));

        output.push_str(&format!("{:<20} {:>18} {:>18}\n", "Bucket", "Income", "Expenses"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for (label, income, expense) in self.rows() {
            output.push_str(&format!(
                "{:<20} {:>18} {:>18}\n",
                label,
                income.format_with_symbol(currency_symbol),
                expense.format_with_symbol(currency_symbol)
            ));
        }

        if !self.category_shares.is_empty() {
            output.push_str("\nSpending by Category\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for share in &self.category_shares {
                output.push_str(&format!(
                    "{:<30} {:>18} {:>8.1}%\n",
                    share.label,
                    share.amount.format_with_symbol(currency_symbol),
                    share.percent
                ));
            }
        }

        output
    }

    /// Income and expense values aligned by bucket label
    ///
    /// Month buckets are labeled by category or source, so a label may only
    /// appear on one side.
    fn rows(&self) -> Vec<(String, Money, Money)> {
        let mut rows: Vec<(String, Money, Money)> = Vec::new();

        for item in &self.totals.incomes {
            rows.push((item.label.clone(), item.value, Money::zero()));
        }
        for item in &self.totals.expenses {
            match rows.iter_mut().find(|(label, _, _)| *label == item.label) {
                Some(row) => row.2 = item.value,
                None => rows.push((item.label.clone(), Money::zero(), item.value)),
            }
        }

        rows
    }
}
