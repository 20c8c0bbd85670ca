//! Totals and label breakdowns
//!
//! Labels are grouped by exact string: "Food", "food" and "Food " are three
//! different buckets.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Expense, Income, Money};

/// Sum of all expense amounts
pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum of all income amounts
pub fn total_income(incomes: &[Income]) -> Money {
    incomes.iter().map(|i| i.amount).sum()
}

/// Expense totals per category label
pub fn by_category(expenses: &[Expense]) -> BTreeMap<String, Money> {
    group_by_label(expenses.iter().map(|e| (e.category.as_str(), e.amount)))
}

/// Income totals per source label
pub fn by_source(incomes: &[Income]) -> BTreeMap<String, Money> {
    group_by_label(incomes.iter().map(|i| (i.source.as_str(), i.amount)))
}

pub(crate) fn group_by_label<'a>(
    items: impl Iterator<Item = (&'a str, Money)>,
) -> BTreeMap<String, Money> {
    let mut groups: BTreeMap<String, Money> = BTreeMap::new();
    for (label, amount) in items {
        *groups.entry(label.to_string()).or_default() += amount;
    }
    groups
}

/// One slice of a breakdown, with its share of the whole
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub label: String,
    pub amount: Money,
    /// Percentage of the breakdown total (0 when the total is zero)
    pub percent: f64,
}

/// Turn a breakdown into slices sorted by amount, largest first
///
/// Equal amounts keep label order.
pub fn category_shares(breakdown: &BTreeMap<String, Money>) -> Vec<CategoryShare> {
    let total: Money = breakdown.values().sum();

    let mut shares: Vec<CategoryShare> = breakdown
        .iter()
        .map(|(label, amount)| CategoryShare {
            label: label.clone(),
            amount: *amount,
            percent: amount.percent_of(total).unwrap_or(0.0),
        })
        .collect();

    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}
