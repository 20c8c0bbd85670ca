//! Financial summary model
//!
//! Derived figures computed from accounts, transactions and budgets. Never
//! persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::{CategoryId, UserId};
use super::money::Money;

/// One user's personal totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalBalance {
    pub balance: Money,
    pub income: Money,
    pub expenses: Money,
}

/// Progress of one category's budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub allocated: Money,
    pub spent: Money,
    pub remaining: Money,
    /// Spent as a percentage of allocated; None when nothing was allocated
    pub percent_used: Option<f64>,
}

impl BudgetProgress {
    pub fn new(allocated: Money, spent: Money) -> Self {
        Self {
            allocated,
            spent,
            remaining: allocated - spent,
            percent_used: spent.percent_of(allocated),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Totals for the couple and for each partner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_balance: Money,
    pub total_income: Money,
    pub total_expenses: Money,
    pub shared_balance: Money,
    pub shared_income: Money,
    pub shared_expenses: Money,
    pub personal_balances: BTreeMap<UserId, PersonalBalance>,
    pub budget_progress: BTreeMap<CategoryId, BudgetProgress>,
}

impl FinancialSummary {
    /// Income minus expenses across shared and personal transactions
    pub fn net_flow(&self) -> Money {
        self.total_income - self.total_expenses
    }
}
