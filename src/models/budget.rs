//! Budget model
//!
//! A spending limit for one category over a recurring period.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, UserId};
use super::money::Money;
use super::ownership::Ownership;
use crate::error::{FieldErrors, FinanceResult};

/// How often a budget resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Weekly,
    Yearly,
}

impl BudgetPeriod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Some(Self::Monthly),
            "weekly" | "week" => Some(Self::Weekly),
            "yearly" | "year" | "annual" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

/// A budget for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,

    pub category_id: CategoryId,

    /// Amount allocated for the period
    #[serde(rename = "amount")]
    pub allocated: Money,

    /// Cached spending figure; the summary recomputes spending from
    /// transactions and never reads this
    #[serde(default)]
    pub current_spent: Money,

    pub period: BudgetPeriod,

    #[serde(rename = "type")]
    pub ownership: Ownership,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
}

/// Everything needed to create a budget
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category_id: CategoryId,
    pub allocated: Money,
    pub period: BudgetPeriod,
    pub ownership: Ownership,
    pub owner_id: Option<UserId>,
}

impl NewBudget {
    /// A shared monthly budget
    pub fn monthly(category_id: CategoryId, allocated: Money) -> Self {
        Self {
            category_id,
            allocated,
            period: BudgetPeriod::Monthly,
            ownership: Ownership::Shared,
            owner_id: None,
        }
    }
}

impl Budget {
    /// Create a budget from a draft, assigning a fresh id
    pub fn create(new: NewBudget) -> Self {
        Self {
            id: BudgetId::new(),
            category_id: new.category_id,
            allocated: new.allocated,
            current_spent: Money::zero(),
            period: new.period,
            ownership: new.ownership,
            owner_id: new.owner_id,
        }
    }

    /// Validate the budget
    ///
    /// A zero allocation is rejected because progress is a percentage of it.
    pub fn validate(&self) -> FinanceResult<()> {
        let mut errors = FieldErrors::new();

        if !self.allocated.is_positive() {
            errors.push("amount", "Budget amount must be a positive number");
        }

        self.ownership.check_owner(self.owner_id, &mut errors);

        errors.into_result()
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.period, self.allocated, self.ownership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_allocation_rejected() {
        let budget = Budget::create(NewBudget::monthly(CategoryId::new(), Money::zero()));
        let err = budget.validate().unwrap_err();
        assert_eq!(
            err.field_errors().unwrap().get("amount"),
            Some("Budget amount must be a positive number")
        );
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(BudgetPeriod::parse("weekly"), Some(BudgetPeriod::Weekly));
        assert_eq!(BudgetPeriod::parse("Annual"), Some(BudgetPeriod::Yearly));
        assert_eq!(BudgetPeriod::parse("daily"), None);
    }

    #[test]
    fn test_serialization() {
        let budget = Budget::create(NewBudget::monthly(CategoryId::new(), Money::from_units(300)));
        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["amount"], 30000);
        assert_eq!(value["currentSpent"], 0);
        assert_eq!(value["period"], "monthly");
        assert_eq!(value["type"], "shared");

        let back: Budget = serde_json::from_value(value).unwrap();
        assert_eq!(back, budget);
    }
}
