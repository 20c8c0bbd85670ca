//! Simple expense and income records
//!
//! Lightweight, account-free records for the quick ledger. They are a
//! separate family from [`Transaction`](super::Transaction) and are never
//! reconciled with it. Mixed lists of expenses and incomes go through
//! [`LedgerEntry`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, IncomeId};
use super::money::Money;
use crate::error::{FieldErrors, FinanceResult};

/// A spending record labeled with a free-text category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: String,
}

/// An income record labeled with a free-text source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub source: String,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            date,
            category: category.into(),
        }
    }

    /// Check a stored or edited expense before it is written
    pub fn validate(&self) -> FinanceResult<()> {
        validate_record(&self.description, self.amount, &self.category, "category")
    }
}

impl Income {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: IncomeId::new(),
            description: description.into(),
            amount,
            date,
            source: source.into(),
        }
    }

    /// Check a stored or edited income before it is written
    pub fn validate(&self) -> FinanceResult<()> {
        validate_record(&self.description, self.amount, &self.source, "source")
    }
}

fn validate_record(
    description: &str,
    amount: Money,
    label: &str,
    label_field: &'static str,
) -> FinanceResult<()> {
    let mut errors = FieldErrors::new();

    if description.trim().is_empty() {
        errors.push("description", "Description is required");
    }
    if !amount.is_positive() {
        errors.push("amount", "Amount must be a positive number");
    }
    if label.trim().is_empty() {
        errors.push(label_field, label_required(label_field));
    }

    errors.into_result()
}

fn label_required(label_field: &str) -> &'static str {
    match label_field {
        "source" => "Source is required",
        _ => "Category is required",
    }
}

/// Either kind of simple record, for lists that mix both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LedgerEntry {
    Expense(Expense),
    Income(Income),
}

impl LedgerEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Expense(e) => e.date,
            Self::Income(i) => i.date,
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            Self::Expense(e) => e.amount,
            Self::Income(i) => i.amount,
        }
    }

    /// Amount with sign applied: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        match self {
            Self::Expense(e) => -e.amount,
            Self::Income(i) => i.amount,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Expense(e) => &e.description,
            Self::Income(i) => &i.description,
        }
    }

    /// The category of an expense or the source of an income
    pub fn label(&self) -> &str {
        match self {
            Self::Expense(e) => &e.category,
            Self::Income(i) => &i.source,
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income(_))
    }
}

impl From<Expense> for LedgerEntry {
    fn from(expense: Expense) -> Self {
        Self::Expense(expense)
    }
}

impl From<Income> for LedgerEntry {
    fn from(income: Income) -> Self {
        Self::Income(income)
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date(),
            self.description(),
            self.label(),
            self.signed_amount()
        )
    }
}

/// Raw form input for an expense or income, validated before anything is saved
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerForm {
    pub description: String,
    /// Amount as typed by the user
    pub amount: String,
    /// Category (expenses) or source (incomes)
    pub label: String,
    pub date: NaiveDate,
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidLedgerForm {
    pub description: String,
    pub amount: Money,
    pub label: String,
    pub date: NaiveDate,
}

impl LedgerForm {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        label: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            label: label.into(),
            date,
        }
    }

    /// Check every field, collecting all messages before failing
    ///
    /// `label_field` names the label in messages ("category" or "source").
    pub fn validate(&self, label_field: &'static str) -> FinanceResult<ValidLedgerForm> {
        let mut errors = FieldErrors::new();

        if self.description.trim().is_empty() {
            errors.push("description", "Description is required");
        }

        let amount = if self.amount.trim().is_empty() {
            errors.push("amount", "Amount is required");
            None
        } else {
            match Money::parse(&self.amount) {
                Ok(amount) if amount.is_positive() => Some(amount),
                _ => {
                    errors.push("amount", "Amount must be a positive number");
                    None
                }
            }
        };

        if self.label.trim().is_empty() {
            errors.push(label_field, label_required(label_field));
        }

        errors.into_result()?;

        Ok(ValidLedgerForm {
            description: self.description.trim().to_string(),
            amount: amount.unwrap_or_default(),
            // The label is kept verbatim: grouping is by exact string
            label: self.label.clone(),
            date: self.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_entry_accessors() {
        let expense: LedgerEntry = Expense::new("Rent", Money::from_units(900), day(1), "Housing").into();
        let income: LedgerEntry = Income::new("Salary", Money::from_units(3000), day(5), "Job").into();

        assert_eq!(expense.label(), "Housing");
        assert_eq!(expense.signed_amount().cents(), -90000);
        assert!(!expense.is_income());
        assert_eq!(income.label(), "Job");
        assert_eq!(income.date(), day(5));
        assert!(income.is_income());
    }

    #[test]
    fn test_entry_serialization_is_tagged() {
        let entry: LedgerEntry = Income::new("Gift", Money::from_units(50), day(2), "Family").into();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "income");
        assert_eq!(value["source"], "Family");
    }

    #[test]
    fn test_form_collects_every_error() {
        let form = LedgerForm::new("  ", "", "", day(3));
        let err = form.validate("category").unwrap_err();
        let fields = err.field_errors().unwrap();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("description"), Some("Description is required"));
        assert_eq!(fields.get("amount"), Some("Amount is required"));
        assert_eq!(fields.get("category"), Some("Category is required"));
    }

    #[test]
    fn test_form_rejects_non_positive_and_non_numeric_amounts() {
        for amount in ["abc", "abc5", "five5", "0", "-5"] {
            let form = LedgerForm::new("Lunch", amount, "Food", day(3));
            let err = form.validate("category").unwrap_err();
            assert_eq!(
                err.field_errors().unwrap().get("amount"),
                Some("Amount must be a positive number"),
                "amount {:?}",
                amount
            );
        }
    }

    #[test]
    fn test_form_source_message() {
        let form = LedgerForm::new("Paycheck", "10", " ", day(3));
        let err = form.validate("source").unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("source"), Some("Source is required"));
    }

    #[test]
    fn test_record_validation() {
        let mut expense = Expense::new("Rent", Money::from_units(900), day(1), "Housing");
        assert!(expense.validate().is_ok());

        expense.amount = Money::zero();
        expense.category = "  ".into();
        let err = expense.validate().unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("amount"), Some("Amount must be a positive number"));
        assert_eq!(fields.get("category"), Some("Category is required"));

        let income = Income::new("", Money::from_units(-1), day(1), "Job");
        let err = income.validate().unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.get("description").is_some());
        assert!(fields.get("source").is_none());
    }

    #[test]
    fn test_valid_form_keeps_label_verbatim() {
        let form = LedgerForm::new(" Lunch ", "12,50", "Food ", day(3));
        let valid = form.validate("category").unwrap();
        assert_eq!(valid.description, "Lunch");
        assert_eq!(valid.amount.cents(), 1250);
        assert_eq!(valid.label, "Food ");
    }
}
