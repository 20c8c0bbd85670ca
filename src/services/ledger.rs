//! Ledger service
//!
//! Read-modify-write access to the simple expense and income lists. Every
//! change reads the full collection, edits it and writes it back whole. A
//! list that cannot be read is never written over.

use crate::error::FinanceResult;
use crate::models::{Expense, ExpenseId, Income, IncomeId, LedgerForm};
use crate::storage::{Collection, KeyValueStore, RecordStore};

/// Service for the expense and income lists
pub struct LedgerService<'a, S: KeyValueStore> {
    store: &'a RecordStore<S>,
}

/// Both ledger lists read at the same time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
}

impl<'a, S: KeyValueStore> LedgerService<'a, S> {
    pub fn new(store: &'a RecordStore<S>) -> Self {
        Self { store }
    }

    /// All expenses in stored order; empty if the list cannot be read
    pub fn expenses(&self) -> Vec<Expense> {
        self.read(Collection::Expenses)
    }

    /// All incomes in stored order; empty if the list cannot be read
    pub fn incomes(&self) -> Vec<Income> {
        self.read(Collection::Incomes)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            expenses: self.expenses(),
            incomes: self.incomes(),
        }
    }

    /// Validate the form and append a new expense
    pub fn add_expense(&self, form: &LedgerForm) -> FinanceResult<Expense> {
        let valid = form.validate("category")?;
        let expense = Expense::new(valid.description, valid.amount, valid.date, valid.label);

        let mut expenses: Vec<Expense> = self.store.load(Collection::Expenses)?;
        expenses.push(expense.clone());
        self.store.save_all(Collection::Expenses, &expenses)?;

        tracing::info!(expense = %expense.id, amount = %expense.amount, "expense added");
        Ok(expense)
    }

    /// Replace the expense with the same id; returns false if there is none
    pub fn update_expense(&self, expense: Expense) -> FinanceResult<bool> {
        expense.validate()?;
        let mut expenses: Vec<Expense> = self.store.load(Collection::Expenses)?;
        let Some(slot) = expenses.iter_mut().find(|e| e.id == expense.id) else {
            tracing::debug!(expense = %expense.id, "update skipped, no such expense");
            return Ok(false);
        };
        *slot = expense;

        self.store.save_all(Collection::Expenses, &expenses)?;
        Ok(true)
    }

    /// Remove an expense; returns false if there was none
    pub fn delete_expense(&self, id: ExpenseId) -> FinanceResult<bool> {
        let mut expenses: Vec<Expense> = self.store.load(Collection::Expenses)?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            return Ok(false);
        }

        self.store.save_all(Collection::Expenses, &expenses)?;
        Ok(true)
    }

    /// Validate the form and append a new income
    pub fn add_income(&self, form: &LedgerForm) -> FinanceResult<Income> {
        let valid = form.validate("source")?;
        let income = Income::new(valid.description, valid.amount, valid.date, valid.label);

        let mut incomes: Vec<Income> = self.store.load(Collection::Incomes)?;
        incomes.push(income.clone());
        self.store.save_all(Collection::Incomes, &incomes)?;

        tracing::info!(income = %income.id, amount = %income.amount, "income added");
        Ok(income)
    }

    /// Replace the income with the same id; returns false if there is none
    pub fn update_income(&self, income: Income) -> FinanceResult<bool> {
        income.validate()?;
        let mut incomes: Vec<Income> = self.store.load(Collection::Incomes)?;
        let Some(slot) = incomes.iter_mut().find(|i| i.id == income.id) else {
            tracing::debug!(income = %income.id, "update skipped, no such income");
            return Ok(false);
        };
        *slot = income;

        self.store.save_all(Collection::Incomes, &incomes)?;
        Ok(true)
    }

    /// Remove an income; returns false if there was none
    pub fn delete_income(&self, id: IncomeId) -> FinanceResult<bool> {
        let mut incomes: Vec<Income> = self.store.load(Collection::Incomes)?;
        let before = incomes.len();
        incomes.retain(|i| i.id != id);
        if incomes.len() == before {
            return Ok(false);
        }

        self.store.save_all(Collection::Incomes, &incomes)?;
        Ok(true)
    }

    fn read<T: serde::de::DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        self.store.load(collection).unwrap_or_else(|e| {
            tracing::error!(collection = %collection, error = %e, "failed to read ledger");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use crate::models::Money;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let store = RecordStore::new(MemoryStore::new());
        let ledger = LedgerService::new(&store);

        let coffee = ledger
            .add_expense(&LedgerForm::new("Coffee", "4.50", "Food", date(2)))
            .unwrap();
        ledger
            .add_expense(&LedgerForm::new("  Bus  ", "2,75", "Transport", date(3)))
            .unwrap();
        let salary = ledger
            .add_income(&LedgerForm::new("Salary", "1000", "Job", date(1)))
            .unwrap();

        let expenses = ledger.expenses();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0], coffee);
        assert_eq!(expenses[1].description, "Bus");
        assert_eq!(expenses[1].amount, Money::from_cents(275));

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.incomes, vec![salary]);
        assert_eq!(snapshot.expenses, expenses);
    }

    #[test]
    fn test_invalid_form_saves_nothing() {
        let store = RecordStore::new(MemoryStore::new());
        let ledger = LedgerService::new(&store);

        let err = ledger
            .add_income(&LedgerForm::new("Gift", "-5", "", date(1)))
            .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("amount"), Some("Amount must be a positive number"));
        assert_eq!(fields.get("source"), Some("Source is required"));
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = RecordStore::new(MemoryStore::new());
        let ledger = LedgerService::new(&store);
        ledger
            .add_expense(&LedgerForm::new("Rent", "900", "Housing", date(1)))
            .unwrap();

        let stranger = Expense::new("Ghost", Money::from_units(1), date(1), "x");
        assert!(!ledger.update_expense(stranger).unwrap());
        assert_eq!(ledger.expenses().len(), 1);
        assert_eq!(ledger.expenses()[0].description, "Rent");
    }

    #[test]
    fn test_update_and_delete() {
        let store = RecordStore::new(MemoryStore::new());
        let ledger = LedgerService::new(&store);
        let mut income = ledger
            .add_income(&LedgerForm::new("Salary", "1000", "Job", date(1)))
            .unwrap();

        income.amount = Money::from_units(1200);
        assert!(ledger.update_income(income.clone()).unwrap());
        assert_eq!(ledger.incomes()[0].amount, Money::from_units(1200));

        assert!(ledger.delete_income(income.id).unwrap());
        assert!(!ledger.delete_income(income.id).unwrap());
        assert!(ledger.incomes().is_empty());
    }

    #[test]
    fn test_unreadable_list_is_empty() {
        let backend = MemoryStore::new();
        backend.set("finances_expenses", &json!("garbage")).unwrap();
        let store = RecordStore::new(backend);
        let ledger = LedgerService::new(&store);

        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_unreadable_list_is_not_overwritten() {
        let backend = MemoryStore::new();
        let rent = Expense::new("Rent", Money::from_units(900), date(1), "Housing");
        let stored = json!([serde_json::to_value(&rent).unwrap(), {"id": "broken"}]);
        backend.set("finances_expenses", &stored).unwrap();
        let store = RecordStore::new(backend);
        let ledger = LedgerService::new(&store);

        let err = ledger
            .add_expense(&LedgerForm::new("Coffee", "3", "Food", date(2)))
            .unwrap_err();
        assert!(matches!(err, FinanceError::Storage(_)));
        assert!(ledger.update_expense(rent.clone()).is_err());
        assert!(ledger.delete_expense(rent.id).is_err());

        assert_eq!(store.backend().get("finances_expenses").unwrap(), Some(stored));
    }

    #[test]
    fn test_update_rejects_invalid_record() {
        let store = RecordStore::new(MemoryStore::new());
        let ledger = LedgerService::new(&store);
        let mut expense = ledger
            .add_expense(&LedgerForm::new("Rent", "900", "Housing", date(1)))
            .unwrap();

        expense.amount = Money::zero();
        expense.description = " ".into();
        let err = ledger.update_expense(expense).unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.get("amount").is_some());
        assert!(fields.get("description").is_some());
        assert_eq!(ledger.expenses()[0].amount, Money::from_units(900));
    }
}
