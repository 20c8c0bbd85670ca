//! Core data models for Tandem
//!
//! This module contains all the data structures that represent the shared
//! finance domain: accounts, categories, transactions, budgets, the simple
//! expense/income records and the users who own them.

pub mod account;
pub mod budget;
pub mod category;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod ownership;
pub mod summary;
pub mod transaction;
pub mod user;

pub use account::{Account, NewAccount};
pub use budget::{Budget, BudgetPeriod, NewBudget};
pub use category::{Category, NewCategory};
pub use ids::{AccountId, BudgetId, CategoryId, ExpenseId, IncomeId, TransactionId, UserId};
pub use ledger::{Expense, Income, LedgerEntry, LedgerForm, ValidLedgerForm};
pub use money::Money;
pub use ownership::Ownership;
pub use summary::{BudgetProgress, FinancialSummary, PersonalBalance};
pub use transaction::{NewTransaction, SplitRatio, Transaction, TransactionKind};
pub use user::{Theme, User, UserSettings};
