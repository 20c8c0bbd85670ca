//! Tandem - shared and personal finance tracking
//!
//! This library provides the core of the Tandem finance tracker. Two people
//! keep accounts, categories, transactions and budgets that are either shared
//! or owned by one of them, and a quick expense/income ledger that feeds
//! period reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, accounts, transactions, budgets, ledger)
//! - `storage`: Key-value record store with JSON files
//! - `reports`: Aggregation engine over the quick ledger
//! - `services`: Application state, ledger service and summary builder
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use tandem::models::{Money, NewAccount, User};
//! use tandem::services::FinanceState;
//! use tandem::storage::{MemoryStore, RecordStore};
//!
//! let store = RecordStore::new(MemoryStore::new());
//! let mut state = FinanceState::load(&store);
//!
//! state.set_current_user(User::new("Ana", "ana@example.com")).unwrap();
//! state.add_account(NewAccount::shared("Joint", Money::from_units(500))).unwrap();
//!
//! assert_eq!(state.summary().unwrap().total_balance, Money::from_units(500));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::FinanceError;
