//! Application state for accounts, categories, transactions and budgets
//!
//! `FinanceState` owns the in-memory lists, writes every change through to
//! the record store and keeps the financial summary current. Write failures
//! never abort an operation: they are logged and surfaced through
//! [`FinanceState::error`], and the in-memory change stands. A collection that
//! failed to load is read-only until the state is loaded again, so a bad file
//! is never replaced by a partial list.

use std::collections::HashSet;

use serde::Serialize;

use super::summary::build_summary;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Account, AccountId, Budget, BudgetId, Category, CategoryId, FinancialSummary, NewAccount,
    NewBudget, NewCategory, NewTransaction, Ownership, Transaction, TransactionId, User, UserId,
};
use crate::storage::{Collection, KeyValueStore, RecordStore};

/// Message recorded when a collection could not be written
pub const SAVE_ERROR: &str = "Failed to save financial data";

/// Message recorded when a collection could not be read
pub const LOAD_ERROR: &str = "Failed to load financial data";

/// In-memory finance data backed by a record store
#[derive(Debug)]
pub struct FinanceState<'a, S: KeyValueStore> {
    store: &'a RecordStore<S>,
    current_user: Option<User>,
    partner: Option<User>,
    accounts: Vec<Account>,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    summary: Option<FinancialSummary>,
    error: Option<String>,
    unreadable: HashSet<Collection>,
}

impl<'a, S: KeyValueStore> FinanceState<'a, S> {
    /// Empty state that has not read anything from the store
    pub fn new(store: &'a RecordStore<S>) -> Self {
        Self {
            store,
            current_user: None,
            partner: None,
            accounts: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
            budgets: Vec::new(),
            summary: None,
            error: None,
            unreadable: HashSet::new(),
        }
    }

    /// Load every collection from the store
    ///
    /// A collection that fails to load stays empty and refuses writes; the
    /// others are still read.
    pub fn load(store: &'a RecordStore<S>) -> Self {
        let mut state = Self::new(store);

        state.current_user = state.read_one(Collection::CurrentUser);
        state.partner = state.read_one(Collection::Partner);
        state.accounts = state.read_all(Collection::Accounts);
        state.categories = state.read_all(Collection::Categories);
        state.transactions = state.read_all(Collection::Transactions);
        state.budgets = state.read_all(Collection::Budgets);

        state.recompute();
        tracing::debug!(
            accounts = state.accounts.len(),
            categories = state.categories.len(),
            transactions = state.transactions.len(),
            budgets = state.budgets.len(),
            "finance state loaded"
        );
        state
    }

    // ----- users -----

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn partner(&self) -> Option<&User> {
        self.partner.as_ref()
    }

    /// Replace the current user
    pub fn set_current_user(&mut self, user: User) -> FinanceResult<()> {
        user.validate()?;
        self.ensure_writable(Collection::CurrentUser)?;
        self.current_user = Some(user);
        self.persist(Collection::CurrentUser);
        self.recompute();
        Ok(())
    }

    /// Replace or remove the partner
    pub fn set_partner(&mut self, partner: Option<User>) -> FinanceResult<()> {
        if let Some(partner) = &partner {
            partner.validate()?;
        }
        self.ensure_writable(Collection::Partner)?;
        self.partner = partner;
        self.persist(Collection::Partner);
        self.recompute();
        Ok(())
    }

    // ----- accounts -----

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn add_account(&mut self, new: NewAccount) -> FinanceResult<Account> {
        let account = Account::create(new);
        account.validate()?;
        self.ensure_writable(Collection::Accounts)?;

        self.accounts.push(account.clone());
        self.persist(Collection::Accounts);
        self.recompute();

        tracing::info!(account = %account.id, name = %account.name, "account added");
        Ok(account)
    }

    pub fn update_account(&mut self, account: Account) -> FinanceResult<()> {
        account.validate()?;
        self.ensure_writable(Collection::Accounts)?;

        let slot = self
            .accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .ok_or_else(|| FinanceError::account_not_found(account.id.to_string()))?;
        *slot = account;

        self.persist(Collection::Accounts);
        self.recompute();
        Ok(())
    }

    /// Remove an account; its transactions are left in place
    pub fn delete_account(&mut self, id: AccountId) -> FinanceResult<Account> {
        self.ensure_writable(Collection::Accounts)?;
        let index = self
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| FinanceError::account_not_found(id.to_string()))?;
        let removed = self.accounts.remove(index);

        self.persist(Collection::Accounts);
        self.recompute();
        Ok(removed)
    }

    pub fn shared_accounts(&self) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| a.ownership == Ownership::Shared)
            .collect()
    }

    /// Accounts owned by `user`, or by the current user when `None`
    pub fn individual_accounts(&self, user: Option<UserId>) -> Vec<&Account> {
        match self.resolve_user(user) {
            Some(user_id) => self.accounts.iter().filter(|a| a.is_owned_by(user_id)).collect(),
            None => Vec::new(),
        }
    }

    // ----- categories -----

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn add_category(&mut self, new: NewCategory) -> FinanceResult<Category> {
        let category = Category::create(new);
        category.validate()?;
        self.ensure_writable(Collection::Categories)?;

        self.categories.push(category.clone());
        self.persist(Collection::Categories);

        tracing::info!(category = %category.id, name = %category.name, "category added");
        Ok(category)
    }

    pub fn update_category(&mut self, category: Category) -> FinanceResult<()> {
        category.validate()?;
        self.ensure_writable(Collection::Categories)?;

        let slot = self
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| FinanceError::category_not_found(category.id.to_string()))?;
        *slot = category;

        self.persist(Collection::Categories);
        Ok(())
    }

    /// Remove a category; transactions and budgets pointing at it are kept
    pub fn delete_category(&mut self, id: CategoryId) -> FinanceResult<Category> {
        self.ensure_writable(Collection::Categories)?;
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| FinanceError::category_not_found(id.to_string()))?;
        let removed = self.categories.remove(index);

        self.persist(Collection::Categories);
        Ok(removed)
    }

    pub fn shared_categories(&self) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.ownership == Ownership::Shared)
            .collect()
    }

    pub fn individual_categories(&self, user: Option<UserId>) -> Vec<&Category> {
        match self.resolve_user(user) {
            Some(user_id) => self
                .categories
                .iter()
                .filter(|c| c.is_owned_by(user_id))
                .collect(),
            None => Vec::new(),
        }
    }

    // ----- transactions -----

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn add_transaction(&mut self, new: NewTransaction) -> FinanceResult<Transaction> {
        let transaction = Transaction::create(new);
        transaction.validate()?;
        self.ensure_writable(Collection::Transactions)?;

        self.transactions.push(transaction.clone());
        self.persist(Collection::Transactions);
        self.recompute();

        tracing::info!(
            transaction = %transaction.id,
            amount = %transaction.amount,
            kind = %transaction.kind,
            "transaction added"
        );
        Ok(transaction)
    }

    pub fn update_transaction(&mut self, transaction: Transaction) -> FinanceResult<()> {
        transaction.validate()?;
        self.ensure_writable(Collection::Transactions)?;

        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| FinanceError::transaction_not_found(transaction.id.to_string()))?;
        *slot = transaction;

        self.persist(Collection::Transactions);
        self.recompute();
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: TransactionId) -> FinanceResult<Transaction> {
        self.ensure_writable(Collection::Transactions)?;
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;
        let removed = self.transactions.remove(index);

        self.persist(Collection::Transactions);
        self.recompute();
        Ok(removed)
    }

    pub fn shared_transactions(&self) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| t.is_shared).collect()
    }

    /// Non-shared transactions on accounts owned by `user` (or the current user)
    pub fn individual_transactions(&self, user: Option<UserId>) -> Vec<&Transaction> {
        let Some(user_id) = self.resolve_user(user) else {
            return Vec::new();
        };

        self.transactions
            .iter()
            .filter(|t| !t.is_shared)
            .filter(|t| self.account(t.account_id).is_some_and(|a| a.is_owned_by(user_id)))
            .collect()
    }

    /// Transactions whose account or category no longer exists
    pub fn orphaned_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| self.account(t.account_id).is_none() || self.category(t.category_id).is_none())
            .collect()
    }

    // ----- budgets -----

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn budget(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    pub fn add_budget(&mut self, new: NewBudget) -> FinanceResult<Budget> {
        let budget = Budget::create(new);
        budget.validate()?;
        self.ensure_writable(Collection::Budgets)?;

        self.budgets.push(budget.clone());
        self.persist(Collection::Budgets);
        self.recompute();

        tracing::info!(budget = %budget.id, allocated = %budget.allocated, "budget added");
        Ok(budget)
    }

    pub fn update_budget(&mut self, budget: Budget) -> FinanceResult<()> {
        budget.validate()?;
        self.ensure_writable(Collection::Budgets)?;

        let slot = self
            .budgets
            .iter_mut()
            .find(|b| b.id == budget.id)
            .ok_or_else(|| FinanceError::budget_not_found(budget.id.to_string()))?;
        *slot = budget;

        self.persist(Collection::Budgets);
        self.recompute();
        Ok(())
    }

    pub fn delete_budget(&mut self, id: BudgetId) -> FinanceResult<Budget> {
        self.ensure_writable(Collection::Budgets)?;
        let index = self
            .budgets
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| FinanceError::budget_not_found(id.to_string()))?;
        let removed = self.budgets.remove(index);

        self.persist(Collection::Budgets);
        self.recompute();
        Ok(removed)
    }

    // ----- derived state -----

    /// The current summary; `None` until a current user is set
    pub fn summary(&self) -> Option<&FinancialSummary> {
        self.summary.as_ref()
    }

    /// The last storage failure, as a user-facing message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn ensure_writable(&self, collection: Collection) -> FinanceResult<()> {
        if self.unreadable.contains(&collection) {
            tracing::warn!(collection = %collection, "refusing to overwrite unreadable collection");
            return Err(FinanceError::Storage(format!(
                "{} could not be loaded; fix or remove the stored file before changing it",
                collection
            )));
        }
        Ok(())
    }

    fn resolve_user(&self, user: Option<UserId>) -> Option<UserId> {
        user.or_else(|| self.current_user.as_ref().map(|u| u.id))
    }

    fn recompute(&mut self) {
        self.summary = self.current_user.as_ref().map(|user| {
            build_summary(
                user,
                self.partner.as_ref(),
                &self.accounts,
                &self.transactions,
                &self.budgets,
            )
        });
    }

    fn read_all<T: serde::de::DeserializeOwned>(&mut self, collection: Collection) -> Vec<T> {
        match self.store.load(collection) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(collection = %collection, error = %e, "failed to load collection");
                self.error = Some(LOAD_ERROR.to_string());
                self.unreadable.insert(collection);
                Vec::new()
            }
        }
    }

    fn read_one<T: serde::de::DeserializeOwned>(&mut self, collection: Collection) -> Option<T> {
        match self.store.load_one(collection) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(collection = %collection, error = %e, "failed to load collection");
                self.error = Some(LOAD_ERROR.to_string());
                self.unreadable.insert(collection);
                None
            }
        }
    }

    /// Write one collection through to the store
    fn persist(&mut self, collection: Collection) {
        let result = match collection {
            Collection::CurrentUser => write_singleton(self.store, collection, &self.current_user),
            Collection::Partner => write_singleton(self.store, collection, &self.partner),
            Collection::Accounts => self.store.save_all(collection, &self.accounts),
            Collection::Categories => self.store.save_all(collection, &self.categories),
            Collection::Transactions => self.store.save_all(collection, &self.transactions),
            Collection::Budgets => self.store.save_all(collection, &self.budgets),
            // Written by the ledger service
            Collection::Expenses | Collection::Incomes => Ok(()),
        };

        if let Err(e) = result {
            tracing::error!(collection = %collection, error = %e, "failed to save collection");
            self.error = Some(SAVE_ERROR.to_string());
        }
    }
}

fn write_singleton<S: KeyValueStore, T: Serialize>(
    store: &RecordStore<S>,
    collection: Collection,
    record: &Option<T>,
) -> FinanceResult<()> {
    match record {
        Some(record) => store.save_one(collection, record),
        None => store.clear(collection),
    }
}
