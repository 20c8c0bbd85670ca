//! Recent activity across expenses and incomes

use crate::models::{Expense, Income, LedgerEntry};

/// How many entries the recent list shows by default
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// The newest `limit` entries, newest first
///
/// Entries on the same date keep their input order, expenses before incomes.
pub fn recent_transactions(expenses: &[Expense], incomes: &[Income], limit: usize) -> Vec<LedgerEntry> {
    let mut entries: Vec<LedgerEntry> = expenses
        .iter()
        .cloned()
        .map(LedgerEntry::from)
        .chain(incomes.iter().cloned().map(LedgerEntry::from))
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| b.date().cmp(&a.date()));
    entries.truncate(limit);
    entries
}
