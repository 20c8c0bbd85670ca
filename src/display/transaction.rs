//! Transaction display formatting
//!
//! Register-style listing of transactions. Accounts and categories that no
//! longer exist are shown as "(deleted)".

use super::report::truncate;
use crate::models::{Account, Category, Transaction};

/// Format a single transaction as a register row
pub fn format_transaction_row(
    txn: &Transaction,
    accounts: &[Account],
    categories: &[Category],
    symbol: &str,
) -> String {
    let account = accounts
        .iter()
        .find(|a| a.id == txn.account_id)
        .map(|a| a.name.as_str())
        .unwrap_or("(deleted)");
    let category = categories
        .iter()
        .find(|c| c.id == txn.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("(deleted)");
    let shared = if txn.is_shared { "S" } else { " " };

    format!(
        "{:<12} {} {} {:<20} {:<14} {:<14} {:>14}",
        txn.id.to_string(),
        shared,
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.description, 20),
        truncate(account, 14),
        truncate(category, 14),
        txn.signed_amount().format_signed(symbol)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_list(
    transactions: &[&Transaction],
    accounts: &[Account],
    categories: &[Category],
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {} {:10} {:<20} {:<14} {:<14} {:>14}\n",
        "ID", " ", "Date", "Description", "Account", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(104));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, accounts, categories, symbol));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewAccount, NewCategory, NewTransaction, TransactionKind};
    use chrono::NaiveDate;

    #[test]
    fn test_row_resolves_names() {
        let account = Account::create(NewAccount::shared("Joint", Money::zero()));
        let category = Category::create(NewCategory::shared("Food"));
        let txn = Transaction::create(NewTransaction::new(
            "Groceries",
            Money::from_units(30),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            account.id,
            category.id,
            TransactionKind::Expense,
        ));

        let row = format_transaction_row(&txn, &[account], &[category], "$");
        assert!(row.contains("Joint"));
        assert!(row.contains("Food"));
        assert!(row.contains("-$30.00"));

        let orphan = format_transaction_row(&txn, &[], &[], "$");
        assert!(orphan.contains("(deleted)"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_transaction_list(&[], &[], &[], "$"), "No transactions found.\n");
    }
}
