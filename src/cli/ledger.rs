//! Expense and income CLI commands
//!
//! The quick ledger: one-line expenses and incomes labeled by free-form
//! category or source, independent of accounts.

use chrono::NaiveDate;
use clap::Subcommand;

use super::{id_matches, parse_date};
use crate::config::settings::Settings;
use crate::display::ledger::format_ledger_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{LedgerEntry, LedgerForm};
use crate::services::LedgerService;
use crate::storage::KeyValueStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount spent
        amount: String,
        /// Category label
        #[arg(short, long)]
        category: String,
        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List expenses, newest first
    List,
    /// Remove an expense
    Remove {
        /// Expense ID
        expense: String,
    },
}

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record an income
    Add {
        /// What the money came from
        description: String,
        /// Amount received
        amount: String,
        /// Source label
        #[arg(short, long)]
        source: String,
        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List incomes, newest first
    List,
    /// Remove an income
    Remove {
        /// Income ID
        income: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command<S: KeyValueStore>(
    ledger: &LedgerService<'_, S>,
    settings: &Settings,
    today: NaiveDate,
    cmd: ExpenseCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let date = parse_date(date.as_deref(), settings, today)?;
            let expense = ledger.add_expense(&LedgerForm::new(description, amount, category, date))?;
            println!(
                "Recorded expense: {} {} [{}]",
                expense.description,
                expense.amount.format_with_symbol(symbol),
                expense.category
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List => {
            let mut entries: Vec<LedgerEntry> =
                ledger.expenses().into_iter().map(LedgerEntry::from).collect();
            entries.sort_by(|a, b| b.date().cmp(&a.date()));
            print!("{}", format_ledger_list(&entries, symbol));
        }

        ExpenseCommands::Remove { expense } => {
            let id = ledger
                .expenses()
                .iter()
                .find(|e| id_matches(e.id, e.id.as_uuid(), &expense))
                .map(|e| e.id)
                .ok_or_else(|| FinanceError::NotFound {
                    entity_type: "Expense",
                    identifier: expense.clone(),
                })?;

            ledger.delete_expense(id)?;
            println!("Removed expense: {}", expense);
        }
    }

    Ok(())
}

/// Handle an income command
pub fn handle_income_command<S: KeyValueStore>(
    ledger: &LedgerService<'_, S>,
    settings: &Settings,
    today: NaiveDate,
    cmd: IncomeCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::Add {
            description,
            amount,
            source,
            date,
        } => {
            let date = parse_date(date.as_deref(), settings, today)?;
            let income = ledger.add_income(&LedgerForm::new(description, amount, source, date))?;
            println!(
                "Recorded income: {} {} [{}]",
                income.description,
                income.amount.format_with_symbol(symbol),
                income.source
            );
            println!("  ID: {}", income.id);
        }

        IncomeCommands::List => {
            let mut entries: Vec<LedgerEntry> =
                ledger.incomes().into_iter().map(LedgerEntry::from).collect();
            entries.sort_by(|a, b| b.date().cmp(&a.date()));
            print!("{}", format_ledger_list(&entries, symbol));
        }

        IncomeCommands::Remove { income } => {
            let id = ledger
                .incomes()
                .iter()
                .find(|i| id_matches(i.id, i.id.as_uuid(), &income))
                .map(|i| i.id)
                .ok_or_else(|| FinanceError::NotFound {
                    entity_type: "Income",
                    identifier: income.clone(),
                })?;

            ledger.delete_income(id)?;
            println!("Removed income: {}", income);
        }
    }

    Ok(())
}
