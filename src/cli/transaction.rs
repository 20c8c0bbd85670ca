//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::account::find_account;
use super::category::find_category;
use super::{id_matches, parse_amount, parse_date, resolve_owner};
use crate::config::settings::Settings;
use crate::display::transaction::format_transaction_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{NewTransaction, SplitRatio, TransactionKind};
use crate::services::FinanceState;
use crate::storage::KeyValueStore;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction against an account
    Add {
        /// What the money was for
        description: String,
        /// Amount (always positive; use --income for money coming in)
        amount: String,
        /// Account name or ID
        #[arg(short, long)]
        account: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Record as income instead of expense
        #[arg(long)]
        income: bool,
        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Share the transaction with the partner
        #[arg(short, long)]
        shared: bool,
        /// Who paid ("me" or "partner")
        #[arg(long, requires = "shared")]
        paid_by: Option<String>,
        /// Current user's fraction of a shared transaction (0-1)
        #[arg(long, requires = "shared")]
        split: Option<f64>,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List transactions
    List {
        /// Only shared transactions
        #[arg(long, conflicts_with_all = ["owner", "orphaned"])]
        shared: bool,
        /// Only individual transactions of "me" or "partner"
        #[arg(short, long, conflicts_with = "orphaned")]
        owner: Option<String>,
        /// Only transactions whose account or category was removed
        #[arg(long)]
        orphaned: bool,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Remove a transaction
    Remove {
        /// Transaction ID
        transaction: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command<S: KeyValueStore>(
    state: &mut FinanceState<'_, S>,
    settings: &Settings,
    today: NaiveDate,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            account,
            category,
            income,
            date,
            shared,
            paid_by,
            split,
            note,
        } => {
            let amount = parse_amount(&amount, "amount")?;
            let date = parse_date(date.as_deref(), settings, today)?;
            let account_id = find_account(state, &account)?.id;
            let category_id = find_category(state, &category)?.id;
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };

            let mut new = NewTransaction::new(description, amount, date, account_id, category_id, kind);
            if shared {
                let paid_by = paid_by.map(|p| resolve_owner(state, &p)).transpose()?;
                new = new.shared(paid_by, split_ratio(state, split)?);
            }
            new.note = note;

            let txn = state.add_transaction(new)?;
            println!(
                "Recorded {} {} on {}",
                txn.kind,
                txn.amount.format_with_symbol(symbol),
                txn.date
            );
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            shared,
            owner,
            orphaned,
            limit,
        } => {
            let mut transactions = if shared {
                state.shared_transactions()
            } else if orphaned {
                state.orphaned_transactions()
            } else if let Some(owner) = owner {
                state.individual_transactions(Some(resolve_owner(state, &owner)?))
            } else {
                state.transactions().iter().collect()
            };

            transactions.sort_by(|a, b| b.date.cmp(&a.date));
            transactions.truncate(limit);
            print!(
                "{}",
                format_transaction_list(&transactions, state.accounts(), state.categories(), symbol)
            );
        }

        TransactionCommands::Remove { transaction } => {
            let id = state
                .transactions()
                .iter()
                .find(|t| id_matches(t.id, t.id.as_uuid(), &transaction))
                .map(|t| t.id)
                .ok_or_else(|| FinanceError::transaction_not_found(&transaction))?;

            let removed = state.delete_transaction(id)?;
            println!("Removed transaction: {}", removed);
        }
    }

    Ok(())
}

/// Split between the current user and partner
///
/// Falls back to the current user's default split when none is given.
fn split_ratio<S: KeyValueStore>(
    state: &FinanceState<'_, S>,
    split: Option<f64>,
) -> FinanceResult<Option<SplitRatio>> {
    let split = split.or_else(|| state.current_user().and_then(|u| u.settings.default_split_ratio));
    let Some(mine) = split else {
        return Ok(None);
    };

    let (Some(me), Some(partner)) = (state.current_user(), state.partner()) else {
        return Err(FinanceError::Validation(
            "Splitting needs both a current user and a partner".into(),
        ));
    };

    let mut ratio = SplitRatio::new();
    ratio.insert(me.id, mine);
    ratio.insert(partner.id, 1.0 - mine);
    Ok(Some(ratio))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewAccount, NewCategory, User};
    use crate::storage::{MemoryStore, RecordStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn add(shared: bool, split: Option<f64>) -> TransactionCommands {
        TransactionCommands::Add {
            description: "Dinner".into(),
            amount: "80".into(),
            account: "Joint".into(),
            category: "Food".into(),
            income: false,
            date: None,
            shared,
            paid_by: None,
            split,
            note: None,
        }
    }

    #[test]
    fn test_add_shared_with_split() {
        let store = RecordStore::new(MemoryStore::new());
        let mut state = FinanceState::load(&store);
        let settings = Settings::default();
        let ana = User::new("Ana", "ana@example.com");
        let bia = User::new("Bia", "bia@example.com");
        state.set_current_user(ana.clone()).unwrap();
        state.set_partner(Some(bia.clone())).unwrap();
        state.add_account(NewAccount::shared("Joint", Money::zero())).unwrap();
        state.add_category(NewCategory::shared("Food")).unwrap();

        handle_transaction_command(&mut state, &settings, today(), add(true, Some(0.25))).unwrap();

        let txn = &state.transactions()[0];
        assert!(txn.is_shared);
        assert_eq!(txn.date, today());
        let split = txn.split_amounts();
        assert_eq!(split[&ana.id], Money::from_units(20));
        assert_eq!(split[&bia.id], Money::from_units(60));
    }

    #[test]
    fn test_split_without_partner_fails() {
        let store = RecordStore::new(MemoryStore::new());
        let mut state = FinanceState::load(&store);
        let settings = Settings::default();
        state.add_account(NewAccount::shared("Joint", Money::zero())).unwrap();
        state.add_category(NewCategory::shared("Food")).unwrap();

        let err = handle_transaction_command(&mut state, &settings, today(), add(true, Some(0.5)))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(state.transactions().is_empty());
    }

    #[test]
    fn test_unknown_account() {
        let store = RecordStore::new(MemoryStore::new());
        let mut state = FinanceState::load(&store);
        let settings = Settings::default();

        let err = handle_transaction_command(&mut state, &settings, today(), add(false, None))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
