//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use super::{id_matches, known_users, parse_amount, resolve_owner};
use crate::config::settings::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Account, NewAccount};
use crate::services::FinanceState;
use crate::storage::KeyValueStore;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Add {
        /// Account name
        name: String,
        /// Starting balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Owner of an individual account ("me" or "partner"); shared if omitted
        #[arg(short, long)]
        owner: Option<String>,
        /// Icon shown next to the name
        #[arg(long)]
        icon: Option<String>,
        /// Display color
        #[arg(long)]
        color: Option<String>,
    },
    /// List accounts
    List {
        /// Only shared accounts
        #[arg(long, conflicts_with = "owner")]
        shared: bool,
        /// Only individual accounts of "me" or "partner"
        #[arg(short, long)]
        owner: Option<String>,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New balance
        #[arg(short, long)]
        balance: Option<String>,
        /// Hide the account from listings
        #[arg(long, conflicts_with = "show")]
        hide: bool,
        /// Show a hidden account again
        #[arg(long)]
        show: bool,
    },
    /// Remove an account (its transactions are kept)
    Remove {
        /// Account name or ID
        account: String,
    },
}

/// Find an account by short id, full id or name (case-insensitive)
pub fn find_account<'s, S: KeyValueStore>(
    state: &'s FinanceState<'_, S>,
    ident: &str,
) -> FinanceResult<&'s Account> {
    state
        .accounts()
        .iter()
        .find(|a| id_matches(a.id, a.id.as_uuid(), ident))
        .or_else(|| {
            state
                .accounts()
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(ident.trim()))
        })
        .ok_or_else(|| FinanceError::account_not_found(ident))
}

/// Handle an account command
pub fn handle_account_command<S: KeyValueStore>(
    state: &mut FinanceState<'_, S>,
    settings: &Settings,
    cmd: AccountCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Add {
            name,
            balance,
            owner,
            icon,
            color,
        } => {
            let balance = parse_amount(&balance, "balance")?;
            let mut new = match owner {
                Some(owner) => NewAccount::individual(name, balance, resolve_owner(state, &owner)?),
                None => NewAccount::shared(name, balance),
            };
            new.icon = icon;
            new.color = color;

            let account = state.add_account(new)?;

            println!("Created account: {}", account.name);
            println!("  Ownership: {}", account.ownership);
            println!("  Balance:   {}", account.balance.format_with_symbol(symbol));
            println!("  ID:        {}", account.id);
        }

        AccountCommands::List { shared, owner } => {
            let accounts = if shared {
                state.shared_accounts()
            } else if let Some(owner) = owner {
                state.individual_accounts(Some(resolve_owner(state, &owner)?))
            } else {
                state.accounts().iter().collect()
            };
            print!("{}", format_account_list(&accounts, &known_users(state), symbol));
        }

        AccountCommands::Edit {
            account,
            name,
            balance,
            hide,
            show,
        } => {
            let mut updated = find_account(state, &account)?.clone();

            if name.is_none() && balance.is_none() && !hide && !show {
                println!("No changes specified. Use --name, --balance, --hide or --show.");
                return Ok(());
            }

            if let Some(name) = name {
                updated.name = name.trim().to_string();
            }
            if let Some(balance) = balance {
                updated.balance = parse_amount(&balance, "balance")?;
            }
            if hide {
                updated.is_visible = false;
            }
            if show {
                updated.is_visible = true;
            }

            state.update_account(updated.clone())?;
            println!("Updated account:");
            print!("{}", format_account_details(&updated, &known_users(state), symbol));
        }

        AccountCommands::Remove { account } => {
            let id = find_account(state, &account)?.id;
            let removed = state.delete_account(id)?;

            let orphaned = state
                .transactions()
                .iter()
                .filter(|t| t.account_id == removed.id)
                .count();
            println!("Removed account: {}", removed.name);
            if orphaned > 0 {
                println!(
                    "  {} transaction(s) still reference it; see 'tandem transaction list --orphaned'",
                    orphaned
                );
            }
        }
    }

    Ok(())
}
