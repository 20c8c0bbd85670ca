//! User CLI commands
//!
//! Manages the current user and their partner.

use clap::Subcommand;

use crate::error::{FinanceError, FinanceResult};
use crate::models::User;
use crate::services::FinanceState;
use crate::storage::KeyValueStore;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Set (or update) the current user
    Set {
        /// Display name
        name: String,
        /// Email address
        email: String,
        /// Preferred currency code
        #[arg(long)]
        currency: Option<String>,
        /// Default share of shared expenses (0-1)
        #[arg(long)]
        split: Option<f64>,
    },
    /// Set the partner and link them to the current user
    Partner {
        /// Display name
        name: String,
        /// Email address
        email: String,
    },
    /// Show the current user and partner
    Show,
    /// Remove the partner
    Unpartner,
}

/// Handle a user command
pub fn handle_user_command<S: KeyValueStore>(
    state: &mut FinanceState<'_, S>,
    cmd: UserCommands,
) -> FinanceResult<()> {
    match cmd {
        UserCommands::Set {
            name,
            email,
            currency,
            split,
        } => {
            // Keep the id so existing ownership still points at this user
            let mut user = match state.current_user() {
                Some(existing) => existing.clone(),
                None => User::new(&name, &email),
            };
            user.name = name.trim().to_string();
            user.email = email.trim().to_string();
            if let Some(currency) = currency {
                user.settings.default_currency = currency.to_uppercase();
            }
            if split.is_some() {
                user.settings.default_split_ratio = split;
            }

            state.set_current_user(user.clone())?;
            println!("Current user: {}", user);
            println!("  ID: {}", user.id);
        }

        UserCommands::Partner { name, email } => {
            let mut current = state.current_user().cloned().ok_or_else(|| {
                FinanceError::Validation("Set the current user before adding a partner".into())
            })?;

            let mut partner = match state.partner() {
                Some(existing) => existing.clone(),
                None => User::new(&name, &email),
            };
            partner.name = name.trim().to_string();
            partner.email = email.trim().to_string();
            partner.partner_id = Some(current.id);

            state.set_partner(Some(partner.clone()))?;
            current.partner_id = Some(partner.id);
            state.set_current_user(current)?;

            println!("Partner: {}", partner);
            println!("  ID: {}", partner.id);
        }

        UserCommands::Show => {
            match state.current_user() {
                Some(user) => {
                    println!("Current user: {}", user);
                    println!("  ID:       {}", user.id.as_uuid());
                    println!("  Currency: {}", user.settings.default_currency);
                    if let Some(split) = user.settings.default_split_ratio {
                        println!("  Split:    {:.0}%", split * 100.0);
                    }
                }
                None => println!("No current user. Run 'tandem user set <name> <email>'."),
            }
            match state.partner() {
                Some(partner) => println!("Partner:      {}", partner),
                None => println!("Partner:      (none)"),
            }
        }

        UserCommands::Unpartner => {
            let Some(partner) = state.partner().cloned() else {
                println!("No partner to remove.");
                return Ok(());
            };

            state.set_partner(None)?;
            if let Some(mut current) = state.current_user().cloned() {
                current.partner_id = None;
                state.set_current_user(current)?;
            }
            println!("Removed partner: {}", partner.name);
        }
    }

    Ok(())
}
