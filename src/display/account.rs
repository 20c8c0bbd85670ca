//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use super::owner_label;
use crate::models::{Account, Money, User};

/// Format a list of accounts as a table
pub fn format_account_list(accounts: &[&Account], users: &[&User], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<10}  {:<12}  {:>14}\n",
        "ID",
        "Name",
        "Ownership",
        "Owner",
        "Balance",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<10}  {:-<12}  {:->14}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for account in accounts {
        let name = if account.is_visible {
            account.name.clone()
        } else {
            format!("{} (hidden)", account.name)
        };
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:<10}  {:<12}  {:>14}\n",
            account.id.to_string(),
            name,
            account.ownership.to_string(),
            owner_label(account.owner_id, users),
            account.balance.format_with_symbol(symbol),
            name_width = name_width,
        ));
    }

    let total: Money = accounts.iter().map(|a| a.balance).sum();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<10}  {:<12}  {:>14}\n",
        "TOTAL",
        "",
        "",
        "",
        total.format_with_symbol(symbol),
        name_width = name_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(account: &Account, users: &[&User], symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:        {}\n", account.id.as_uuid()));
    output.push_str(&format!("  Ownership: {}\n", account.ownership));
    if account.owner_id.is_some() {
        output.push_str(&format!("  Owner:     {}\n", owner_label(account.owner_id, users)));
    }
    output.push_str(&format!(
        "  Balance:   {}\n",
        account.balance.format_with_symbol(symbol)
    ));
    if let Some(icon) = &account.icon {
        output.push_str(&format!("  Icon:      {}\n", icon));
    }
    if let Some(color) = &account.color {
        output.push_str(&format!("  Color:     {}\n", color));
    }
    output.push_str(&format!(
        "  Visible:   {}\n",
        if account.is_visible { "Yes" } else { "No" }
    ));

    output
}
