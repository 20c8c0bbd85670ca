//! Display formatting for terminal output
//!
//! Turns records, summaries and reports into plain-text tables.

pub mod account;
pub mod budget;
pub mod category;
pub mod ledger;
pub mod report;
pub mod summary;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use budget::format_budget_list;
pub use category::format_category_list;
pub use ledger::format_ledger_list;
pub use report::{format_breakdown, format_period_chart};
pub use summary::format_summary;
pub use transaction::format_transaction_list;

use crate::models::{User, UserId};

/// Name of the record owner among the known users, or "-" for shared records
pub fn owner_label(owner_id: Option<UserId>, users: &[&User]) -> String {
    match owner_id {
        None => "-".to_string(),
        Some(id) => users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| id.to_string()),
    }
}
