//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod budget;
pub mod category;
pub mod ledger;
pub mod report;
pub mod transaction;
pub mod user;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use ledger::{handle_expense_command, handle_income_command, ExpenseCommands, IncomeCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use user::{handle_user_command, UserCommands};

use std::fmt::Display;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, User, UserId};
use crate::services::FinanceState;
use crate::storage::KeyValueStore;

/// Parse an amount argument
pub(crate) fn parse_amount(input: &str, what: &str) -> FinanceResult<Money> {
    Money::parse(input).map_err(|e| {
        FinanceError::Validation(format!(
            "Invalid {} '{}'. Use a format like '1000.00' or '1000': {}",
            what, input, e
        ))
    })
}

/// Parse a date argument, or fall back to `today`
///
/// ISO dates are always accepted; the configured format is tried first.
pub(crate) fn parse_date(
    input: Option<&str>,
    settings: &Settings,
    today: NaiveDate,
) -> FinanceResult<NaiveDate> {
    let Some(input) = input else {
        return Ok(today);
    };

    NaiveDate::parse_from_str(input, &settings.date_format)
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| {
            FinanceError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or {}",
                input, settings.date_format
            ))
        })
}

/// Whether `ident` names a record by its short id or its full UUID
pub(crate) fn id_matches(id: impl Display, uuid: &Uuid, ident: &str) -> bool {
    let ident = ident.trim();
    id.to_string().eq_ignore_ascii_case(ident) || uuid.to_string().eq_ignore_ascii_case(ident)
}

/// Resolve an `--owner` argument ("me" or "partner") to a user id
pub(crate) fn resolve_owner<S: KeyValueStore>(
    state: &FinanceState<'_, S>,
    owner: &str,
) -> FinanceResult<UserId> {
    match owner.trim().to_lowercase().as_str() {
        "me" | "self" => state.current_user().map(|u| u.id).ok_or_else(|| {
            FinanceError::Validation("No current user. Run 'tandem user set' first".into())
        }),
        "partner" => state.partner().map(|u| u.id).ok_or_else(|| {
            FinanceError::Validation("No partner. Run 'tandem user partner' first".into())
        }),
        other => Err(FinanceError::Validation(format!(
            "Invalid owner '{}'. Use 'me' or 'partner'",
            other
        ))),
    }
}

/// The current user and partner, for owner lookups in listings
pub(crate) fn known_users<'s, S: KeyValueStore>(state: &'s FinanceState<'_, S>) -> Vec<&'s User> {
    state.current_user().into_iter().chain(state.partner()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, RecordStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_parse_date() {
        let mut settings = Settings::default();
        assert_eq!(parse_date(None, &settings, today()).unwrap(), today());
        assert_eq!(
            parse_date(Some("2024-01-02"), &settings, today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );

        settings.date_format = "%d/%m/%Y".into();
        assert_eq!(
            parse_date(Some("02/01/2024"), &settings, today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert!(parse_date(Some("yesterday"), &settings, today()).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5", "amount").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("twelve", "amount").unwrap_err().is_validation());
    }

    #[test]
    fn test_id_matches_short_and_full_forms() {
        let id = UserId::new();
        assert!(id_matches(id, id.as_uuid(), &id.to_string()));
        assert!(id_matches(id, id.as_uuid(), &id.as_uuid().to_string()));
        assert!(!id_matches(id, id.as_uuid(), "usr-00000000"));
    }

    #[test]
    fn test_resolve_owner() {
        let store = RecordStore::new(MemoryStore::new());
        let mut state = FinanceState::load(&store);
        assert!(resolve_owner(&state, "me").is_err());

        let ana = User::new("Ana", "ana@example.com");
        state.set_current_user(ana.clone()).unwrap();
        assert_eq!(resolve_owner(&state, "Me").unwrap(), ana.id);
        assert!(resolve_owner(&state, "partner").is_err());
        assert!(resolve_owner(&state, "neighbor").is_err());
    }
}
