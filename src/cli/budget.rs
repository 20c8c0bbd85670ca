//! Budget CLI commands

use clap::Subcommand;

use super::category::find_category;
use super::{id_matches, parse_amount, resolve_owner};
use crate::config::settings::Settings;
use crate::display::budget::format_budget_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetPeriod, NewBudget, Ownership};
use crate::services::FinanceState;
use crate::storage::KeyValueStore;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Allocate an amount to a category
    Add {
        /// Category name or ID
        category: String,
        /// Amount to allocate
        amount: String,
        /// Budget period (monthly, weekly, yearly)
        #[arg(short, long, default_value = "monthly")]
        period: String,
        /// Owner of an individual budget ("me" or "partner"); shared if omitted
        #[arg(short, long)]
        owner: Option<String>,
    },
    /// List budgets with their progress
    List,
    /// Remove a budget
    Remove {
        /// Budget ID
        budget: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command<S: KeyValueStore>(
    state: &mut FinanceState<'_, S>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            period,
            owner,
        } => {
            let category = find_category(state, &category)?.clone();
            let amount = parse_amount(&amount, "amount")?;
            let period = BudgetPeriod::parse(&period).ok_or_else(|| {
                FinanceError::Validation(format!(
                    "Invalid period: '{}'. Valid periods: monthly, weekly, yearly",
                    period
                ))
            })?;

            let mut new = NewBudget::monthly(category.id, amount);
            new.period = period;
            if let Some(owner) = owner {
                new.ownership = Ownership::Individual;
                new.owner_id = Some(resolve_owner(state, &owner)?);
            }

            let budget = state.add_budget(new)?;
            println!(
                "Budgeted {} for {} ({})",
                budget.allocated.format_with_symbol(symbol),
                category.name,
                budget.period
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List => {
            print!(
                "{}",
                format_budget_list(state.budgets(), state.categories(), state.summary(), symbol)
            );
        }

        BudgetCommands::Remove { budget } => {
            let id = state
                .budgets()
                .iter()
                .find(|b| id_matches(b.id, b.id.as_uuid(), &budget))
                .map(|b| b.id)
                .ok_or_else(|| FinanceError::budget_not_found(&budget))?;

            let removed = state.delete_budget(id)?;
            println!("Removed budget: {}", removed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewCategory};
    use crate::storage::{MemoryStore, RecordStore};

    #[test]
    fn test_add_budget_for_category() {
        let store = RecordStore::new(MemoryStore::new());
        let mut state = FinanceState::load(&store);
        let settings = Settings::default();
        let food = state.add_category(NewCategory::shared("Food")).unwrap();

        let cmd = BudgetCommands::Add {
            category: "food".into(),
            amount: "250".into(),
            period: "yearly".into(),
            owner: None,
        };
        handle_budget_command(&mut state, &settings, cmd).unwrap();

        let budget = &state.budgets()[0];
        assert_eq!(budget.category_id, food.id);
        assert_eq!(budget.allocated, Money::from_units(250));
        assert_eq!(budget.period, BudgetPeriod::Yearly);
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        let store = RecordStore::new(MemoryStore::new());
        let mut state = FinanceState::load(&store);
        let settings = Settings::default();
        state.add_category(NewCategory::shared("Food")).unwrap();

        let cmd = BudgetCommands::Add {
            category: "Food".into(),
            amount: "0".into(),
            period: "monthly".into(),
            owner: None,
        };
        let err = handle_budget_command(&mut state, &settings, cmd).unwrap_err();
        assert!(err.is_validation());
        assert!(state.budgets().is_empty());
    }
}
