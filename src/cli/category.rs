//! Category CLI commands

use clap::Subcommand;

use super::{id_matches, known_users, resolve_owner};
use crate::display::category::format_category_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, NewCategory};
use crate::services::FinanceState;
use crate::storage::KeyValueStore;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Owner of an individual category ("me" or "partner"); shared if omitted
        #[arg(short, long)]
        owner: Option<String>,
        /// Icon shown next to the name
        #[arg(long)]
        icon: Option<String>,
        /// Display color
        #[arg(long)]
        color: Option<String>,
    },
    /// List categories
    List {
        /// Only shared categories
        #[arg(long, conflicts_with = "owner")]
        shared: bool,
        /// Only individual categories of "me" or "partner"
        #[arg(short, long)]
        owner: Option<String>,
    },
    /// Remove a category (transactions and budgets using it are kept)
    Remove {
        /// Category name or ID
        category: String,
    },
}

/// Find a category by short id, full id or name (case-insensitive)
pub fn find_category<'s, S: KeyValueStore>(
    state: &'s FinanceState<'_, S>,
    ident: &str,
) -> FinanceResult<&'s Category> {
    state
        .categories()
        .iter()
        .find(|c| id_matches(c.id, c.id.as_uuid(), ident))
        .or_else(|| {
            state
                .categories()
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(ident.trim()))
        })
        .ok_or_else(|| FinanceError::category_not_found(ident))
}

/// Handle a category command
pub fn handle_category_command<S: KeyValueStore>(
    state: &mut FinanceState<'_, S>,
    cmd: CategoryCommands,
) -> FinanceResult<()> {
    match cmd {
        CategoryCommands::Add {
            name,
            owner,
            icon,
            color,
        } => {
            let mut new = match owner {
                Some(owner) => NewCategory::individual(name, resolve_owner(state, &owner)?),
                None => NewCategory::shared(name),
            };
            new.icon = icon;
            new.color = color;

            let category = state.add_category(new)?;
            println!("Created category: {} ({})", category.name, category.ownership);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { shared, owner } => {
            let categories = if shared {
                state.shared_categories()
            } else if let Some(owner) = owner {
                state.individual_categories(Some(resolve_owner(state, &owner)?))
            } else {
                state.categories().iter().collect()
            };
            print!("{}", format_category_list(&categories, &known_users(state)));
        }

        CategoryCommands::Remove { category } => {
            let id = find_category(state, &category)?.id;
            let removed = state.delete_category(id)?;
            println!("Removed category: {}", removed.name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, RecordStore};

    #[test]
    fn test_add_and_remove() {
        let store = RecordStore::new(MemoryStore::new());
        let mut state = FinanceState::load(&store);

        let add = CategoryCommands::Add {
            name: "Food".into(),
            owner: None,
            icon: Some("🍔".into()),
            color: None,
        };
        handle_category_command(&mut state, add).unwrap();
        assert_eq!(state.categories()[0].icon.as_deref(), Some("🍔"));

        let remove = CategoryCommands::Remove {
            category: "FOOD".into(),
        };
        handle_category_command(&mut state, remove).unwrap();
        assert!(state.categories().is_empty());
    }
}
