//! Category model
//!
//! Categories classify transactions and are the unit budgets are set against.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use super::ownership::Ownership;
use crate::error::{FieldErrors, FinanceResult};

/// A spending or income category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Shared or individual
    #[serde(rename = "type")]
    pub ownership: Ownership,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Everything needed to create a category
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub ownership: Ownership,
    pub owner_id: Option<UserId>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl NewCategory {
    pub fn shared(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ownership: Ownership::Shared,
            owner_id: None,
            icon: None,
            color: None,
        }
    }

    pub fn individual(name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            ownership: Ownership::Individual,
            owner_id: Some(owner_id),
            ..Self::shared(name)
        }
    }
}

impl Category {
    /// Create a category from a draft, assigning a fresh id
    pub fn create(new: NewCategory) -> Self {
        Self {
            id: CategoryId::new(),
            name: new.name.trim().to_string(),
            ownership: new.ownership,
            owner_id: new.owner_id,
            icon: new.icon,
            color: new.color,
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.ownership == Ownership::Individual && self.owner_id == Some(user_id)
    }

    /// Validate the category
    pub fn validate(&self) -> FinanceResult<()> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.push("name", "Category name is required");
        } else if self.name.len() > 50 {
            errors.push(
                "name",
                format!("Category name too long ({} chars, max 50)", self.name.len()),
            );
        }

        self.ownership.check_owner(self.owner_id, &mut errors);

        errors.into_result()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::create(NewCategory::shared("Groceries"));
        assert_eq!(category.name, "Groceries");
        assert!(category.ownership.is_shared());
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut category = Category::create(NewCategory::individual("Hobbies", UserId::new()));
        assert!(category.validate().is_ok());

        category.name = "x".repeat(51);
        assert!(category.validate().unwrap_err().is_validation());

        category.name = "Hobbies".into();
        category.ownership = Ownership::Shared;
        let err = category.validate().unwrap_err();
        assert_eq!(
            err.field_errors().unwrap().get("ownerId"),
            Some("Shared records cannot have a single owner")
        );
    }
}
