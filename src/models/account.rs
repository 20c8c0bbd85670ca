//! Account model
//!
//! Represents a place money is kept: a joint account shared by the couple or a
//! personal account owned by one of them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, UserId};
use super::money::Money;
use super::ownership::Ownership;
use crate::error::{FieldErrors, FinanceResult};

/// A financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Joint Checking")
    pub name: String,

    /// Current balance (may be negative)
    pub balance: Money,

    /// Shared or individual
    #[serde(rename = "type")]
    pub ownership: Ownership,

    /// Owner of an individual account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Whether the partner can see this account
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Everything needed to create an account; the id is assigned on insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub balance: Money,
    pub ownership: Ownership,
    pub owner_id: Option<UserId>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_visible: bool,
}

impl NewAccount {
    /// A visible shared account
    pub fn shared(name: impl Into<String>, balance: Money) -> Self {
        Self {
            name: name.into(),
            balance,
            ownership: Ownership::Shared,
            owner_id: None,
            icon: None,
            color: None,
            is_visible: true,
        }
    }

    /// A visible individual account owned by `owner_id`
    pub fn individual(name: impl Into<String>, balance: Money, owner_id: UserId) -> Self {
        Self {
            ownership: Ownership::Individual,
            owner_id: Some(owner_id),
            ..Self::shared(name, balance)
        }
    }
}

impl Account {
    /// Create an account from a draft, assigning a fresh id
    pub fn create(new: NewAccount) -> Self {
        Self {
            id: AccountId::new(),
            name: new.name.trim().to_string(),
            balance: new.balance,
            ownership: new.ownership,
            owner_id: new.owner_id,
            icon: new.icon,
            color: new.color,
            is_visible: new.is_visible,
        }
    }

    /// Whether this account belongs to the given user
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.ownership == Ownership::Individual && self.owner_id == Some(user_id)
    }

    /// Validate the account
    pub fn validate(&self) -> FinanceResult<()> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.push("name", "Account name is required");
        } else if self.name.len() > 100 {
            errors.push(
                "name",
                format!("Account name too long ({} chars, max 100)", self.name.len()),
            );
        }

        self.ownership.check_owner(self.owner_id, &mut errors);

        errors.into_result()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ownership)
    }
}
