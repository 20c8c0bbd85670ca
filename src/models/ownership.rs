//! Shared vs. individual ownership
//!
//! Accounts, categories and budgets either belong jointly to the user pair or
//! to exactly one owner.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use crate::error::FieldErrors;

/// Who a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    /// Belongs jointly to the user pair
    #[default]
    Shared,
    /// Belongs to the user named by `owner_id`
    Individual,
}

impl Ownership {
    /// Parse ownership from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "shared" | "joint" => Some(Self::Shared),
            "individual" | "personal" => Some(Self::Individual),
            _ => None,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared)
    }

    /// Record a field error when the owner does not match the ownership kind
    pub(crate) fn check_owner(&self, owner_id: Option<UserId>, errors: &mut FieldErrors) {
        match (self, owner_id) {
            (Self::Individual, None) => {
                errors.push("ownerId", "Individual records must have an owner")
            }
            (Self::Shared, Some(_)) => {
                errors.push("ownerId", "Shared records cannot have a single owner")
            }
            _ => {}
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "Shared"),
            Self::Individual => write!(f, "Individual"),
        }
    }
}
