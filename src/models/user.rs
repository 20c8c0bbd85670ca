//! User model
//!
//! A user of the app and their preferences. Two users can be linked as
//! partners to share accounts, categories and budgets.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use crate::error::{FieldErrors, FinanceResult};

/// Preferred color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Per-user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default = "default_currency")]
    pub default_currency: String,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default = "default_true")]
    pub notifications: bool,

    #[serde(default)]
    pub share_all_transactions_with_partner: bool,

    /// This user's default fraction of shared expenses (0-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_split_ratio: Option<f64>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            theme: Theme::default(),
            notifications: true,
            share_all_transactions_with_partner: false,
            default_split_ratio: None,
        }
    }
}

/// A user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// The linked partner, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<UserId>,

    #[serde(default)]
    pub settings: UserSettings,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            avatar: None,
            partner_id: None,
            settings: UserSettings::default(),
        }
    }

    /// Validate the user
    pub fn validate(&self) -> FinanceResult<()> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.push("name", "Name is required");
        }

        if !self.email.contains('@') {
            errors.push("email", "Email must be a valid address");
        }

        if let Some(ratio) = self.settings.default_split_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                errors.push("defaultSplitRatio", "Default split must be between 0 and 1");
            }
        }

        errors.into_result()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
