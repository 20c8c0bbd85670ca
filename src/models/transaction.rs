//! Transaction model
//!
//! Represents an income or expense against an account. Amounts are stored as
//! positive magnitudes; the direction comes from the transaction kind.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId, UserId};
use super::money::Money;
use crate::error::{FieldErrors, FinanceResult};

/// Allowed drift when checking that split fractions add up to one
const SPLIT_TOLERANCE: f64 = 1e-6;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// Per-user fraction of a shared transaction, e.g. 0.6 / 0.4
pub type SplitRatio = BTreeMap<UserId, f64>;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    pub description: String,

    /// Positive magnitude
    pub amount: Money,

    /// Transaction date
    pub date: NaiveDate,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    pub category_id: CategoryId,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Whether the couple shares this transaction
    pub is_shared: bool,

    /// Who paid, for shared expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_by_id: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_ratio: Option<SplitRatio>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Everything needed to create a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub account_id: AccountId,
    pub category_id: CategoryId,
    pub kind: TransactionKind,
    pub is_shared: bool,
    pub paid_by_id: Option<UserId>,
    pub split_ratio: Option<SplitRatio>,
    pub note: Option<String>,
}

impl NewTransaction {
    /// A non-shared transaction with no split or note
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        account_id: AccountId,
        category_id: CategoryId,
        kind: TransactionKind,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            account_id,
            category_id,
            kind,
            is_shared: false,
            paid_by_id: None,
            split_ratio: None,
            note: None,
        }
    }

    /// Mark as shared, optionally recording who paid and how it splits
    pub fn shared(mut self, paid_by_id: Option<UserId>, split_ratio: Option<SplitRatio>) -> Self {
        self.is_shared = true;
        self.paid_by_id = paid_by_id;
        self.split_ratio = split_ratio;
        self
    }
}

impl Transaction {
    /// Create a transaction from a draft, assigning a fresh id
    pub fn create(new: NewTransaction) -> Self {
        Self {
            id: TransactionId::new(),
            description: new.description.trim().to_string(),
            amount: new.amount,
            date: new.date,
            account_id: new.account_id,
            category_id: new.category_id,
            kind: new.kind,
            is_shared: new.is_shared,
            paid_by_id: new.paid_by_id,
            split_ratio: new.split_ratio,
            note: new.note,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with sign applied: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Each user's share of the amount according to the split ratio
    ///
    /// Shares are rounded to cents; the last user in id order absorbs the
    /// rounding remainder so the shares always add up to the amount.
    pub fn split_amounts(&self) -> BTreeMap<UserId, Money> {
        let mut shares = BTreeMap::new();
        let Some(ratio) = &self.split_ratio else {
            return shares;
        };

        let total = self.amount.cents();
        let mut assigned = 0i64;
        let count = ratio.len();

        for (index, (user_id, fraction)) in ratio.iter().enumerate() {
            let cents = if index + 1 == count {
                total - assigned
            } else {
                (total as f64 * fraction).round() as i64
            };
            assigned += cents;
            shares.insert(*user_id, Money::from_cents(cents));
        }

        shares
    }

    /// Validate the transaction
    pub fn validate(&self) -> FinanceResult<()> {
        let mut errors = FieldErrors::new();

        if self.description.trim().is_empty() {
            errors.push("description", "Description is required");
        }

        if !self.amount.is_positive() {
            errors.push("amount", "Amount must be a positive number");
        }

        if let Some(ratio) = &self.split_ratio {
            if ratio.values().any(|f| !(0.0..=1.0).contains(f)) {
                errors.push("splitRatio", "Split fractions must be between 0 and 1");
            } else {
                let sum: f64 = ratio.values().sum();
                if (sum - 1.0).abs() > SPLIT_TOLERANCE {
                    errors.push(
                        "splitRatio",
                        format!("Split fractions must add up to 1 (got {:.4})", sum),
                    );
                }
            }
        }

        errors.into_result()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date,
            self.description,
            self.signed_amount()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(cents: i64) -> Transaction {
        Transaction::create(NewTransaction::new(
            "Dinner",
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            AccountId::new(),
            CategoryId::new(),
            TransactionKind::Expense,
        ))
    }

    #[test]
    fn test_signed_amount() {
        let mut txn = expense(1500);
        assert_eq!(txn.signed_amount().cents(), -1500);

        txn.kind = TransactionKind::Income;
        assert_eq!(txn.signed_amount().cents(), 1500);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let err = expense(0).validate().unwrap_err();
        assert_eq!(
            err.field_errors().unwrap().get("amount"),
            Some("Amount must be a positive number")
        );
    }

    #[test]
    fn test_split_ratio_must_sum_to_one() {
        let (a, b) = (UserId::new(), UserId::new());
        let mut txn = expense(1000);

        txn.split_ratio = Some(BTreeMap::from([(a, 0.6), (b, 0.4)]));
        assert!(txn.validate().is_ok());

        txn.split_ratio = Some(BTreeMap::from([(a, 0.6), (b, 0.3)]));
        assert!(txn.validate().is_err());

        txn.split_ratio = Some(BTreeMap::from([(a, 1.5), (b, -0.5)]));
        assert!(txn.validate().is_err());
    }

    #[test]
    fn test_split_amounts_cover_whole_amount() {
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());
        let mut txn = expense(1000);
        txn.split_ratio = Some(BTreeMap::from([(a, 1.0 / 3.0), (b, 1.0 / 3.0), (c, 1.0 / 3.0)]));

        let shares = txn.split_amounts();
        assert_eq!(shares.len(), 3);
        let total: Money = shares.values().sum();
        assert_eq!(total.cents(), 1000);
    }

    #[test]
    fn test_split_amounts_without_ratio() {
        assert!(expense(1000).split_amounts().is_empty());
    }

    #[test]
    fn test_serialization_uses_camel_case_field_names() {
        let txn = expense(990);
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["isShared"], false);
        assert_eq!(value["date"], "2024-03-02");
        assert!(value.get("accountId").is_some());

        let back: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(back, txn);
    }
}
