//! Financial summary builder
//!
//! Derives shared and per-partner totals plus budget progress from the
//! current accounts, transactions and budgets. The result is always rebuilt
//! in full.

use std::collections::HashMap;

use crate::models::{
    Account, AccountId, Budget, BudgetProgress, FinancialSummary, Money, Ownership,
    PersonalBalance, Transaction, TransactionKind, User,
};

/// Build the summary for a user and their optional partner
///
/// Records owned by anyone else, and transactions whose account no longer
/// exists, contribute nothing to personal figures.
pub fn build_summary(
    current_user: &User,
    partner: Option<&User>,
    accounts: &[Account],
    transactions: &[Transaction],
    budgets: &[Budget],
) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    summary
        .personal_balances
        .insert(current_user.id, PersonalBalance::default());
    if let Some(partner) = partner {
        summary
            .personal_balances
            .insert(partner.id, PersonalBalance::default());
    }

    for account in accounts {
        if account.ownership == Ownership::Shared {
            summary.shared_balance += account.balance;
        } else if let Some(personal) = account
            .owner_id
            .and_then(|owner| summary.personal_balances.get_mut(&owner))
        {
            personal.balance += account.balance;
        }
    }

    let account_owners: HashMap<AccountId, _> =
        accounts.iter().map(|a| (a.id, a.owner_id)).collect();

    for txn in transactions {
        if txn.is_shared {
            match txn.kind {
                TransactionKind::Income => summary.shared_income += txn.amount,
                TransactionKind::Expense => summary.shared_expenses += txn.amount,
            }
            continue;
        }

        let owner = account_owners.get(&txn.account_id).copied().flatten();
        if let Some(personal) = owner.and_then(|o| summary.personal_balances.get_mut(&o)) {
            match txn.kind {
                TransactionKind::Income => personal.income += txn.amount,
                TransactionKind::Expense => personal.expenses += txn.amount,
            }
        }
    }

    // A later budget for the same category replaces an earlier one
    for budget in budgets {
        let spent: Money = transactions
            .iter()
            .filter(|t| t.category_id == budget.category_id && t.is_expense())
            .map(|t| t.amount)
            .sum();

        summary
            .budget_progress
            .insert(budget.category_id, BudgetProgress::new(budget.allocated, spent));
    }

    let personal = summary.personal_balances.values();
    summary.total_balance = summary.shared_balance + personal.clone().map(|p| p.balance).sum::<Money>();
    summary.total_income = summary.shared_income + personal.clone().map(|p| p.income).sum::<Money>();
    summary.total_expenses = summary.shared_expenses + personal.map(|p| p.expenses).sum::<Money>();

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, NewAccount, NewBudget, NewTransaction, UserId};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn txn(
        amount: i64,
        account: &Account,
        category: CategoryId,
        kind: TransactionKind,
        shared: bool,
    ) -> Transaction {
        let mut new = NewTransaction::new(
            "t",
            Money::from_units(amount),
            date(),
            account.id,
            category,
            kind,
        );
        if shared {
            new = new.shared(None, None);
        }
        Transaction::create(new)
    }

    #[test]
    fn test_empty_data_seeds_personal_balances() {
        let ana = User::new("Ana", "ana@example.com");
        let bia = User::new("Bia", "bia@example.com");

        let summary = build_summary(&ana, Some(&bia), &[], &[], &[]);
        assert_eq!(summary.personal_balances.len(), 2);
        assert_eq!(summary.personal_balances[&ana.id], PersonalBalance::default());
        assert_eq!(summary.total_balance, Money::zero());

        let alone = build_summary(&ana, None, &[], &[], &[]);
        assert_eq!(alone.personal_balances.len(), 1);
    }

    #[test]
    fn test_balances_split_by_ownership() {
        let ana = User::new("Ana", "ana@example.com");
        let bia = User::new("Bia", "bia@example.com");
        let stranger = UserId::new();

        let accounts = vec![
            Account::create(NewAccount::shared("Joint", Money::from_units(1000))),
            Account::create(NewAccount::individual("Ana's", Money::from_units(200), ana.id)),
            Account::create(NewAccount::individual("Bia's", Money::from_units(300), bia.id)),
            Account::create(NewAccount::individual("Other", Money::from_units(999), stranger)),
        ];

        let summary = build_summary(&ana, Some(&bia), &accounts, &[], &[]);
        assert_eq!(summary.shared_balance, Money::from_units(1000));
        assert_eq!(summary.personal_balances[&ana.id].balance, Money::from_units(200));
        assert_eq!(summary.personal_balances[&bia.id].balance, Money::from_units(300));
        assert_eq!(summary.total_balance, Money::from_units(1500));
    }

    #[test]
    fn test_transactions_follow_account_owner() {
        let ana = User::new("Ana", "ana@example.com");
        let joint = Account::create(NewAccount::shared("Joint", Money::zero()));
        let mine = Account::create(NewAccount::individual("Mine", Money::zero(), ana.id));
        let gone = Account::create(NewAccount::individual("Gone", Money::zero(), ana.id));
        let food = CategoryId::new();

        let transactions = vec![
            txn(100, &joint, food, TransactionKind::Expense, true),
            txn(500, &joint, food, TransactionKind::Income, true),
            txn(40, &mine, food, TransactionKind::Expense, false),
            txn(60, &mine, food, TransactionKind::Income, false),
            // Account missing from the list
            txn(1000, &gone, food, TransactionKind::Expense, false),
            // Individual transaction on a shared account has no owner to credit
            txn(7, &joint, food, TransactionKind::Expense, false),
        ];

        let summary = build_summary(&ana, None, &[joint, mine], &transactions, &[]);
        assert_eq!(summary.shared_expenses, Money::from_units(100));
        assert_eq!(summary.shared_income, Money::from_units(500));

        let personal = summary.personal_balances[&ana.id];
        assert_eq!(personal.expenses, Money::from_units(40));
        assert_eq!(personal.income, Money::from_units(60));

        assert_eq!(summary.total_expenses, Money::from_units(140));
        assert_eq!(summary.total_income, Money::from_units(560));
        assert_eq!(summary.net_flow(), Money::from_units(420));
    }

    #[test]
    fn test_budget_progress_counts_expenses_only() {
        let ana = User::new("Ana", "ana@example.com");
        let joint = Account::create(NewAccount::shared("Joint", Money::zero()));
        let food = CategoryId::new();
        let fun = CategoryId::new();

        let transactions = vec![
            txn(30, &joint, food, TransactionKind::Expense, true),
            txn(20, &joint, food, TransactionKind::Expense, false),
            txn(900, &joint, food, TransactionKind::Income, true),
            txn(5, &joint, fun, TransactionKind::Expense, true),
        ];
        let budgets = vec![Budget::create(NewBudget::monthly(food, Money::from_units(200)))];

        let summary = build_summary(&ana, None, &[joint], &transactions, &budgets);
        let progress = summary.budget_progress[&food];
        assert_eq!(progress.spent, Money::from_units(50));
        assert_eq!(progress.remaining, Money::from_units(150));
        assert_eq!(progress.percent_used, Some(25.0));
        assert!(!summary.budget_progress.contains_key(&fun));
    }

    #[test]
    fn test_zero_allocation_budget_has_no_percentage() {
        let ana = User::new("Ana", "ana@example.com");
        let joint = Account::create(NewAccount::shared("Joint", Money::zero()));
        let food = CategoryId::new();

        let transactions = vec![txn(50, &joint, food, TransactionKind::Expense, true)];
        let mut budget = Budget::create(NewBudget::monthly(food, Money::from_units(1)));
        budget.allocated = Money::zero();

        let summary = build_summary(&ana, None, &[joint], &transactions, &[budget]);
        let progress = summary.budget_progress[&food];
        assert_eq!(progress.percent_used, None);
        assert_eq!(progress.remaining, Money::from_units(-50));
        assert!(progress.is_over_budget());
    }

    #[test]
    fn test_last_budget_for_category_wins() {
        let ana = User::new("Ana", "ana@example.com");
        let food = CategoryId::new();
        let budgets = vec![
            Budget::create(NewBudget::monthly(food, Money::from_units(100))),
            Budget::create(NewBudget::monthly(food, Money::from_units(300))),
        ];

        let summary = build_summary(&ana, None, &[], &[], &budgets);
        assert_eq!(summary.budget_progress.len(), 1);
        assert_eq!(summary.budget_progress[&food].allocated, Money::from_units(300));
    }
}
