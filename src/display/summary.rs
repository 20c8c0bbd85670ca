//! Financial summary formatting

use super::report::{format_percentage, separator};
use crate::models::{Category, FinancialSummary, User};

/// Format the summary as shared, personal and budget sections
pub fn format_summary(
    summary: &FinancialSummary,
    users: &[&User],
    categories: &[Category],
    symbol: &str,
) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str("Financial Summary\n");
    output.push_str(&separator(56));
    output.push('\n');
    output.push_str(&format!("{:<20} {:>16} {:>16}\n", "", "Balance", "Net Flow"));
    output.push_str(&format!(
        "{:<20} {:>16} {:>16}\n",
        "Total",
        money(summary.total_balance),
        summary.net_flow().format_signed(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>16} {:>16}\n",
        "Shared",
        money(summary.shared_balance),
        (summary.shared_income - summary.shared_expenses).format_signed(symbol)
    ));

    for (user_id, personal) in &summary.personal_balances {
        let name = users
            .iter()
            .find(|u| u.id == *user_id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| user_id.to_string());
        output.push_str(&format!(
            "{:<20} {:>16} {:>16}\n",
            name,
            money(personal.balance),
            (personal.income - personal.expenses).format_signed(symbol)
        ));
    }

    output.push('\n');
    output.push_str(&format!("Income:   {:>16}\n", money(summary.total_income)));
    output.push_str(&format!("Expenses: {:>16}\n", money(summary.total_expenses)));

    if !summary.budget_progress.is_empty() {
        output.push_str("\nBudgets\n");
        output.push_str(&separator(56));
        output.push('\n');
        for (category_id, progress) in &summary.budget_progress {
            let name = categories
                .iter()
                .find(|c| c.id == *category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| category_id.to_string());
            let used = progress
                .percent_used
                .map(format_percentage)
                .unwrap_or_else(|| "n/a".to_string());
            output.push_str(&format!(
                "{:<20} {:>12} of {:>12} {:>7}\n",
                name,
                money(progress.spent),
                money(progress.allocated),
                used
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetProgress, Money, PersonalBalance};

    #[test]
    fn test_format_summary() {
        let ana = User::new("Ana", "ana@example.com");
        let mut summary = FinancialSummary {
            total_balance: Money::from_units(1500),
            total_income: Money::from_units(300),
            total_expenses: Money::from_units(100),
            shared_balance: Money::from_units(1000),
            ..Default::default()
        };
        summary.personal_balances.insert(
            ana.id,
            PersonalBalance {
                balance: Money::from_units(500),
                income: Money::from_units(300),
                expenses: Money::from_units(100),
            },
        );
        summary.budget_progress.insert(
            crate::models::CategoryId::new(),
            BudgetProgress::new(Money::zero(), Money::from_units(5)),
        );

        let text = format_summary(&summary, &[&ana], &[], "$");
        assert!(text.contains("Ana"));
        assert!(text.contains("$1500.00"));
        assert!(text.contains("+$200.00"));
        assert!(text.contains("n/a"));
    }
}
