//! Budget display formatting

use super::report::{format_bar, format_percentage, truncate};
use crate::models::{Budget, Category, FinancialSummary};

/// Format budgets with their progress from the summary
///
/// Progress is only known once a summary exists; without one the spent
/// columns are left blank.
pub fn format_budget_list(
    budgets: &[Budget],
    categories: &[Category],
    summary: Option<&FinancialSummary>,
    symbol: &str,
) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<18}  {:<8}  {:>12}  {:>12}  {:>12}  {:>6}\n",
        "ID", "Category", "Period", "Allocated", "Spent", "Remaining", "Used"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    for budget in budgets {
        let category = categories
            .iter()
            .find(|c| c.id == budget.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("(deleted)");
        let progress = summary.and_then(|s| s.budget_progress.get(&budget.category_id));

        let (spent, remaining, used, bar) = match progress {
            Some(p) => (
                p.spent.format_with_symbol(symbol),
                p.remaining.format_with_symbol(symbol),
                p.percent_used.map(format_percentage).unwrap_or_else(|| "n/a".into()),
                format_bar(p.percent_used.unwrap_or(0.0), 100.0, 10),
            ),
            None => (String::new(), String::new(), String::new(), String::new()),
        };
        let flag = if progress.is_some_and(|p| p.is_over_budget()) { " OVER" } else { "" };

        output.push_str(&format!(
            "{:<12}  {:<18}  {:<8}  {:>12}  {:>12}  {:>12}  {:>6}  {}{}\n",
            budget.id.to_string(),
            truncate(category, 18),
            budget.period.to_string(),
            budget.allocated.format_with_symbol(symbol),
            spent,
            remaining,
            used,
            bar,
            flag
        ));
    }

    output
}
