//! Report formatting utilities for terminal output
//!
//! Shared helpers plus the breakdown and chart renderings used by the
//! `report` commands.

use crate::models::Money;
use crate::reports::{CategoryShare, ChartItem, PeriodTotals};

const BAR_WIDTH: usize = 20;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Format a category or source breakdown with shares and bars
pub fn format_breakdown(title: &str, shares: &[CategoryShare], symbol: &str) -> String {
    let mut output = format!("{}\n{}\n", title, separator(64));

    if shares.is_empty() {
        output.push_str("Nothing recorded.\n");
        return output;
    }

    for share in shares {
        output.push_str(&format!(
            "{:<20} {:>14} {:>7} {}\n",
            truncate(&share.label, 20),
            share.amount.format_with_symbol(symbol),
            format_percentage(share.percent),
            format_bar(share.percent, 100.0, BAR_WIDTH)
        ));
    }

    let total: Money = shares.iter().map(|s| s.amount).sum();
    output.push_str(&separator(64));
    output.push('\n');
    output.push_str(&format!("{:<20} {:>14}\n", "Total", total.format_with_symbol(symbol)));
    output
}

/// Format period chart series as two bar charts
pub fn format_period_chart(totals: &PeriodTotals, symbol: &str) -> String {
    let max = totals
        .incomes
        .iter()
        .chain(totals.expenses.iter())
        .map(|item| item.value.as_f64())
        .fold(0.0, f64::max);

    let mut output = String::new();
    output.push_str(&chart_section("Income", &totals.incomes, max, symbol));
    output.push('\n');
    output.push_str(&chart_section("Expenses", &totals.expenses, max, symbol));
    output
}

fn chart_section(title: &str, items: &[ChartItem], max: f64, symbol: &str) -> String {
    let mut output = format!("{}\n{}\n", title, separator(60));
    if items.is_empty() {
        output.push_str("Nothing recorded.\n");
    }
    for item in items {
        output.push_str(&format!(
            "{:<20} {:>14} {}\n",
            truncate(&item.label, 20),
            item.value.format_with_symbol(symbol),
            format_bar(item.value.as_f64(), max, BAR_WIDTH)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.34), "5.3%");
        assert_eq!(format_percentage(60.0), "60%");
        assert_eq!(format_percentage(-4.0), "-4.0%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 100.0, 4), "██░░");
        assert_eq!(format_bar(0.0, 100.0, 3), "   ");
        assert_eq!(format_bar(500.0, 100.0, 2), "██");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Mercado São João", 10), "Mercado...");
        assert_eq!(truncate("abcdef", 2), "..");
    }

    #[test]
    fn test_breakdown() {
        let shares = vec![
            CategoryShare {
                label: "Food".into(),
                amount: Money::from_units(75),
                percent: 75.0,
            },
            CategoryShare {
                label: "Bus".into(),
                amount: Money::from_units(25),
                percent: 25.0,
            },
        ];
        let text = format_breakdown("Expenses by Category", &shares, "$");
        assert!(text.contains("Food"));
        assert!(text.contains("$75.00"));
        assert!(text.contains("$100.00"));

        assert!(format_breakdown("Empty", &[], "$").contains("Nothing recorded."));
    }

    #[test]
    fn test_period_chart() {
        let totals = PeriodTotals {
            incomes: vec![ChartItem::new("Q1", Money::from_units(10))],
            expenses: vec![ChartItem::new("Q1", Money::from_units(5))],
        };
        let text = format_period_chart(&totals, "R$");
        assert!(text.contains("R$10.00"));
        assert!(text.contains("Expenses"));
    }
}
