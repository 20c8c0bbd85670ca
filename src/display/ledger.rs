//! Expense and income list formatting

use super::report::truncate;
use crate::models::{LedgerEntry, Money};

/// Format ledger entries as a table with a net total
pub fn format_ledger_list(entries: &[LedgerEntry], symbol: &str) -> String {
    if entries.is_empty() {
        return "Nothing recorded yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:10}  {:<24}  {:<16}  {:>14}\n",
        "ID", "Date", "Description", "Category/Source", "Amount"
    ));
    output.push_str(&"-".repeat(84));
    output.push('\n');

    for entry in entries {
        let id = match entry {
            LedgerEntry::Expense(e) => e.id.to_string(),
            LedgerEntry::Income(i) => i.id.to_string(),
        };
        output.push_str(&format!(
            "{:<12}  {}  {:<24}  {:<16}  {:>14}\n",
            id,
            entry.date().format("%Y-%m-%d"),
            truncate(entry.description(), 24),
            truncate(entry.label(), 16),
            entry.signed_amount().format_signed(symbol)
        ));
    }

    let net: Money = entries.iter().map(|e| e.signed_amount()).sum();
    output.push_str(&"-".repeat(84));
    output.push('\n');
    output.push_str(&format!("{:<70}{:>14}\n", "NET", net.format_signed(symbol)));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Income};
    use chrono::NaiveDate;

    #[test]
    fn test_list_signs_and_net() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let entries = vec![
            LedgerEntry::from(Expense::new("Rent", Money::from_units(900), date, "Housing")),
            LedgerEntry::from(Income::new("Salary", Money::from_units(1000), date, "Job")),
        ];

        let text = format_ledger_list(&entries, "$");
        assert!(text.contains("-$900.00"));
        assert!(text.contains("+$1000.00"));
        assert!(text.contains("+$100.00"));
    }
}
