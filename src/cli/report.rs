//! Report CLI commands
//!
//! Totals, breakdowns, period charts and recent activity over the quick
//! ledger.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::ledger::format_ledger_list;
use crate::display::report::{format_breakdown, format_percentage, format_period_chart};
use crate::error::{FinanceError, FinanceResult};
use crate::reports::{
    by_category, by_source, category_shares, recent_transactions, saving_rate, total_expenses,
    total_income, ReportPeriod, ReportsOverview,
};
use crate::services::LedgerService;
use crate::storage::KeyValueStore;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// All-time income, expenses and balance
    Totals,
    /// Expenses by category (or incomes by source)
    Breakdown {
        /// Break down incomes by source instead
        #[arg(long)]
        incomes: bool,
    },
    /// Income and expense chart for a period (month, quarter, year)
    Period {
        /// Period name; defaults to the configured report period
        period: Option<String>,
    },
    /// Savings rate for a period (month, quarter, year)
    SavingRate {
        /// Period name; defaults to the configured report period
        period: Option<String>,
    },
    /// Most recent expenses and incomes
    Recent {
        /// Number of entries to show; defaults to the configured limit
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a report command
pub fn handle_report_command<S: KeyValueStore>(
    ledger: &LedgerService<'_, S>,
    settings: &Settings,
    today: NaiveDate,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let snapshot = ledger.snapshot();
    let (expenses, incomes) = (&snapshot.expenses, &snapshot.incomes);

    match cmd {
        ReportCommands::Totals => {
            let income = total_income(incomes);
            let spent = total_expenses(expenses);
            println!("Total Income:   {:>14}", income.format_with_symbol(symbol));
            println!("Total Expenses: {:>14}", spent.format_with_symbol(symbol));
            println!("Balance:        {:>14}", (income - spent).format_with_symbol(symbol));
        }

        ReportCommands::Breakdown { incomes: by_income } => {
            let text = if by_income {
                format_breakdown("Income by Source", &category_shares(&by_source(incomes)), symbol)
            } else {
                format_breakdown(
                    "Expenses by Category",
                    &category_shares(&by_category(expenses)),
                    symbol,
                )
            };
            print!("{}", text);
        }

        ReportCommands::Period { period } => {
            let period = resolve_period(period.as_deref(), settings)?;
            let overview = ReportsOverview::generate(expenses, incomes, period, today);
            print!("{}", overview.format_terminal(symbol));
            println!();
            print!("{}", format_period_chart(&overview.totals, symbol));
        }

        ReportCommands::SavingRate { period } => {
            let period = resolve_period(period.as_deref(), settings)?;
            let rate = saving_rate(expenses, incomes, period.as_str(), today);
            println!("Saving rate ({}): {}", period, format_percentage(rate));
        }

        ReportCommands::Recent { limit } => {
            let limit = limit.unwrap_or(settings.recent_limit);
            let recent = recent_transactions(expenses, incomes, limit);
            print!("{}", format_ledger_list(&recent, symbol));
        }
    }

    Ok(())
}

fn resolve_period(period: Option<&str>, settings: &Settings) -> FinanceResult<ReportPeriod> {
    match period {
        None => Ok(settings.default_report_period),
        Some(name) => ReportPeriod::parse(name).ok_or_else(|| {
            FinanceError::Validation(format!(
                "Invalid period: '{}'. Valid periods: month, quarter, year",
                name
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_period() {
        let mut settings = Settings::default();
        assert_eq!(resolve_period(None, &settings).unwrap(), ReportPeriod::Month);
        assert_eq!(resolve_period(Some("year"), &settings).unwrap(), ReportPeriod::Year);
        assert!(resolve_period(Some("decade"), &settings).unwrap_err().is_validation());

        settings.default_report_period = ReportPeriod::Quarter;
        assert_eq!(resolve_period(None, &settings).unwrap(), ReportPeriod::Quarter);
    }
}
