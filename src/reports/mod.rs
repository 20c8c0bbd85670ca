//! Aggregation engine
//!
//! Pure functions turning expense and income lists into totals, label
//! breakdowns, period chart series, savings rates and recent-activity lists.
//! The current date is always passed in.

pub mod overview;
pub mod periodic;
pub mod recent;
pub mod totals;

pub use overview::ReportsOverview;
pub use periodic::{monthly_totals, period_totals, saving_rate, ChartItem, PeriodTotals, ReportPeriod};
pub use recent::{recent_transactions, DEFAULT_RECENT_LIMIT};
pub use totals::{by_category, by_source, category_shares, total_expenses, total_income, CategoryShare};
