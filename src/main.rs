use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tandem::cli::{
    handle_account_command, handle_budget_command, handle_category_command,
    handle_expense_command, handle_income_command, handle_report_command,
    handle_transaction_command, handle_user_command,
};
use tandem::config::{paths::TandemPaths, settings::Settings};
use tandem::display::format_summary;
use tandem::services::{FinanceState, LedgerService};
use tandem::storage::RecordStore;

#[derive(Parser)]
#[command(
    name = "tandem",
    version,
    about = "Shared and personal finance tracking for couples",
    long_about = "Tandem tracks the money two people share and the money each of \
                  them keeps apart: accounts, categories, transactions and budgets \
                  with shared or individual ownership, plus a quick expense/income \
                  ledger with period reports."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show paths and settings
    Config,

    /// Current user and partner
    #[command(subcommand)]
    User(tandem::cli::UserCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(tandem::cli::AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(tandem::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(tandem::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(tandem::cli::BudgetCommands),

    /// Quick ledger expenses
    #[command(subcommand)]
    Expense(tandem::cli::ExpenseCommands),

    /// Quick ledger incomes
    #[command(subcommand)]
    Income(tandem::cli::IncomeCommands),

    /// Reports over the quick ledger
    #[command(subcommand)]
    Report(tandem::cli::ReportCommands),

    /// Shared and personal financial summary
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let paths = TandemPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let today = chrono::Local::now().date_naive();

    let store = RecordStore::open(&paths)?;
    let ledger = LedgerService::new(&store);
    let mut state = FinanceState::load(&store);

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Tandem at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next, tell Tandem who you are:");
            println!("  tandem user set <name> <email>");
            println!("  tandem user partner <name> <email>");
        }
        Some(Commands::Config) => {
            println!("Tandem Configuration");
            println!("====================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Initialized:     {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Recent limit:    {}", settings.recent_limit);
            println!("  Report period:   {}", settings.default_report_period);
        }
        Some(Commands::User(cmd)) => handle_user_command(&mut state, cmd)?,
        Some(Commands::Account(cmd)) => handle_account_command(&mut state, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&mut state, cmd)?,
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&mut state, &settings, today, cmd)?
        }
        Some(Commands::Budget(cmd)) => handle_budget_command(&mut state, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&ledger, &settings, today, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&ledger, &settings, today, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&ledger, &settings, today, cmd)?,
        Some(Commands::Summary) => match state.summary() {
            Some(summary) => {
                let users: Vec<_> = state.current_user().into_iter().chain(state.partner()).collect();
                print!(
                    "{}",
                    format_summary(summary, &users, state.categories(), &settings.currency_symbol)
                );

                let orphaned = state.orphaned_transactions();
                if !orphaned.is_empty() {
                    println!();
                    println!(
                        "Note: {} transaction(s) point at a removed account or category.",
                        orphaned.len()
                    );
                }
            }
            None => {
                println!("No current user. Run 'tandem user set <name> <email>' first.");
            }
        },
        None => {
            let who = state
                .current_user()
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "nobody yet".to_string());
            println!("Tandem - shared and personal finances ({})", who);
            println!();
            println!("Run 'tandem --help' for usage information.");
        }
    }

    if let Some(message) = state.error() {
        bail!("{}", message);
    }

    Ok(())
}
