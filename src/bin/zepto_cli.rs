use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use zepto_core::{
    config::ConfigManager,
    errors::ZeptoError,
    schedule::{
        parse_date, plan_due_transactions, predict_upcoming_with_category, snapshot_recurring,
        LedgerEntry, RecurringTransaction,
    },
    time::{Clock, FixedClock, SystemClock},
    utils::build_info,
};

#[derive(Parser)]
#[command(name = "zepto_cli", about = "Project recurring transactions")]
struct Cli {
    /// Evaluate as if today were this date (YYYY-MM-DD).
    #[arg(long, global = true, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Configuration file; defaults to `$ZEPTO_HOME/config.json`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print upcoming predicted transactions as JSON.
    Predict {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print transactions that have come due and are missing from the ledger.
    Due {
        #[arg(short, long)]
        input: PathBuf,
        /// JSON array of existing ledger entries (optional user_id, date, name, amount).
        #[arg(long)]
        ledger: Option<PathBuf>,
    },
    /// Print the next occurrence dates found by a bounded forward scan.
    Next {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        count: Option<usize>,
    },
    /// Print last and next due dates per recurring transaction.
    Schedule {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print build metadata.
    Version,
}

#[derive(Serialize)]
struct UpcomingDates {
    recurring_transaction_id: i64,
    name: String,
    dates: Vec<NaiveDate>,
}

fn parse_today(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|err| err.to_string())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ZeptoError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ZeptoError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), ZeptoError> {
    let manager = match cli.config {
        Some(path) => ConfigManager::from_path(path),
        None => ConfigManager::new(),
    };
    let config = manager.load()?;
    let today = match cli.today {
        Some(date) => FixedClock::new(date).today(),
        None => SystemClock.today(),
    };

    match cli.command {
        Command::Predict { input, limit } => {
            let recurring: Vec<RecurringTransaction> = read_json(&input)?;
            let limit = limit.unwrap_or(config.prediction_limit);
            let predictions =
                predict_upcoming_with_category(&recurring, limit, today, &config.default_category);
            print_json(&predictions)
        }
        Command::Due { input, ledger } => {
            let recurring: Vec<RecurringTransaction> = read_json(&input)?;
            let entries: Vec<LedgerEntry> = match ledger {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let planned = plan_due_transactions(&recurring, today, entries.as_slice());
            print_json(&planned)
        }
        Command::Next { input, count } => {
            let recurring: Vec<RecurringTransaction> = read_json(&input)?;
            let count = count.unwrap_or(config.prediction_limit);
            let upcoming: Vec<UpcomingDates> = recurring
                .iter()
                .filter_map(|source| match source.schedule() {
                    Ok(schedule) => Some(UpcomingDates {
                        recurring_transaction_id: source.id,
                        name: source.name.clone(),
                        dates: schedule.next_dates(count, today, config.scan_factor),
                    }),
                    Err(err) => {
                        tracing::warn!(id = source.id, error = %err, "skipping recurring transaction");
                        None
                    }
                })
                .collect();
            print_json(&upcoming)
        }
        Command::Schedule { input } => {
            let recurring: Vec<RecurringTransaction> = read_json(&input)?;
            print_json(&snapshot_recurring(&recurring, today))
        }
        Command::Version => {
            println!("{}", build_info::current().summary());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    zepto_core::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("zepto_cli: {err}");
            ExitCode::FAILURE
        }
    }
}
