mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::{AssessArgs, MaxLoanArgs, PaymentArgs};
use commands::schedule::ScheduleArgs;

/// Debt service ratio affordability calculations
#[derive(Parser)]
#[command(
    name = "dsr",
    version,
    about = "Debt service ratio affordability calculations",
    long_about = "A CLI for the loan consultation affordability engine, with decimal \
                  precision. Assesses debt service ratios against the approval bands, \
                  sizes the maximum affordable loan, and builds month-by-month \
                  repayment schedules."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a loan application against the target DSR
    Assess(AssessArgs),
    /// Monthly installment for a loan
    Payment(PaymentArgs),
    /// Largest loan a monthly budget supports
    MaxLoan(MaxLoanArgs),
    /// Month-by-month repayment schedule
    Schedule(ScheduleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::affordability::run_assess(args),
        Commands::Payment(args) => commands::affordability::run_payment(args),
        Commands::MaxLoan(args) => commands::affordability::run_max_loan(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Version => {
            println!("dsr {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
