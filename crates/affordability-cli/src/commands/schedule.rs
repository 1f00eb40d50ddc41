use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use affordability_core::schedule::{self, ScheduleInput};

use crate::input;

/// Arguments for a repayment schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal drawn down
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Tenure in whole years
    #[arg(long)]
    pub tenure_years: Option<u32>,

    /// Annual interest rate as a 0-1 fraction (default 0.0488)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleInput {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            tenure_years: args
                .tenure_years
                .ok_or("--tenure-years is required (or provide --input)")?,
            interest_rate: args.interest_rate,
            first_payment_date: args.first_payment_date,
        }
    };

    let schedule = schedule::build_schedule(&schedule_input)?;
    Ok(serde_json::to_value(schedule)?)
}
