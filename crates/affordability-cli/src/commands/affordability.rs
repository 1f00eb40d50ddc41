use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use affordability_core::affordability::{self, LoanInput, DEFAULT_ANNUAL_RATE};
use affordability_core::amortization;

use crate::input;

/// Arguments for a full DSR assessment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AssessArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Existing monthly debt commitments
    #[arg(long)]
    pub commitments: Option<Decimal>,

    /// Principal requested
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Tenure in whole years
    #[arg(long)]
    pub tenure_years: Option<u32>,

    /// Annual interest rate as a 0-1 fraction (default 0.0488)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Target DSR as a 0-1 fraction of income (default 0.60)
    #[arg(long, alias = "target")]
    pub target_dsr: Option<Decimal>,
}

/// Arguments for the monthly installment calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PaymentArgs {
    /// Principal requested
    #[arg(long)]
    pub loan_amount: Decimal,

    /// Tenure in whole years
    #[arg(long)]
    pub tenure_years: u32,

    /// Annual interest rate as a 0-1 fraction (default 0.0488)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,
}

/// Arguments for the maximum affordable loan calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MaxLoanArgs {
    /// Monthly repayment budget
    #[arg(long, alias = "budget")]
    pub max_monthly_payment: Decimal,

    /// Tenure in whole years
    #[arg(long)]
    pub tenure_years: u32,

    /// Annual interest rate as a 0-1 fraction (default 0.0488)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,
}

pub fn run_assess(args: AssessArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput {
            income: args
                .income
                .ok_or("--income is required (or provide --input)")?,
            commitments: args
                .commitments
                .ok_or("--commitments is required (or provide --input)")?,
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            tenure_years: args
                .tenure_years
                .ok_or("--tenure-years is required (or provide --input)")?,
            interest_rate: args.interest_rate,
            target_dsr: args.target_dsr,
        }
    };

    assess_loan(loan_input)
}

fn assess_loan(loan_input: LoanInput) -> Result<Value, Box<dyn std::error::Error>> {
    // Negative rates are outside the engine's contract.
    if let Some(rate) = loan_input.interest_rate {
        if rate < Decimal::ZERO {
            return Err("--interest-rate cannot be negative".into());
        }
    }

    let assessment = affordability::assess_affordability(&loan_input)
        .ok_or("income, tenure-years and loan-amount must all be positive")?;
    Ok(serde_json::to_value(assessment)?)
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let annual_rate = args.interest_rate.unwrap_or(DEFAULT_ANNUAL_RATE);
    validate_terms(args.loan_amount, args.tenure_years, annual_rate)?;

    let payment =
        amortization::monthly_installment(args.loan_amount, args.tenure_years, annual_rate);
    let n = Decimal::from(amortization::payment_count(args.tenure_years));
    let total_interest = (payment * n - args.loan_amount).max(Decimal::ZERO);

    Ok(serde_json::json!({
        "loanAmount": args.loan_amount,
        "tenureYears": args.tenure_years,
        "interestRate": annual_rate,
        "monthlyPayment": payment,
        "totalInterest": total_interest,
    }))
}

pub fn run_max_loan(args: MaxLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let annual_rate = args.interest_rate.unwrap_or(DEFAULT_ANNUAL_RATE);
    if args.tenure_years == 0 {
        return Err("--tenure-years must be at least 1".into());
    }
    if annual_rate < Decimal::ZERO {
        return Err("--interest-rate cannot be negative".into());
    }

    // A non-positive budget is a defined case: it supports no loan at all.
    let max_loan =
        amortization::max_affordable_loan(args.max_monthly_payment, args.tenure_years, annual_rate);

    Ok(serde_json::json!({
        "maxMonthlyPayment": args.max_monthly_payment,
        "tenureYears": args.tenure_years,
        "interestRate": annual_rate,
        "maxLoanAmount": max_loan,
    }))
}

fn validate_terms(
    loan_amount: Decimal,
    tenure_years: u32,
    annual_rate: Decimal,
) -> Result<(), Box<dyn std::error::Error>> {
    if loan_amount <= Decimal::ZERO {
        return Err("--loan-amount must be positive".into());
    }
    if tenure_years == 0 {
        return Err("--tenure-years must be at least 1".into());
    }
    if annual_rate < Decimal::ZERO {
        return Err("--interest-rate cannot be negative".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> LoanInput {
        LoanInput {
            income: dec!(8_000),
            commitments: dec!(500),
            loan_amount: dec!(20_000),
            tenure_years: 5,
            interest_rate: None,
            target_dsr: None,
        }
    }

    #[test]
    fn test_assess_produces_wire_fields() {
        let value = assess_loan(sample_input()).unwrap();
        assert_eq!(value["status"], "approved");
        assert!(value["monthlyPayment"].is_string());
    }

    #[test]
    fn test_assess_rejects_negative_rate() {
        // Without the boundary check the engine would quietly price this
        // with the straight-line zero-rate branch.
        let mut input = sample_input();
        input.interest_rate = Some(dec!(-0.05));
        let err = assess_loan(input).unwrap_err();
        assert_eq!(err.to_string(), "--interest-rate cannot be negative");
    }

    #[test]
    fn test_assess_maps_absence_to_error() {
        let mut input = sample_input();
        input.income = Decimal::ZERO;
        let err = assess_loan(input).unwrap_err();
        assert_eq!(err.to_string(), "income, tenure-years and loan-amount must all be positive");
    }
}
