//! Month-by-month repayment schedule behind the assessed installment.
//!
//! Amounts are cash amounts: the installment and each row's interest are
//! rounded to the cent, and the final installment absorbs the rounding
//! residual so the balance closes at exactly zero. Due dates follow
//! calendar months from the optional first payment date, clamping at
//! month ends (Jan 31 -> Feb 28).

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::affordability::DEFAULT_ANNUAL_RATE;
use crate::amortization::{monthly_installment, monthly_rate, payment_count};
use crate::error::AffordabilityError;
use crate::types::{Money, Rate};
use crate::AffordabilityResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan terms for a repayment schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    /// Principal drawn down.
    pub loan_amount: Money,
    /// Tenure in whole years.
    pub tenure_years: u32,
    /// Annual interest rate as a 0-1 fraction. Defaults to
    /// [`DEFAULT_ANNUAL_RATE`].
    #[serde(alias = "rate", skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Rate>,
    /// Date of the first installment; omit to get undated rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single monthly installment within the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    /// Month number (1-indexed).
    pub month: u32,
    /// Calendar due date, present when the schedule is dated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Cash due this month.
    pub payment: Money,
    /// Interest portion.
    pub interest: Money,
    /// Principal portion.
    pub principal: Money,
    /// Balance remaining after this installment.
    pub balance: Money,
}

/// Full repayment schedule for a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentSchedule {
    /// Regular installment, rounded to the cent.
    pub monthly_payment: Money,
    /// Interest paid over the full tenure.
    pub total_interest: Money,
    /// Principal plus interest.
    pub total_paid: Money,
    /// Due date of the final installment, present when dated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    /// The installments in month order.
    pub rows: Vec<ScheduleRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full amortization schedule for the given terms.
pub fn build_schedule(input: &ScheduleInput) -> AffordabilityResult<RepaymentSchedule> {
    validate_input(input)?;

    let annual_rate = input.interest_rate.unwrap_or(DEFAULT_ANNUAL_RATE);
    let rate = monthly_rate(annual_rate);
    let n = payment_count(input.tenure_years);

    let monthly_payment =
        monthly_installment(input.loan_amount, input.tenure_years, annual_rate).round_dp(2);

    let mut rows = Vec::with_capacity(n as usize);
    let mut balance = input.loan_amount;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=n {
        let interest = (balance * rate).round_dp(2);

        let principal = if month == n {
            // Final installment absorbs the rounding residual.
            balance
        } else {
            (monthly_payment - interest).max(Decimal::ZERO).min(balance)
        };

        let payment = principal + interest;
        balance -= principal;
        total_interest += interest;

        let due = match input.first_payment_date {
            Some(first) => Some(due_date(first, month)?),
            None => None,
        };

        rows.push(ScheduleRow {
            month,
            due_date: due,
            payment,
            interest,
            principal,
            balance,
        });
    }

    let payoff_date = rows.last().and_then(|row| row.due_date);

    Ok(RepaymentSchedule {
        monthly_payment,
        total_interest,
        total_paid: input.loan_amount + total_interest,
        payoff_date,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &ScheduleInput) -> AffordabilityResult<()> {
    if input.loan_amount <= Decimal::ZERO {
        return Err(AffordabilityError::InvalidInput {
            field: "loanAmount".into(),
            reason: "Loan amount must be positive.".into(),
        });
    }
    if input.tenure_years == 0 {
        return Err(AffordabilityError::InvalidInput {
            field: "tenureYears".into(),
            reason: "Tenure must be at least one year.".into(),
        });
    }
    if let Some(rate) = input.interest_rate {
        if rate < Decimal::ZERO {
            return Err(AffordabilityError::InvalidInput {
                field: "interestRate".into(),
                reason: "Interest rate cannot be negative.".into(),
            });
        }
    }
    Ok(())
}

/// Due date of the given 1-indexed month, counted from the first payment.
fn due_date(first: NaiveDate, month: u32) -> AffordabilityResult<NaiveDate> {
    first
        .checked_add_months(Months::new(month - 1))
        .ok_or_else(|| {
            AffordabilityError::DateError(format!(
                "payment date overflows the calendar at month {month}"
            ))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
