//! Level-pay amortization math shared by the assessment and schedule
//! modules.
//!
//! Annuity formulas are written in the discount-factor form
//! `1 - (1 + r)^-n`, which keeps every intermediate inside `[0, 1]` so
//! long tenures cannot overflow. All math in `rust_decimal::Decimal`;
//! no f64, no `powd`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert a nominal annual rate to the monthly periodic rate.
pub fn monthly_rate(annual_rate: Rate) -> Rate {
    annual_rate / dec!(12)
}

/// Number of monthly installments over the tenure.
pub fn payment_count(tenure_years: u32) -> u32 {
    tenure_years.saturating_mul(12)
}

/// Fixed monthly installment for a reducing-balance loan.
///
/// `annual_rate` is a 0-1 fraction and must be non-negative. A zero rate
/// falls back to straight-line principal. Zero tenure returns the full
/// loan amount (due immediately).
pub fn monthly_installment(loan_amount: Money, tenure_years: u32, annual_rate: Rate) -> Money {
    let n = payment_count(tenure_years);
    if n == 0 {
        return loan_amount;
    }

    let rate = monthly_rate(annual_rate);
    if rate <= Decimal::ZERO {
        return loan_amount / Decimal::from(n);
    }

    let denom = Decimal::ONE - discount_factor(rate, n);
    if denom > Decimal::ZERO {
        loan_amount * rate / denom
    } else {
        // Rate too small to register at Decimal precision.
        loan_amount / Decimal::from(n)
    }
}

/// Largest principal whose installment stays within `max_monthly_payment`.
///
/// Present value of an annuity paying the budget every month for the
/// tenure. A non-positive budget supports no borrowing and returns zero.
pub fn max_affordable_loan(
    max_monthly_payment: Money,
    tenure_years: u32,
    annual_rate: Rate,
) -> Money {
    if max_monthly_payment <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let n = payment_count(tenure_years);
    if n == 0 {
        return Decimal::ZERO;
    }

    let rate = monthly_rate(annual_rate);
    if rate <= Decimal::ZERO {
        return max_monthly_payment * Decimal::from(n);
    }

    max_monthly_payment * (Decimal::ONE - discount_factor(rate, n)) / rate
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute `(1 + rate)^-n` by repeated division.
///
/// Once the factor underflows to zero it stays there, which yields the
/// interest-only asymptote for very long tenures.
fn discount_factor(rate: Rate, n: u32) -> Decimal {
    let base = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor /= base;
        if factor.is_zero() {
            break;
        }
    }
    factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
