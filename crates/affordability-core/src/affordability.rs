//! Debt service ratio assessment for consumer loan applications.
//!
//! The engine mirrors the consultation form it backs: non-positive
//! income, loan amount, or tenure means the applicant has not finished
//! filling the form in, so [`assess_affordability`] returns `None`
//! rather than an error. The optional assumptions fall back to the
//! product's standard rate and target.
//!
//! Unit conventions, fixed by the consuming product's API: the reported
//! `dsr` is a percentage on the 0-100 scale, while `targetDsr` is a 0-1
//! fraction of income. The two never mix; the target sizes the
//! repayment budget and the percentage feeds the decision bands.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{max_affordable_loan, monthly_installment, payment_count};
use crate::types::{Money, Percentage, Rate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Standard annual interest rate assumed when the applicant gives none.
pub const DEFAULT_ANNUAL_RATE: Rate = dec!(0.0488);

/// Standard target debt-service ratio (fraction of income) when none given.
pub const DEFAULT_TARGET_DSR: Rate = dec!(0.60);

/// Highest DSR percentage still approved outright.
const APPROVAL_CEILING: Percentage = dec!(50);

/// Highest DSR percentage still eligible with conditions.
const CONDITIONAL_CEILING: Percentage = dec!(70);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A loan application as captured by the consultation form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    /// Gross monthly income.
    pub income: Money,
    /// Existing monthly debt commitments.
    pub commitments: Money,
    /// Principal requested.
    pub loan_amount: Money,
    /// Tenure in whole years.
    pub tenure_years: u32,
    /// Annual interest rate as a 0-1 fraction. Defaults to
    /// [`DEFAULT_ANNUAL_RATE`].
    #[serde(alias = "rate", skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Rate>,
    /// Target DSR as a 0-1 fraction of income, not a percentage.
    /// Defaults to [`DEFAULT_TARGET_DSR`].
    #[serde(alias = "target", skip_serializing_if = "Option::is_none")]
    pub target_dsr: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Outcome of a DSR affordability assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsrAssessment {
    /// Fixed monthly installment for the requested loan.
    pub monthly_payment: Money,
    /// Debt service ratio on the 0-100 scale (52.5 = 52.5% of income).
    pub dsr: Percentage,
    /// Largest principal the target DSR leaves room for. Never negative.
    pub max_loan_amount: Money,
    /// Interest paid over the full tenure.
    pub total_interest: Money,
    /// Decision band for the computed `dsr`.
    pub status: DsrStatus,
}

/// Decision bands over the DSR percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DsrStatus {
    Approved,
    Conditional,
    Declined,
}

impl DsrStatus {
    /// Classify a DSR value on the 0-100 scale. Band edges are inclusive:
    /// exactly 50 is approved, exactly 70 is conditional.
    pub fn from_percentage(dsr: Percentage) -> Self {
        if dsr <= APPROVAL_CEILING {
            DsrStatus::Approved
        } else if dsr <= CONDITIONAL_CEILING {
            DsrStatus::Conditional
        } else {
            DsrStatus::Declined
        }
    }
}

impl std::fmt::Display for DsrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DsrStatus::Approved => "approved",
            DsrStatus::Conditional => "conditional",
            DsrStatus::Declined => "declined",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Assess whether the applicant can afford the requested loan.
///
/// Returns `None` while income, loan amount, or tenure are missing or
/// non-positive; the form is simply not complete yet. Negative
/// commitments are not rejected here, matching the form's behaviour of
/// treating the field as a plain number.
pub fn assess_affordability(input: &LoanInput) -> Option<DsrAssessment> {
    if input.income <= Decimal::ZERO
        || input.tenure_years == 0
        || input.loan_amount <= Decimal::ZERO
    {
        return None;
    }

    let annual_rate = input.interest_rate.unwrap_or(DEFAULT_ANNUAL_RATE);
    let target_dsr = input.target_dsr.unwrap_or(DEFAULT_TARGET_DSR);

    let monthly_payment = monthly_installment(input.loan_amount, input.tenure_years, annual_rate);

    let dsr = (input.commitments + monthly_payment) / input.income * dec!(100);

    let n = Decimal::from(payment_count(input.tenure_years));
    let total_interest = (monthly_payment * n - input.loan_amount).max(Decimal::ZERO);

    // Monthly repayment budget left under the target ratio; the target is
    // a 0-1 fraction, unlike the reported `dsr` above.
    let headroom = input.income * target_dsr - input.commitments;
    let max_loan_amount =
        max_affordable_loan(headroom, input.tenure_years, annual_rate).max(Decimal::ZERO);

    let status = DsrStatus::from_percentage(dsr);

    Some(DsrAssessment {
        monthly_payment,
        dsr,
        max_loan_amount,
        total_interest,
        status,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.0001);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

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
    fn test_assess_with_default_assumptions() {
        let out = assess_affordability(&sample_input()).unwrap();

        // payment = 20_000 * r / (1 - (1+r)^-60), r = 0.0488/12
        assert_close(out.monthly_payment, dec!(376.3261147854), TOL, "payment");

        // dsr = (500 + 376.3261...) / 8_000 * 100
        assert_close(out.dsr, dec!(10.9541), dec!(0.0001), "dsr");

        // headroom = 8_000 * 0.6 - 500 = 4_300
        assert_close(out.max_loan_amount, dec!(228525.1983), TOL, "max loan");

        // total interest = payment * 60 - 20_000
        assert_close(out.total_interest, dec!(2579.5669), TOL, "total interest");

        assert_eq!(out.status, DsrStatus::Approved);
    }

    #[test]
    fn test_conditional_band() {
        let input = LoanInput {
            income: dec!(5_000),
            commitments: dec!(1_500),
            loan_amount: dec!(60_000),
            ..sample_input()
        };
        let out = assess_affordability(&input).unwrap();

        // dsr = (1_500 + 1_128.9783...) / 5_000 * 100 = 52.5796
        assert_close(out.dsr, dec!(52.5796), TOL, "dsr");
        assert_eq!(out.status, DsrStatus::Conditional);
    }

    #[test]
    fn test_declined_band() {
        let input = LoanInput {
            income: dec!(4_000),
            commitments: dec!(2_000),
            loan_amount: dec!(80_000),
            tenure_years: 3,
            ..sample_input()
        };
        let out = assess_affordability(&input).unwrap();

        // dsr = (2_000 + 2_393.3640...) / 4_000 * 100 = 109.8341
        assert_close(out.dsr, dec!(109.8341), TOL, "dsr");
        assert_eq!(out.status, DsrStatus::Declined);

        // headroom = 4_000 * 0.6 - 2_000 = 400; still a positive max loan
        assert_close(out.max_loan_amount, dec!(13370.3024), TOL, "max loan");
    }

    #[test]
    fn test_incomplete_form_yields_none() {
        let mut input = sample_input();
        input.income = Decimal::ZERO;
        assert!(assess_affordability(&input).is_none());

        let mut input = sample_input();
        input.income = dec!(-1_000);
        assert!(assess_affordability(&input).is_none());

        let mut input = sample_input();
        input.tenure_years = 0;
        assert!(assess_affordability(&input).is_none());

        let mut input = sample_input();
        input.loan_amount = Decimal::ZERO;
        assert!(assess_affordability(&input).is_none());
    }

    #[test]
    fn test_explicit_rate_override() {
        let mut input = sample_input();
        input.interest_rate = Some(dec!(0.06));
        let out = assess_affordability(&input).unwrap();
        // 20_000 over 5y at 6%
        assert_close(out.monthly_payment, dec!(386.6560305886), TOL, "payment at 6%");
    }

    #[test]
    fn test_target_dsr_override_shrinks_max_loan() {
        let mut input = sample_input();
        input.target_dsr = Some(dec!(0.30));
        let out = assess_affordability(&input).unwrap();
        // headroom = 8_000 * 0.3 - 500 = 1_900
        assert_close(out.max_loan_amount, dec!(100976.2504), TOL, "max loan at 0.3 target");
    }

    #[test]
    fn test_commitments_above_target_zero_max_loan() {
        let input = LoanInput {
            income: dec!(3_000),
            commitments: dec!(2_500),
            ..sample_input()
        };
        let out = assess_affordability(&input).unwrap();
        // headroom = 3_000 * 0.6 - 2_500 = -700
        assert_eq!(out.max_loan_amount, Decimal::ZERO);
        assert_close(out.dsr, dec!(95.8775), TOL, "dsr");
        assert_eq!(out.status, DsrStatus::Declined);
    }

    #[test]
    fn test_dsr_monotonic_in_loan_amount() {
        let amounts = [dec!(10_000), dec!(20_000), dec!(40_000), dec!(80_000)];
        let mut last = Decimal::MIN;
        for amount in amounts {
            let mut input = sample_input();
            input.loan_amount = amount;
            let out = assess_affordability(&input).unwrap();
            assert!(
                out.dsr > last,
                "dsr should rise with loan amount: {} then {}",
                last,
                out.dsr
            );
            last = out.dsr;
        }
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        assert_eq!(DsrStatus::from_percentage(Decimal::ZERO), DsrStatus::Approved);
        assert_eq!(DsrStatus::from_percentage(dec!(50)), DsrStatus::Approved);
        assert_eq!(DsrStatus::from_percentage(dec!(50.01)), DsrStatus::Conditional);
        assert_eq!(DsrStatus::from_percentage(dec!(70)), DsrStatus::Conditional);
        assert_eq!(DsrStatus::from_percentage(dec!(70.01)), DsrStatus::Declined);
        assert_eq!(DsrStatus::from_percentage(dec!(200)), DsrStatus::Declined);
    }

    #[test]
    fn test_status_display_matches_wire_casing() {
        assert_eq!(DsrStatus::Approved.to_string(), "approved");
        assert_eq!(DsrStatus::Conditional.to_string(), "conditional");
        assert_eq!(DsrStatus::Declined.to_string(), "declined");
    }
}
