use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_affordability(input_json: String) -> NapiResult<String> {
    assess_json(&input_json).map_err(to_napi_error)
}

fn assess_json(input_json: &str) -> Result<String, String> {
    let input: affordability_core::affordability::LoanInput =
        serde_json::from_str(input_json).map_err(|e| e.to_string())?;
    // Negative rates are outside the engine's contract.
    if let Some(rate) = input.interest_rate {
        if rate < Decimal::ZERO {
            return Err("interestRate cannot be negative".to_string());
        }
    }
    let output = affordability_core::affordability::assess_affordability(&input)
        .ok_or("income, tenureYears and loanAmount must all be positive")?;
    serde_json::to_string(&output).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Repayment schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn repayment_schedule(input_json: String) -> NapiResult<String> {
    schedule_json(&input_json).map_err(to_napi_error)
}

fn schedule_json(input_json: &str) -> Result<String, String> {
    let input: affordability_core::schedule::ScheduleInput =
        serde_json::from_str(input_json).map_err(|e| e.to_string())?;
    let output = affordability_core::schedule::build_schedule(&input).map_err(|e| e.to_string())?;
    serde_json::to_string(&output).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
