use napi::Result as NapiResult;
use napi_derive::napi;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PaymentRequest {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
}

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let terms =
        rei_core::amortization::LoanTerms::derive(input.principal, input.annual_rate, input.term_years)
            .map_err(to_napi_error)?;
    serde_json::to_string(&terms).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Deal analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_deal(input_json: String) -> NapiResult<String> {
    let input: rei_core::deal::DealAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rei_core::deal::analyze_property(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenario comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let input: rei_core::scenarios::ScenarioComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rei_core::scenarios::compare(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn project_returns(input_json: String) -> NapiResult<String> {
    let input: rei_core::projection::ProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rei_core::projection::project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
