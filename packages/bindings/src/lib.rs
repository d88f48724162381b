use napi::Result as NapiResult;
use napi_derive::napi;

use amortization_core::amortization::schedule::{self, LoanParameters};
use amortization_core::amortization::summary;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_loan(input_json: &str) -> NapiResult<LoanParameters> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_amortization(input_json: String) -> NapiResult<String> {
    let params = parse_loan(&input_json)?;
    let output = schedule::compute_amortization(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn summarize_amortization(input_json: String) -> NapiResult<String> {
    let params = parse_loan(&input_json)?;
    let output = summary::summarize_amortization(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_trend(input_json: String) -> NapiResult<String> {
    let params = parse_loan(&input_json)?;
    let output = schedule::compute_amortization(&params).map_err(to_napi_error)?;
    serde_json::to_string(&summary::trend_series(&output.result)).map_err(to_napi_error)
}
