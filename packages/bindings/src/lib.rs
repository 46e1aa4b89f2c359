use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Monte Carlo DCF valuation. Input and output are JSON strings; the
/// dashboard owns seeding policy by placing `seed` in the input record.
#[napi]
pub fn monte_carlo_valuation(input_json: String) -> NapiResult<String> {
    let input: bizval_core::valuation::monte_carlo::McValuationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        bizval_core::valuation::monte_carlo::run_valuation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Deterministic conservative/expected/optimistic growth projections.
#[napi]
pub fn project_scenarios(input_json: String) -> NapiResult<String> {
    let input: bizval_core::valuation::scenarios::ScenarioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        bizval_core::valuation::scenarios::project_scenarios(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
