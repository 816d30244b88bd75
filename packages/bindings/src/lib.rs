use napi::Result as NapiResult;
use napi_derive::napi;

use calc_invest_core::simulation::{SeriesBasis, SimulationInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_scenario(input_json: &str) -> NapiResult<SimulationInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_instruments(input_json: String) -> NapiResult<String> {
    let input = parse_scenario(&input_json)?;
    let output =
        calc_invest_core::simulation::compare_instruments(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// `basis` is "net" or "gross"; anything else is an error.
#[napi]
pub fn build_series(input_json: String, basis: Option<String>) -> NapiResult<String> {
    let input = parse_scenario(&input_json)?;
    let basis: SeriesBasis = match basis {
        Some(b) => serde_json::from_value(serde_json::Value::String(b)).map_err(to_napi_error)?,
        None => SeriesBasis::default(),
    };
    let output =
        calc_invest_core::simulation::build_series(&input, basis).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rates and tax
// ---------------------------------------------------------------------------

/// Takes the same scenario document as the simulations; only `rate_book`
/// and `instruments` are read.
#[napi]
pub fn quote_instruments(input_json: String) -> NapiResult<String> {
    let input = parse_scenario(&input_json)?;
    let output = calc_invest_core::instruments::quote_instruments(&input.rate_book, input.lineup())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn resolve_tax_rate(term_months: u32) -> String {
    calc_invest_core::tax::resolve_tax_rate(term_months).to_string()
}
