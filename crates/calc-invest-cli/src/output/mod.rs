pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Decimals travel as strings in JSON. Round them to cents for display and
/// leave every other string alone.
pub(crate) fn display_decimal(text: &str) -> String {
    match Decimal::from_str(text) {
        Ok(d) if d.scale() > 2 => d.round_dp(2).to_string(),
        _ => text.to_string(),
    }
}

/// Unwrap the `result` envelope when there is one.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}
