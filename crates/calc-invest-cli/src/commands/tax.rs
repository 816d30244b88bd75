use clap::Args;
use serde_json::{json, Value};

use calc_invest_core::parse::parse_term_months;
use calc_invest_core::tax::{bracket_for, TAX_BRACKETS};

/// Arguments for the tax-rate lookup
#[derive(Args)]
pub struct TaxRateArgs {
    /// Holding term in months
    #[arg(long, allow_hyphen_values = true)]
    pub term: String,
}

pub fn run_tax_rate(args: TaxRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let term = parse_term_months(&args.term)?;
    let bracket = bracket_for(term.months);
    let warnings: Vec<String> = term.adjustment.into_iter().collect();

    Ok(json!({
        "result": {
            "term_months": term.months,
            "tax_rate": bracket.rate,
            "bracket": bracket,
        },
        "warnings": warnings,
    }))
}

pub fn run_tax_table() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({
        "result": {
            "brackets": TAX_BRACKETS,
        },
    }))
}
