use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::details::{simulate_instrument, ProjectionResult};
use super::scenario::SimulationInput;
use crate::instruments::InstrumentKind;
use crate::projection::invested_amount;
use crate::tax::resolve_tax_rate;
use crate::types::{with_metadata, ComputationOutput, Money, Months, Percent};
use crate::CalcInvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One line of the "which one yields more" ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedInstrument {
    pub rank: u32,
    pub name: String,
    pub kind: InstrumentKind,
    /// Net of income tax
    pub final_value: Money,
    pub annual_rate: Percent,
    pub tax_exempt: bool,
    /// Net return over the invested amount, in percent
    pub return_pct: Percent,
}

/// Best figure of each column across all instruments. Each maximum is taken
/// independently, so they may come from different instruments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateMaxima {
    pub gross_value: Money,
    pub tax_withheld: Money,
    pub net_value: Money,
    pub gross_gain: Money,
    pub net_gain: Money,
    pub net_profitability: Percent,
    pub real_gain: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub invested_amount: Money,
    pub term_months: Months,
    /// Regressive-table rate that applies to taxable instruments at this term
    pub tax_bracket_rate: Percent,
    pub best_instrument: String,
    pub ranking: Vec<RankedInstrument>,
    /// Per-instrument breakdown, highest net value first
    pub details: Vec<ProjectionResult>,
    pub maxima: AggregateMaxima,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project every instrument in the lineup and rank them by net value.
pub fn compare_instruments(
    input: &SimulationInput,
) -> CalcInvestResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    input.validate()?;

    let quotes = input.quotes()?;
    let mut warnings = input.warnings(&quotes);
    let invested = invested_amount(input.initial_investment, input.monthly_contribution, input.term_months)?;
    if invested <= Decimal::ZERO {
        warnings.push("Invested amount is not positive; profitability is reported as 0".into());
    }

    let mut details = quotes
        .iter()
        .map(|q| simulate_instrument(input, q))
        .collect::<CalcInvestResult<Vec<ProjectionResult>>>()?;

    // Stable: ties keep lineup order
    details.sort_by(|a, b| b.net_value.cmp(&a.net_value));

    let ranking: Vec<RankedInstrument> = details
        .iter()
        .enumerate()
        .map(|(i, d)| RankedInstrument {
            rank: i as u32 + 1,
            name: d.name.clone(),
            kind: d.kind,
            final_value: d.net_value,
            annual_rate: d.annual_rate,
            tax_exempt: d.tax_exempt,
            return_pct: d.net_profitability,
        })
        .collect();

    let maxima = aggregate_maxima(&details);
    let best_instrument = details.first().map(|d| d.name.clone()).unwrap_or_default();

    log::debug!(
        "compared {} instruments over {} months, best {} at {}",
        details.len(),
        input.term_months,
        best_instrument,
        maxima.net_value
    );

    let output = ComparisonOutput {
        invested_amount: invested,
        term_months: input.term_months,
        tax_bracket_rate: resolve_tax_rate(input.term_months),
        best_instrument,
        ranking,
        details,
        maxima,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly compounding at annual/12 with contributions after growth; \
         regressive income tax on gains; real gain deflated by compounded IPCA",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn aggregate_maxima(details: &[ProjectionResult]) -> AggregateMaxima {
    let max_of = |f: fn(&ProjectionResult) -> Decimal| {
        details.iter().map(f).max().unwrap_or_default()
    };

    AggregateMaxima {
        gross_value: max_of(|d| d.gross_value),
        tax_withheld: max_of(|d| d.tax_withheld),
        net_value: max_of(|d| d.net_value),
        gross_gain: max_of(|d| d.gross_gain),
        net_gain: max_of(|d| d.net_gain),
        net_profitability: max_of(|d| d.net_profitability),
        real_gain: max_of(|d| d.real_gain),
    }
}
