use serde::{Deserialize, Serialize};

use super::scenario::SimulationInput;
use crate::error::CalcInvestError;
use crate::instruments::{InstrumentKind, InstrumentQuote};
use crate::projection::{invested_amount, profitability, project, real_gain};
use crate::tax::apply_tax;
use crate::types::{Money, Percent};
use crate::CalcInvestResult;

/// Full breakdown of one instrument over the scenario's term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub name: String,
    pub kind: InstrumentKind,
    pub annual_rate: Percent,
    pub tax_exempt: bool,
    pub invested_amount: Money,
    pub gross_value: Money,
    pub tax_rate: Percent,
    pub tax_withheld: Money,
    pub net_value: Money,
    pub gross_gain: Money,
    pub net_gain: Money,
    pub gross_profitability: Percent,
    pub net_profitability: Percent,
    /// Net return after IPCA over the term, in percent
    pub real_gain: Percent,
}

/// Project one quoted instrument: gross value, income tax, net value and
/// the derived gains, using the scenario's IPCA for the real gain.
pub fn simulate_instrument(
    input: &SimulationInput,
    quote: &InstrumentQuote,
) -> CalcInvestResult<ProjectionResult> {
    let term = input.term_months;
    let invested = invested_amount(input.initial_investment, input.monthly_contribution, term)?;
    let gross_value = project(
        input.initial_investment,
        input.monthly_contribution,
        term,
        quote.annual_rate,
        quote.custody_fee_or_zero(),
    )?;

    let taxed = apply_tax(gross_value, invested, term, quote.tax_exempt)?;
    let gross_gain = gross_value
        .checked_sub(invested)
        .ok_or_else(|| CalcInvestError::overflow("gross gain"))?;
    let net_gain = taxed
        .net_future_value
        .checked_sub(invested)
        .ok_or_else(|| CalcInvestError::overflow("net gain"))?;

    Ok(ProjectionResult {
        name: quote.name.clone(),
        kind: quote.kind,
        annual_rate: quote.annual_rate,
        tax_exempt: quote.tax_exempt,
        invested_amount: invested,
        gross_value,
        tax_rate: taxed.tax_rate,
        tax_withheld: taxed.tax,
        net_value: taxed.net_future_value,
        gross_gain,
        net_gain,
        gross_profitability: profitability(gross_gain, invested)?,
        net_profitability: profitability(net_gain, invested)?,
        real_gain: real_gain(
            taxed.net_future_value,
            invested,
            input.rate_book.ipca_rate,
            term,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{quote, RateBook};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cdb_reference_case() {
        let input = SimulationInput::default();
        let q = quote(&RateBook::default(), InstrumentKind::Cdb).unwrap();
        let r = simulate_instrument(&input, &q).unwrap();

        assert_eq!(r.invested_amount, dec!(1450));
        assert_eq!(r.gross_value.round_dp(2), dec!(1590.47));
        assert_eq!(r.tax_rate, dec!(20.0));
        assert_eq!(r.tax_withheld.round_dp(2), dec!(28.09));
        assert_eq!(r.net_value.round_dp(2), dec!(1562.38));
        assert_eq!(r.gross_profitability.round_dp(2), dec!(9.69));
        assert_eq!(r.net_profitability.round_dp(2), dec!(7.75));
        assert_eq!(r.real_gain.round_dp(2), dec!(4.55));
    }

    #[test]
    fn test_exempt_instrument_keeps_gross() {
        let input = SimulationInput::default();
        let q = quote(&RateBook::default(), InstrumentKind::LciLca).unwrap();
        let r = simulate_instrument(&input, &q).unwrap();

        assert_eq!(r.tax_withheld, Decimal::ZERO);
        assert_eq!(r.net_value, r.gross_value);
        assert_eq!(r.net_gain, r.gross_gain);
    }

    #[test]
    fn test_nothing_invested_reports_zero_percentages() {
        let input = SimulationInput {
            initial_investment: Decimal::ZERO,
            monthly_contribution: Decimal::ZERO,
            ..SimulationInput::default()
        };
        let q = quote(&RateBook::default(), InstrumentKind::Cdb).unwrap();
        let r = simulate_instrument(&input, &q).unwrap();

        assert_eq!(r.gross_profitability, Decimal::ZERO);
        assert_eq!(r.net_profitability, Decimal::ZERO);
        assert_eq!(r.real_gain, Decimal::ZERO);
    }
}
