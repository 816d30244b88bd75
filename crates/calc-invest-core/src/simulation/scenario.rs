use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CalcInvestError;
use crate::instruments::{quote_lineup, InstrumentKind, InstrumentQuote, RateBook, DEFAULT_LINEUP};
use crate::types::{Money, Months, MAX_TERM_MONTHS};
use crate::CalcInvestResult;

/// Parameters shared by every instrument in a comparison.
///
/// Any field may be omitted from a serialized scenario; the defaults are
/// R$ 1.000 initial, R$ 50 a month, 9 months, the default rate book and the
/// default six-instrument lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInput {
    pub initial_investment: Money,
    pub monthly_contribution: Money,
    pub term_months: Months,
    pub rate_book: RateBook,
    /// Instruments to compare, in order. `None` means [`DEFAULT_LINEUP`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<InstrumentKind>>,
}

impl Default for SimulationInput {
    fn default() -> Self {
        SimulationInput {
            initial_investment: dec!(1000),
            monthly_contribution: dec!(50),
            term_months: 9,
            rate_book: RateBook::default(),
            instruments: None,
        }
    }
}

impl SimulationInput {
    pub fn lineup(&self) -> &[InstrumentKind] {
        self.instruments.as_deref().unwrap_or(&DEFAULT_LINEUP[..])
    }

    pub fn quotes(&self) -> CalcInvestResult<Vec<InstrumentQuote>> {
        quote_lineup(&self.rate_book, self.lineup())
    }

    pub(crate) fn validate(&self) -> CalcInvestResult<()> {
        if self.term_months > MAX_TERM_MONTHS {
            return Err(CalcInvestError::InvalidInput {
                field: "term_months".into(),
                reason: format!("term must be at most {MAX_TERM_MONTHS} months"),
            });
        }

        let lineup = self.lineup();
        if lineup.is_empty() {
            return Err(CalcInvestError::InvalidInput {
                field: "instruments".into(),
                reason: "at least one instrument is required".into(),
            });
        }
        let mut seen = HashSet::new();
        for kind in lineup {
            if !seen.insert(kind) {
                return Err(CalcInvestError::InvalidInput {
                    field: "instruments".into(),
                    reason: format!("{} listed more than once", kind.display_name()),
                });
            }
        }
        Ok(())
    }

    /// Warnings common to every operation over this scenario.
    pub(crate) fn warnings(&self, quotes: &[InstrumentQuote]) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.term_months == 0 {
            warnings.push("Term of 0 months: every instrument returns the initial investment".into());
        }
        for q in quotes.iter().filter(|q| q.annual_rate < Decimal::ZERO) {
            warnings.push(format!(
                "{} has a negative effective rate ({}% a.a.)",
                q.name, q.annual_rate
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default_scenario() {
        let input: SimulationInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, SimulationInput::default());
        assert_eq!(input.lineup(), &DEFAULT_LINEUP);
    }

    #[test]
    fn test_custom_lineup() {
        let input: SimulationInput =
            serde_json::from_str(r#"{ "instruments": ["cdb", "tesouro_prefixado"] }"#).unwrap();
        assert_eq!(
            input.lineup(),
            &[InstrumentKind::Cdb, InstrumentKind::TesouroPrefixado]
        );
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let long = SimulationInput {
            term_months: MAX_TERM_MONTHS + 1,
            ..SimulationInput::default()
        };
        assert!(long.validate().is_err());

        let empty = SimulationInput {
            instruments: Some(vec![]),
            ..SimulationInput::default()
        };
        assert!(empty.validate().is_err());

        let dup = SimulationInput {
            instruments: Some(vec![InstrumentKind::Cdb, InstrumentKind::Cdb]),
            ..SimulationInput::default()
        };
        assert!(dup.validate().is_err());
    }

    #[test]
    fn test_zero_term_warning() {
        let input = SimulationInput {
            term_months: 0,
            ..SimulationInput::default()
        };
        let warnings = input.warnings(&input.quotes().unwrap());
        assert_eq!(warnings.len(), 1);
    }
}
