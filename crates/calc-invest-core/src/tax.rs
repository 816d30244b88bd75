use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcInvestError;
use crate::types::{Money, Months, Percent};
use crate::CalcInvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One tier of the regressive income-tax table (IR sobre renda fixa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound of the holding term
    pub min_months: Months,
    /// Exclusive upper bound; `None` for the last tier
    pub max_months: Option<Months>,
    pub rate: Percent,
}

/// Regressive table, ordered by term. Rates fall as the holding term grows.
pub static TAX_BRACKETS: [TaxBracket; 4] = [
    TaxBracket {
        min_months: 0,
        max_months: Some(6),
        rate: dec!(22.5),
    },
    TaxBracket {
        min_months: 6,
        max_months: Some(12),
        rate: dec!(20.0),
    },
    TaxBracket {
        min_months: 12,
        max_months: Some(24),
        rate: dec!(17.5),
    },
    TaxBracket {
        min_months: 24,
        max_months: None,
        rate: dec!(15.0),
    },
];

/// Result of withholding tax from a gross future value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxOutcome {
    /// Tier rate actually charged (0 when exempt or when there is no gain)
    pub tax_rate: Percent,
    pub tax: Money,
    pub net_future_value: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Tier that covers a holding term.
pub fn bracket_for(term_months: Months) -> &'static TaxBracket {
    TAX_BRACKETS
        .iter()
        .find(|b| b.max_months.map_or(true, |max| term_months < max))
        .unwrap_or(&TAX_BRACKETS[TAX_BRACKETS.len() - 1])
}

/// Tax rate for a holding term. Lower bounds are inclusive, so a 6-month
/// term already falls in the 20% tier.
pub fn resolve_tax_rate(term_months: Months) -> Percent {
    bracket_for(term_months).rate
}

/// Withhold income tax on the gain over `total_contributions`.
///
/// Exempt instruments and positions without a gain pay nothing and keep
/// their gross value. Otherwise the tier rate for `term_months` is applied
/// to the gain only, so the tax can never exceed it.
pub fn apply_tax(
    gross_future_value: Money,
    total_contributions: Money,
    term_months: Months,
    tax_exempt: bool,
) -> CalcInvestResult<TaxOutcome> {
    if tax_exempt || gross_future_value <= total_contributions {
        return Ok(TaxOutcome {
            tax_rate: Decimal::ZERO,
            tax: Decimal::ZERO,
            net_future_value: gross_future_value,
        });
    }

    let tax_rate = resolve_tax_rate(term_months);
    let tax = gross_future_value
        .checked_sub(total_contributions)
        .and_then(|gain| gain.checked_mul(tax_rate))
        .and_then(|scaled| scaled.checked_div(dec!(100)))
        .ok_or_else(|| CalcInvestError::overflow("income tax"))?;

    Ok(TaxOutcome {
        tax_rate,
        tax,
        net_future_value: gross_future_value - tax,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
