use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CalcInvestError;
use crate::types::{Money, Months, Percent};
use crate::CalcInvestResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Monthly equivalent of an annual percentage, as a fraction.
///
/// Simple division (`annual / 100 / 12`), not geometric de-compounding.
/// Projections depend on this exact convention.
pub fn monthly_equivalent(annual_percent: Percent) -> Decimal {
    annual_percent / HUNDRED / MONTHS_PER_YEAR
}

/// Total cash put in: principal plus every monthly contribution.
pub fn invested_amount(
    principal: Money,
    monthly_contribution: Money,
    term_months: Months,
) -> CalcInvestResult<Money> {
    monthly_contribution
        .checked_mul(Decimal::from(term_months))
        .and_then(|c| c.checked_add(principal))
        .ok_or_else(|| CalcInvestError::overflow("invested amount"))
}

/// Gross future value of a principal plus monthly contributions.
///
/// Each period grows the balance first and then adds that period's
/// contribution: `balance = balance * (1 + r - fee) + contribution`, with
/// `r` and `fee` the monthly equivalents of the annual rate and custody fee.
/// A zero term returns the principal untouched.
pub fn project(
    principal: Money,
    monthly_contribution: Money,
    term_months: Months,
    annual_rate: Percent,
    custody_fee: Percent,
) -> CalcInvestResult<Money> {
    let factor = growth_factor(annual_rate, custody_fee);
    let mut balance = principal;
    for period in 1..=term_months {
        balance = step(balance, factor, monthly_contribution, period)?;
    }
    Ok(balance)
}

/// Balance after every period `0..=term_months`; index 0 is the principal.
///
/// Entry `i` is identical to `project(.., i, ..)`, so charting code can read
/// the whole path from a single pass.
pub fn project_path(
    principal: Money,
    monthly_contribution: Money,
    term_months: Months,
    annual_rate: Percent,
    custody_fee: Percent,
) -> CalcInvestResult<Vec<Money>> {
    let factor = growth_factor(annual_rate, custody_fee);
    let mut path = Vec::with_capacity(term_months as usize + 1);
    let mut balance = principal;
    path.push(balance);
    for period in 1..=term_months {
        balance = step(balance, factor, monthly_contribution, period)?;
        path.push(balance);
    }
    Ok(path)
}

/// Cumulative inflation over the term, compounded geometrically:
/// `(1 + inflation/100)^(term/12) - 1`.
pub fn inflation_factor(inflation_annual: Percent, term_months: Months) -> CalcInvestResult<Decimal> {
    let base = Decimal::ONE + inflation_annual / HUNDRED;
    if base <= Decimal::ZERO {
        return Err(CalcInvestError::InvalidInput {
            field: "inflation_rate".into(),
            reason: "Inflation must be greater than -100%".into(),
        });
    }
    if term_months == 0 {
        return Ok(Decimal::ZERO);
    }

    let compounded = if term_months % 12 == 0 {
        // Whole years: exact repeated multiplication
        base.checked_powu(u64::from(term_months / 12))
    } else {
        base.checked_powd(Decimal::from(term_months) / MONTHS_PER_YEAR)
    };

    compounded
        .map(|c| c - Decimal::ONE)
        .ok_or_else(|| CalcInvestError::overflow("inflation factor"))
}

/// Inflation-adjusted gain as a percentage:
/// `(net / (invested * (1 + inflation_factor)) - 1) * 100`.
///
/// Returns 0 when the deflated invested amount is zero.
pub fn real_gain(
    net_future_value: Money,
    invested: Money,
    inflation_annual: Percent,
    term_months: Months,
) -> CalcInvestResult<Percent> {
    let factor = inflation_factor(inflation_annual, term_months)?;
    let deflated = invested
        .checked_mul(Decimal::ONE + factor)
        .ok_or_else(|| CalcInvestError::overflow("real gain"))?;
    if deflated.is_zero() {
        return Ok(Decimal::ZERO);
    }
    net_future_value
        .checked_div(deflated)
        .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
        .and_then(|excess| excess.checked_mul(HUNDRED))
        .ok_or_else(|| CalcInvestError::overflow("real gain"))
}

/// Gain over invested amount as a percentage; 0 when nothing was invested.
pub fn profitability(gain: Money, invested: Money) -> CalcInvestResult<Percent> {
    if invested <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    gain.checked_div(invested)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or_else(|| CalcInvestError::overflow("profitability"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn growth_factor(annual_rate: Percent, custody_fee: Percent) -> Decimal {
    Decimal::ONE + monthly_equivalent(annual_rate) - monthly_equivalent(custody_fee)
}

fn step(balance: Money, factor: Decimal, contribution: Money, period: Months) -> CalcInvestResult<Money> {
    balance
        .checked_mul(factor)
        .and_then(|grown| grown.checked_add(contribution))
        .ok_or_else(|| CalcInvestError::overflow(format!("projection at month {period}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
