use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::rate_book::RateBook;
use crate::error::CalcInvestError;
use crate::types::{with_metadata, ComputationOutput, Percent};
use crate::CalcInvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fixed-income products the calculator compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// Real-estate / agribusiness credit notes, income-tax exempt
    LciLca,
    /// Bank certificate of deposit
    Cdb,
    /// Floating-rate treasury bond tracking Selic
    TesouroSelic,
    /// Inflation-linked treasury bond
    TesouroIpca,
    /// Fixed-rate treasury bond
    TesouroPrefixado,
    /// Daily-liquidity DI fund
    FundoDi,
    /// Savings account, income-tax exempt
    Poupanca,
}

/// Instruments compared when no lineup is given, in display order.
pub const DEFAULT_LINEUP: [InstrumentKind; 6] = [
    InstrumentKind::LciLca,
    InstrumentKind::Cdb,
    InstrumentKind::TesouroSelic,
    InstrumentKind::TesouroIpca,
    InstrumentKind::FundoDi,
    InstrumentKind::Poupanca,
];

impl InstrumentKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            InstrumentKind::LciLca => "LCI e LCA",
            InstrumentKind::Cdb => "CDB",
            InstrumentKind::TesouroSelic => "Tesouro Selic",
            InstrumentKind::TesouroIpca => "Tesouro IPCA+",
            InstrumentKind::TesouroPrefixado => "Tesouro Prefixado",
            InstrumentKind::FundoDi => "Fundo DI",
            InstrumentKind::Poupanca => "Poupança",
        }
    }

    pub fn is_tax_exempt(&self) -> bool {
        matches!(self, InstrumentKind::LciLca | InstrumentKind::Poupanca)
    }

    /// Treasury bonds pay the custody fee on top of their quoted rate.
    pub fn custody_fee(&self, book: &RateBook) -> Option<Percent> {
        match self {
            InstrumentKind::TesouroSelic
            | InstrumentKind::TesouroIpca
            | InstrumentKind::TesouroPrefixado => Some(book.bond_custody_fee),
            _ => None,
        }
    }
}

/// A single instrument's rate, normalised to an annual percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentQuote {
    pub kind: InstrumentKind,
    pub name: String,
    pub annual_rate: Percent,
    pub tax_exempt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custody_fee: Option<Percent>,
}

/// Derived quotes for a lineup, as shown on the rate panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSheet {
    pub quotes: Vec<InstrumentQuote>,
}

impl InstrumentQuote {
    pub fn custody_fee_or_zero(&self) -> Percent {
        self.custody_fee.unwrap_or(Decimal::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Effective annual rate of an instrument.
///
/// Each product is quoted its own way (share of CDI, spread over Selic, real
/// rate over IPCA, monthly savings rate); this brings them all to one
/// annual percentage so they can be projected the same way.
pub fn derive_effective_rate(book: &RateBook, kind: InstrumentKind) -> CalcInvestResult<Percent> {
    let rate = match kind {
        InstrumentKind::LciLca => share_of(book.cdi_rate, book.lci_lca_cdi_percent),
        InstrumentKind::Cdb => share_of(book.cdi_rate, book.cdb_cdi_percent),
        InstrumentKind::TesouroSelic => book.selic_rate.checked_sub(book.bond_custody_fee),
        InstrumentKind::TesouroIpca => book.ipca_rate.checked_add(book.ipca_bond_real_rate),
        InstrumentKind::TesouroPrefixado => Some(book.prefixed_bond_rate),
        InstrumentKind::FundoDi => share_of(book.cdi_rate, book.di_fund_cdi_percent)
            .and_then(|r| r.checked_sub(book.di_fund_admin_fee)),
        // Flat annualisation, not compounded
        InstrumentKind::Poupanca => book.savings_monthly_rate.checked_mul(dec!(12)),
    };
    rate.ok_or_else(|| {
        CalcInvestError::overflow(format!("effective rate of {}", kind.display_name()))
    })
}

fn share_of(base: Percent, percent_of_base: Percent) -> Option<Percent> {
    base.checked_mul(percent_of_base)
        .and_then(|r| r.checked_div(dec!(100)))
}

pub fn quote(book: &RateBook, kind: InstrumentKind) -> CalcInvestResult<InstrumentQuote> {
    Ok(InstrumentQuote {
        kind,
        name: kind.display_name().to_string(),
        annual_rate: derive_effective_rate(book, kind)?,
        tax_exempt: kind.is_tax_exempt(),
        custody_fee: kind.custody_fee(book),
    })
}

pub fn quote_lineup(
    book: &RateBook,
    kinds: &[InstrumentKind],
) -> CalcInvestResult<Vec<InstrumentQuote>> {
    kinds.iter().map(|k| quote(book, *k)).collect()
}

/// Quote a lineup and wrap it in the standard output envelope.
pub fn quote_instruments(
    book: &RateBook,
    kinds: &[InstrumentKind],
) -> CalcInvestResult<ComputationOutput<QuoteSheet>> {
    let start = Instant::now();
    let quotes = quote_lineup(book, kinds)?;
    let warnings = quotes
        .iter()
        .filter(|q| q.annual_rate < Decimal::ZERO)
        .map(|q| format!("{} has a negative effective rate ({}% a.a.)", q.name, q.annual_rate))
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Quotes normalised to annual percentages: share of CDI, spread over Selic, \
         real rate over IPCA, flat x12 for monthly savings",
        book,
        warnings,
        elapsed,
        QuoteSheet { quotes },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_of(book: &RateBook, kind: InstrumentKind) -> Percent {
        derive_effective_rate(book, kind).unwrap()
    }

    #[test]
    fn test_default_effective_rates() {
        let book = RateBook::default();
        assert_eq!(rate_of(&book, InstrumentKind::LciLca), dec!(12.665));
        assert_eq!(rate_of(&book, InstrumentKind::Cdb), dec!(14.90));
        assert_eq!(rate_of(&book, InstrumentKind::TesouroSelic), dec!(14.70));
        assert_eq!(rate_of(&book, InstrumentKind::TesouroIpca), dec!(10.60));
        assert_eq!(rate_of(&book, InstrumentKind::TesouroPrefixado), dec!(14.00));
        assert_eq!(rate_of(&book, InstrumentKind::FundoDi), dec!(14.37733));
        assert_eq!(rate_of(&book, InstrumentKind::Poupanca), dec!(8.0784));
    }

    #[test]
    fn test_fund_fee_can_push_rate_negative() {
        let book = RateBook {
            cdi_rate: dec!(0.10),
            di_fund_admin_fee: dec!(1.0),
            ..RateBook::default()
        };
        assert!(rate_of(&book, InstrumentKind::FundoDi) < Decimal::ZERO);
    }

    #[test]
    fn test_custody_fee_only_on_treasury() {
        let book = RateBook::default();
        let lineup = quote_lineup(&book, &DEFAULT_LINEUP).unwrap();
        let with_fee: Vec<&str> = lineup
            .iter()
            .filter(|q| q.custody_fee.is_some())
            .map(|q| q.name.as_str())
            .collect();
        assert_eq!(with_fee, vec!["Tesouro Selic", "Tesouro IPCA+"]);
    }

    #[test]
    fn test_exempt_flags() {
        let book = RateBook::default();
        let exempt: Vec<InstrumentKind> = quote_lineup(&book, &DEFAULT_LINEUP).unwrap()
            .into_iter()
            .filter(|q| q.tax_exempt)
            .map(|q| q.kind)
            .collect();
        assert_eq!(exempt, vec![InstrumentKind::LciLca, InstrumentKind::Poupanca]);
    }

    #[test]
    fn test_quote_sheet_envelope() {
        let sheet = quote_instruments(&RateBook::default(), &DEFAULT_LINEUP).unwrap();
        assert_eq!(sheet.result.quotes.len(), 6);
        assert!(sheet.warnings.is_empty());
        assert_eq!(sheet.assumptions["cdi_rate"], "14.90");
    }

    #[test]
    fn test_kind_serialises_snake_case() {
        let json = serde_json::to_string(&InstrumentKind::TesouroIpca).unwrap();
        assert_eq!(json, "\"tesouro_ipca\"");
        let kind: InstrumentKind = serde_json::from_str("\"fundo_di\"").unwrap();
        assert_eq!(kind, InstrumentKind::FundoDi);
    }

    #[test]
    fn test_rate_overflow_is_reported() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(20), 0);
        let book = RateBook {
            cdi_rate: huge,
            lci_lca_cdi_percent: huge,
            ..RateBook::default()
        };
        let err = derive_effective_rate(&book, InstrumentKind::LciLca);
        assert!(matches!(err, Err(CalcInvestError::Overflow { .. })));
        assert!(quote_instruments(&book, &DEFAULT_LINEUP).is_err());
        // Instruments that do not read the overflowing fields still quote
        assert!(quote_lineup(&book, &[InstrumentKind::TesouroSelic]).is_ok());
    }
}
