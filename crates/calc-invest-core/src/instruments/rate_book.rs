use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

/// Reference indices and per-instrument spreads and fees.
///
/// Every field is a percentage. Annual unless noted. Missing fields in a
/// serialized rate book take their default value, so a file only needs to
/// list what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateBook {
    /// Selic, the risk-free benchmark (a.a.)
    pub selic_rate: Percent,
    /// CDI, the interbank benchmark (a.a.)
    pub cdi_rate: Percent,
    /// IPCA, consumer inflation (a.a.)
    pub ipca_rate: Percent,
    /// TR, statutory reference rate (a.m.)
    pub tr_monthly_rate: Percent,
    /// Tesouro Prefixado nominal rate (a.a.)
    pub prefixed_bond_rate: Percent,
    /// Tesouro Direto custody fee charged by B3 (a.a.)
    pub bond_custody_fee: Percent,
    /// Tesouro IPCA+ real rate over inflation (a.a.)
    pub ipca_bond_real_rate: Percent,
    /// Fundo DI administration fee (a.a.)
    pub di_fund_admin_fee: Percent,
    /// CDB yield as a percentage of CDI
    pub cdb_cdi_percent: Percent,
    /// Fundo DI yield as a percentage of CDI
    pub di_fund_cdi_percent: Percent,
    /// LCI/LCA yield as a percentage of CDI
    pub lci_lca_cdi_percent: Percent,
    /// Poupança yield (a.m.)
    pub savings_monthly_rate: Percent,
}

impl Default for RateBook {
    fn default() -> Self {
        RateBook {
            selic_rate: dec!(14.90),
            cdi_rate: dec!(14.90),
            ipca_rate: dec!(4.10),
            tr_monthly_rate: dec!(0.1723),
            prefixed_bond_rate: dec!(14.00),
            bond_custody_fee: dec!(0.20),
            ipca_bond_real_rate: dec!(6.50),
            di_fund_admin_fee: dec!(0.25),
            cdb_cdi_percent: dec!(100),
            di_fund_cdi_percent: dec!(98.17),
            lci_lca_cdi_percent: dec!(85),
            savings_monthly_rate: dec!(0.6732),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let book: RateBook =
            serde_json::from_str(r#"{ "cdi_rate": "13.65", "bond_custody_fee": 0.1 }"#).unwrap();
        assert_eq!(book.cdi_rate, dec!(13.65));
        assert_eq!(book.bond_custody_fee, dec!(0.1));
        assert_eq!(book.selic_rate, dec!(14.90));
        assert_eq!(book.savings_monthly_rate, dec!(0.6732));
    }

    #[test]
    fn test_empty_object_is_default() {
        let book: RateBook = serde_json::from_str("{}").unwrap();
        assert_eq!(book, RateBook::default());
    }
}
