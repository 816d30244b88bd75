use calc_invest_core::parse;
use calc_invest_core::projection;
use calc_invest_core::tax;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Compound-growth projector
// ===========================================================================

#[test]
fn test_zero_term_returns_principal() {
    for (p, c, r, f) in [
        (dec!(1000), dec!(50), dec!(14.90), dec!(0)),
        (dec!(0), dec!(100), dec!(8.0784), dec!(0.20)),
        (dec!(-10), dec!(5), dec!(-3), dec!(1)),
    ] {
        assert_eq!(projection::project(p, c, 0, r, f).unwrap(), p);
    }
}

#[test]
fn test_reference_example_nine_months() {
    // 1000 initial, 50/month, 9 months at 14.90% a.a., no custody fee
    let gross = projection::project(dec!(1000), dec!(50), 9, dec!(14.90), Decimal::ZERO).unwrap();
    assert_eq!(gross.round_dp(2), dec!(1590.47));

    // 9 >= 6, so the 20% tier applies
    assert_eq!(tax::resolve_tax_rate(9), dec!(20.0));
    let taxed = tax::apply_tax(gross, dec!(1450), 9, false).unwrap();
    assert_eq!(taxed.tax.round_dp(2), dec!(28.09));
    assert_eq!(taxed.net_future_value.round_dp(2), dec!(1562.38));
}

#[test]
fn test_recomputation_by_hand_matches() {
    let monthly = dec!(14.90) / dec!(100) / dec!(12);
    let mut expected = dec!(1000);
    for _ in 1..=9 {
        expected = expected * (Decimal::ONE + monthly) + dec!(50);
    }
    let gross = projection::project(dec!(1000), dec!(50), 9, dec!(14.90), Decimal::ZERO).unwrap();
    assert_eq!(gross, expected);
}

#[test]
fn test_annual_rate_is_not_compounded_into_monthly() {
    // 12% a.a. for 12 months: 1.01^12 = 1.126825..., not 1.12
    let fv = projection::project(dec!(1000), Decimal::ZERO, 12, dec!(12), Decimal::ZERO).unwrap();
    assert_eq!(fv.round_dp(2), dec!(1126.83));
}

#[test]
fn test_contributions_only_one_year() {
    let fv = projection::project(Decimal::ZERO, dec!(100), 12, dec!(14.90), Decimal::ZERO).unwrap();
    assert_eq!(fv.round_dp(2), dec!(1285.44));
}

#[test]
fn test_identical_inputs_give_identical_results() {
    let a = projection::project(dec!(1000), dec!(50), 36, dec!(10.60), dec!(0.20)).unwrap();
    let b = projection::project(dec!(1000), dec!(50), 36, dec!(10.60), dec!(0.20)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_invested_amount() {
    assert_eq!(projection::invested_amount(dec!(1000), dec!(50), 9).unwrap(), dec!(1450));
    assert_eq!(projection::invested_amount(dec!(1000), dec!(50), 0).unwrap(), dec!(1000));
}

// ===========================================================================
// Real gain
// ===========================================================================

#[test]
fn test_real_gain_reference_case() {
    // CDB net 1562.38 on 1450 invested, IPCA 4.10% over 9 months
    let gross = projection::project(dec!(1000), dec!(50), 9, dec!(14.90), Decimal::ZERO).unwrap();
    let net = tax::apply_tax(gross, dec!(1450), 9, false).unwrap().net_future_value;
    let real = projection::real_gain(net, dec!(1450), dec!(4.10), 9).unwrap();
    assert!((real - dec!(4.5515)).abs() < dec!(0.001), "got {real}");
}

#[test]
fn test_real_gain_uses_compounded_inflation() {
    // 10% inflation over 24 months compounds to 21%, not 20%
    let real = projection::real_gain(dec!(1210), dec!(1000), dec!(10), 24).unwrap();
    assert_eq!(real, Decimal::ZERO);
}

// ===========================================================================
// Free-text input
// ===========================================================================

#[test]
fn test_invalid_principal_reads_as_zero() {
    let principal = parse::parse_lenient("R$ mil").unwrap();
    let contribution = parse::parse_lenient("50").unwrap();
    let term = parse::parse_term_months("9").unwrap();

    assert_eq!(principal, Decimal::ZERO);
    let invested = projection::invested_amount(principal, contribution, term.months).unwrap();
    assert_eq!(invested, contribution * Decimal::from(term.months));
    assert_eq!(invested, dec!(450));

    let gross = projection::project(principal, contribution, term.months, dec!(14.90), Decimal::ZERO).unwrap();
    assert_eq!(gross.round_dp(2), dec!(473.01));
}
