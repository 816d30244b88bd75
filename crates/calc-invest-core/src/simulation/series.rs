use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use super::scenario::SimulationInput;
use crate::projection::{invested_amount, project_path};
use crate::tax::apply_tax;
use crate::types::{with_metadata, ComputationOutput, Money, Months};
use crate::CalcInvestResult;

/// Which value each series point carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesBasis {
    /// After income tax, as if redeemed at that month
    #[default]
    Net,
    Gross,
}

/// Value of every instrument at one month. Serialises flat, e.g.
/// `{"month": 3, "CDB": "...", "Poupança": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub month: Months,
    #[serde(flatten)]
    pub values: BTreeMap<String, Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesOutput {
    pub basis: SeriesBasis,
    /// Instrument names in lineup order
    pub instruments: Vec<String>,
    /// One point per month, `0..=term_months`
    pub points: Vec<SeriesPoint>,
}

/// Value of each instrument at every month of the term, for charting.
///
/// Net values apply the tax tier of the month being plotted, so a curve can
/// step up when the holding crosses 6, 12 or 24 months.
pub fn build_series(
    input: &SimulationInput,
    basis: SeriesBasis,
) -> CalcInvestResult<ComputationOutput<SeriesOutput>> {
    let start = Instant::now();
    input.validate()?;

    let quotes = input.quotes()?;
    let warnings = input.warnings(&quotes);
    let term = input.term_months;

    let mut points: Vec<SeriesPoint> = (0..=term)
        .map(|month| SeriesPoint {
            month,
            values: BTreeMap::new(),
        })
        .collect();

    for q in &quotes {
        let path = project_path(
            input.initial_investment,
            input.monthly_contribution,
            term,
            q.annual_rate,
            q.custody_fee_or_zero(),
        )?;

        for (point, gross) in points.iter_mut().zip(path) {
            let value = match basis {
                SeriesBasis::Gross => gross,
                SeriesBasis::Net => {
                    let invested = invested_amount(
                        input.initial_investment,
                        input.monthly_contribution,
                        point.month,
                    )?;
                    apply_tax(gross, invested, point.month, q.tax_exempt)?.net_future_value
                }
            };
            point.values.insert(q.name.clone(), value);
        }
    }

    log::debug!(
        "built {:?} series: {} instruments x {} points",
        basis,
        quotes.len(),
        points.len()
    );

    let output = SeriesOutput {
        basis,
        instruments: quotes.iter().map(|q| q.name.clone()).collect(),
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Month-by-month projection path per instrument; net values taxed at each month's regressive tier",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_point_count_and_start() {
        let out = build_series(&SimulationInput::default(), SeriesBasis::Net).unwrap();
        let points = &out.result.points;
        assert_eq!(points.len(), 10);
        assert_eq!(points[0].month, 0);
        assert!(points[0].values.values().all(|v| *v == dec!(1000)));
    }

    #[test]
    fn test_serialises_flat() {
        let input = SimulationInput {
            term_months: 1,
            instruments: Some(vec![crate::instruments::InstrumentKind::Cdb]),
            ..SimulationInput::default()
        };
        let out = build_series(&input, SeriesBasis::Gross).unwrap();
        let json = serde_json::to_value(&out.result.points[0]).unwrap();
        assert_eq!(json["month"], 0);
        assert_eq!(json["CDB"], "1000");
    }
}
