//! Scalar rollups shown in the header cards and printed by the `summary` binary.

use {
    crate::domain::{CombinedPriceSample, DemandSample, PriceSample},
    serde::Serialize,
    tabled::Tabled,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub peak_demand_mw: Option<f64>,
    pub max_rt_price: Option<f64>,
    /// Largest RT minus DA over joined rows with a DA price.
    pub max_spread: Option<f64>,
}

impl Summary {
    pub fn compute(
        demand: Option<&[DemandSample]>,
        rt_prices: Option<&[PriceSample]>,
        combined: Option<&[CombinedPriceSample]>,
    ) -> Self {
        Self {
            peak_demand_mw: demand.and_then(|d| max_of(d.iter().map(|s| s.actual_mw))),
            max_rt_price: rt_prices.and_then(|p| max_of(p.iter().map(|s| s.price))),
            max_spread: combined.and_then(|c| max_of(c.iter().filter_map(|s| s.spread()))),
        }
    }

    pub fn rows(&self) -> Vec<SummaryRow> {
        use crate::ui::utils::{format_mw, format_whole_dollars};
        vec![
            SummaryRow::new("Peak demand", self.peak_demand_mw.map(format_mw)),
            SummaryRow::new("Max RT price", self.max_rt_price.map(format_whole_dollars)),
            SummaryRow::new("Max RT-DA spread", self.max_spread.map(format_whole_dollars)),
        ]
    }
}

/// One line of the printed summary table.
#[derive(Debug, Clone, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Metric")]
    pub metric: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl SummaryRow {
    fn new(metric: &'static str, value: Option<String>) -> Self {
        Self {
            metric,
            value: value.unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.filter(|v| v.is_finite()).reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn ts(hour: u32) -> crate::domain::Timestamp {
        DateTime::parse_from_rfc3339(&format!("2025-12-01T{:02}:00:00-06:00", hour))
            .expect("valid timestamp")
    }

    fn demand(values: &[f64]) -> Vec<DemandSample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| DemandSample {
                timestamp: ts(i as u32),
                actual_mw: v,
                current_forecast_mw: v,
                day_ahead_forecast_mw: v,
            })
            .collect()
    }

    fn combined(rt: f64, da: Option<f64>) -> CombinedPriceSample {
        CombinedPriceSample {
            timestamp: ts(0),
            location: "HB_HOUSTON".into(),
            rt_price: rt,
            da_price: da,
        }
    }

    #[test]
    fn peak_demand_is_max_actual() {
        let d = demand(&[100.0, 150.0, 120.0]);
        let s = Summary::compute(Some(&d), None, None);
        assert_eq!(s.peak_demand_mw, Some(150.0));
        assert_eq!(s.max_rt_price, None);
    }

    #[test]
    fn spread_ignores_rows_without_day_ahead() {
        let rows = vec![
            combined(500.0, None),
            combined(40.0, Some(35.0)),
            combined(20.0, Some(22.0)),
        ];
        let s = Summary::compute(None, None, Some(&rows));
        assert_eq!(s.max_spread, Some(5.0));
    }

    #[test]
    fn empty_inputs_stay_absent() {
        let s = Summary::compute(Some(&[]), Some(&[]), Some(&[]));
        assert_eq!(s, Summary::default());
        let rows = s.rows();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.value == "N/A"));
    }

    #[test]
    fn rows_are_formatted() {
        let d = demand(&[43_210.5]);
        let rt = vec![PriceSample {
            timestamp: ts(0),
            location: "HB_NORTH".into(),
            price: 41.6,
        }];
        let s = Summary::compute(Some(&d), Some(&rt), None);
        let rows = s.rows();
        assert_eq!(rows[0].value, "43,210.5 MW");
        assert_eq!(rows[1].value, "$42");
    }
}
