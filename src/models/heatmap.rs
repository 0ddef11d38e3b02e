//! Time x location price grid behind the LMP heatmap.

use {
    crate::domain::{PriceSample, Timestamp, Timestamped},
    colorgrad::Gradient,
    eframe::egui::Color32,
    itertools::Itertools,
    std::collections::HashMap,
};

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub time_index: usize,
    pub location_index: usize,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapGrid {
    /// Sorted unique sample times across every location.
    pub times: Vec<Timestamp>,
    pub locations: Vec<String>,
    /// Mean price over every row at each time, including locations not on the grid.
    pub system_avg: Vec<f64>,
    /// `prices[location][time]`, `None` where the input has no row.
    prices: Vec<Vec<Option<f64>>>,
    /// Largest absolute price over all rows; the colour domain is `[-max_abs, max_abs]`.
    pub max_abs: f64,
}

impl HeatmapGrid {
    /// Rows at locations outside `locations` count toward the system average but get no cell.
    /// A repeated `(time, location)` keeps the last row.
    pub fn build(rows: &[PriceSample], locations: &[&str]) -> Self {
        let times: Vec<Timestamp> = rows
            .iter()
            .map(Timestamped::timestamp)
            .sorted()
            .dedup()
            .collect();
        let time_index: HashMap<i64, usize> = times
            .iter()
            .enumerate()
            .map(|(i, t)| (t.timestamp_millis(), i))
            .collect();

        let mut sums = vec![(0.0, 0usize); times.len()];
        let mut prices = vec![vec![None; times.len()]; locations.len()];
        for row in rows {
            let Some(&ti) = time_index.get(&row.timestamp.timestamp_millis()) else {
                continue;
            };
            sums[ti].0 += row.price;
            sums[ti].1 += 1;
            if let Some(li) = locations.iter().position(|l| *l == row.location) {
                prices[li][ti] = Some(row.price);
            }
        }

        let max_abs = rows.iter().map(|r| r.price.abs()).fold(0.0, f64::max);

        Self {
            times,
            locations: locations.iter().map(|l| l.to_string()).collect(),
            system_avg: sums.into_iter().map(|(s, n)| s / n as f64).collect(),
            prices,
            max_abs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn price(&self, location_index: usize, time_index: usize) -> Option<f64> {
        self.prices.get(location_index)?.get(time_index).copied().flatten()
    }

    /// Price minus the system average at that time.
    pub fn deviation(&self, location_index: usize, time_index: usize) -> Option<f64> {
        Some(self.price(location_index, time_index)? - self.system_avg.get(time_index)?)
    }

    pub fn cells(&self) -> impl Iterator<Item = HeatmapCell> + '_ {
        self.prices.iter().enumerate().flat_map(|(li, row)| {
            row.iter().enumerate().filter_map(move |(ti, p)| {
                p.map(|price| HeatmapCell {
                    time_index: ti,
                    location_index: li,
                    price,
                })
            })
        })
    }

    /// Position of `price` in the symmetric colour domain, 0 at `-max_abs`, 1 at `+max_abs`.
    pub fn color_t(&self, price: f64) -> f64 {
        if self.max_abs <= 0.0 {
            return 0.5;
        }
        ((price + self.max_abs) / (2.0 * self.max_abs)).clamp(0.0, 1.0)
    }

    pub fn color(&self, gradient: &impl Gradient, price: f64) -> Color32 {
        to_egui_color(gradient.at(self.color_t(price) as f32))
    }
}

/// Diverging red-white-blue scale; red at the low end.
pub fn diverging_gradient() -> impl Gradient {
    colorgrad::preset::rd_bu()
}

fn to_egui_color(c: colorgrad::Color) -> Color32 {
    let rgba8 = c.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba8[0], rgba8[1], rgba8[2], 255)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn row(hour: u32, location: &str, price: f64) -> PriceSample {
        PriceSample {
            timestamp: DateTime::parse_from_rfc3339(&format!("2025-12-01T{:02}:00:00-06:00", hour))
                .expect("valid timestamp"),
            location: location.to_string(),
            price,
        }
    }

    fn grid() -> HeatmapGrid {
        let rows = vec![
            row(1, "HB_NORTH", 30.0),
            row(0, "HB_NORTH", 20.0),
            row(0, "HB_HOUSTON", 40.0),
            row(0, "HB_PAN", -60.0),
            row(1, "HB_HOUSTON", 50.0),
        ];
        HeatmapGrid::build(&rows, &["HB_NORTH", "HB_HOUSTON", "HB_SOUTH"])
    }

    #[test]
    fn times_are_sorted_and_unique() {
        let g = grid();
        assert_eq!(g.times.len(), 2);
        assert!(g.times[0] < g.times[1]);
    }

    #[test]
    fn system_average_uses_every_row() {
        let g = grid();
        assert_eq!(g.system_avg, vec![0.0, 40.0]);
        assert_eq!(g.deviation(1, 0), Some(40.0));
        assert_eq!(g.deviation(0, 1), Some(-10.0));
    }

    #[test]
    fn unlisted_locations_get_no_cell() {
        let g = grid();
        assert_eq!(g.cells().count(), 4);
        assert_eq!(g.price(2, 0), None);
        assert_eq!(g.deviation(2, 0), None);
    }

    #[test]
    fn colour_domain_is_symmetric() {
        let g = grid();
        assert_eq!(g.max_abs, 60.0);
        assert_eq!(g.color_t(0.0), 0.5);
        assert_eq!(g.color_t(-60.0), 0.0);
        assert_eq!(g.color_t(60.0), 1.0);
        assert!((g.color_t(30.0) - 0.75).abs() < 1e-12);
        assert!((g.color_t(-30.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn lowest_price_is_red_highest_is_blue() {
        let g = grid();
        let gradient = diverging_gradient();
        let low = g.color(&gradient, -60.0);
        let high = g.color(&gradient, 60.0);
        assert!(low.r() > low.b());
        assert!(high.b() > high.r());
    }

    #[test]
    fn duplicate_cell_keeps_last_row() {
        let rows = vec![row(0, "HB_NORTH", 1.0), row(0, "HB_NORTH", 2.0)];
        let g = HeatmapGrid::build(&rows, &["HB_NORTH"]);
        assert_eq!(g.price(0, 0), Some(2.0));
        assert_eq!(g.system_avg, vec![1.5]);
    }

    #[test]
    fn empty_input() {
        let g = HeatmapGrid::build(&[], &["HB_NORTH"]);
        assert!(g.is_empty());
        assert_eq!(g.color_t(5.0), 0.5);
        assert_eq!(g.cells().count(), 0);
    }
}
