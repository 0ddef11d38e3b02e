//! Stacked-area layout for the fuel mix, plus the highlight opacity rule shared with the treemap.

use {
    crate::{
        config::PLOT_CONFIG,
        domain::{FuelMixSample, FuelType, Timestamped},
    },
    strum::EnumCount,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackPoint {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackLayer {
    pub fuel: FuelType,
    pub points: Vec<StackPoint>,
}

/// One layer per fuel in stacking order; each layer sits on the running total of those below it.
pub fn stack_layers(samples: &[FuelMixSample]) -> Vec<StackLayer> {
    let mut base = vec![0.0; samples.len()];
    FuelType::ALL
        .iter()
        .map(|&fuel| {
            let points = samples
                .iter()
                .zip(base.iter_mut())
                .map(|(s, y0)| {
                    let lower = *y0;
                    *y0 += s.get(fuel);
                    StackPoint {
                        x: s.plot_x(),
                        y0: lower,
                        y1: *y0,
                    }
                })
                .collect();
            StackLayer { fuel, points }
        })
        .collect()
}

/// Polygons filling one layer between two neighbouring samples.
///
/// A layer whose thickness changes sign (storage charging) pinches to zero inside the
/// interval; it is split there into two triangles so no polygon crosses itself.
/// An interval with zero thickness at both ends yields nothing.
pub fn interval_polygons(a: StackPoint, b: StackPoint) -> Vec<Vec<[f64; 2]>> {
    let (da, db) = (a.y1 - a.y0, b.y1 - b.y0);
    if da == 0.0 && db == 0.0 {
        return Vec::new();
    }
    if da * db >= 0.0 {
        return vec![vec![[a.x, a.y0], [b.x, b.y0], [b.x, b.y1], [a.x, a.y1]]];
    }
    let t = da / (da - db);
    let pinch = [a.x + t * (b.x - a.x), a.y0 + t * (b.y0 - a.y0)];
    vec![
        vec![[a.x, a.y0], pinch, [a.x, a.y1]],
        vec![pinch, [b.x, b.y0], [b.x, b.y1]],
    ]
}

pub fn max_total(samples: &[FuelMixSample]) -> f64 {
    samples.iter().map(FuelMixSample::total).fold(0.0, f64::max)
}

/// Sum of each fuel over the whole period, in fuel order.
pub fn fuel_totals(samples: &[FuelMixSample]) -> [f64; FuelType::COUNT] {
    samples.iter().fold([0.0; FuelType::COUNT], |mut acc, s| {
        acc.iter_mut().zip(s.mw.iter()).for_each(|(a, v)| *a += v);
        acc
    })
}

/// Layer opacity under the current highlight. Unknown keys dim every layer.
pub fn layer_opacity(fuel: FuelType, highlight: Option<&str>) -> f32 {
    match highlight {
        None => PLOT_CONFIG.layer_opacity_default,
        Some(key) if fuel.matches(key) => PLOT_CONFIG.layer_opacity_match,
        Some(_) => PLOT_CONFIG.layer_opacity_dimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn sample(hour: u32, mw: [f64; FuelType::COUNT]) -> FuelMixSample {
        FuelMixSample {
            timestamp: DateTime::parse_from_rfc3339(&format!("2025-12-01T{:02}:00:00-06:00", hour))
                .expect("valid timestamp"),
            mw,
        }
    }

    fn samples() -> Vec<FuelMixSample> {
        vec![
            sample(0, [0.0, 10.0, 1.0, 0.0, 2.0, 30.0, 5.0, 7.0]),
            sample(1, [4.0, 12.0, 1.0, 1.0, 2.0, 28.0, 5.0, 7.0]),
        ]
    }

    #[test]
    fn layers_stack_in_fuel_order() {
        let layers = stack_layers(&samples());
        assert_eq!(layers.len(), FuelType::COUNT);
        assert_eq!(layers[0].fuel, FuelType::Solar);
        assert_eq!(layers[1].points[0], StackPoint { x: layers[0].points[0].x, y0: 0.0, y1: 10.0 });
        for pair in layers.windows(2) {
            for (below, above) in pair[0].points.iter().zip(&pair[1].points) {
                assert_eq!(below.y1, above.y0);
            }
        }
        let top = layers.last().expect("layers");
        assert_eq!(top.points[0].y1, 55.0);
        assert_eq!(top.points[1].y1, 60.0);
    }

    #[test]
    fn totals_and_max() {
        let s = samples();
        assert_eq!(max_total(&s), 60.0);
        let totals = fuel_totals(&s);
        assert_eq!(totals[FuelType::Solar.index()], 4.0);
        assert_eq!(totals[FuelType::NaturalGas.index()], 58.0);
        assert_eq!(max_total(&[]), 0.0);
    }

    #[test]
    fn highlight_opacity() {
        for fuel in FuelType::ALL {
            assert_eq!(layer_opacity(fuel, None), 0.85);
        }
        assert_eq!(layer_opacity(FuelType::Wind, Some("wind")), 0.95);
        assert_eq!(layer_opacity(FuelType::Solar, Some("wind")), 0.15);
    }

    #[test]
    fn interval_splits_where_thickness_changes_sign() {
        let a = StackPoint { x: 0.0, y0: 10.0, y1: 14.0 };
        let b = StackPoint { x: 10.0, y0: 10.0, y1: 6.0 };
        let polys = interval_polygons(a, b);
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0], vec![[0.0, 10.0], [5.0, 10.0], [0.0, 14.0]]);
        assert_eq!(polys[1], vec![[5.0, 10.0], [10.0, 10.0], [10.0, 6.0]]);

        let c = StackPoint { x: 10.0, y0: 12.0, y1: 15.0 };
        assert_eq!(interval_polygons(a, c).len(), 1);
        let flat = StackPoint { x: 10.0, y0: 3.0, y1: 3.0 };
        assert!(interval_polygons(StackPoint { x: 0.0, y0: 1.0, y1: 1.0 }, flat).is_empty());
        // Touching zero at one end stays a single (degenerate-edge) quad.
        assert_eq!(interval_polygons(a, flat).len(), 1);
    }

    #[test]
    fn unknown_highlight_dims_every_layer() {
        for fuel in FuelType::ALL {
            assert_eq!(layer_opacity(fuel, Some("geothermal")), 0.15);
        }
    }
}
