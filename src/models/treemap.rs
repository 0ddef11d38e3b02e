//! Squarified treemap layout (Bruls et al.), with the row-packing and inner padding rules of d3-hierarchy.

use crate::{
    config::constants::treemap::{PADDING_INNER, SQUARIFY_RATIO},
    domain::FuelType,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Tile {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    #[cfg(test)]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    fn shrink(self, p: f64) -> Self {
        let (x0, x1) = collapse(self.x0 + p, self.x1 - p);
        let (y0, y1) = collapse(self.y0 + p, self.y1 - p);
        Self { x0, y0, x1, y1 }
    }
}

fn collapse(a: f64, b: f64) -> (f64, f64) {
    if b < a {
        let mid = (a + b) / 2.0;
        (mid, mid)
    } else {
        (a, b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreemapCell {
    pub fuel: FuelType,
    /// Total MW over the period.
    pub value: f64,
    /// Fraction of the whole mix.
    pub share: f64,
    pub tile: Tile,
}

/// Lays out one cell per fuel with a positive total inside `width` x `height`.
/// Cells keep fuel order; zero totals are omitted.
pub fn fuel_treemap(totals: &[f64], width: f64, height: f64) -> Vec<TreemapCell> {
    let items: Vec<(FuelType, f64)> = FuelType::ALL
        .iter()
        .zip(totals)
        .filter(|(_, v)| **v > 0.0)
        .map(|(f, v)| (*f, *v))
        .collect();
    let sum: f64 = items.iter().map(|(_, v)| v).sum();
    let values: Vec<f64> = items.iter().map(|(_, v)| *v).collect();

    squarify(&values, width, height, PADDING_INNER)
        .into_iter()
        .zip(items)
        .map(|(tile, (fuel, value))| TreemapCell {
            fuel,
            value,
            share: value / sum,
            tile,
        })
        .collect()
}

/// Leaf tiles for `values` (all positive) in input order.
/// Inner padding separates siblings by `padding` and leaves no outer margin.
pub fn squarify(values: &[f64], width: f64, height: f64, padding: f64) -> Vec<Tile> {
    let total: f64 = values.iter().sum();
    if values.is_empty() || !(total > 0.0) || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let half = padding / 2.0;
    let bounds = Tile {
        x0: -half,
        y0: -half,
        x1: width + half,
        y1: height + half,
    };
    layout_rows(values, total, bounds, SQUARIFY_RATIO)
        .into_iter()
        .map(|t| t.shrink(half))
        .collect()
}

fn layout_rows(values: &[f64], total: f64, bounds: Tile, ratio: f64) -> Vec<Tile> {
    let n = values.len();
    let mut tiles = Vec::with_capacity(n);
    let Tile {
        mut x0,
        mut y0,
        x1,
        y1,
    } = bounds;
    let mut remaining = total;
    let mut i0 = 0;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        let mut i1 = i0;
        let mut row_sum = values[i1];
        i1 += 1;
        let mut min_value = row_sum;
        let mut max_value = row_sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
        let mut beta = row_sum * row_sum * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        // Grow the row while the worst aspect ratio keeps improving.
        while i1 < n {
            let v = values[i1];
            row_sum += v;
            min_value = min_value.min(v);
            max_value = max_value.max(v);
            beta = row_sum * row_sum * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                row_sum -= v;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let row = &values[i0..i1];
        if dx < dy {
            let y = y0 + dy * row_sum / remaining;
            dice(row, row_sum, x0, y0, x1, y, &mut tiles);
            y0 = y;
        } else {
            let x = x0 + dx * row_sum / remaining;
            slice(row, row_sum, x0, y0, x, y1, &mut tiles);
            x0 = x;
        }
        remaining -= row_sum;
        i0 = i1;
    }
    tiles
}

/// Side-by-side split along x.
fn dice(row: &[f64], sum: f64, x0: f64, y0: f64, x1: f64, y1: f64, out: &mut Vec<Tile>) {
    let k = (x1 - x0) / sum;
    let mut x = x0;
    for v in row {
        let next = x + v * k;
        out.push(Tile { x0: x, y0, x1: next, y1 });
        x = next;
    }
}

/// Stacked split along y.
fn slice(row: &[f64], sum: f64, x0: f64, y0: f64, x1: f64, y1: f64, out: &mut Vec<Tile>) {
    let k = (y1 - y0) / sum;
    let mut y = y0;
    for v in row {
        let next = y + v * k;
        out.push(Tile { x0, y0: y, x1, y1: next });
        y = next;
    }
}
