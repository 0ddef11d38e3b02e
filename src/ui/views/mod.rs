mod demand;
mod fuel_mix;
mod heatmap;
mod hub_price;
mod treemap;

pub(crate) use {
    demand::DemandView, fuel_mix::FuelMixView, heatmap::HeatmapView, hub_price::HubPriceView,
    treemap::TreemapView,
};

use chrono::{FixedOffset, Offset, Utc};

/// Splits a series into runs of consecutive defined points, so absent values draw as gaps.
pub(crate) fn defined_segments(points: impl IntoIterator<Item = (f64, Option<f64>)>) -> Vec<Vec<[f64; 2]>> {
    let mut segments: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (x, y) in points {
        match y {
            Some(y) => current.push([x, y]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Display offset of a series: the offset of its first timestamp, else UTC.
pub(crate) fn series_offset(first: Option<&crate::domain::Timestamp>) -> FixedOffset {
    first.map(|t| *t.offset()).unwrap_or_else(|| Utc.fix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_split_segments() {
        let segs = defined_segments([
            (0.0, Some(1.0)),
            (1.0, None),
            (2.0, Some(3.0)),
            (3.0, Some(4.0)),
            (4.0, None),
        ]);
        assert_eq!(segs, vec![vec![[0.0, 1.0]], vec![[2.0, 3.0], [3.0, 4.0]]]);
        assert!(defined_segments([(0.0, None)]).is_empty());
    }
}
