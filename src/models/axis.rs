//! Scale state for the charts: the shared time axis, padded value domains and band scales.

use {
    crate::domain::TimeWindow,
    chrono::{FixedOffset, Offset, Utc},
    std::ops::RangeInclusive,
};

/// Time (x) axis of one chart: the full data extent plus the currently applied window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeAxis {
    full: Option<(f64, f64)>,
    window: Option<TimeWindow>,
    /// Display offset taken from the data, used for tick labels.
    offset: Option<FixedOffset>,
}

impl TimeAxis {
    /// Axis over `xs` (plot seconds). Empty input gives an unloaded axis.
    pub fn from_extent(xs: impl IntoIterator<Item = f64>, offset: FixedOffset) -> Self {
        let full = extent(xs);
        Self {
            full,
            window: None,
            offset: full.map(|_| offset),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.full.is_some()
    }

    /// Rescale to `window`, or back to the full extent on `None`. No-op before data arrives.
    pub fn set_window(&mut self, window: Option<TimeWindow>) {
        if self.full.is_none() {
            return;
        }
        self.window = window;
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    pub fn full_extent(&self) -> Option<(f64, f64)> {
        self.full
    }

    /// Visible domain: the window if set, else the full extent.
    pub fn domain(&self) -> Option<RangeInclusive<f64>> {
        match (self.window, self.full) {
            (Some(w), Some(_)) => Some(w.start()..=w.end()),
            (None, Some((lo, hi))) => Some(lo..=hi),
            _ => None,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset.unwrap_or_else(|| Utc.fix())
    }
}

/// Min and max of finite values.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// `[min * lower, max * upper]`, the multiplicative padding the charts use for y domains.
pub fn scaled_domain(
    values: impl IntoIterator<Item = f64>,
    lower: f64,
    upper: f64,
) -> Option<RangeInclusive<f64>> {
    let (lo, hi) = extent(values)?;
    Some(lo * lower..=hi * upper)
}

/// Ordinal band scale with d3 semantics: equal inner and outer padding, centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    range: (f64, f64),
    step: f64,
    start: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let (r0, r1) = range;
        let n = count as f64;
        let step = (r1 - r0) / (n - padding + 2.0 * padding).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self {
            count,
            range,
            step,
            start,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn position(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Band whose extent contains `v`, if any. Padding gaps belong to no band.
    pub fn index_at(&self, v: f64) -> Option<usize> {
        if self.count == 0 || self.step <= 0.0 || v < self.start {
            return None;
        }
        let i = ((v - self.start) / self.step).floor() as usize;
        (i < self.count && v <= self.position(i) + self.bandwidth).then_some(i)
    }
}
