//! Pointer-to-sample lookup shared by every time-series chart.

use crate::domain::Timestamped;

/// Least index `i` with `items[i].plot_x() >= x`. Ties resolve to the first such sample.
/// Returns `items.len()` when every sample is before `x`.
pub fn bisect_left<T: Timestamped>(items: &[T], x: f64) -> usize {
    items.partition_point(|item| item.plot_x() < x)
}

/// Sample under the pointer: the left bisection clamped to `[0, n-1]`.
/// `None` only for an empty series.
pub fn nearest_index<T: Timestamped>(items: &[T], x: f64) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    Some(bisect_left(items, x).min(items.len() - 1))
}

pub fn nearest<T: Timestamped>(items: &[T], x: f64) -> Option<&T> {
    nearest_index(items, x).map(|i| &items[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DemandSample, Timestamp};
    use chrono::DateTime;

    fn sample(hour: u32) -> DemandSample {
        let timestamp: Timestamp =
            DateTime::parse_from_rfc3339(&format!("2025-12-01T{:02}:00:00+00:00", hour))
                .expect("valid timestamp");
        DemandSample {
            timestamp,
            actual_mw: hour as f64,
            current_forecast_mw: 0.0,
            day_ahead_forecast_mw: 0.0,
        }
    }

    fn series() -> Vec<DemandSample> {
        vec![sample(0), sample(1), sample(2)]
    }

    #[test]
    fn exact_hit_returns_that_sample() {
        let s = series();
        assert_eq!(nearest_index(&s, s[1].plot_x()), Some(1));
    }

    #[test]
    fn between_samples_returns_the_later_one() {
        let s = series();
        let x = (s[0].plot_x() + s[1].plot_x()) / 2.0;
        assert_eq!(nearest_index(&s, x), Some(1));
    }

    #[test]
    fn before_first_clamps_to_zero() {
        let s = series();
        assert_eq!(nearest_index(&s, s[0].plot_x() - 10_000.0), Some(0));
    }

    #[test]
    fn after_last_clamps_to_last() {
        let s = series();
        assert_eq!(bisect_left(&s, s[2].plot_x() + 1.0), 3);
        assert_eq!(nearest_index(&s, s[2].plot_x() + 1.0), Some(2));
        assert_eq!(nearest(&s, f64::INFINITY).map(|d| d.actual_mw), Some(2.0));
    }

    #[test]
    fn empty_series_has_no_sample() {
        let empty: Vec<DemandSample> = Vec::new();
        assert_eq!(nearest_index(&empty, 0.0), None);
    }
}
