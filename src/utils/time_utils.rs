use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::Timestamp;

pub type AppInstant = web_time::Instant;

pub const S_IN_H: f64 = 3600.0;

/// Tooltip format, e.g. `2025-12-01 14:00`.
pub const TOOLTIP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Axis tick format, e.g. `12-01 14:00`.
pub const AXIS_TIME_FORMAT: &str = "%m-%d %H:%M";

/// Epoch seconds used as the plot x coordinate.
pub fn to_plot_x(ts: &Timestamp) -> f64 {
    ts.timestamp_millis() as f64 / 1000.0
}

/// Inverse of `to_plot_x`, expressed in `offset` for display.
pub fn from_plot_x(x: f64, offset: FixedOffset) -> Option<Timestamp> {
    if !x.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis((x * 1000.0).round() as i64)
        .map(|utc| utc.with_timezone(&offset))
}

pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format(TOOLTIP_TIME_FORMAT).to_string()
}

pub fn format_axis_time(x: f64, offset: FixedOffset) -> String {
    from_plot_x(x, offset)
        .map(|t| t.format(AXIS_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_x_round_trips_in_source_offset() {
        let ts = DateTime::parse_from_rfc3339("2025-12-01T13:00:00-06:00").expect("valid");
        let x = to_plot_x(&ts);
        let back = from_plot_x(x, *ts.offset()).expect("in range");
        assert_eq!(back, ts);
        assert_eq!(format_timestamp(&back), "2025-12-01 13:00");
        assert_eq!(format_axis_time(x, *ts.offset()), "12-01 13:00");
    }

    #[test]
    fn non_finite_plot_x_has_no_time() {
        let utc = FixedOffset::east_opt(0).expect("valid offset");
        assert!(from_plot_x(f64::NAN, utc).is_none());
        assert_eq!(format_axis_time(f64::INFINITY, utc), "");
    }
}
