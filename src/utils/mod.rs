mod perf;
pub mod time_utils;

pub use time_utils::{
    AXIS_TIME_FORMAT, AppInstant, S_IN_H, TOOLTIP_TIME_FORMAT, format_axis_time,
    format_timestamp, from_plot_x, to_plot_x,
};
