//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Every publish on the coordinator, with whether a subscriber received it.
    pub log_coordinator: bool,

    /// Subscriber (re)registration.
    pub log_subscriptions: bool,

    /// Per-dataset load completion, row counts and join statistics.
    pub log_loads: bool,

    /// Brush gestures on the demand chart.
    pub log_brush: bool,

    /// Location picker and heatmap-driven selection.
    pub log_selection: bool,
}

pub const DF: LogFlags = LogFlags {
    log_loads: true,
    log_selection: true,

    log_coordinator: false,
    log_subscriptions: false,
    log_brush: false,
};
