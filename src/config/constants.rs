// Top Level Constants

/// Hub shown by the price chart when the data contains it.
pub const PREFERRED_LOCATION: &str = "HB_HOUSTON";

/// Row order of the LMP heatmap. Locations outside this list are not drawn.
pub const HEATMAP_LOCATIONS: &[&str] = &[
    "HB_NORTH",
    "HB_HOUSTON",
    "HB_SOUTH",
    "HB_WEST",
    "LZ_NORTH",
    "LZ_HOUSTON",
    "LZ_SOUTH",
    "LZ_WEST",
];

/// Label every n-th heatmap column.
pub const HEATMAP_TICK_EVERY: usize = 6;

/// Activates the trace_time macro.
pub const LOG_PERFORMANCE: bool = false;

pub mod scales {
    /// Demand y domain is [min * LOWER, max * UPPER] over all three series.
    pub const DEMAND_Y_LOWER: f64 = 0.98;
    pub const DEMAND_Y_UPPER: f64 = 1.02;

    /// Price y domain is [min * (1 - PAD), max * (1 + PAD)] over RT and DA.
    pub const PRICE_Y_PAD: f64 = 0.05;

    /// Fuel mix y domain is [0, max stacked total * HEADROOM].
    pub const FUEL_MIX_HEADROOM: f64 = 1.05;
}

pub mod treemap {
    /// Gap between neighbouring cells, in points.
    pub const PADDING_INNER: f64 = 2.0;
    /// Target aspect ratio of the squarified layout (golden ratio).
    pub const SQUARIFY_RATIO: f64 = 1.618_033_988_749_895;
}

pub mod heatmap {
    /// d3-style band padding for the time (x) and location (y) bands.
    pub const X_PADDING: f64 = 0.01;
    pub const Y_PADDING: f64 = 0.05;
    pub const LEGEND_STEPS: usize = 24;
    pub const LEGEND_TICKS: usize = 5;
}
