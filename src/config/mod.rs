//! Configuration module for the dashboard.

// Can all be private now because we have a public re-export.
mod debug;
mod persistence;

// Public
pub mod constants;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use constants::{
    HEATMAP_LOCATIONS, HEATMAP_TICK_EVERY, LOG_PERFORMANCE, PREFERRED_LOCATION,
};
pub use debug::DF;
pub use persistence::{DATA_FILES, DEFAULT_DATA_DIR, DataFiles};
pub use plot::PLOT_CONFIG;
