// Domain types and value objects
mod fuel;
mod samples;
mod time_window;

// Re-export commonly used types to the world
pub use fuel::FuelType;
pub use samples::{
    CombinedPriceSample, DayAheadPriceSample, DemandSample, FuelMixSample, PriceSample,
    SystemPricePoint, Timestamp, Timestamped,
};
pub use time_window::TimeWindow;
