//! Input file locations

/// CSV snapshot file names, relative to the data directory.
pub struct DataFiles {
    pub demand: &'static str,
    pub fuel_mix: &'static str,
    pub rt_prices: &'static str,
    pub da_prices: &'static str,
}

pub const DATA_FILES: DataFiles = DataFiles {
    demand: "ercot_demand_2025-12-01_to_2025-12-03.csv",
    fuel_mix: "ercot_fuelmix_hourly.csv",
    rt_prices: "ercot_lmp_hourly.csv",
    da_prices: "ercot_day_ahead_hourly.csv",
};

/// Default data directory when `--data-dir` is not given.
pub const DEFAULT_DATA_DIR: &str = "data";
