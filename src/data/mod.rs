mod csv_loader;
mod loader;
mod store;

pub use {
    csv_loader::{parse_da_prices, parse_demand, parse_fuel_mix, parse_rt_prices},
    loader::{
        DataSources, Dataset, DatasetKind, LoadEvent, load_all, load_da_prices, load_dataset,
        load_demand, load_fuel_mix, load_rt_prices, spawn_loads,
    },
    store::DatasetStore,
};
