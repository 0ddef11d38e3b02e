use {
    crate::{
        config::DF,
        data::loader::{Dataset, DatasetKind},
        domain::{DayAheadPriceSample, DemandSample, FuelMixSample, PriceSample},
        models::{JoinedPrices, Summary},
    },
    std::sync::Arc,
};

/// Every dataset that has arrived so far, plus the RT/DA join once both price sets are in.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    pub demand: Option<Arc<Vec<DemandSample>>>,
    pub fuel_mix: Option<Arc<Vec<FuelMixSample>>>,
    pub rt_prices: Option<Arc<Vec<PriceSample>>>,
    pub da_prices: Option<Arc<Vec<DayAheadPriceSample>>>,
    pub joined: Option<Arc<JoinedPrices>>,
}

impl DatasetStore {
    /// Stores a dataset and returns its kind. Rebuilds the price join when it becomes possible.
    pub fn insert(&mut self, dataset: Dataset) -> DatasetKind {
        let kind = dataset.kind();
        match dataset {
            Dataset::Demand(rows) => self.demand = Some(Arc::new(rows)),
            Dataset::FuelMix(rows) => self.fuel_mix = Some(Arc::new(rows)),
            Dataset::RealTimePrices(rows) => self.rt_prices = Some(Arc::new(rows)),
            Dataset::DayAheadPrices(rows) => self.da_prices = Some(Arc::new(rows)),
        }

        if matches!(
            kind,
            DatasetKind::RealTimePrices | DatasetKind::DayAheadPrices
        ) {
            self.rebuild_join();
        }
        kind
    }

    fn rebuild_join(&mut self) {
        let (Some(rt), Some(da)) = (&self.rt_prices, &self.da_prices) else {
            return;
        };
        let joined = JoinedPrices::build(rt, da);
        if DF.log_loads {
            log::info!(
                "Joined {} RT rows across {} locations",
                joined.combined.len(),
                joined.locations.len()
            );
        }
        if joined.unmatched_day_ahead > 0 {
            log::warn!(
                "{} day-ahead rows have no real-time partner and were dropped",
                joined.unmatched_day_ahead
            );
        }
        self.joined = Some(Arc::new(joined));
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(
            self.demand.as_deref().map(Vec::as_slice),
            self.rt_prices.as_deref().map(Vec::as_slice),
            self.joined.as_deref().map(|j| j.combined.as_slice()),
        )
    }
}
