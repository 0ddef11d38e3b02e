// Concurrent dataset loading. Runs on a background runtime so the UI thread never blocks on disk.

use {
    crate::{
        config::{DATA_FILES, DF},
        data::csv_loader::{parse_da_prices, parse_demand, parse_fuel_mix, parse_rt_prices},
        domain::{DayAheadPriceSample, DemandSample, FuelMixSample, PriceSample},
    },
    anyhow::{Context, Result},
    futures::future::join_all,
    std::{
        fs::File,
        io::BufReader,
        path::{Path, PathBuf},
        sync::mpsc::{self, Receiver, Sender},
        thread,
    },
    strum::IntoEnumIterator,
    strum_macros::{Display, EnumIter},
    tokio::runtime::Runtime,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum DatasetKind {
    #[strum(to_string = "Demand")]
    Demand,
    #[strum(to_string = "Fuel mix")]
    FuelMix,
    #[strum(to_string = "Real-time LMP")]
    RealTimePrices,
    #[strum(to_string = "Day-ahead LMP")]
    DayAheadPrices,
}

#[derive(Debug, Clone)]
pub enum Dataset {
    Demand(Vec<DemandSample>),
    FuelMix(Vec<FuelMixSample>),
    RealTimePrices(Vec<PriceSample>),
    DayAheadPrices(Vec<DayAheadPriceSample>),
}

impl Dataset {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Self::Demand(_) => DatasetKind::Demand,
            Self::FuelMix(_) => DatasetKind::FuelMix,
            Self::RealTimePrices(_) => DatasetKind::RealTimePrices,
            Self::DayAheadPrices(_) => DatasetKind::DayAheadPrices,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Demand(rows) => rows.len(),
            Self::FuelMix(rows) => rows.len(),
            Self::RealTimePrices(rows) => rows.len(),
            Self::DayAheadPrices(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Progress reported by the loader, in completion order.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    Loaded(Dataset),
    Failed { kind: DatasetKind, error: String },
    /// Sent exactly once, after every dataset has reported.
    AllSettled,
}

/// Where each dataset lives on disk.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub dir: PathBuf,
}

impl DataSources {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, kind: DatasetKind) -> PathBuf {
        let file = match kind {
            DatasetKind::Demand => DATA_FILES.demand,
            DatasetKind::FuelMix => DATA_FILES.fuel_mix,
            DatasetKind::RealTimePrices => DATA_FILES.rt_prices,
            DatasetKind::DayAheadPrices => DATA_FILES.da_prices,
        };
        self.dir.join(file)
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).context(format!("Failed to open {:?}", path))?;
    Ok(BufReader::new(file))
}

pub fn load_demand(path: &Path) -> Result<Vec<DemandSample>> {
    parse_demand(open(path)?).context(format!("Failed to parse {:?}", path))
}

pub fn load_fuel_mix(path: &Path) -> Result<Vec<FuelMixSample>> {
    parse_fuel_mix(open(path)?).context(format!("Failed to parse {:?}", path))
}

pub fn load_rt_prices(path: &Path) -> Result<Vec<PriceSample>> {
    parse_rt_prices(open(path)?).context(format!("Failed to parse {:?}", path))
}

pub fn load_da_prices(path: &Path) -> Result<Vec<DayAheadPriceSample>> {
    parse_da_prices(open(path)?).context(format!("Failed to parse {:?}", path))
}

/// Blocking load of one dataset.
pub fn load_dataset(kind: DatasetKind, path: &Path) -> Result<Dataset> {
    Ok(match kind {
        DatasetKind::Demand => Dataset::Demand(load_demand(path)?),
        DatasetKind::FuelMix => Dataset::FuelMix(load_fuel_mix(path)?),
        DatasetKind::RealTimePrices => Dataset::RealTimePrices(load_rt_prices(path)?),
        DatasetKind::DayAheadPrices => Dataset::DayAheadPrices(load_da_prices(path)?),
    })
}

/// Loads every dataset concurrently. Each completion is sent as soon as it happens,
/// then `AllSettled` once all of them have resolved.
pub async fn load_all(sources: DataSources, tx: Sender<LoadEvent>) {
    let tasks = DatasetKind::iter().map(|kind| {
        let path = sources.path(kind);
        let tx = tx.clone();
        async move {
            let event = match tokio::task::spawn_blocking(move || load_dataset(kind, &path)).await
            {
                Ok(Ok(dataset)) => {
                    if DF.log_loads {
                        log::info!("Loaded {} ({} rows)", kind, dataset.len());
                    }
                    LoadEvent::Loaded(dataset)
                }
                Ok(Err(e)) => {
                    log::error!("Failed to load {}: {:#}", kind, e);
                    LoadEvent::Failed {
                        kind,
                        error: format!("{:#}", e),
                    }
                }
                Err(join_error) => {
                    log::error!("Load task for {} did not complete: {}", kind, join_error);
                    LoadEvent::Failed {
                        kind,
                        error: join_error.to_string(),
                    }
                }
            };
            // Receiver gone means the app is shutting down.
            let _ = tx.send(event);
        }
    });

    join_all(tasks).await;
    let _ = tx.send(LoadEvent::AllSettled);
}

/// Starts all loads on a background thread and returns the event stream.
pub fn spawn_loads(sources: DataSources) -> Receiver<LoadEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || match Runtime::new() {
        Ok(rt) => rt.block_on(load_all(sources, tx)),
        Err(e) => {
            log::error!("Failed to create loader runtime: {}", e);
            for kind in DatasetKind::iter() {
                let _ = tx.send(LoadEvent::Failed {
                    kind,
                    error: format!("loader runtime unavailable: {}", e),
                });
            }
            let _ = tx.send(LoadEvent::AllSettled);
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("grid_lens_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn write_fixtures(dir: &Path) {
        let sources = DataSources::in_dir(dir);
        fs::write(
            sources.path(DatasetKind::Demand),
            "timestamp,actual_MW,current_forecast_MW,day_ahead_forecast_MW\n\
             2025-12-01T00:00:00-06:00,100,99,98\n",
        )
        .expect("write demand");
        fs::write(
            sources.path(DatasetKind::FuelMix),
            "timestamp,solar,wind\n2025-12-01T00:00:00-06:00,1,2\n",
        )
        .expect("write fuel mix");
        fs::write(
            sources.path(DatasetKind::RealTimePrices),
            "timestamp,location,price\n2025-12-01T00:00:00-06:00,HB_NORTH,20\n",
        )
        .expect("write rt");
        fs::write(
            sources.path(DatasetKind::DayAheadPrices),
            "timestamp,SettlementPoint,SettlementPointPrice\n\
             2025-12-01T00:00:00-06:00,HB_NORTH,18\n",
        )
        .expect("write da");
    }

    fn drain(rx: Receiver<LoadEvent>) -> Vec<LoadEvent> {
        rx.iter().collect()
    }

    #[test]
    fn every_dataset_reports_before_all_settled() {
        let dir = scratch_dir("all_ok");
        write_fixtures(&dir);

        let events = drain(spawn_loads(DataSources::in_dir(&dir)));

        assert_eq!(events.len(), DatasetKind::iter().count() + 1);
        assert!(matches!(events.last(), Some(LoadEvent::AllSettled)));
        let mut kinds: Vec<DatasetKind> = events
            .iter()
            .filter_map(|e| match e {
                LoadEvent::Loaded(ds) => Some(ds.kind()),
                _ => None,
            })
            .collect();
        kinds.sort();
        assert_eq!(kinds, DatasetKind::iter().collect::<Vec<_>>());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_files_fail_without_blocking_the_barrier() {
        let dir = scratch_dir("missing");
        let events = drain(spawn_loads(DataSources::in_dir(&dir)));

        let failed = events
            .iter()
            .filter(|e| matches!(e, LoadEvent::Failed { .. }))
            .count();
        assert_eq!(failed, DatasetKind::iter().count());
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, LoadEvent::AllSettled))
                .count(),
            1
        );
        assert!(matches!(events.last(), Some(LoadEvent::AllSettled)));

        let _ = fs::remove_dir_all(&dir);
    }
}
