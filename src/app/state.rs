use {
    crate::data::{DatasetKind, LoadEvent},
    std::collections::BTreeMap,
    strum::IntoEnumIterator,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LoadStatus {
    Pending,
    /// Row count.
    Loaded(usize),
    Failed(String),
}

#[derive(Debug, Clone)]
pub(crate) struct LoadProgress {
    datasets: BTreeMap<DatasetKind, LoadStatus>,
    /// Set by `AllSettled`; the summary barrier.
    pub(crate) settled: bool,
}

impl Default for LoadProgress {
    fn default() -> Self {
        Self {
            datasets: DatasetKind::iter()
                .map(|k| (k, LoadStatus::Pending))
                .collect(),
            settled: false,
        }
    }
}

impl LoadProgress {
    pub(crate) fn apply(&mut self, event: &LoadEvent) {
        match event {
            LoadEvent::Loaded(dataset) => {
                self.datasets
                    .insert(dataset.kind(), LoadStatus::Loaded(dataset.len()));
            }
            LoadEvent::Failed { kind, error } => {
                self.datasets.insert(*kind, LoadStatus::Failed(error.clone()));
            }
            LoadEvent::AllSettled => self.settled = true,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&DatasetKind, &LoadStatus)> {
        self.datasets.iter()
    }

    pub(crate) fn total(&self) -> usize {
        self.datasets.len()
    }

    pub(crate) fn completed(&self) -> usize {
        self.datasets
            .values()
            .filter(|s| matches!(s, LoadStatus::Loaded(_)))
            .count()
    }

    pub(crate) fn failed(&self) -> usize {
        self.datasets
            .values()
            .filter(|s| matches!(s, LoadStatus::Failed(_)))
            .count()
    }

    /// Status of a view fed by several datasets: the first failure, else pending until all load.
    pub(crate) fn status_of(&self, kinds: &[DatasetKind]) -> LoadStatus {
        let statuses: Vec<&LoadStatus> = kinds
            .iter()
            .map(|k| self.datasets.get(k).unwrap_or(&LoadStatus::Pending))
            .collect();
        if let Some(failed) = statuses.iter().find(|s| matches!(s, LoadStatus::Failed(_))) {
            return (*failed).clone();
        }
        if statuses.iter().all(|s| matches!(s, LoadStatus::Loaded(_))) {
            LoadStatus::Loaded(
                statuses
                    .iter()
                    .map(|s| match s {
                        LoadStatus::Loaded(n) => *n,
                        _ => 0,
                    })
                    .sum(),
            )
        } else {
            LoadStatus::Pending
        }
    }
}
