use {
    anyhow::{Context, Result},
    clap::Parser,
    grid_lens::{DataSources, DatasetStore, LoadEvent, config::DEFAULT_DATA_DIR, load_all},
    std::{path::PathBuf, sync::mpsc},
    tabled::{Table, settings::Style},
};

/// Loads every dataset and prints the header rollups without opening a window.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the CSV snapshots
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Print JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let sources = DataSources::in_dir(&args.data_dir);
    log::info!("Loading datasets from {:?}", sources.dir);

    let (tx, rx) = mpsc::channel();
    load_all(sources, tx).await;

    let mut store = DatasetStore::default();
    let mut failures = 0;
    for event in rx.try_iter() {
        match event {
            LoadEvent::Loaded(dataset) => {
                store.insert(dataset);
            }
            LoadEvent::Failed { kind, error } => {
                failures += 1;
                log::warn!("{} unavailable: {}", kind, error);
            }
            LoadEvent::AllSettled => break,
        }
    }

    let summary = store.summary();
    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to encode summary")?;
        println!("{}", json);
    } else {
        let mut table = Table::new(summary.rows());
        table.with(Style::rounded());
        println!("{}", table);
    }

    if failures > 0 {
        log::warn!("{} dataset(s) failed to load", failures);
    }
    Ok(())
}
