#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
mod shared;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the summary binary)
pub use app::App;
pub use data::{DataSources, DatasetStore, LoadEvent, load_all};
pub use models::Summary;

// CLI argument parsing
use {clap::Parser, std::path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the CSV snapshots
    #[arg(long, default_value = config::DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Hub shown by the price chart at startup, when present in the data
    #[arg(long, default_value = config::PREFERRED_LOCATION)]
    pub preferred_location: String,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
