mod root;
mod state;

pub(crate) use state::{LoadProgress, LoadStatus};

pub use root::App;
