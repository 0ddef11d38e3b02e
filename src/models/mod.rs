pub mod axis;
pub mod heatmap;
pub mod hover;
pub mod prices;
pub mod stack;
pub mod summary;
pub mod treemap;

pub use axis::{BandScale, TimeAxis};
pub use heatmap::HeatmapGrid;
pub use prices::JoinedPrices;
pub use summary::Summary;
pub use treemap::TreemapCell;
