mod screens;
mod styles;
mod ui_config;
mod ui_render;
mod ui_text;
pub mod utils;
mod views;

pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub(crate) use views::{DemandView, FuelMixView, HeatmapView, HubPriceView, TreemapView};
