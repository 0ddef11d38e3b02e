//! Plot visualization configuration

use {crate::domain::FuelType, eframe::egui::Color32, strum::EnumCount};

pub struct PlotConfig {
    /// One colour per fuel, indexed by `FuelType::index()`. Shared by the area chart and the treemap.
    pub fuel_colors: [Color32; FuelType::COUNT],

    // --- DEMAND SERIES ---
    pub demand_actual_color: Color32,
    pub demand_current_forecast_color: Color32,
    pub demand_day_ahead_color: Color32,

    // --- HUB PRICE SERIES ---
    pub hub_selected_color: Color32,
    pub hub_system_color: Color32,

    pub series_line_width: f32,
    /// DA lines are drawn dashed so they read apart from RT in the same colour.
    pub day_ahead_dash_length: f32,
    pub focus_marker_radius: f32,

    // --- FUEL LAYER OPACITY ---
    pub layer_opacity_default: f32,
    pub layer_opacity_match: f32,
    pub layer_opacity_dimmed: f32,

    // --- BRUSH ---
    pub brush_fill_color: Color32,
    pub brush_stroke_color: Color32,
    /// Drags narrower than this (in plot seconds) count as a click and clear the window.
    pub brush_min_width_s: f64,

    // --- TREEMAP ---
    pub treemap_cell_stroke: Color32,
    pub treemap_label_color: Color32,
    pub treemap_label_size: f32,

    // --- HEATMAP ---
    pub heatmap_label_size: f32,
    pub heatmap_legend_width: f32,
    pub heatmap_hover_stroke: Color32,

    // --- SEMANTIC COLORS ---
    pub color_profit: Color32,
    pub color_loss: Color32,
    pub color_warning: Color32,
    pub color_text_primary: Color32,
    pub color_text_neutral: Color32,
    pub color_text_subdued: Color32,

    // UI WIDGET STYLES
    pub color_widget_border: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    fuel_colors: [
        Color32::from_rgb(0xf4, 0xc2, 0x0d), // solar
        Color32::from_rgb(0x1a, 0x73, 0xe8), // wind
        Color32::from_rgb(0x34, 0xa8, 0x53), // hydro
        Color32::from_rgb(0xa1, 0x42, 0xf4), // storage
        Color32::from_rgb(0x9e, 0x9e, 0x9e), // other
        Color32::from_rgb(0xff, 0x6d, 0x01), // gas
        Color32::from_rgb(0x5f, 0x63, 0x68), // coal
        Color32::from_rgb(0x0b, 0x80, 0x43), // nuclear
    ],

    demand_actual_color: Color32::from_rgb(0x1a, 0x73, 0xe8),
    demand_current_forecast_color: Color32::from_rgb(0xff, 0x6d, 0x01),
    demand_day_ahead_color: Color32::from_rgb(0x9e, 0x9e, 0x9e),

    hub_selected_color: Color32::from_rgb(0xff, 0x6d, 0x01),
    hub_system_color: Color32::from_rgb(0x4b, 0x4d, 0xf0),

    series_line_width: 2.0,
    day_ahead_dash_length: 6.0,
    focus_marker_radius: 4.0,

    layer_opacity_default: 0.85,
    layer_opacity_match: 0.95,
    layer_opacity_dimmed: 0.15,

    brush_fill_color: Color32::from_rgba_premultiplied(60, 60, 90, 60),
    brush_stroke_color: Color32::from_rgb(140, 140, 200),
    brush_min_width_s: 60.0,

    treemap_cell_stroke: Color32::WHITE,
    treemap_label_color: Color32::WHITE,
    treemap_label_size: 11.0,

    heatmap_label_size: 10.0,
    heatmap_legend_width: 12.0,
    heatmap_hover_stroke: Color32::WHITE,

    color_profit: Color32::from_rgb(100, 255, 100),
    color_loss: Color32::from_rgb(255, 80, 80),
    color_warning: Color32::from_rgb(255, 215, 0), // Gold

    color_text_primary: Color32::WHITE,
    color_text_neutral: Color32::LIGHT_GRAY,
    color_text_subdued: Color32::GRAY,

    color_widget_border: Color32::from_gray(60),
};
