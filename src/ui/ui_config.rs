use eframe::egui::{Color32, CornerRadius, Frame, Margin, Stroke};

pub use crate::ui::ui_text::UI_TEXT;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub card: Color32,
}

#[derive(Default, Clone, Copy)]
pub struct ChartSizes {
    pub line_chart_height: f32,
    pub fuel_mix_height: f32,
    pub treemap_height: f32,
    pub heatmap_height: f32,
    /// Space reserved left of the heatmap for location labels.
    pub heatmap_label_gutter: f32,
    /// Space reserved right of the heatmap for the colour legend.
    pub heatmap_legend_gutter: f32,
    pub heatmap_axis_height: f32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub charts: ChartSizes,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(22, 22, 28),
        side_panel: Color32::from_rgb(25, 25, 25),
        card: Color32::from_rgb(35, 35, 42),
    },
    charts: ChartSizes {
        line_chart_height: 260.0,
        fuel_mix_height: 300.0,
        treemap_height: 300.0,
        heatmap_height: 320.0,
        heatmap_label_gutter: 90.0,
        heatmap_legend_gutter: 90.0,
        heatmap_axis_height: 24.0,
    },
};

impl UiConfig {
    /// Frame for the Top Toolbar (Standard padding)
    pub fn top_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    /// Frame for Bottom Status bar (Tighter vertical padding)
    pub fn bottom_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::symmetric(8, 4),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    /// Frame around one summary card in the header.
    pub fn card_frame(&self) -> Frame {
        Frame {
            fill: self.colors.card,
            stroke: Stroke::new(1.0, Color32::from_gray(60)),
            inner_margin: Margin::symmetric(12, 6),
            corner_radius: CornerRadius::same(4),
            ..Default::default()
        }
    }
}
