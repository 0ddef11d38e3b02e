use {
    crate::{config::PLOT_CONFIG, domain::FuelType, ui::UI_CONFIG},
    eframe::egui::{Color32, CornerRadius, Response, RichText, Sense, Ui, vec2},
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

pub trait FuelColor {
    fn color(&self) -> Color32;
}

impl FuelColor for FuelType {
    fn color(&self) -> Color32 {
        PLOT_CONFIG.fuel_colors[self.index()]
    }
}

pub fn apply_opacity(color: Color32, factor: f32) -> Color32 {
    color.linear_multiply(factor)
}

/// Red above zero, green below, subdued at zero. Used for price deviations and spreads.
pub fn get_deviation_color(value: f64) -> Color32 {
    if value > 0.0 {
        PLOT_CONFIG.color_loss
    } else if value < 0.0 {
        PLOT_CONFIG.color_profit
    } else {
        PLOT_CONFIG.color_text_subdued
    }
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
    /// Legend row: colour swatch followed by a label.
    fn legend_swatch(&mut self, color: Color32, text: &str, strong: bool) -> Response;
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0; // Tight spacing
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn legend_swatch(&mut self, color: Color32, text: &str, strong: bool) -> Response {
        self.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
            ui.painter().rect_filled(rect, CornerRadius::same(2), color);
            let text = RichText::new(text).size(12.0);
            ui.label(if strong { text.strong() } else { text });
        })
        .response
    }
}
