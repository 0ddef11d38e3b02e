//! Fuel share over the whole period as a squarified treemap. Hovering a cell drives `fuel-highlight`.

use {
    crate::{
        config::PLOT_CONFIG,
        domain::{FuelMixSample, FuelType},
        models::{
            TreemapCell,
            stack::fuel_totals,
            treemap::fuel_treemap,
        },
        shared::Coordinator,
        ui::{
            UI_CONFIG, UI_TEXT,
            styles::FuelColor,
            utils::{format_percent, format_thousands_fixed, humanize_key},
        },
    },
    eframe::egui::{
        Align2, CornerRadius, FontId, Pos2, Rect, RichText, Sense, Stroke, StrokeKind, Ui, vec2,
    },
    std::{rc::Rc, sync::Arc},
    strum::EnumCount,
};

pub(crate) struct TreemapView {
    coordinator: Rc<Coordinator>,
    totals: Option<[f64; FuelType::COUNT]>,
    /// Cells for the last laid-out size, in points relative to the chart origin.
    layout: Option<((u32, u32), Vec<TreemapCell>)>,
    hovered: Option<FuelType>,
}

impl TreemapView {
    pub(crate) fn new(coordinator: Rc<Coordinator>) -> Self {
        Self {
            coordinator,
            totals: None,
            layout: None,
            hovered: None,
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.totals.is_some()
    }

    pub(crate) fn on_loaded(&mut self, data: Arc<Vec<FuelMixSample>>) {
        self.totals = Some(fuel_totals(&data));
        self.layout = None;
    }

    fn cells(&mut self, width: f32, height: f32) -> &[TreemapCell] {
        let key = (width.round() as u32, height.round() as u32);
        let stale = self.layout.as_ref().is_none_or(|(size, _)| *size != key);
        if stale {
            let cells = self
                .totals
                .map(|t| fuel_treemap(&t, key.0 as f64, key.1 as f64))
                .unwrap_or_default();
            self.layout = Some((key, cells));
        }
        self.layout.as_ref().map(|(_, c)| c.as_slice()).unwrap_or_default()
    }

    /// Publishes only on transitions; leaving every cell publishes `None`.
    fn set_hovered(&mut self, fuel: Option<FuelType>) {
        if fuel == self.hovered {
            return;
        }
        self.hovered = fuel;
        self.coordinator.publish_fuel_highlight(fuel.map(FuelType::key));
    }

    pub(crate) fn show(&mut self, ui: &mut Ui) {
        if !self.is_loaded() {
            return;
        }
        let size = vec2(ui.available_width(), UI_CONFIG.charts.treemap_height);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let origin = response.rect.min;
        let cells = self.cells(size.x, size.y).to_vec();

        let to_rect = |cell: &TreemapCell| {
            Rect::from_min_max(
                origin + vec2(cell.tile.x0 as f32, cell.tile.y0 as f32),
                origin + vec2(cell.tile.x1 as f32, cell.tile.y1 as f32),
            )
        };

        let pointer = response.hover_pos();
        let hovered = pointer.and_then(|p| {
            let local = p - origin;
            cells
                .iter()
                .find(|c| c.tile.contains(local.x as f64, local.y as f64))
        });

        for cell in &cells {
            let rect = to_rect(cell);
            painter.rect_filled(rect, CornerRadius::ZERO, cell.fuel.color());
            let is_hovered = hovered.is_some_and(|h| h.fuel == cell.fuel);
            let stroke_width = if is_hovered { 2.5 } else { 1.0 };
            painter.rect_stroke(
                rect,
                CornerRadius::ZERO,
                Stroke::new(stroke_width, PLOT_CONFIG.treemap_cell_stroke),
                StrokeKind::Inside,
            );
            draw_label(&painter.with_clip_rect(rect), rect, cell);
        }

        self.set_hovered(hovered.map(|c| c.fuel));

        if let Some(cell) = hovered.cloned() {
            response.on_hover_ui_at_pointer(|ui| treemap_tooltip(ui, &cell));
        }
    }
}

fn draw_label(painter: &eframe::egui::Painter, rect: Rect, cell: &TreemapCell) {
    let font = FontId::proportional(PLOT_CONFIG.treemap_label_size);
    let pos = Pos2::new(rect.min.x + 4.0, rect.min.y + 4.0);
    painter.text(
        pos,
        Align2::LEFT_TOP,
        humanize_key(cell.fuel.key()),
        font.clone(),
        PLOT_CONFIG.treemap_label_color,
    );
    painter.text(
        pos + vec2(0.0, PLOT_CONFIG.treemap_label_size + 2.0),
        Align2::LEFT_TOP,
        format_percent(cell.share),
        font,
        PLOT_CONFIG.treemap_label_color,
    );
}

fn treemap_tooltip(ui: &mut Ui, cell: &TreemapCell) {
    ui.label(RichText::new(humanize_key(cell.fuel.key())).strong());
    ui.label(format!(
        "{}: {} MW {}",
        UI_TEXT.tt_total_generation,
        format_thousands_fixed(cell.value, 0),
        UI_TEXT.tt_sum_over_period
    ));
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_share_of_mix,
        format_percent(cell.share)
    ));
}
