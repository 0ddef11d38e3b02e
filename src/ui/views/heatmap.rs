//! Locational price grid: time bands across, fixed location order down, diverging colour.

use {
    crate::{
        config::{
            DF, HEATMAP_LOCATIONS, HEATMAP_TICK_EVERY, PLOT_CONFIG,
            constants::heatmap::{LEGEND_STEPS, LEGEND_TICKS, X_PADDING, Y_PADDING},
        },
        domain::PriceSample,
        models::{BandScale, HeatmapGrid, heatmap::diverging_gradient},
        shared::Coordinator,
        ui::{
            UI_CONFIG, UI_TEXT,
            styles::get_deviation_color,
            utils::{format_price, format_signed_price, format_whole_dollars},
        },
        utils::{AXIS_TIME_FORMAT, format_timestamp},
    },
    eframe::egui::{
        Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, RichText, Sense, Stroke,
        StrokeKind, Ui, pos2, vec2,
    },
    std::rc::Rc,
};

/// Gap between the grid and the colour legend bar.
const LEGEND_GAP: f32 = 16.0;

struct Bands {
    x: BandScale,
    y: BandScale,
}

pub(crate) struct HeatmapView {
    coordinator: Rc<Coordinator>,
    grid: Option<HeatmapGrid>,
    /// Cell colours in `grid.cells()` order, computed once per load.
    cells: Vec<(usize, usize, Color32)>,
    /// Legend swatches from the low end of the domain to the high end.
    legend: Vec<Color32>,
}

impl HeatmapView {
    pub(crate) fn new(coordinator: Rc<Coordinator>) -> Self {
        Self {
            coordinator,
            grid: None,
            cells: Vec::new(),
            legend: Vec::new(),
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.grid.is_some()
    }

    pub(crate) fn on_loaded(&mut self, rows: &[PriceSample]) {
        let grid = crate::trace_time!("build heatmap grid", 2_000, {
            HeatmapGrid::build(rows, HEATMAP_LOCATIONS)
        });
        let gradient = diverging_gradient();
        self.cells = grid
            .cells()
            .map(|c| (c.location_index, c.time_index, grid.color(&gradient, c.price)))
            .collect();
        self.legend = (0..LEGEND_STEPS)
            .map(|i| {
                let t = i as f64 / (LEGEND_STEPS - 1) as f64;
                grid.color(&gradient, -grid.max_abs + t * 2.0 * grid.max_abs)
            })
            .collect();
        self.grid = Some(grid);
    }

    fn select(&self, location: &str) {
        let delivered = self.coordinator.publish_hub_location(location);
        if DF.log_selection {
            log::info!("Heatmap selected {} (delivered: {})", location, delivered);
        }
    }

    pub(crate) fn show(&mut self, ui: &mut Ui) {
        let Some(grid) = self.grid.as_ref() else {
            return;
        };
        if grid.is_empty() {
            return;
        }
        let charts = &UI_CONFIG.charts;
        let size = vec2(ui.available_width(), charts.heatmap_height);
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let outer = response.rect;
        let plot = Rect::from_min_max(
            pos2(outer.min.x + charts.heatmap_label_gutter, outer.min.y),
            pos2(
                (outer.max.x - charts.heatmap_legend_gutter).max(outer.min.x + charts.heatmap_label_gutter + 1.0),
                outer.max.y - charts.heatmap_axis_height,
            ),
        );
        let bands = Bands {
            x: BandScale::new(
                grid.times.len(),
                (plot.min.x as f64, plot.max.x as f64),
                X_PADDING,
            ),
            y: BandScale::new(
                grid.locations.len(),
                (plot.min.y as f64, plot.max.y as f64),
                Y_PADDING,
            ),
        };
        let cell_rect = |li: usize, ti: usize| {
            Rect::from_min_size(
                pos2(bands.x.position(ti) as f32, bands.y.position(li) as f32),
                vec2(bands.x.bandwidth() as f32, bands.y.bandwidth() as f32),
            )
        };

        for &(li, ti, color) in &self.cells {
            painter.rect_filled(cell_rect(li, ti), CornerRadius::ZERO, color);
        }
        draw_axes(&painter, grid, &bands, plot);
        draw_legend(&painter, grid, &self.legend, plot);

        let hovered = response.hover_pos().and_then(|p| {
            let ti = bands.x.index_at(p.x as f64)?;
            let li = bands.y.index_at(p.y as f64)?;
            grid.price(li, ti).map(|_| (li, ti))
        });
        if let Some((li, ti)) = hovered {
            painter.rect_stroke(
                cell_rect(li, ti),
                CornerRadius::ZERO,
                Stroke::new(1.5, PLOT_CONFIG.heatmap_hover_stroke),
                StrokeKind::Inside,
            );
        }

        let clicked = response.clicked();
        if let Some((li, ti)) = hovered {
            response.on_hover_ui_at_pointer(|ui| heatmap_tooltip(ui, grid, li, ti));
        }
        if clicked {
            if let Some(location) = hovered.and_then(|(li, _)| grid.locations.get(li)) {
                self.select(location);
            }
        }
    }
}

fn draw_axes(painter: &Painter, grid: &HeatmapGrid, bands: &Bands, plot: Rect) {
    let font = FontId::proportional(PLOT_CONFIG.heatmap_label_size);
    let color = PLOT_CONFIG.color_text_neutral;

    for (li, location) in grid.locations.iter().enumerate() {
        let y = bands.y.position(li) + bands.y.bandwidth() / 2.0;
        painter.text(
            pos2(plot.min.x - 6.0, y as f32),
            Align2::RIGHT_CENTER,
            location,
            font.clone(),
            color,
        );
    }

    for (ti, time) in grid.times.iter().enumerate().step_by(HEATMAP_TICK_EVERY) {
        let x = bands.x.position(ti) + bands.x.bandwidth() / 2.0;
        painter.text(
            pos2(x as f32, plot.max.y + 4.0),
            Align2::CENTER_TOP,
            time.format(AXIS_TIME_FORMAT).to_string(),
            font.clone(),
            color,
        );
    }
}

/// Vertical bar, high prices at the top, with evenly spaced dollar ticks.
fn draw_legend(painter: &Painter, grid: &HeatmapGrid, swatches: &[Color32], plot: Rect) {
    if swatches.is_empty() {
        return;
    }
    let font = FontId::proportional(PLOT_CONFIG.heatmap_label_size);
    let x0 = plot.max.x + LEGEND_GAP;
    let top = plot.min.y + 16.0;
    let bottom = plot.max.y;
    let bar = Rect::from_min_max(pos2(x0, top), pos2(x0 + PLOT_CONFIG.heatmap_legend_width, bottom));
    let step_h = bar.height() / swatches.len() as f32;

    for (i, color) in swatches.iter().enumerate() {
        let y1 = bar.max.y - i as f32 * step_h;
        let swatch = Rect::from_min_max(pos2(bar.min.x, y1 - step_h), pos2(bar.max.x, y1));
        painter.rect_filled(swatch.expand2(vec2(0.0, 0.5)), CornerRadius::ZERO, *color);
    }
    painter.rect_stroke(
        bar,
        CornerRadius::ZERO,
        Stroke::new(1.0, PLOT_CONFIG.color_widget_border),
        StrokeKind::Outside,
    );

    for (value, t) in legend_ticks(grid.max_abs) {
        let y = bar.max.y - t as f32 * bar.height();
        painter.text(
            Pos2::new(bar.max.x + 4.0, y),
            Align2::LEFT_CENTER,
            format_whole_dollars(value),
            font.clone(),
            PLOT_CONFIG.color_text_neutral,
        );
    }
    painter.text(
        pos2(bar.min.x, plot.min.y),
        Align2::LEFT_TOP,
        UI_TEXT.legend_price.as_str(),
        font,
        PLOT_CONFIG.color_text_primary,
    );
}

/// `(price, fraction up the bar)` for each legend tick across `[-max_abs, max_abs]`.
fn legend_ticks(max_abs: f64) -> Vec<(f64, f64)> {
    (0..LEGEND_TICKS)
        .map(|i| {
            let t = i as f64 / (LEGEND_TICKS - 1) as f64;
            (-max_abs + t * 2.0 * max_abs, t)
        })
        .collect()
}

fn heatmap_tooltip(ui: &mut Ui, grid: &HeatmapGrid, li: usize, ti: usize) {
    let (Some(location), Some(time), Some(price)) = (
        grid.locations.get(li),
        grid.times.get(ti),
        grid.price(li, ti),
    ) else {
        return;
    };
    ui.label(RichText::new(location).strong());
    ui.label(format_timestamp(time));
    ui.separator();
    ui.label(format!("{}: {}", UI_TEXT.tt_price, format_price(price)));
    if let Some(avg) = grid.system_avg.get(ti) {
        ui.label(format!("{}: {}", UI_TEXT.tt_system_avg, format_price(*avg)));
    }
    if let Some(dev) = grid.deviation(li, ti) {
        ui.label(
            RichText::new(format!(
                "{}: {}",
                UI_TEXT.tt_deviation,
                format_signed_price(dev)
            ))
            .color(get_deviation_color(dev)),
        );
    }
}

#[cfg(test)]
mod tests {
    use {super::*, chrono::DateTime, std::cell::RefCell};

    fn row(hour: u32, location: &str, price: f64) -> PriceSample {
        PriceSample {
            timestamp: DateTime::parse_from_rfc3339(&format!("2025-12-01T{:02}:00:00-06:00", hour))
                .expect("valid timestamp"),
            location: location.to_string(),
            price,
        }
    }

    #[test]
    fn load_precomputes_cells_and_legend() {
        let mut view = HeatmapView::new(Rc::new(Coordinator::new()));
        view.on_loaded(&[
            row(0, "HB_NORTH", 20.0),
            row(0, "HB_HOUSTON", -40.0),
            row(1, "HB_NORTH", 30.0),
            row(1, "HB_PAN", 10.0),
        ]);
        assert!(view.is_loaded());
        // HB_PAN is off the grid.
        assert_eq!(view.cells.len(), 3);
        assert_eq!(view.legend.len(), LEGEND_STEPS);
        assert_eq!(view.legend.first(), view.cells.iter().find(|c| c.0 == 1).map(|c| &c.2));
    }

    #[test]
    fn ticks_span_symmetric_domain() {
        let ticks = legend_ticks(40.0);
        assert_eq!(ticks.len(), LEGEND_TICKS);
        assert_eq!(ticks.first(), Some(&(-40.0, 0.0)));
        assert_eq!(ticks.last(), Some(&(40.0, 1.0)));
        assert_eq!(ticks[2].0, 0.0);
    }

    #[test]
    fn selecting_publishes_hub_location() {
        let coordinator = Rc::new(Coordinator::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        coordinator.subscribe_hub_location(move |loc| sink.borrow_mut().push(loc));

        let view = HeatmapView::new(coordinator.clone());
        view.select("LZ_WEST");
        view.select("LZ_WEST");
        assert_eq!(*seen.borrow(), vec!["LZ_WEST".to_string(), "LZ_WEST".to_string()]);
    }
}
