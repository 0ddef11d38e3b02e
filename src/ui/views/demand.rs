//! System demand: actual and forecast load, with a horizontal brush that drives the shared time window.

use {
    crate::{
        config::{
            DF, PLOT_CONFIG,
            constants::scales::{DEMAND_Y_LOWER, DEMAND_Y_UPPER},
        },
        domain::{DemandSample, TimeWindow, Timestamped},
        models::{TimeAxis, axis::scaled_domain, hover},
        shared::{Coordinator, LinkedTimeView},
        ui::{
            UI_CONFIG, UI_TEXT,
            utils::{format_mw, format_thousands, time_axis_hints, time_grid_marks},
            views::series_offset,
        },
        utils::format_timestamp,
    },
    eframe::egui::{RichText, Stroke, Ui},
    egui_plot::{AxisHints, Legend, Line, LineStyle, Plot, PlotPoints, PlotResponse, Points, Polygon},
    std::{ops::RangeInclusive, rc::Rc, sync::Arc},
};

pub(crate) struct DemandView {
    coordinator: Rc<Coordinator>,
    data: Option<Arc<Vec<DemandSample>>>,
    /// Fixed at the full extent. Its window is the brush, not the visible range.
    axis: TimeAxis,
    y_domain: Option<RangeInclusive<f64>>,
    drag_anchor: Option<f64>,
}

impl DemandView {
    pub(crate) fn new(coordinator: Rc<Coordinator>) -> Self {
        Self {
            coordinator,
            data: None,
            axis: TimeAxis::default(),
            y_domain: None,
            drag_anchor: None,
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub(crate) fn on_loaded(&mut self, data: Arc<Vec<DemandSample>>) {
        let offset = series_offset(data.first().map(|d| &d.timestamp));
        self.axis = TimeAxis::from_extent(data.iter().map(Timestamped::plot_x), offset);
        self.y_domain = scaled_domain(
            data.iter().flat_map(|d| {
                [
                    d.actual_mw,
                    d.current_forecast_mw,
                    d.day_ahead_forecast_mw,
                ]
            }),
            DEMAND_Y_LOWER,
            DEMAND_Y_UPPER,
        );
        self.data = Some(data);
    }

    #[cfg(test)]
    pub(crate) fn brush(&self) -> Option<TimeWindow> {
        self.axis.window()
    }

    /// Sets the brush locally, then broadcasts it. Slivers narrower than the minimum clear it.
    fn update_brush(&mut self, window: Option<TimeWindow>) {
        let window = window.filter(|w| w.width() >= PLOT_CONFIG.brush_min_width_s);
        self.axis.set_window(window);
        let delivered = self.coordinator.publish_time_window(window);
        if DF.log_brush {
            log::info!("Brush {:?} (delivered: {})", window, delivered);
        }
    }

    pub(crate) fn show(&mut self, ui: &mut Ui) {
        let Some(data) = self.data.clone() else {
            return;
        };
        let (Some((x0, x1)), Some(y_domain)) = (self.axis.full_extent(), self.y_domain.clone())
        else {
            return;
        };
        let offset = self.axis.offset();
        let brush = self.axis.window();

        let series = |value: fn(&DemandSample) -> f64| {
            PlotPoints::new(data.iter().map(|d| [d.plot_x(), value(d)]).collect())
        };

        let PlotResponse {
            inner: hovered,
            response,
            transform,
            ..
        } = Plot::new("demand_chart")
            .height(UI_CONFIG.charts.line_chart_height)
            .legend(Legend::default())
            .custom_x_axes(vec![time_axis_hints(offset)])
            .custom_y_axes(vec![
                AxisHints::new_y()
                    .label(UI_TEXT.axis_mw.as_str())
                    .formatter(|mark, _range| format_thousands(mark.value)),
            ])
            .x_grid_spacer(move |input| time_grid_marks(input, offset))
            .label_formatter(|_, _| String::new())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_x(x0..=x1);
                plot_ui.set_plot_bounds_y(y_domain.clone());

                if let Some(w) = brush {
                    let (lo, hi) = (*y_domain.start(), *y_domain.end());
                    plot_ui.polygon(
                        Polygon::new(
                            "",
                            PlotPoints::new(vec![
                                [w.start(), lo],
                                [w.end(), lo],
                                [w.end(), hi],
                                [w.start(), hi],
                            ]),
                        )
                        .fill_color(PLOT_CONFIG.brush_fill_color)
                        .stroke(Stroke::new(1.0, PLOT_CONFIG.brush_stroke_color)),
                    );
                }

                plot_ui.line(
                    Line::new(
                        UI_TEXT.legend_current_forecast.as_str(),
                        series(|d| d.current_forecast_mw),
                    )
                    .color(PLOT_CONFIG.demand_current_forecast_color)
                    .width(PLOT_CONFIG.series_line_width),
                );
                plot_ui.line(
                    Line::new(UI_TEXT.legend_actual.as_str(), series(|d| d.actual_mw))
                        .color(PLOT_CONFIG.demand_actual_color)
                        .width(PLOT_CONFIG.series_line_width),
                );
                plot_ui.line(
                    Line::new(
                        UI_TEXT.legend_day_ahead_forecast.as_str(),
                        series(|d| d.day_ahead_forecast_mw),
                    )
                    .color(PLOT_CONFIG.demand_day_ahead_color)
                    .width(PLOT_CONFIG.series_line_width)
                    .style(LineStyle::Dashed {
                        length: PLOT_CONFIG.day_ahead_dash_length,
                    }),
                );

                let hovered = plot_ui
                    .pointer_coordinate()
                    .and_then(|p| hover::nearest_index(&data, p.x));
                if let Some(d) = hovered.map(|i| &data[i]) {
                    let x = d.plot_x();
                    for (y, color) in [
                        (d.current_forecast_mw, PLOT_CONFIG.demand_current_forecast_color),
                        (d.actual_mw, PLOT_CONFIG.demand_actual_color),
                        (d.day_ahead_forecast_mw, PLOT_CONFIG.demand_day_ahead_color),
                    ] {
                        plot_ui.points(
                            Points::new("", vec![[x, y]])
                                .radius(PLOT_CONFIG.focus_marker_radius)
                                .color(color),
                        );
                    }
                }
                hovered
            });

        // --- BRUSH ---
        let to_x = |pos| transform.value_from_position(pos).x.clamp(x0, x1);
        if response.drag_started() {
            self.drag_anchor = ui.input(|i| i.pointer.press_origin()).map(to_x);
        }
        if response.dragged() {
            if let (Some(anchor), Some(pos)) = (self.drag_anchor, response.interact_pointer_pos()) {
                self.update_brush(TimeWindow::from_plot_range(anchor, to_x(pos)));
            }
        }
        if response.drag_stopped() {
            self.drag_anchor = None;
        }
        if response.clicked() {
            self.update_brush(None);
        }

        if let Some(d) = hovered.map(|i| &data[i]) {
            response.on_hover_ui_at_pointer(|ui| demand_tooltip(ui, d));
        }
    }
}

impl LinkedTimeView for DemandView {
    /// Mirrors the shared window as the brush; the demand axis itself never rescales.
    fn set_time_window(&mut self, window: Option<TimeWindow>) {
        self.axis.set_window(window);
    }
}

fn demand_tooltip(ui: &mut Ui, d: &DemandSample) {
    ui.label(RichText::new(format_timestamp(&d.timestamp)).strong());
    ui.separator();
    ui.label(format!("{}: {}", UI_TEXT.tt_actual, format_mw(d.actual_mw)));
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_current_forecast,
        format_mw(d.current_forecast_mw)
    ));
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_day_ahead_forecast,
        format_mw(d.day_ahead_forecast_mw)
    ));
    ui.separator();
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_forecast_error,
        format_mw(d.forecast_error_mw())
    ));
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_day_ahead_error,
        format_mw(d.day_ahead_error_mw())
    ));
}
