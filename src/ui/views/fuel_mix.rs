use {
    crate::{
        config::{PLOT_CONFIG, constants::scales::FUEL_MIX_HEADROOM},
        domain::{FuelMixSample, FuelType, TimeWindow, Timestamped},
        models::{
            TimeAxis, hover,
            stack::{StackLayer, interval_polygons, layer_opacity, max_total, stack_layers},
        },
        shared::{Coordinator, LinkedTimeView},
        ui::{
            UI_CONFIG, UI_TEXT,
            styles::{FuelColor, UiStyleExt, apply_opacity},
            utils::{format_mw, format_thousands, humanize_key, time_axis_hints, time_grid_marks},
            views::series_offset,
        },
        utils::format_timestamp,
    },
    eframe::egui::{RichText, Stroke, Ui},
    egui_plot::{AxisHints, Plot, PlotPoints, Polygon, VLine},
    std::sync::Arc,
};

const LEGEND_WIDTH: f32 = 170.0;

pub(crate) struct FuelMixView {
    data: Option<Arc<Vec<FuelMixSample>>>,
    layers: Vec<StackLayer>,
    axis: TimeAxis,
    y_max: f64,
    /// Last highlight delivered by the coordinator.
    highlight: Option<String>,
    /// Local legend hover; takes precedence while the pointer is on a legend row.
    legend_hover: Option<FuelType>,
}

impl FuelMixView {
    /// The initial highlight is whatever the coordinator last carried.
    pub(crate) fn new(coordinator: &Coordinator) -> Self {
        Self {
            data: None,
            layers: Vec::new(),
            axis: TimeAxis::default(),
            y_max: 0.0,
            highlight: coordinator.fuel_highlight(),
            legend_hover: None,
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub(crate) fn on_loaded(&mut self, data: Arc<Vec<FuelMixSample>>) {
        let offset = series_offset(data.first().map(|d| &d.timestamp));
        self.axis = TimeAxis::from_extent(data.iter().map(Timestamped::plot_x), offset);
        self.layers = crate::trace_time!("stack fuel mix", 2_000, { stack_layers(&data) });
        self.y_max = max_total(&data) * FUEL_MIX_HEADROOM;
        self.data = Some(data);
    }

    /// Opacity and legend weight only; unknown keys dim every layer.
    pub(crate) fn set_highlight(&mut self, key: Option<&str>) {
        self.highlight = key.map(str::to_string);
    }

    fn hover_legend(&mut self, fuel: Option<FuelType>) {
        self.legend_hover = fuel;
    }

    /// Highlight currently drawn.
    fn effective_highlight(&self) -> Option<&str> {
        self.legend_hover
            .map(FuelType::key)
            .or(self.highlight.as_deref())
    }

    #[cfg(test)]
    pub(crate) fn highlight(&self) -> Option<&str> {
        self.effective_highlight()
    }

    #[cfg(test)]
    pub(crate) fn time_window(&self) -> Option<TimeWindow> {
        self.axis.window()
    }

    pub(crate) fn show(&mut self, ui: &mut Ui) {
        let Some(data) = self.data.clone() else {
            return;
        };
        let Some(x_range) = self.axis.domain() else {
            return;
        };
        let offset = self.axis.offset();
        let y_max = self.y_max;
        let plot_width = (ui.available_width() - LEGEND_WIDTH).max(100.0);

        ui.horizontal_top(|ui| {
            let layers = &self.layers;
            let highlight = self.effective_highlight();
            let plot = Plot::new("fuel_mix_chart")
                .width(plot_width)
                .height(UI_CONFIG.charts.fuel_mix_height)
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
                    plot_ui.set_plot_bounds_x(x_range);
                    plot_ui.set_plot_bounds_y(0.0..=y_max);

                    for layer in layers {
                        let fill = apply_opacity(
                            layer.fuel.color(),
                            layer_opacity(layer.fuel, highlight),
                        );
                        for pair in layer.points.windows(2) {
                            for poly in interval_polygons(pair[0], pair[1]) {
                                plot_ui.polygon(
                                    Polygon::new("", PlotPoints::new(poly))
                                        .fill_color(fill)
                                        .stroke(Stroke::NONE),
                                );
                            }
                        }
                    }

                    let hovered = plot_ui
                        .pointer_coordinate()
                        .and_then(|p| hover::nearest_index(&data, p.x));
                    if let Some(i) = hovered {
                        plot_ui.vline(
                            VLine::new("", data[i].plot_x())
                                .color(PLOT_CONFIG.color_text_subdued)
                                .width(1.0),
                        );
                    }
                    hovered
                });

            if let Some(i) = plot.inner {
                plot.response
                    .on_hover_ui_at_pointer(|ui| fuel_mix_tooltip(ui, &data[i]));
            }

            ui.vertical(|ui| self.render_legend(ui));
        });
    }

    fn render_legend(&mut self, ui: &mut Ui) {
        let mut hovered = None;
        for fuel in FuelType::ALL {
            let strong = self.effective_highlight().is_some_and(|k| fuel.matches(k));
            let response = ui.legend_swatch(fuel.color(), &humanize_key(fuel.key()), strong);
            if response.hovered() {
                hovered = Some(fuel);
            }
        }
        self.hover_legend(hovered);
    }
}

impl LinkedTimeView for FuelMixView {
    fn set_time_window(&mut self, window: Option<TimeWindow>) {
        self.axis.set_window(window);
    }
}

fn fuel_mix_tooltip(ui: &mut Ui, sample: &FuelMixSample) {
    ui.label(RichText::new(format_timestamp(&sample.timestamp)).strong());
    ui.separator();
    for fuel in FuelType::ALL.iter().rev() {
        ui.metric(
            &humanize_key(fuel.key()),
            &format_mw(sample.get(*fuel)),
            fuel.color(),
        );
    }
    ui.separator();
    ui.label(format_mw(sample.total()));
}
