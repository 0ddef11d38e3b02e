use {
    crate::{
        config::{DF, PLOT_CONFIG, constants::scales::PRICE_Y_PAD},
        domain::{CombinedPriceSample, SystemPricePoint, TimeWindow, Timestamped},
        models::{JoinedPrices, TimeAxis, hover},
        shared::{Coordinator, LinkedTimeView},
        ui::{
            UI_CONFIG, UI_TEXT,
            styles::UiStyleExt,
            utils::{
                format_price, format_price_or_na, format_whole_dollars, time_axis_hints,
                time_grid_marks,
            },
            views::{defined_segments, series_offset},
        },
        utils::format_timestamp,
    },
    eframe::egui::{Color32, ComboBox, RichText, Ui},
    egui_plot::{AxisHints, Legend, Line, LineStyle, Plot, PlotPoints, PlotUi, Points},
    std::{ops::RangeInclusive, rc::Rc, sync::Arc},
};

pub(crate) struct HubPriceView {
    coordinator: Rc<Coordinator>,
    joined: Option<Arc<JoinedPrices>>,
    selected: Option<String>,
    /// Joined samples of the selected location, in time order.
    series: Vec<CombinedPriceSample>,
    axis: TimeAxis,
    y_domain: Option<RangeInclusive<f64>>,
}

impl HubPriceView {
    pub(crate) fn new(coordinator: Rc<Coordinator>) -> Self {
        Self {
            coordinator,
            joined: None,
            selected: None,
            series: Vec::new(),
            axis: TimeAxis::default(),
            y_domain: None,
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.joined.is_some()
    }

    #[cfg(test)]
    pub(crate) fn selected_location(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn time_window(&self) -> Option<TimeWindow> {
        self.axis.window()
    }

    pub(crate) fn on_loaded(&mut self, joined: Arc<JoinedPrices>, preferred: &str) {
        let offset = series_offset(joined.combined.first().map(|c| &c.timestamp));
        self.axis = TimeAxis::from_extent(joined.combined.iter().map(Timestamped::plot_x), offset);
        self.y_domain = joined
            .price_extent()
            .map(|(lo, hi)| lo * (1.0 - PRICE_Y_PAD)..=hi * (1.0 + PRICE_Y_PAD));

        // A heatmap click may have arrived before both price sets did.
        let initial = self
            .coordinator
            .hub_location()
            .filter(|loc| joined.locations.contains(loc))
            .or_else(|| joined.default_location(preferred));
        self.joined = Some(joined);
        if let Some(loc) = initial {
            self.set_location(&loc);
        }
    }

    /// Selects `location`. An unknown location leaves the selected lines empty.
    pub(crate) fn set_location(&mut self, location: &str) {
        let Some(joined) = &self.joined else {
            return;
        };
        if !joined.locations.iter().any(|l| l == location) {
            log::warn!("No price data for location {}", location);
        }
        self.series = joined.series_for(location);
        self.selected = Some(location.to_string());
        if DF.log_selection {
            log::info!("Hub price location -> {} ({} samples)", location, self.series.len());
        }
    }

    pub(crate) fn show(&mut self, ui: &mut Ui) {
        let Some(joined) = self.joined.clone() else {
            return;
        };
        self.render_picker(ui, &joined);

        let (Some(x_range), Some(y_domain)) = (self.axis.domain(), self.y_domain.clone()) else {
            return;
        };
        let offset = self.axis.offset();
        let series = &self.series;

        let plot = Plot::new("hub_price_chart")
            .height(UI_CONFIG.charts.line_chart_height)
            .legend(Legend::default())
            .custom_x_axes(vec![time_axis_hints(offset)])
            .custom_y_axes(vec![
                AxisHints::new_y()
                    .label(UI_TEXT.axis_price.as_str())
                    .formatter(|mark, _range| format_whole_dollars(mark.value)),
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
                plot_ui.set_plot_bounds_y(y_domain);

                let selected = PLOT_CONFIG.hub_selected_color;
                let system = PLOT_CONFIG.hub_system_color;

                solid_line(
                    plot_ui,
                    &UI_TEXT.legend_selected_rt,
                    series.iter().map(|c| [c.plot_x(), c.rt_price]).collect(),
                    selected,
                );
                dashed_segments(
                    plot_ui,
                    &UI_TEXT.legend_selected_da,
                    series.iter().map(|c| (c.plot_x(), c.da_price)),
                    selected,
                );
                // System RT is absent only when no location had a price at that instant.
                for seg in defined_segments(joined.system.iter().map(|s| (s.plot_x(), s.rt_price))) {
                    solid_line(plot_ui, &UI_TEXT.legend_system_rt, seg, system);
                }
                dashed_segments(
                    plot_ui,
                    &UI_TEXT.legend_system_da,
                    joined.system.iter().map(|s| (s.plot_x(), s.da_price)),
                    system,
                );

                let focus = plot_ui.pointer_coordinate().and_then(|p| {
                    let i = hover::nearest_index(series, p.x)?;
                    let point = &series[i];
                    let sys = hover::nearest(&joined.system, point.plot_x());
                    Some((i, sys.cloned()))
                });
                if let Some((i, sys)) = &focus {
                    let point = &series[*i];
                    let x = point.plot_x();
                    focus_marker(plot_ui, x, Some(point.rt_price), selected, true);
                    focus_marker(plot_ui, x, point.da_price, selected, false);
                    if let Some(sys) = sys {
                        focus_marker(plot_ui, x, sys.rt_price, system, true);
                        focus_marker(plot_ui, x, sys.da_price, system, false);
                    }
                }
                focus
            });

        if let Some((i, sys)) = plot.inner {
            let location = self.selected.clone().unwrap_or_default();
            let point = &self.series[i];
            plot.response
                .on_hover_ui_at_pointer(|ui| price_tooltip(ui, &location, point, sys.as_ref()));
        }
    }

    fn render_picker(&mut self, ui: &mut Ui, joined: &JoinedPrices) {
        let mut choice = self.selected.clone().unwrap_or_default();
        ui.horizontal(|ui| {
            ui.label_subdued(UI_TEXT.label_location.as_str());
            ComboBox::from_id_salt("hub_location_picker")
                .selected_text(choice.clone())
                .show_ui(ui, |ui| {
                    for loc in &joined.locations {
                        ui.selectable_value(&mut choice, loc.clone(), loc);
                    }
                });
        });
        if self.selected.as_deref() != Some(choice.as_str()) && !choice.is_empty() {
            self.set_location(&choice);
        }
    }
}

impl LinkedTimeView for HubPriceView {
    fn set_time_window(&mut self, window: Option<TimeWindow>) {
        self.axis.set_window(window);
    }
}

fn solid_line(plot_ui: &mut PlotUi, name: &str, points: Vec<[f64; 2]>, color: Color32) {
    plot_ui.line(
        Line::new(name, PlotPoints::new(points))
            .color(color)
            .width(PLOT_CONFIG.series_line_width),
    );
}

/// Day-ahead series: dashed, broken wherever DA is absent. Segments share one legend entry.
fn dashed_segments(
    plot_ui: &mut PlotUi,
    name: &str,
    points: impl IntoIterator<Item = (f64, Option<f64>)>,
    color: Color32,
) {
    for seg in defined_segments(points) {
        plot_ui.line(
            Line::new(name, PlotPoints::new(seg))
                .color(color)
                .width(PLOT_CONFIG.series_line_width)
                .style(LineStyle::Dashed {
                    length: PLOT_CONFIG.day_ahead_dash_length,
                }),
        );
    }
}

/// RT markers are filled, DA markers hollow. Nothing is drawn for an absent value.
fn focus_marker(plot_ui: &mut PlotUi, x: f64, y: Option<f64>, color: Color32, filled: bool) {
    if let Some(y) = y {
        plot_ui.points(
            Points::new("", vec![[x, y]])
                .radius(PLOT_CONFIG.focus_marker_radius)
                .filled(filled)
                .color(color),
        );
    }
}

fn price_tooltip(
    ui: &mut Ui,
    location: &str,
    point: &CombinedPriceSample,
    sys: Option<&SystemPricePoint>,
) {
    ui.label(RichText::new(location).strong());
    ui.label(format_timestamp(&point.timestamp));
    ui.separator();
    ui.label(format!("{}: {}", UI_TEXT.tt_rt_price, format_price(point.rt_price)));
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_da_price,
        format_price_or_na(point.da_price)
    ));
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_spread,
        format_price_or_na(point.spread())
    ));
    ui.separator();
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_system_rt,
        format_price_or_na(sys.and_then(|s| s.rt_price))
    ));
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_system_da,
        format_price_or_na(sys.and_then(|s| s.da_price))
    ));
    ui.label(format!(
        "{}: {}",
        UI_TEXT.tt_system_spread,
        format_price_or_na(sys.and_then(SystemPricePoint::spread))
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayAheadPriceSample, PriceSample};
    use chrono::DateTime;

    fn joined() -> Arc<JoinedPrices> {
        let ts = |h: u32| {
            DateTime::parse_from_rfc3339(&format!("2025-12-01T{:02}:00:00-06:00", h))
                .expect("valid timestamp")
        };
        let rt = ["HB_HOUSTON", "HB_NORTH"]
            .iter()
            .flat_map(|loc| {
                (0..3).map(move |h| PriceSample {
                    timestamp: ts(h),
                    location: loc.to_string(),
                    price: 20.0 + h as f64,
                })
            })
            .collect::<Vec<_>>();
        let da = vec![DayAheadPriceSample {
            timestamp: ts(0),
            location: "HB_NORTH".into(),
            price: 100.0,
        }];
        Arc::new(JoinedPrices::build(&rt, &da))
    }

    #[test]
    fn defaults_to_preferred_location() {
        let mut view = HubPriceView::new(Rc::new(Coordinator::new()));
        view.on_loaded(joined(), "HB_HOUSTON");
        assert_eq!(view.selected_location(), Some("HB_HOUSTON"));
        assert_eq!(view.series.len(), 3);

        let mut view = HubPriceView::new(Rc::new(Coordinator::new()));
        view.on_loaded(joined(), "HB_WEST");
        assert_eq!(view.selected_location(), Some("HB_HOUSTON"));
    }

    #[test]
    fn y_domain_covers_rt_and_da() {
        let mut view = HubPriceView::new(Rc::new(Coordinator::new()));
        view.on_loaded(joined(), "HB_HOUSTON");
        let y = view.y_domain.clone().expect("loaded");
        assert!((y.start() - 20.0 * 0.95).abs() < 1e-9);
        assert!((y.end() - 100.0 * 1.05).abs() < 1e-9);
    }

    #[test]
    fn early_heatmap_selection_wins_over_default() {
        let coordinator = Rc::new(Coordinator::new());
        coordinator.publish_hub_location("HB_NORTH");
        let mut view = HubPriceView::new(coordinator);
        view.on_loaded(joined(), "HB_HOUSTON");
        assert_eq!(view.selected_location(), Some("HB_NORTH"));
        assert_eq!(view.series[0].da_price, Some(100.0));
        assert_eq!(view.series[1].da_price, None);
    }

    #[test]
    fn time_window_round_trip() {
        let mut view = HubPriceView::new(Rc::new(Coordinator::new()));
        view.set_time_window(TimeWindow::from_plot_range(0.0, 1.0));
        assert_eq!(view.axis.domain(), None);

        view.on_loaded(joined(), "HB_HOUSTON");
        let full = view.axis.domain();
        let w = TimeWindow::from_plot_range(view.series[0].plot_x(), view.series[1].plot_x());
        view.set_time_window(w);
        assert_ne!(view.axis.domain(), full);
        view.set_time_window(None);
        assert_eq!(view.axis.domain(), full);
    }
}
