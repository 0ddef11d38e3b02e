use eframe::egui::{Button, CentralPanel, Context, RichText, ScrollArea, TopBottomPanel, Ui};

use crate::{
    app::{App, LoadStatus},
    config::PLOT_CONFIG,
    data::DatasetKind,
    ui::{
        UI_CONFIG, UI_TEXT,
        screens::{render_load_status, render_placeholder},
        styles::UiStyleExt,
        utils::{format_mw, format_whole_dollars},
        views::series_offset,
    },
    utils::format_axis_time,
};

impl App {
    pub(crate) fn render_top_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.top_panel_frame();

        TopBottomPanel::top("top_toolbar")
            .frame(frame)
            .min_height(30.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new(&UI_TEXT.app_title).color(UI_CONFIG.colors.heading));
                    ui.separator();

                    // SUMMARY CARDS: placeholders until every load has settled.
                    let summary = self.summary;
                    let card_value = |value: Option<Option<String>>| match value {
                        None => UI_TEXT.card_pending.clone(),
                        Some(None) => UI_TEXT.label_not_available.clone(),
                        Some(Some(v)) => v,
                    };
                    summary_card(
                        ui,
                        &UI_TEXT.card_peak_demand,
                        &card_value(summary.map(|s| s.peak_demand_mw.map(format_mw))),
                    );
                    summary_card(
                        ui,
                        &UI_TEXT.card_max_rt_price,
                        &card_value(summary.map(|s| s.max_rt_price.map(format_whole_dollars))),
                    );
                    summary_card(
                        ui,
                        &UI_TEXT.card_max_spread,
                        &card_value(summary.map(|s| s.max_spread.map(format_whole_dollars))),
                    );

                    ui.separator();
                    self.render_window_controls(ui);
                });
            });
    }

    fn render_window_controls(&mut self, ui: &mut Ui) {
        let offset = series_offset(
            self.store
                .demand
                .as_ref()
                .and_then(|d| d.first())
                .map(|d| &d.timestamp),
        );
        let text = match self.coordinator.time_window() {
            Some(w) => format!(
                "{}: {} - {}",
                UI_TEXT.label_window,
                format_axis_time(w.start(), offset),
                format_axis_time(w.end(), offset)
            ),
            None => format!("{}: {}", UI_TEXT.label_window, UI_TEXT.label_full_range),
        };
        ui.label(RichText::new(text).small().color(PLOT_CONFIG.color_text_neutral));

        let has_window = self.coordinator.time_window().is_some();
        if ui
            .add_enabled(has_window, Button::new(UI_TEXT.button_reset_window.as_str()))
            .clicked()
        {
            self.reset_time_window();
        }
    }

    pub(crate) fn render_status_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.bottom_panel_frame();
        TopBottomPanel::bottom("status_panel")
            .frame(frame)
            .resizable(false)
            .show(ctx, |ui| {
                render_load_status(ui, &self.progress);
            });
    }

    pub(crate) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = UI_CONFIG.central_panel_frame();

        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_charts(ui);
                    });
            });
    }

    fn render_charts(&mut self, ui: &mut Ui) {
        let charts = &UI_CONFIG.charts;

        // --- DEMAND ---
        chart_heading(ui, &UI_TEXT.heading_demand, Some(UI_TEXT.hint_brush.as_str()));
        if self.demand.borrow().is_loaded() {
            self.demand.borrow_mut().show(ui);
        } else {
            self.placeholder(ui, &[DatasetKind::Demand], charts.line_chart_height);
        }
        ui.add_space(12.0);

        // --- HUB PRICE ---
        chart_heading(ui, &UI_TEXT.heading_hub_price, None);
        if self.hub_price.borrow().is_loaded() {
            self.hub_price.borrow_mut().show(ui);
        } else {
            self.placeholder(
                ui,
                &[DatasetKind::RealTimePrices, DatasetKind::DayAheadPrices],
                charts.line_chart_height,
            );
        }
        ui.add_space(12.0);

        // --- FUEL MIX ---
        chart_heading(ui, &UI_TEXT.heading_fuel_mix, None);
        if self.fuel_mix.borrow().is_loaded() {
            self.fuel_mix.borrow_mut().show(ui);
        } else {
            self.placeholder(ui, &[DatasetKind::FuelMix], charts.fuel_mix_height);
        }
        ui.add_space(12.0);

        chart_heading(ui, &UI_TEXT.heading_treemap, None);
        if self.treemap.is_loaded() {
            self.treemap.show(ui);
        } else {
            self.placeholder(ui, &[DatasetKind::FuelMix], charts.treemap_height);
        }
        ui.add_space(12.0);

        // --- HEATMAP ---
        chart_heading(ui, &UI_TEXT.heading_heatmap, Some(UI_TEXT.hint_heatmap_click.as_str()));
        if self.heatmap.is_loaded() {
            self.heatmap.show(ui);
        } else {
            self.placeholder(ui, &[DatasetKind::RealTimePrices], charts.heatmap_height);
        }
    }

    fn placeholder(&self, ui: &mut Ui, kinds: &[DatasetKind], height: f32) {
        let status = self.progress.status_of(kinds);
        let kind = kinds
            .iter()
            .copied()
            .find(|k| matches!(self.progress.status_of(&[*k]), LoadStatus::Failed(_)))
            .unwrap_or(kinds[0]);
        render_placeholder(ui, kind, &status, height);
    }
}

fn chart_heading(ui: &mut Ui, title: &str, hint: Option<&str>) {
    ui.horizontal(|ui| {
        ui.label_subheader(title);
        if let Some(hint) = hint {
            ui.label_subdued(hint);
        }
    });
}

fn summary_card(ui: &mut Ui, title: &str, value: &str) {
    UI_CONFIG.card_frame().show(ui, |ui| {
        ui.vertical(|ui| {
            ui.label_subdued(title);
            ui.label(
                RichText::new(value)
                    .strong()
                    .size(16.0)
                    .color(PLOT_CONFIG.color_text_primary),
            );
        });
    });
}
