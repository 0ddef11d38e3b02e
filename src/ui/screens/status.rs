use {
    crate::{
        app::{LoadProgress, LoadStatus},
        config::PLOT_CONFIG,
        data::DatasetKind,
        ui::UI_TEXT,
    },
    eframe::egui::{Align, Grid, Layout, ProgressBar, RichText, Ui},
};

/// One-line load summary for the status bar: progress, then a cell per dataset.
pub(crate) fn render_load_status(ui: &mut Ui, progress: &LoadProgress) {
    ui.horizontal(|ui| {
        let total = progress.total();
        let done = progress.completed() + progress.failed();
        if !progress.settled {
            let fraction = if total > 0 {
                done as f32 / total as f32
            } else {
                0.0
            };
            ui.add(
                ProgressBar::new(fraction)
                    .desired_width(160.0)
                    .animate(true)
                    .text(format!("{} {}/{}", UI_TEXT.ls_title, done, total)),
            );
        } else {
            ui.label(
                RichText::new(&UI_TEXT.ls_all_settled)
                    .small()
                    .color(PLOT_CONFIG.color_text_neutral),
            );
        }
        if progress.failed() > 0 {
            ui.label(
                RichText::new(format!(
                    "{} {} {}",
                    UI_TEXT.label_warning,
                    progress.failed(),
                    UI_TEXT.label_failures
                ))
                .small()
                .color(PLOT_CONFIG.color_loss),
            );
        }
        ui.separator();
        render_loading_grid(ui, progress);
    });
}

fn render_loading_grid(ui: &mut Ui, progress: &LoadProgress) {
    Grid::new("load_status_grid")
        .spacing([16.0, 2.0])
        .show(ui, |ui| {
            for (kind, status) in progress.iter() {
                let (color, status_text, status_color) = match status {
                    LoadStatus::Pending => (
                        PLOT_CONFIG.color_warning,
                        UI_TEXT.ls_loading.to_string(),
                        PLOT_CONFIG.color_warning,
                    ),
                    LoadStatus::Loaded(n) => (
                        PLOT_CONFIG.color_text_primary,
                        format!("{} {}", n, UI_TEXT.ls_rows),
                        PLOT_CONFIG.color_profit,
                    ),
                    LoadStatus::Failed(_) => (
                        PLOT_CONFIG.color_loss,
                        UI_TEXT.ls_failed.to_string(),
                        PLOT_CONFIG.color_loss,
                    ),
                };
                let cell = ui.horizontal(|ui| {
                    ui.label(RichText::new(kind.to_string()).small().strong().color(color));
                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                        if matches!(status, LoadStatus::Pending) {
                            ui.spinner();
                        }
                        ui.label(RichText::new(status_text).small().color(status_color));
                    });
                });
                if let LoadStatus::Failed(msg) = status {
                    cell.response.on_hover_text(msg);
                }
            }
            ui.end_row();
        });
}

/// Stand-in drawn where a chart would be while its data is missing.
pub(crate) fn render_placeholder(ui: &mut Ui, kind: DatasetKind, status: &LoadStatus, height: f32) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui| {
        ui.centered_and_justified(|ui| match status {
            LoadStatus::Failed(msg) => {
                ui.label(
                    RichText::new(format!("{} {}: {}", kind, UI_TEXT.ls_failed, msg))
                        .color(PLOT_CONFIG.color_loss),
                );
            }
            _ => {
                ui.horizontal_centered(|ui| {
                    ui.spinner();
                    ui.label(
                        RichText::new(&UI_TEXT.ls_waiting)
                            .italics()
                            .color(PLOT_CONFIG.color_text_neutral),
                    );
                });
            }
        });
    });
}
