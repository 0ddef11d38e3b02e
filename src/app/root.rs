use {
    eframe::{
        Frame,
        egui::{Context, Key},
    },
    std::{
        cell::RefCell,
        rc::{Rc, Weak},
        sync::mpsc::Receiver,
    },
};

use crate::{
    Cli,
    app::LoadProgress,
    config::DF,
    data::{DataSources, DatasetKind, DatasetStore, LoadEvent, spawn_loads},
    models::Summary,
    shared::{Coordinator, LinkedTimeView, time_window_fan_out},
    ui::{DemandView, FuelMixView, HeatmapView, HubPriceView, TreemapView, utils::setup_custom_visuals},
};

pub struct App {
    pub(crate) args: Cli,
    pub(crate) coordinator: Rc<Coordinator>,

    // Subscriber targets are shared so the coordinator can hold weak handles to them.
    pub(crate) demand: Rc<RefCell<DemandView>>,
    pub(crate) hub_price: Rc<RefCell<HubPriceView>>,
    pub(crate) fuel_mix: Rc<RefCell<FuelMixView>>,
    pub(crate) treemap: TreemapView,
    pub(crate) heatmap: HeatmapView,

    pub(crate) store: DatasetStore,
    pub(crate) progress: LoadProgress,
    load_rx: Option<Receiver<LoadEvent>>,
    /// Filled once, on `AllSettled`.
    pub(crate) summary: Option<Summary>,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        setup_custom_visuals(&cc.egui_ctx);

        let mut app = Self::with_args(args);
        let sources = DataSources::in_dir(&app.args.data_dir);
        if DF.log_loads {
            log::info!("Loading datasets from {:?}", sources.dir);
        }
        app.load_rx = Some(spawn_loads(sources));
        app
    }

    fn with_args(args: Cli) -> Self {
        let coordinator = Rc::new(Coordinator::new());
        Self {
            demand: Rc::new(RefCell::new(DemandView::new(coordinator.clone()))),
            hub_price: Rc::new(RefCell::new(HubPriceView::new(coordinator.clone()))),
            fuel_mix: Rc::new(RefCell::new(FuelMixView::new(&coordinator))),
            treemap: TreemapView::new(coordinator.clone()),
            heatmap: HeatmapView::new(coordinator.clone()),
            coordinator,
            args,
            store: DatasetStore::default(),
            progress: LoadProgress::default(),
            load_rx: None,
            summary: None,
        }
    }

    /// Drains every load event that has arrived since the last frame.
    fn poll_loads(&mut self) {
        let Some(rx) = &self.load_rx else {
            return;
        };
        let events: Vec<LoadEvent> = rx.try_iter().collect();
        for event in events {
            self.progress.apply(&event);
            match event {
                LoadEvent::Loaded(dataset) => {
                    let kind = self.store.insert(dataset);
                    self.deliver(kind);
                }
                LoadEvent::Failed { kind, error } => {
                    log::warn!("{} unavailable, its charts stay empty: {}", kind, error);
                }
                LoadEvent::AllSettled => self.on_all_settled(),
            }
        }
        if self.progress.settled {
            self.load_rx = None;
        }
    }

    /// Hands a freshly stored dataset to the views that draw it, then wires their entry points.
    fn deliver(&mut self, kind: DatasetKind) {
        match kind {
            DatasetKind::Demand => {
                if let Some(data) = self.store.demand.clone() {
                    self.demand.borrow_mut().on_loaded(data);
                    self.register_time_window();
                }
            }
            DatasetKind::FuelMix => {
                if let Some(data) = self.store.fuel_mix.clone() {
                    self.fuel_mix.borrow_mut().on_loaded(data.clone());
                    self.treemap.on_loaded(data);
                    self.register_fuel_highlight();
                    self.register_time_window();
                }
            }
            DatasetKind::RealTimePrices | DatasetKind::DayAheadPrices => {
                if kind == DatasetKind::RealTimePrices {
                    if let Some(rows) = self.store.rt_prices.clone() {
                        self.heatmap.on_loaded(&rows);
                    }
                }
                if let Some(joined) = self.store.joined.clone() {
                    if !self.hub_price.borrow().is_loaded() {
                        self.hub_price
                            .borrow_mut()
                            .on_loaded(joined, &self.args.preferred_location);
                        self.register_hub_location();
                        self.register_time_window();
                    }
                }
            }
        }
    }

    /// One fan-out subscriber over every loaded time-axis view. Overwrites the previous one.
    fn register_time_window(&self) {
        let mut views: Vec<Weak<RefCell<dyn LinkedTimeView>>> = Vec::new();
        if self.demand.borrow().is_loaded() {
            views.push(Rc::downgrade(&self.demand) as Weak<RefCell<dyn LinkedTimeView>>);
        }
        if self.fuel_mix.borrow().is_loaded() {
            views.push(Rc::downgrade(&self.fuel_mix) as Weak<RefCell<dyn LinkedTimeView>>);
        }
        if self.hub_price.borrow().is_loaded() {
            views.push(Rc::downgrade(&self.hub_price) as Weak<RefCell<dyn LinkedTimeView>>);
        }
        if DF.log_subscriptions {
            log::info!("time-window fan-out over {} views", views.len());
        }
        let fan_out = time_window_fan_out(views);

        // Late arrivals catch up with a window brushed before they loaded.
        let current = self.coordinator.time_window();
        if current.is_some() {
            fan_out(current);
        }
        self.coordinator.subscribe_time_window(fan_out);
    }

    fn register_fuel_highlight(&self) {
        let fuel_mix = Rc::downgrade(&self.fuel_mix);
        self.coordinator.subscribe_fuel_highlight(move |key| {
            if let Some(view) = fuel_mix.upgrade() {
                if let Ok(mut view) = view.try_borrow_mut() {
                    view.set_highlight(key.as_deref());
                }
            }
        });
    }

    fn register_hub_location(&self) {
        let hub_price = Rc::downgrade(&self.hub_price);
        self.coordinator.subscribe_hub_location(move |location| {
            if let Some(view) = hub_price.upgrade() {
                if let Ok(mut view) = view.try_borrow_mut() {
                    view.set_location(&location);
                }
            }
        });
    }

    fn on_all_settled(&mut self) {
        let summary = self.store.summary();
        log::info!(
            "All datasets settled ({} loaded, {} failed). Summary: {:?}",
            self.progress.completed(),
            self.progress.failed(),
            summary
        );
        self.summary = Some(summary);
    }

    /// Clears the shared time window on every linked view.
    pub(crate) fn reset_time_window(&self) {
        self.coordinator.publish_time_window(None);
    }

    pub(crate) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.reset_time_window();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.poll_loads();
        self.handle_global_shortcuts(ctx);

        self.render_top_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        if !self.progress.settled {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            config::{DEFAULT_DATA_DIR, PREFERRED_LOCATION},
            data::Dataset,
            domain::{DayAheadPriceSample, DemandSample, FuelMixSample, PriceSample, TimeWindow},
        },
        chrono::DateTime,
        strum::EnumCount,
    };

    fn ts(hour: u32) -> crate::domain::Timestamp {
        DateTime::parse_from_rfc3339(&format!("2025-12-01T{:02}:00:00-06:00", hour))
            .expect("valid timestamp")
    }

    fn app() -> App {
        App::with_args(Cli {
            data_dir: DEFAULT_DATA_DIR.into(),
            preferred_location: PREFERRED_LOCATION.to_string(),
        })
    }

    fn receive(app: &mut App, events: Vec<LoadEvent>) {
        let (tx, rx) = std::sync::mpsc::channel();
        for e in events {
            tx.send(e).expect("send");
        }
        app.load_rx = Some(rx);
        app.poll_loads();
    }

    fn demand() -> Dataset {
        Dataset::Demand(
            (0..4)
                .map(|h| DemandSample {
                    timestamp: ts(h),
                    actual_mw: 100.0 + h as f64,
                    current_forecast_mw: 100.0,
                    day_ahead_forecast_mw: 100.0,
                })
                .collect(),
        )
    }

    fn fuel_mix() -> Dataset {
        Dataset::FuelMix(
            (0..4)
                .map(|h| FuelMixSample {
                    timestamp: ts(h),
                    mw: [1.0; crate::domain::FuelType::COUNT],
                })
                .collect(),
        )
    }

    fn rt() -> Dataset {
        Dataset::RealTimePrices(
            ["HB_NORTH", "HB_HOUSTON"]
                .iter()
                .flat_map(|loc| {
                    (0..4).map(move |h| PriceSample {
                        timestamp: ts(h),
                        location: loc.to_string(),
                        price: 20.0 + h as f64,
                    })
                })
                .collect(),
        )
    }

    fn da() -> Dataset {
        Dataset::DayAheadPrices(vec![DayAheadPriceSample {
            timestamp: ts(0),
            location: "HB_NORTH".to_string(),
            price: 18.0,
        }])
    }

    #[test]
    fn summary_waits_for_all_settled() {
        let mut app = app();
        receive(&mut app, vec![LoadEvent::Loaded(demand())]);
        assert!(app.summary.is_none());

        receive(
            &mut app,
            vec![
                LoadEvent::Failed {
                    kind: DatasetKind::FuelMix,
                    error: "missing".to_string(),
                },
                LoadEvent::Loaded(rt()),
                LoadEvent::Loaded(da()),
                LoadEvent::AllSettled,
            ],
        );
        let summary = app.summary.expect("settled");
        assert_eq!(summary.peak_demand_mw, Some(103.0));
        assert_eq!(summary.max_rt_price, Some(23.0));
        assert_eq!(summary.max_spread, Some(2.0));
        assert!(!app.fuel_mix.borrow().is_loaded());
    }

    #[test]
    fn brushed_window_reaches_late_views() {
        let mut app = app();
        let w = TimeWindow::from_plot_range(ts(1).timestamp() as f64, ts(2).timestamp() as f64);
        // Nothing is subscribed yet; the coordinator still keeps the value.
        app.coordinator.publish_time_window(w);

        receive(&mut app, vec![LoadEvent::Loaded(fuel_mix())]);
        receive(&mut app, vec![LoadEvent::Loaded(demand())]);
        assert_eq!(app.demand.borrow().brush(), w);

        receive(&mut app, vec![LoadEvent::Loaded(rt()), LoadEvent::Loaded(da())]);
        app.reset_time_window();
        assert_eq!(app.demand.borrow().brush(), None);
        assert_eq!(app.coordinator.time_window(), None);
        assert!(app.coordinator.has_subscriber(crate::shared::Channel::TimeWindow));
    }

    #[test]
    fn published_window_fans_out_to_every_time_view() {
        let mut app = app();
        receive(
            &mut app,
            vec![
                LoadEvent::Loaded(demand()),
                LoadEvent::Loaded(fuel_mix()),
                LoadEvent::Loaded(rt()),
                LoadEvent::Loaded(da()),
            ],
        );
        let w = TimeWindow::from_plot_range(ts(0).timestamp() as f64, ts(2).timestamp() as f64);
        assert!(app.coordinator.publish_time_window(w));
        assert_eq!(app.demand.borrow().brush(), w);
        assert_eq!(app.fuel_mix.borrow().time_window(), w);
        assert_eq!(app.hub_price.borrow().time_window(), w);

        app.reset_time_window();
        assert_eq!(app.fuel_mix.borrow().time_window(), None);
        assert_eq!(app.hub_price.borrow().time_window(), None);
    }

    #[test]
    fn heatmap_click_before_prices_join_selects_location() {
        let mut app = app();
        app.coordinator.publish_hub_location("HB_NORTH");
        receive(&mut app, vec![LoadEvent::Loaded(rt()), LoadEvent::Loaded(da())]);
        assert_eq!(
            app.hub_price.borrow().selected_location(),
            Some("HB_NORTH")
        );

        app.coordinator.publish_hub_location("HB_HOUSTON");
        assert_eq!(
            app.hub_price.borrow().selected_location(),
            Some("HB_HOUSTON")
        );
    }

    #[test]
    fn treemap_hover_highlights_fuel_mix() {
        let mut app = app();
        receive(&mut app, vec![LoadEvent::Loaded(fuel_mix())]);
        app.coordinator.publish_fuel_highlight(Some("solar"));
        assert_eq!(app.fuel_mix.borrow().highlight(), Some("solar"));
        app.coordinator.publish_fuel_highlight(None);
        assert_eq!(app.fuel_mix.borrow().highlight(), None);
    }
}
