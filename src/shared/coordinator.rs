//! Cross-chart message bus.
//!
//! One typed slot per channel, each holding at most one subscriber. Views get an
//! `Rc<Coordinator>` at construction and publish user gestures on it; the app registers
//! each view's entry point once its data has loaded.

use {
    crate::{config::DF, domain::TimeWindow},
    std::{
        cell::RefCell,
        fmt::Debug,
        rc::{Rc, Weak},
    },
    strum_macros::Display,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Channel {
    TimeWindow,
    FuelHighlight,
    HubLocation,
}

type Handler<T> = Rc<dyn Fn(T)>;

struct Slot<T> {
    channel: Channel,
    handler: RefCell<Option<Handler<T>>>,
    current: RefCell<T>,
    /// Skip delivery when the value equals the last one published.
    dedupe: bool,
}

impl<T: Clone + PartialEq + Debug> Slot<T> {
    fn new(channel: Channel, initial: T, dedupe: bool) -> Self {
        Self {
            channel,
            handler: RefCell::new(None),
            current: RefCell::new(initial),
            dedupe,
        }
    }

    fn subscribe(&self, handler: Handler<T>) {
        let replaced = self.handler.borrow_mut().replace(handler).is_some();
        if DF.log_subscriptions {
            log::info!(
                "[{}] subscriber {}",
                self.channel,
                if replaced { "replaced" } else { "registered" }
            );
        }
    }

    fn publish(&self, value: T) -> bool {
        if self.dedupe && *self.current.borrow() == value {
            return false;
        }
        *self.current.borrow_mut() = value.clone();

        // Clone out so the handler may re-subscribe or publish elsewhere.
        let handler = self.handler.borrow().clone();
        if DF.log_coordinator {
            log::info!(
                "[{}] publish {:?} ({})",
                self.channel,
                value,
                if handler.is_some() { "delivered" } else { "no subscriber" }
            );
        }
        match handler {
            Some(h) => {
                h(value);
                true
            }
            None => false,
        }
    }

    fn current(&self) -> T {
        self.current.borrow().clone()
    }

    #[cfg(test)]
    fn has_subscriber(&self) -> bool {
        self.handler.borrow().is_some()
    }
}

pub struct Coordinator {
    time_window: Slot<Option<TimeWindow>>,
    fuel_highlight: Slot<Option<String>>,
    hub_location: Slot<Option<String>>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            time_window: Slot::new(Channel::TimeWindow, None, true),
            fuel_highlight: Slot::new(Channel::FuelHighlight, None, true),
            // A repeated click must still re-select after the picker moved away.
            hub_location: Slot::new(Channel::HubLocation, None, false),
        }
    }

    pub fn subscribe_time_window(&self, handler: impl Fn(Option<TimeWindow>) + 'static) {
        self.time_window.subscribe(Rc::new(handler));
    }

    pub fn subscribe_fuel_highlight(&self, handler: impl Fn(Option<String>) + 'static) {
        self.fuel_highlight.subscribe(Rc::new(handler));
    }

    pub fn subscribe_hub_location(&self, handler: impl Fn(String) + 'static) {
        self.hub_location.subscribe(Rc::new(move |loc: Option<String>| {
            if let Some(loc) = loc {
                handler(loc)
            }
        }));
    }

    /// Returns whether a subscriber received the value.
    pub fn publish_time_window(&self, window: Option<TimeWindow>) -> bool {
        self.time_window.publish(window)
    }

    pub fn publish_fuel_highlight(&self, key: Option<&str>) -> bool {
        self.fuel_highlight.publish(key.map(str::to_string))
    }

    pub fn publish_hub_location(&self, location: &str) -> bool {
        self.hub_location.publish(Some(location.to_string()))
    }

    /// Last value published, whether or not anyone was listening.
    pub fn time_window(&self) -> Option<TimeWindow> {
        self.time_window.current()
    }

    pub fn fuel_highlight(&self) -> Option<String> {
        self.fuel_highlight.current()
    }

    pub fn hub_location(&self) -> Option<String> {
        self.hub_location.current()
    }

    #[cfg(test)]
    pub fn has_subscriber(&self, channel: Channel) -> bool {
        match channel {
            Channel::TimeWindow => self.time_window.has_subscriber(),
            Channel::FuelHighlight => self.fuel_highlight.has_subscriber(),
            Channel::HubLocation => self.hub_location.has_subscriber(),
        }
    }
}

/// A chart whose x axis follows the shared time window.
pub trait LinkedTimeView {
    fn set_time_window(&mut self, window: Option<TimeWindow>);
}

/// Single `time-window` subscriber that forwards to every still-alive view.
/// A view that is mutably borrowed is the one publishing and already holds the window.
pub fn time_window_fan_out(
    views: Vec<Weak<RefCell<dyn LinkedTimeView>>>,
) -> impl Fn(Option<TimeWindow>) + 'static {
    move |window| {
        for view in views.iter().filter_map(Weak::upgrade) {
            if let Ok(mut v) = view.try_borrow_mut() {
                v.set_time_window(window);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Recorder {
        windows: Vec<Option<TimeWindow>>,
    }

    impl LinkedTimeView for Recorder {
        fn set_time_window(&mut self, window: Option<TimeWindow>) {
            self.windows.push(window);
        }
    }

    #[test]
    fn channel_names() {
        assert_eq!(Channel::TimeWindow.to_string(), "time-window");
        assert_eq!(Channel::FuelHighlight.to_string(), "fuel-highlight");
        assert_eq!(Channel::HubLocation.to_string(), "hub-location");
    }

    #[test]
    fn publish_without_subscriber_is_a_no_op() {
        let c = Coordinator::new();
        assert!(!c.publish_time_window(TimeWindow::from_plot_range(0.0, 10.0)));
        assert!(!c.publish_fuel_highlight(Some("wind")));
        assert!(!c.publish_hub_location("HB_WEST"));
        assert_eq!(c.fuel_highlight().as_deref(), Some("wind"));
    }

    #[test]
    fn subscribe_overwrites_previous_handler() {
        let c = Coordinator::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let f = first.clone();
        c.subscribe_hub_location(move |_| f.set(f.get() + 1));
        let s = second.clone();
        c.subscribe_hub_location(move |_| s.set(s.get() + 1));

        assert!(c.publish_hub_location("HB_NORTH"));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn repeated_values_are_deduped_except_hub_location() {
        let c = Coordinator::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        c.subscribe_fuel_highlight(move |_| h.set(h.get() + 1));
        c.publish_fuel_highlight(Some("solar"));
        c.publish_fuel_highlight(Some("solar"));
        c.publish_fuel_highlight(None);
        assert_eq!(hits.get(), 2);

        let locs = Rc::new(RefCell::new(Vec::new()));
        let l = locs.clone();
        c.subscribe_hub_location(move |loc| l.borrow_mut().push(loc));
        c.publish_hub_location("HB_SOUTH");
        c.publish_hub_location("HB_SOUTH");
        assert_eq!(locs.borrow().len(), 2);
    }

    #[test]
    fn handler_may_resubscribe_while_running() {
        let c = Rc::new(Coordinator::new());
        let hits = Rc::new(Cell::new(0));
        let weak = Rc::downgrade(&c);
        let h = hits.clone();
        c.subscribe_fuel_highlight(move |_| {
            h.set(h.get() + 1);
            if let Some(c) = weak.upgrade() {
                let h2 = h.clone();
                c.subscribe_fuel_highlight(move |_| h2.set(h2.get() + 100));
            }
        });
        c.publish_fuel_highlight(Some("wind"));
        c.publish_fuel_highlight(Some("hydro"));
        assert_eq!(hits.get(), 101);
    }

    #[test]
    fn fan_out_skips_dropped_and_busy_views() {
        let a: Rc<RefCell<Recorder>> = Rc::default();
        let b: Rc<RefCell<Recorder>> = Rc::default();
        let dropped: Rc<RefCell<Recorder>> = Rc::default();

        let a_dyn: Rc<RefCell<dyn LinkedTimeView>> = a.clone();
        let b_dyn: Rc<RefCell<dyn LinkedTimeView>> = b.clone();
        let d_dyn: Rc<RefCell<dyn LinkedTimeView>> = dropped.clone();
        let views = vec![
            Rc::downgrade(&a_dyn),
            Rc::downgrade(&b_dyn),
            Rc::downgrade(&d_dyn),
        ];
        drop(d_dyn);
        drop(dropped);

        let c = Coordinator::new();
        c.subscribe_time_window(time_window_fan_out(views));

        let w = TimeWindow::from_plot_range(5.0, 50.0);
        {
            let _busy = b.borrow_mut();
            assert!(c.publish_time_window(w));
        }
        assert_eq!(a.borrow().windows, vec![w]);
        assert!(b.borrow().windows.is_empty());

        c.publish_time_window(None);
        assert_eq!(a.borrow().windows, vec![w, None]);
        assert_eq!(b.borrow().windows, vec![None]);
    }
}
