/// A closed range on the shared time axis. `None` at the use site means full extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start_s: f64,
    end_s: f64,
}

impl TimeWindow {
    /// Builds a window from two plot positions (epoch seconds) in either order.
    pub fn from_plot_range(a: f64, b: f64) -> Option<Self> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self {
            start_s: a.min(b),
            end_s: a.max(b),
        })
    }

    pub fn start(&self) -> f64 {
        self.start_s
    }

    pub fn end(&self) -> f64 {
        self.end_s
    }

    pub fn width(&self) -> f64 {
        self.end_s - self.start_s
    }
}
