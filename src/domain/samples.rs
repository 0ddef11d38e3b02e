use {
    crate::domain::FuelType,
    chrono::{DateTime, FixedOffset},
    strum::EnumCount,
};

/// Source timestamps carry an explicit UTC offset. Ordering compares instants.
pub type Timestamp = DateTime<FixedOffset>;

/// Anything that sits on the shared time axis.
pub trait Timestamped {
    fn timestamp(&self) -> Timestamp;

    /// Position on the plot time axis (epoch seconds).
    fn plot_x(&self) -> f64 {
        crate::utils::to_plot_x(&self.timestamp())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemandSample {
    pub timestamp: Timestamp,
    pub actual_mw: f64,
    pub current_forecast_mw: f64,
    pub day_ahead_forecast_mw: f64,
}

impl DemandSample {
    /// Actual minus the current forecast.
    pub fn forecast_error_mw(&self) -> f64 {
        self.actual_mw - self.current_forecast_mw
    }

    /// Actual minus the day-ahead forecast.
    pub fn day_ahead_error_mw(&self) -> f64 {
        self.actual_mw - self.day_ahead_forecast_mw
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuelMixSample {
    pub timestamp: Timestamp,
    pub mw: [f64; FuelType::COUNT],
}

impl FuelMixSample {
    pub fn get(&self, fuel: FuelType) -> f64 {
        self.mw[fuel.index()]
    }

    pub fn total(&self) -> f64 {
        self.mw.iter().sum()
    }
}

/// Real-time settlement price at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSample {
    pub timestamp: Timestamp,
    pub location: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayAheadPriceSample {
    pub timestamp: Timestamp,
    pub location: String,
    pub price: f64,
}

/// RT sample with its day-ahead counterpart at the same instant and location, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedPriceSample {
    pub timestamp: Timestamp,
    pub location: String,
    pub rt_price: f64,
    pub da_price: Option<f64>,
}

impl CombinedPriceSample {
    pub fn spread(&self) -> Option<f64> {
        self.da_price.map(|da| self.rt_price - da)
    }
}

/// Mean across all locations at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemPricePoint {
    pub timestamp: Timestamp,
    pub rt_price: Option<f64>,
    pub da_price: Option<f64>,
}

impl SystemPricePoint {
    pub fn spread(&self) -> Option<f64> {
        Some(self.rt_price? - self.da_price?)
    }
}

macro_rules! impl_timestamped {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Timestamped for $ty {
                fn timestamp(&self) -> Timestamp {
                    self.timestamp
                }
            }
        )*
    };
}

impl_timestamped!(
    DemandSample,
    FuelMixSample,
    PriceSample,
    DayAheadPriceSample,
    CombinedPriceSample,
    SystemPricePoint,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).expect("valid timestamp")
    }

    #[test]
    fn spread_is_absent_without_day_ahead() {
        let matched = CombinedPriceSample {
            timestamp: ts("2025-12-01T00:00:00-06:00"),
            location: "HB_NORTH".into(),
            rt_price: 30.0,
            da_price: Some(25.5),
        };
        assert_eq!(matched.spread(), Some(4.5));

        let unmatched = CombinedPriceSample {
            da_price: None,
            ..matched
        };
        assert_eq!(unmatched.spread(), None);
    }

    #[test]
    fn plot_x_compares_instants_across_offsets() {
        let a = PriceSample {
            timestamp: ts("2025-12-01T00:00:00-06:00"),
            location: "HB_WEST".into(),
            price: 1.0,
        };
        let b = PriceSample {
            timestamp: ts("2025-12-01T06:00:00+00:00"),
            ..a.clone()
        };
        assert_eq!(a.plot_x(), b.plot_x());
        assert_eq!(a.timestamp, b.timestamp);
    }

    #[test]
    fn forecast_errors() {
        let d = DemandSample {
            timestamp: ts("2025-12-01T00:00:00-06:00"),
            actual_mw: 100.0,
            current_forecast_mw: 90.0,
            day_ahead_forecast_mw: 110.0,
        };
        assert_eq!(d.forecast_error_mw(), 10.0);
        assert_eq!(d.day_ahead_error_mw(), -10.0);
    }
}
