use {
    crate::domain::{
        CombinedPriceSample, DayAheadPriceSample, PriceSample, SystemPricePoint, Timestamped,
    },
    itertools::Itertools,
    std::collections::{BTreeMap, HashMap, HashSet},
};

/// Real-time prices left-joined with day-ahead prices on (instant, location).
#[derive(Debug, Clone, Default)]
pub struct JoinedPrices {
    pub combined: Vec<CombinedPriceSample>,
    /// Sorted by time.
    pub system: Vec<SystemPricePoint>,
    /// Sorted, unique.
    pub locations: Vec<String>,
    /// Day-ahead rows that found no real-time partner. They are dropped from the join.
    pub unmatched_day_ahead: usize,
}

impl JoinedPrices {
    pub fn build(rt: &[PriceSample], da: &[DayAheadPriceSample]) -> Self {
        let (combined, unmatched_day_ahead) = combine_prices(rt, da);
        let system = system_series(&combined);
        let locations = combined
            .iter()
            .map(|c| c.location.clone())
            .sorted()
            .dedup()
            .collect();

        Self {
            combined,
            system,
            locations,
            unmatched_day_ahead,
        }
    }

    /// All joined samples for one location, in time order.
    pub fn series_for(&self, location: &str) -> Vec<CombinedPriceSample> {
        self.combined
            .iter()
            .filter(|c| c.location == location)
            .cloned()
            .sorted_by_key(|c| c.timestamp)
            .collect()
    }

    /// The preferred location if present, else the first in sorted order.
    pub fn default_location(&self, preferred: &str) -> Option<String> {
        if self.locations.iter().any(|l| l == preferred) {
            Some(preferred.to_string())
        } else {
            self.locations.first().cloned()
        }
    }

    /// Min/max over every present RT and DA price.
    pub fn price_extent(&self) -> Option<(f64, f64)> {
        self.combined
            .iter()
            .flat_map(|c| std::iter::once(c.rt_price).chain(c.da_price))
            .minmax_by(f64::total_cmp)
            .into_option()
    }
}

type JoinKey<'a> = (i64, &'a str);

fn join_key<'a, T: Timestamped>(row: &T, location: &'a str) -> JoinKey<'a> {
    (row.timestamp().timestamp_millis(), location)
}

/// Left outer join on RT. Returns the combined rows and the count of DA rows with no RT partner.
pub fn combine_prices(
    rt: &[PriceSample],
    da: &[DayAheadPriceSample],
) -> (Vec<CombinedPriceSample>, usize) {
    // Later duplicates overwrite earlier ones.
    let da_index: HashMap<JoinKey<'_>, f64> = da
        .iter()
        .map(|d| (join_key(d, &d.location), d.price))
        .collect();

    let combined: Vec<CombinedPriceSample> = rt
        .iter()
        .map(|r| CombinedPriceSample {
            timestamp: r.timestamp,
            location: r.location.clone(),
            rt_price: r.price,
            da_price: da_index.get(&join_key(r, &r.location)).copied(),
        })
        .collect();

    let rt_keys: HashSet<JoinKey<'_>> = rt.iter().map(|r| join_key(r, &r.location)).collect();
    let unmatched = da_index.keys().filter(|k| !rt_keys.contains(*k)).count();

    (combined, unmatched)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Mean RT and mean present-DA across locations at each instant, sorted by time.
pub fn system_series(combined: &[CombinedPriceSample]) -> Vec<SystemPricePoint> {
    let mut by_time: BTreeMap<i64, Vec<&CombinedPriceSample>> = BTreeMap::new();
    for c in combined {
        by_time
            .entry(c.timestamp.timestamp_millis())
            .or_default()
            .push(c);
    }

    by_time
        .into_values()
        .filter_map(|group| {
            let first = group.first()?;
            Some(SystemPricePoint {
                timestamp: first.timestamp,
                rt_price: mean(group.iter().map(|c| c.rt_price)),
                da_price: mean(group.iter().filter_map(|c| c.da_price)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use chrono::DateTime;

    fn ts(hour: u32) -> Timestamp {
        DateTime::parse_from_rfc3339(&format!("2025-12-01T{:02}:00:00-06:00", hour))
            .expect("valid timestamp")
    }

    fn rt(hour: u32, loc: &str, price: f64) -> PriceSample {
        PriceSample {
            timestamp: ts(hour),
            location: loc.into(),
            price,
        }
    }

    fn da(hour: u32, loc: &str, price: f64) -> DayAheadPriceSample {
        DayAheadPriceSample {
            timestamp: ts(hour),
            location: loc.into(),
            price,
        }
    }

    #[test]
    fn rt_without_day_ahead_has_absent_da() {
        let joined = JoinedPrices::build(
            &[rt(0, "HB_NORTH", 30.0), rt(1, "HB_NORTH", 40.0)],
            &[da(0, "HB_NORTH", 25.0)],
        );
        assert_eq!(joined.combined[0].da_price, Some(25.0));
        assert_eq!(joined.combined[1].da_price, None);
        assert_eq!(joined.combined[1].spread(), None);
    }

    #[test]
    fn day_ahead_only_rows_are_dropped_and_counted() {
        let joined = JoinedPrices::build(
            &[rt(0, "HB_NORTH", 30.0)],
            &[da(0, "HB_NORTH", 25.0), da(0, "HB_WEST", 10.0), da(5, "HB_NORTH", 1.0)],
        );
        assert_eq!(joined.combined.len(), 1);
        assert_eq!(joined.unmatched_day_ahead, 2);
        assert_eq!(joined.locations, vec!["HB_NORTH".to_string()]);
    }

    #[test]
    fn join_matches_the_same_instant_in_another_offset() {
        let utc_da = DayAheadPriceSample {
            timestamp: DateTime::parse_from_rfc3339("2025-12-01T06:00:00+00:00")
                .expect("valid timestamp"),
            location: "HB_NORTH".into(),
            price: 12.0,
        };
        let (combined, unmatched) = combine_prices(&[rt(0, "HB_NORTH", 20.0)], &[utc_da]);
        assert_eq!(combined[0].da_price, Some(12.0));
        assert_eq!(unmatched, 0);
    }

    #[test]
    fn system_average_ignores_absent_day_ahead() {
        let joined = JoinedPrices::build(
            &[
                rt(1, "HB_NORTH", 30.0),
                rt(1, "HB_WEST", 50.0),
                rt(0, "HB_NORTH", 10.0),
            ],
            &[da(1, "HB_NORTH", 20.0)],
        );
        assert_eq!(joined.system.len(), 2);
        // Sorted by time even though input was not.
        assert_eq!(joined.system[0].timestamp, ts(0));
        assert_eq!(joined.system[0].da_price, None);
        assert_eq!(joined.system[1].rt_price, Some(40.0));
        assert_eq!(joined.system[1].da_price, Some(20.0));
        assert_eq!(joined.system[1].spread(), Some(20.0));
    }

    #[test]
    fn default_location_prefers_configured_hub() {
        let joined = JoinedPrices::build(
            &[rt(0, "LZ_WEST", 1.0), rt(0, "HB_HOUSTON", 2.0), rt(0, "HB_NORTH", 3.0)],
            &[],
        );
        assert_eq!(joined.default_location("HB_HOUSTON").as_deref(), Some("HB_HOUSTON"));
        assert_eq!(joined.default_location("HB_PAN").as_deref(), Some("HB_HOUSTON"));

        let joined = JoinedPrices::build(&[rt(0, "LZ_WEST", 1.0), rt(0, "HB_NORTH", 3.0)], &[]);
        assert_eq!(joined.default_location("HB_HOUSTON").as_deref(), Some("HB_NORTH"));
    }

    #[test]
    fn series_for_location_is_time_ordered() {
        let joined = JoinedPrices::build(
            &[rt(2, "HB_NORTH", 3.0), rt(0, "HB_NORTH", 1.0), rt(1, "HB_WEST", 9.0)],
            &[],
        );
        let series = joined.series_for("HB_NORTH");
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].rt_price, 1.0);
        assert_eq!(series[1].rt_price, 3.0);
    }

    #[test]
    fn price_extent_spans_rt_and_da() {
        let joined = JoinedPrices::build(
            &[rt(0, "HB_NORTH", 30.0), rt(1, "HB_NORTH", 40.0)],
            &[da(0, "HB_NORTH", -5.0)],
        );
        assert_eq!(joined.price_extent(), Some((-5.0, 40.0)));
    }
}
