//! CSV snapshot parsing.
//!
//! Every parser takes any `Read` so the same code serves files on disk and in-memory fixtures.

use {
    crate::domain::{
        DayAheadPriceSample, DemandSample, FuelMixSample, FuelType, PriceSample, Timestamp,
    },
    anyhow::{Context, Result},
    chrono::DateTime,
    serde::{Deserialize, Deserializer, de::DeserializeOwned},
    std::io::Read,
    strum::EnumCount,
};

/// Accepts RFC 3339 (`2025-12-01T00:00:00-06:00`) and the space-separated variant.
fn parse_timestamp(raw: &str) -> Result<Timestamp> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z"))
        .context(format!("Invalid timestamp '{}'", raw))
}

fn de_timestamp<'de, D>(deserializer: D) -> std::result::Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(|e| serde::de::Error::custom(format!("{:#}", e)))
}

#[derive(Deserialize)]
struct DemandRow {
    #[serde(deserialize_with = "de_timestamp")]
    timestamp: Timestamp,
    #[serde(rename = "actual_MW")]
    actual_mw: f64,
    #[serde(rename = "current_forecast_MW")]
    current_forecast_mw: f64,
    #[serde(rename = "day_ahead_forecast_MW")]
    day_ahead_forecast_mw: f64,
}

// Missing columns and empty cells both read as 0 MW.
#[derive(Deserialize)]
struct FuelMixRow {
    #[serde(deserialize_with = "de_timestamp")]
    timestamp: Timestamp,
    #[serde(default)]
    solar: Option<f64>,
    #[serde(default)]
    wind: Option<f64>,
    #[serde(default)]
    hydro: Option<f64>,
    #[serde(default)]
    power_storage: Option<f64>,
    #[serde(default)]
    other: Option<f64>,
    #[serde(default)]
    natural_gas: Option<f64>,
    #[serde(default)]
    coal_and_lignite: Option<f64>,
    #[serde(default)]
    nuclear: Option<f64>,
}

impl FuelMixRow {
    fn into_sample(self) -> FuelMixSample {
        let mut mw = [0.0; FuelType::COUNT];
        let values = [
            (FuelType::Solar, self.solar),
            (FuelType::Wind, self.wind),
            (FuelType::Hydro, self.hydro),
            (FuelType::PowerStorage, self.power_storage),
            (FuelType::Other, self.other),
            (FuelType::NaturalGas, self.natural_gas),
            (FuelType::CoalAndLignite, self.coal_and_lignite),
            (FuelType::Nuclear, self.nuclear),
        ];
        for (fuel, value) in values {
            mw[fuel.index()] = value.unwrap_or(0.0);
        }
        FuelMixSample {
            timestamp: self.timestamp,
            mw,
        }
    }
}

#[derive(Deserialize)]
struct RealTimeRow {
    #[serde(deserialize_with = "de_timestamp")]
    timestamp: Timestamp,
    location: String,
    price: f64,
}

#[derive(Deserialize)]
struct DayAheadRow {
    #[serde(deserialize_with = "de_timestamp")]
    timestamp: Timestamp,
    #[serde(rename = "SettlementPoint")]
    location: String,
    #[serde(rename = "SettlementPointPrice")]
    price: f64,
}

fn read_rows<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize()
        .enumerate()
        // +2: header is line 1, records are 1-based
        .map(|(idx, row)| row.context(format!("CSV parse error on line {}", idx + 2)))
        .collect()
}

pub fn parse_demand<R: Read>(reader: R) -> Result<Vec<DemandSample>> {
    let mut samples: Vec<DemandSample> = read_rows::<_, DemandRow>(reader)?
        .into_iter()
        .map(|r| DemandSample {
            timestamp: r.timestamp,
            actual_mw: r.actual_mw,
            current_forecast_mw: r.current_forecast_mw,
            day_ahead_forecast_mw: r.day_ahead_forecast_mw,
        })
        .collect();

    if !samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp) {
        log::warn!("Demand timestamps are not strictly increasing. Sorting by time.");
        samples.sort_by_key(|s| s.timestamp);
    }
    Ok(samples)
}

pub fn parse_fuel_mix<R: Read>(reader: R) -> Result<Vec<FuelMixSample>> {
    let mut samples: Vec<FuelMixSample> = read_rows::<_, FuelMixRow>(reader)?
        .into_iter()
        .map(FuelMixRow::into_sample)
        .collect();
    if !samples.is_sorted_by_key(|s| s.timestamp) {
        samples.sort_by_key(|s| s.timestamp);
    }
    Ok(samples)
}

pub fn parse_rt_prices<R: Read>(reader: R) -> Result<Vec<PriceSample>> {
    Ok(read_rows::<_, RealTimeRow>(reader)?
        .into_iter()
        .map(|r| PriceSample {
            timestamp: r.timestamp,
            location: r.location,
            price: r.price,
        })
        .collect())
}

pub fn parse_da_prices<R: Read>(reader: R) -> Result<Vec<DayAheadPriceSample>> {
    Ok(read_rows::<_, DayAheadRow>(reader)?
        .into_iter()
        .map(|r| DayAheadPriceSample {
            timestamp: r.timestamp,
            location: r.location,
            price: r.price,
        })
        .collect())
}
