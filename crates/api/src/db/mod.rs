pub mod climate_data;
pub mod schema;
mod sqlite;

pub use climate_data::*;
pub use schema::{verify_schema, SchemaError, MEASUREMENT, STATION, TABLES};
pub use sqlite::*;

use serde::Serialize;
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Observations keyed by date, then by station id
pub type DailyReadings = BTreeMap<String, BTreeMap<String, Option<f64>>>;

/// One single-entry object per station: `[{station_id: name}, ...]`
pub type StationListing = Vec<BTreeMap<String, String>>;

/// Aggregates keyed by their `"<start> to <end>"` label
pub type RangeSummary = BTreeMap<String, TemperatureStats>;

/// Measurement column a daily reading is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Precipitation,
    Temperature,
}

impl Observation {
    pub fn column(&self) -> &'static str {
        match self {
            Observation::Precipitation => "prcp",
            Observation::Temperature => "tobs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Reading {
    pub date: String,
    pub station: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, ToSchema)]
pub struct Station {
    pub station: String,
    pub name: String,
}

/// Fields are declared in sorted-key order so the JSON matches what clients
/// of the original API already parse.
#[derive(Debug, Clone, Copy, PartialEq, Default, FromRow, Serialize, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
}

/// Inclusive date filter; an open range runs to the newest measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

impl DateRange {
    pub fn since(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }
}

pub fn group_by_date(readings: Vec<Reading>) -> DailyReadings {
    let mut daily = DailyReadings::new();
    for reading in readings {
        daily
            .entry(reading.date)
            .or_default()
            .insert(reading.station, reading.value);
    }
    daily
}

pub fn station_listing(stations: Vec<Station>) -> StationListing {
    stations
        .into_iter()
        .map(|s| BTreeMap::from([(s.station, s.name)]))
        .collect()
}

pub fn range_summary(start: &str, end: &str, stats: TemperatureStats) -> RangeSummary {
    BTreeMap::from([(format!("{} to {}", start, end), stats)])
}
