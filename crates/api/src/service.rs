//! The five read operations exposed over HTTP.
//!
//! Each call is independent: it runs one or two queries through
//! [`ClimateData`], reshapes the rows and hands back a serializable value.

use log::{debug, warn};
use std::sync::Arc;
use time::{macros::format_description, Date, Duration};

use crate::db::{
    self, group_by_date, range_summary, station_listing, ClimateData, DailyReadings, DateRange,
    Observation, RangeSummary, StationListing,
};

/// Fixed precipitation window, inclusive on both ends
pub const PRECIPITATION_START: &str = "2016-08-23";
pub const PRECIPITATION_END: &str = "2017-08-23";

/// Length of the temperature observation window ending at the newest measurement
pub const TRAILING_WINDOW_DAYS: i64 = 365;

pub const ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/start_date",
    "/api/v1.0/start_date/end_date",
];

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Data(#[from] db::Error),
    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Stored measurement date `{value}` is not YYYY-MM-DD: {source}")]
    StoredDate {
        value: String,
        source: time::error::Parse,
    },
    #[error("Failed to format date: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error("No measurements are stored")]
    NoMeasurements,
}

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
}

/// First day of the trailing window ending at `latest`, exactly
/// [`TRAILING_WINDOW_DAYS`] calendar days earlier
pub fn trailing_window_start(latest: &str) -> Result<String, Error> {
    let latest_date = parse_date(latest).map_err(|source| Error::StoredDate {
        value: latest.to_string(),
        source,
    })?;
    let start = latest_date.saturating_sub(Duration::days(TRAILING_WINDOW_DAYS));
    Ok(start.format(format_description!("[year]-[month]-[day]"))?)
}

pub fn route_listing() -> String {
    let mut listing = String::from("Available Routes:<br/>");
    for route in ROUTES {
        listing.push_str(route);
        listing.push_str("<br/>");
    }
    listing
}

#[derive(Clone)]
pub struct ClimateService {
    data: Arc<dyn ClimateData>,
    strict_dates: bool,
}

impl ClimateService {
    /// With `strict_dates` set, path dates must be `YYYY-MM-DD`. Otherwise they
    /// are compared as given and malformed input simply matches no rows.
    pub fn new(data: Arc<dyn ClimateData>, strict_dates: bool) -> Self {
        Self { data, strict_dates }
    }

    pub async fn precipitation(&self) -> Result<DailyReadings, Error> {
        let readings = self
            .data
            .readings_between(
                Observation::Precipitation,
                PRECIPITATION_START,
                PRECIPITATION_END,
            )
            .await?;
        Ok(group_by_date(readings))
    }

    pub async fn stations(&self) -> Result<StationListing, Error> {
        let stations = self.data.stations().await?;
        Ok(station_listing(stations))
    }

    /// Temperature observations for the trailing window. An empty dataset
    /// yields an empty document.
    pub async fn tobs(&self) -> Result<DailyReadings, Error> {
        let Some(latest) = self.data.latest_date().await? else {
            warn!("no measurements stored, returning empty temperature observations");
            return Ok(DailyReadings::new());
        };
        let start = trailing_window_start(&latest)?;
        debug!("temperature window: {} to {}", start, latest);

        let readings = self
            .data
            .readings_between(Observation::Temperature, &start, &latest)
            .await?;
        Ok(group_by_date(readings))
    }

    /// Aggregates from `start_date` onward, labelled with the newest stored date
    pub async fn start_date(&self, start_date: &str) -> Result<RangeSummary, Error> {
        self.check_date(start_date)?;
        let last_date = self
            .data
            .latest_date()
            .await?
            .ok_or(Error::NoMeasurements)?;

        let stats = self
            .data
            .temperature_stats(&DateRange::since(start_date))
            .await?;
        Ok(range_summary(start_date, &last_date, stats))
    }

    /// Aggregates over `start_date..=end_date`. An inverted range matches no rows.
    pub async fn startend_date(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<RangeSummary, Error> {
        self.check_date(start_date)?;
        self.check_date(end_date)?;

        let stats = self
            .data
            .temperature_stats(&DateRange::between(start_date, end_date))
            .await?;
        Ok(range_summary(start_date, end_date, stats))
    }

    fn check_date(&self, value: &str) -> Result<(), Error> {
        if self.strict_dates && parse_date(value).is_err() {
            return Err(Error::InvalidDate(value.to_string()));
        }
        Ok(())
    }
}
