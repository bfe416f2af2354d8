pub mod db;
pub mod routes;
pub mod service;
mod startup;
mod utils;

pub use db::{
    ClimateAccess, ClimateData, DailyReadings, Database, DateRange, Observation, RangeSummary,
    Reading, Station, StationListing, TemperatureStats,
};
pub use routes::*;
pub use service::ClimateService;
pub use startup::*;
pub use utils::*;
