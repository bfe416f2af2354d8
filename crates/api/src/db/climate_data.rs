use async_trait::async_trait;
use log::debug;
use sqlx::{QueryBuilder, Sqlite};

use super::{DateRange, Database, Observation, Reading, Station, TemperatureStats};

pub struct ClimateAccess {
    db: Database,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query observation database: {0}")]
    Query(#[from] sqlx::Error),
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Daily readings of one observation with `start <= date <= end`, oldest first
    async fn readings_between(
        &self,
        observation: Observation,
        start: &str,
        end: &str,
    ) -> Result<Vec<Reading>, Error>;
    /// Newest measurement date, `None` when no measurements are stored
    async fn latest_date(&self) -> Result<Option<String>, Error>;
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    /// MIN/AVG/MAX of `tobs` over the range; all `None` when nothing matches
    async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error>;
}

impl ClimateAccess {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn readings_between(
        &self,
        observation: Observation,
        start: &str,
        end: &str,
    ) -> Result<Vec<Reading>, Error> {
        // Stored column affinity varies between loaders, CAST keeps decoding to f64 stable
        let sql = format!(
            "SELECT date, station, CAST({} AS REAL) AS value
             FROM measurement
             WHERE date BETWEEN ? AND ?
             ORDER BY date",
            observation.column()
        );
        let mut conn = self.db.session().await?;
        let readings = sqlx::query_as::<_, Reading>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&mut *conn)
            .await?;
        debug!(
            "found {} {} readings between {} and {}",
            readings.len(),
            observation.column(),
            start,
            end
        );
        Ok(readings)
    }

    async fn latest_date(&self) -> Result<Option<String>, Error> {
        let mut conn = self.db.session().await?;
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&mut *conn)
            .await?;
        Ok(latest)
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let mut conn = self.db.session().await?;
        let stations = sqlx::query_as::<_, Station>(
            "SELECT station, name FROM station GROUP BY station ORDER BY station",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(stations)
    }

    async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT CAST(MIN(tobs) AS REAL) AS tmin,
                    CAST(AVG(tobs) AS REAL) AS tavg,
                    CAST(MAX(tobs) AS REAL) AS tmax
             FROM measurement WHERE date >= ",
        );
        query.push_bind(range.start.as_str());
        if let Some(end) = &range.end {
            query.push(" AND date <= ").push_bind(end.as_str());
        }

        let mut conn = self.db.session().await?;
        let stats = query
            .build_query_as::<TemperatureStats>()
            .fetch_one(&mut *conn)
            .await?;
        Ok(stats)
    }
}
