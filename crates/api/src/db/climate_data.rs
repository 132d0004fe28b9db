use crate::{format_date, DateRange};
use async_trait::async_trait;
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{path::Path, time::Duration};
use time::Date;

use super::{verify_schema, PrecipitationReading, TemperatureReading, TemperatureSummary};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to format date: {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("Dataset table `{table}` is missing columns: {missing:?}")]
    Schema {
        table: &'static str,
        missing: Vec<String>,
    },
    #[error("Dataset not found at {0}")]
    DatasetMissing(String),
    #[error("Connection pool needs at least one connection")]
    EmptyPool,
}

/// Read access to the measurement dataset.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Every (date, precipitation) pair, in storage order.
    async fn precipitation(&self) -> Result<Vec<PrecipitationReading>, Error>;
    /// Distinct station names, in the order they were first stored.
    async fn station_names(&self) -> Result<Vec<String>, Error>;
    /// Temperature observations for one station on or after `since`, by date.
    async fn station_temperatures(
        &self,
        station_id: String,
        since: Date,
    ) -> Result<Vec<TemperatureReading>, Error>;
    /// Per-date min/max/avg temperature over every station, by date.
    async fn temperature_summary(&self, range: DateRange)
        -> Result<Vec<TemperatureSummary>, Error>;
}

pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    /// Open the dataset read-only and check its layout before handing it out.
    pub async fn open(path: &str, max_connections: u32) -> Result<Self, Error> {
        if max_connections == 0 {
            return Err(Error::EmptyPool);
        }
        if !Path::new(path).is_file() {
            return Err(Error::DatasetMissing(path.to_owned()));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        verify_schema(&pool).await?;
        info!("SQLite dataset opened read-only at: {}", path);

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn precipitation(&self) -> Result<Vec<PrecipitationReading>, Error> {
        let readings = sqlx::query_as::<_, PrecipitationReading>(
            "SELECT date, CAST(prcp AS REAL) AS precipitation FROM measurement",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(readings)
    }

    async fn station_names(&self) -> Result<Vec<String>, Error> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM station
             WHERE name IS NOT NULL
             GROUP BY name
             ORDER BY MIN(rowid)",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn station_temperatures(
        &self,
        station_id: String,
        since: Date,
    ) -> Result<Vec<TemperatureReading>, Error> {
        let since = format_date(since)?;
        debug!("temperatures for {} since {}", station_id, since);

        let readings = sqlx::query_as::<_, TemperatureReading>(
            "SELECT date, CAST(tobs AS REAL) AS temperature
             FROM measurement
             WHERE station = ?1 AND date >= ?2 AND tobs IS NOT NULL
             ORDER BY date",
        )
        .bind(station_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(readings)
    }

    async fn temperature_summary(
        &self,
        range: DateRange,
    ) -> Result<Vec<TemperatureSummary>, Error> {
        if range.is_empty() {
            debug!("empty range {} > {}, skipping query", range.start, range.end);
            return Ok(vec![]);
        }
        let start = format_date(range.start)?;
        let end = format_date(range.end)?;

        // Dates are stored as YYYY-MM-DD text, so string bounds compare chronologically.
        let summaries = sqlx::query_as::<_, TemperatureSummary>(
            r#"SELECT date,
                      MIN(CAST(tobs AS REAL)) AS "min",
                      MAX(CAST(tobs AS REAL)) AS "max",
                      AVG(CAST(tobs AS REAL)) AS "avg"
               FROM measurement
               WHERE date >= ?1 AND date <= ?2 AND tobs IS NOT NULL
               GROUP BY date
               ORDER BY date"#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(summaries)
    }
}
