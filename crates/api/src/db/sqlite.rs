use anyhow::Context;
use async_trait::async_trait;
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{str::FromStr, time::Duration};
use time::Date;

use super::{
    Error, Measurement, ObservationData, Station, StationActivity, StationRainfall,
    TemperatureStats,
};
use crate::dates::{format_date, parse_date, MonthDay};

pub const STATION_TABLE: &str = "station";
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Observation store backed by the SQLite database produced by the climate data load.
///
/// The file is opened read-only; this service never writes to it.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn new(path: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-16000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open observation database: {}", path))?;

        info!("SQLite observation store opened at: {}", path);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check database connectivity and integrity.
    pub async fn health_check(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database connectivity check failed")?;

        let result: String = sqlx::query_scalar("PRAGMA quick_check;")
            .fetch_one(&self.pool)
            .await
            .context("Database integrity check failed")?;
        if result != "ok" {
            return Err(anyhow::anyhow!(
                "Database integrity check failed: {}",
                result
            ));
        }

        Ok(())
    }

    /// Both relations must exist before the service can answer anything.
    pub async fn verify_schema(&self) -> Result<(), Error> {
        for table in [STATION_TABLE, MEASUREMENT_TABLE] {
            let found: Option<String> = sqlx::query_scalar(
                "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?",
            )
            .bind(table)
            .fetch_optional(&self.pool)
            .await?;

            if found.is_none() {
                return Err(Error::MissingRelation(table.to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ObservationData for SqliteStore {
    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT station, COALESCE(name, '') AS name, latitude, longitude, elevation
             FROM station
             ORDER BY station ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stations)
    }

    async fn latest_date(&self) -> Result<Option<Date>, Error> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        latest
            .map(|raw| parse_date(&raw).map_err(|_| Error::StoredDate(raw)))
            .transpose()
    }

    async fn precipitation_since(&self, start: Date) -> Result<Vec<Measurement>, Error> {
        let start = format_date(start);
        debug!("precipitation since {}", start);

        let rows = sqlx::query_as::<_, Measurement>(
            "SELECT station, date, prcp, tobs
             FROM measurement
             WHERE date >= ? AND prcp IS NOT NULL
             ORDER BY date ASC, station ASC",
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn station_activity(&self) -> Result<Vec<StationActivity>, Error> {
        let activity = sqlx::query_as::<_, StationActivity>(
            "SELECT station, COUNT(tobs) AS observations
             FROM measurement
             GROUP BY station
             ORDER BY observations DESC, station ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(activity)
    }

    async fn temperatures_after(
        &self,
        station: &str,
        after: Date,
    ) -> Result<Vec<Measurement>, Error> {
        let after = format_date(after);
        debug!("temperatures for {} after {}", station, after);

        let rows = sqlx::query_as::<_, Measurement>(
            "SELECT station, date, prcp, tobs
             FROM measurement
             WHERE station = ? AND date > ? AND tobs IS NOT NULL
             ORDER BY date ASC",
        )
        .bind(station)
        .bind(after)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn temperature_stats(&self, start: Date, end: Date) -> Result<TemperatureStats, Error> {
        let stats = sqlx::query_as::<_, TemperatureStats>(
            "SELECT CAST(MIN(tobs) AS REAL) AS tmin,
                    AVG(tobs) AS tavg,
                    CAST(MAX(tobs) AS REAL) AS tmax
             FROM measurement
             WHERE date >= ? AND date <= ?",
        )
        .bind(format_date(start))
        .bind(format_date(end))
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn daily_normals(&self, month_day: MonthDay) -> Result<TemperatureStats, Error> {
        let stats = sqlx::query_as::<_, TemperatureStats>(
            "SELECT CAST(MIN(tobs) AS REAL) AS tmin,
                    AVG(tobs) AS tavg,
                    CAST(MAX(tobs) AS REAL) AS tmax
             FROM measurement
             WHERE strftime('%m-%d', date) = ?",
        )
        .bind(month_day.to_string())
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn rainfall_by_station(
        &self,
        start: Date,
        end: Date,
    ) -> Result<Vec<StationRainfall>, Error> {
        let rows = sqlx::query_as::<_, StationRainfall>(
            "SELECT s.station AS station,
                    COALESCE(s.name, '') AS name,
                    s.latitude AS latitude,
                    s.longitude AS longitude,
                    s.elevation AS elevation,
                    CAST(SUM(m.prcp) AS REAL) AS total_prcp
             FROM measurement m
             JOIN station s ON s.station = m.station
             WHERE m.date >= ? AND m.date <= ? AND m.prcp IS NOT NULL
             GROUP BY s.station, s.name, s.latitude, s.longitude, s.elevation
             ORDER BY total_prcp DESC, s.station ASC",
        )
        .bind(format_date(start))
        .bind(format_date(end))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
