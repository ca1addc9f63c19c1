mod sqlite;

pub use sqlite::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

use crate::dates::MonthDay;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Stored measurement date is not YYYY-MM-DD: {0}")]
    StoredDate(String),
    #[error("Database is missing the `{0}` table")]
    MissingRelation(String),
}

/// A row of the `station` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// A row of the `measurement` table. `prcp` is absent on days without a rain gauge reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Measurement {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// Number of temperature observations a station has across the whole record.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// Minimum, average and maximum observed temperature. All three are `None`
/// when no measurement matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TemperatureStats {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

impl TemperatureStats {
    pub fn is_empty(&self) -> bool {
        self.tmin.is_none() && self.tavg.is_none() && self.tmax.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct StationRainfall {
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub total_prcp: f64,
}

/// Read access to the station/measurement relations.
///
/// Date bounds are inclusive unless the method name says otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObservationData: Send + Sync {
    /// All stations ordered by station id.
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    /// Most recent measurement date, `None` for an empty table.
    async fn latest_date(&self) -> Result<Option<Date>, Error>;
    /// Measurements on or after `start` that carry a precipitation reading,
    /// ordered by date then station.
    async fn precipitation_since(&self, start: Date) -> Result<Vec<Measurement>, Error>;
    /// Temperature observation counts per station.
    async fn station_activity(&self) -> Result<Vec<StationActivity>, Error>;
    /// Measurements for one station strictly after `after`, ordered by date.
    async fn temperatures_after(&self, station: &str, after: Date)
        -> Result<Vec<Measurement>, Error>;
    async fn temperature_stats(&self, start: Date, end: Date) -> Result<TemperatureStats, Error>;
    /// Temperature stats over every year for one calendar day.
    async fn daily_normals(&self, month_day: MonthDay) -> Result<TemperatureStats, Error>;
    /// Summed precipitation per station, wettest first.
    async fn rainfall_by_station(&self, start: Date, end: Date)
        -> Result<Vec<StationRainfall>, Error>;
}
