mod service;

pub use service::*;

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::db::{self, TemperatureStats};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] db::Error),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid month-day '{0}', expected MM-DD")]
    InvalidMonthDay(String),
    #[error("invalid date range: {0}")]
    InvalidRange(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidPath(rejection.body_text())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Store(err) => {
                error!("observation store failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Failed to query observation data"),
                )
            }
            _ => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationSummary {
    pub station: String,
    pub name: String,
}

/// Station id -> station name, keys ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationDirectory(pub BTreeMap<String, String>);

impl From<Vec<StationSummary>> for StationDirectory {
    fn from(stations: Vec<StationSummary>) -> Self {
        Self(
            stations
                .into_iter()
                .map(|station| (station.station, station.name))
                .collect(),
        )
    }
}

/// Date -> station id -> precipitation. Every station reading on a date is
/// kept, so two stations reporting the same day never overwrite each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Precipitation(pub BTreeMap<String, BTreeMap<String, f64>>);

impl Precipitation {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, date: &str) -> Option<&BTreeMap<String, f64>> {
        self.0.get(date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

/// Trailing-year temperature series of the most active station.
/// `station` is `None` when the store holds no measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureObservations {
    pub station: Option<String>,
    pub observations: Vec<TemperatureObservation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyNormal {
    pub date: String,
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

impl DailyNormal {
    pub fn new(date: String, stats: TemperatureStats) -> Self {
        Self {
            date,
            tmin: stats.tmin,
            tavg: stats.tavg,
            tmax: stats.tmax,
        }
    }
}
