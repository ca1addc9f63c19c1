use axum::{
    extract::{FromRequestParts, Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    climate::{
        DailyNormal, Error, ErrorResponse, Precipitation, StationDirectory,
        TemperatureObservations,
    },
    db::{StationRainfall, TemperatureStats},
    AppState,
};

/// `Path` with rejections rendered as the JSON error body.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation by date and station over the trailing year of data", body = Precipitation),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observation data", body = ErrorResponse)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Precipitation>, Error> {
    state.climate.precipitation_last_year().await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Station names keyed by station id", body = StationDirectory),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observation data", body = ErrorResponse)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StationDirectory>, Error> {
    let stations = state.climate.list_stations().await?;
    Ok(Json(stations.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Trailing year of temperature observations for the most active station", body = TemperatureObservations),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observation data", body = ErrorResponse)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TemperatureObservations>, Error> {
    state
        .climate
        .temperature_observations_last_year()
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First day of the range, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature min/avg/max from start onwards, null when nothing matched", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Malformed date", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observation data", body = ErrorResponse)
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    ApiPath(start): ApiPath<String>,
) -> Result<Json<TemperatureStats>, Error> {
    state
        .climate
        .temperature_stats(&start, None)
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First day of the range, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last day of the range, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature min/avg/max over the inclusive range, null when nothing matched", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Malformed date", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observation data", body = ErrorResponse)
    ))]
pub async fn temperature_range(
    State(state): State<Arc<AppState>>,
    ApiPath((start, end)): ApiPath<(String, String)>,
) -> Result<Json<TemperatureStats>, Error> {
    state
        .climate
        .temperature_stats(&start, Some(&end))
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/daily_normals/{month_day}",
    params(
        ("month_day" = String, Path, description = "Calendar day as MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature min/avg/max for this day across every recorded year", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Malformed month-day", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observation data", body = ErrorResponse)
    ))]
pub async fn daily_normals(
    State(state): State<Arc<AppState>>,
    ApiPath(month_day): ApiPath<String>,
) -> Result<Json<TemperatureStats>, Error> {
    state.climate.daily_normals(&month_day).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/normals/{start}/{end}",
    params(
        ("start" = String, Path, description = "First day of the trip, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last day of the trip, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Daily normals for each day of the trip", body = Vec<DailyNormal>),
        (status = BAD_REQUEST, description = "Malformed date or range", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observation data", body = ErrorResponse)
    ))]
pub async fn trip_normals(
    State(state): State<Arc<AppState>>,
    ApiPath((start, end)): ApiPath<(String, String)>,
) -> Result<Json<Vec<DailyNormal>>, Error> {
    state.climate.trip_normals(&start, &end).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/rainfall/{start}/{end}",
    params(
        ("start" = String, Path, description = "First day of the range, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last day of the range, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Total precipitation per station, wettest first", body = Vec<StationRainfall>),
        (status = BAD_REQUEST, description = "Malformed date", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query observation data", body = ErrorResponse)
    ))]
pub async fn rainfall(
    State(state): State<Arc<AppState>>,
    ApiPath((start, end)): ApiPath<(String, String)>,
) -> Result<Json<Vec<StationRainfall>>, Error> {
    state
        .climate
        .rainfall_by_station(&start, &end)
        .await
        .map(Json)
}
