use crate::{
    climate::{self, ClimateService},
    daily_normals, db, index_handler, precipitation, rainfall, routes, stations,
    temperature_from, temperature_range, tobs, trip_normals, ObservationData, SqliteStore,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub climate: Arc<ClimateService>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::observations::observation_routes::precipitation,
        routes::observations::observation_routes::stations,
        routes::observations::observation_routes::tobs,
        routes::observations::observation_routes::temperature_from,
        routes::observations::observation_routes::temperature_range,
        routes::observations::observation_routes::daily_normals,
        routes::observations::observation_routes::trip_normals,
        routes::observations::observation_routes::rainfall,
    ),
    components(
        schemas(
                climate::ErrorResponse,
                climate::StationDirectory,
                climate::Precipitation,
                climate::TemperatureObservations,
                climate::TemperatureObservation,
                climate::DailyNormal,
                db::TemperatureStats,
                db::StationRainfall,
        )
    ),
    tags(
        (name = "climate observations api", description = "a read-only RESTful api over historical station temperature and precipitation observations")
    )
)]
struct ApiDoc;

/// Opens the observation database and checks it can serve queries.
pub async fn build_app_state(remote_url: String, database: String) -> anyhow::Result<AppState> {
    let store = SqliteStore::new(&database)
        .await
        .map_err(|e| anyhow!("error opening observation database: {:#}", e))?;
    store
        .health_check()
        .await
        .map_err(|e| anyhow!("observation database failed health check: {:#}", e))?;
    store
        .verify_schema()
        .await
        .map_err(|e| anyhow!("observation database is not usable: {}", e))?;

    Ok(app_state(remote_url, Arc::new(store)))
}

pub fn app_state(remote_url: String, store: Arc<dyn ObservationData>) -> AppState {
    AppState {
        remote_url,
        climate: Arc::new(ClimateService::new(store)),
    }
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/daily_normals/{month_day}", get(daily_normals))
        .route("/api/v1.0/normals/{start}/{end}", get(trip_normals))
        .route("/api/v1.0/rainfall/{start}/{end}", get(rainfall))
        .route("/api/v1.0/{start}", get(temperature_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_range))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, path: {}, time: {}", response.status().as_str(), path, response_time);

    response
}
