use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use climate_api::{
    app, app_state,
    dates::MonthDay,
    db::Error,
    Measurement, ObservationData, SqliteStore, Station, StationActivity, StationRainfall,
    TemperatureStats,
};
use hyper::{header, Method};
use mockall::mock;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use time::Date;
use tower::ServiceExt;

mock! {
    pub ObservationAccess {}

    #[async_trait]
    impl ObservationData for ObservationAccess {
        async fn stations(&self) -> Result<Vec<Station>, Error>;
        async fn latest_date(&self) -> Result<Option<Date>, Error>;
        async fn precipitation_since(&self, start: Date) -> Result<Vec<Measurement>, Error>;
        async fn station_activity(&self) -> Result<Vec<StationActivity>, Error>;
        async fn temperatures_after(&self, station: &str, after: Date)
            -> Result<Vec<Measurement>, Error>;
        async fn temperature_stats(&self, start: Date, end: Date)
            -> Result<TemperatureStats, Error>;
        async fn daily_normals(&self, month_day: MonthDay) -> Result<TemperatureStats, Error>;
        async fn rainfall_by_station(&self, start: Date, end: Date)
            -> Result<Vec<StationRainfall>, Error>;
    }
}

pub const REMOTE_URL: &str = "http://127.0.0.1:5000";

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(store: Arc<dyn ObservationData>) -> TestApp {
    let app = app(app_state(REMOTE_URL.to_string(), store));
    TestApp { app }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("response to {} is not json ({}): {}", uri, e, body));
        (status, json)
    }
}

const SCHEMA: &str = "
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );";

pub type MeasurementRow<'a> = (&'a str, &'a str, Option<f64>, f64);

/// In-memory copy of the observation database holding the given rows.
pub async fn seeded_store(
    stations: &[(&str, &str)],
    measurements: &[MeasurementRow<'_>],
) -> Arc<SqliteStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();

    for &(station, name) in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation)
             VALUES (?, ?, 21.3, -157.8, 10.0)",
        )
        .bind(station)
        .bind(name)
        .execute(&pool)
        .await
        .unwrap();
    }

    for &(station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    let store = SqliteStore::from_pool(pool);
    store.verify_schema().await.unwrap();
    Arc::new(store)
}
