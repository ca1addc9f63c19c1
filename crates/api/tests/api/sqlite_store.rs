use crate::helpers::{seeded_store, spawn_app, MeasurementRow, TestApp};
use axum::http::StatusCode;
use serde_json::json;

const STATIONS: &[(&str, &str)] = &[
    ("USC2", "MANOA LYON ARBO 785.2, HI US"),
    ("USC1", "WAIKIKI 717.2, HI US"),
];

const MEASUREMENTS: &[MeasurementRow<'static>] = &[
    ("USC1", "2020-01-01", Some(0.1), 70.0),
    ("USC1", "2020-06-01", None, 85.0),
    ("USC2", "2020-06-01", Some(0.0), 80.0),
];

async fn fixture_app() -> TestApp {
    spawn_app(seeded_store(STATIONS, MEASUREMENTS).await).await
}

#[tokio::test]
async fn stations_come_back_sorted() {
    let test_app = fixture_app().await;

    let (status, body) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"USC1":"WAIKIKI 717.2, HI US","USC2":"MANOA LYON ARBO 785.2, HI US"}"#
    );
}

#[tokio::test]
async fn precipitation_skips_missing_readings() {
    let test_app = fixture_app().await;

    let (status, body) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "2020-01-01": { "USC1": 0.1 },
            "2020-06-01": { "USC2": 0.0 }
        })
    );
}

#[tokio::test]
async fn empty_database_gives_empty_results() {
    let test_app = spawn_app(seeded_store(&[], &[]).await).await;

    let (status, body) = test_app.get_json("/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, body) = test_app.get_json("/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "station": null, "observations": [] }));
}

#[tokio::test]
async fn tobs_follow_the_busiest_station() {
    let test_app = fixture_app().await;

    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "station": "USC1",
            "observations": [
                { "date": "2020-01-01", "tobs": 70.0 },
                { "date": "2020-06-01", "tobs": 85.0 }
            ]
        })
    );
}

#[tokio::test]
async fn tobs_tie_goes_to_smallest_station_id() {
    let store = seeded_store(
        STATIONS,
        &[
            ("USC2", "2021-03-01", Some(0.2), 75.0),
            ("USC1", "2021-03-02", Some(0.0), 74.0),
        ],
    )
    .await;
    let test_app = spawn_app(store).await;

    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "station": "USC1",
            "observations": [{ "date": "2021-03-02", "tobs": 74.0 }]
        })
    );
}

#[tokio::test]
async fn temperature_stats_over_a_year() {
    let test_app = fixture_app().await;

    let (status, body) = test_app.get_json("/api/v1.0/2020-01-01/2020-12-31").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tmin"], json!(70.0));
    assert_eq!(body["tmax"], json!(85.0));
    let tavg = body["tavg"].as_f64().unwrap();
    assert!((tavg - 78.333).abs() < 0.001, "unexpected tavg {}", tavg);
}

#[tokio::test]
async fn temperature_stats_single_day_and_open_end() {
    let test_app = fixture_app().await;

    let (status, body) = test_app.get_json("/api/v1.0/2020-06-01/2020-06-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tmin": 80.0, "tavg": 82.5, "tmax": 85.0 }));

    let (status, body) = test_app.get_json("/api/v1.0/2020-02-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tmin": 80.0, "tavg": 82.5, "tmax": 85.0 }));
}

#[tokio::test]
async fn reversed_or_empty_ranges_are_null() {
    let test_app = fixture_app().await;
    let nulls = json!({ "tmin": null, "tavg": null, "tmax": null });

    let (status, body) = test_app.get_json("/api/v1.0/2020-12-31/2020-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, nulls);

    let (status, body) = test_app.get_json("/api/v1.0/2030-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, nulls);
}

#[tokio::test]
async fn daily_normals_ignore_the_year() {
    let store = seeded_store(
        STATIONS,
        &[
            ("USC1", "2019-06-01", Some(0.0), 76.0),
            ("USC1", "2020-06-01", None, 85.0),
            ("USC2", "2020-06-01", Some(0.0), 80.0),
        ],
    )
    .await;
    let test_app = spawn_app(store).await;

    let (status, body) = test_app.get_json("/api/v1.0/daily_normals/06-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tmin"], json!(76.0));
    assert_eq!(body["tmax"], json!(85.0));
    let tavg = body["tavg"].as_f64().unwrap();
    assert!((tavg - 80.333).abs() < 0.001, "unexpected tavg {}", tavg);

    let (status, body) = test_app.get_json("/api/v1.0/daily_normals/02-29").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tmin": null, "tavg": null, "tmax": null }));
}

#[tokio::test]
async fn trip_normals_cover_every_day() {
    let test_app = fixture_app().await;

    let (status, body) = test_app
        .get_json("/api/v1.0/normals/2021-12-31/2022-01-02")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "date": "2021-12-31", "tmin": null, "tavg": null, "tmax": null },
            { "date": "2022-01-01", "tmin": 70.0, "tavg": 70.0, "tmax": 70.0 },
            { "date": "2022-01-02", "tmin": null, "tavg": null, "tmax": null }
        ])
    );
}

#[tokio::test]
async fn rainfall_is_wettest_first() {
    let test_app = fixture_app().await;

    let (status, body) = test_app
        .get_json("/api/v1.0/rainfall/2020-01-01/2020-12-31")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {
                "station": "USC1",
                "name": "WAIKIKI 717.2, HI US",
                "latitude": 21.3,
                "longitude": -157.8,
                "elevation": 10.0,
                "total_prcp": 0.1
            },
            {
                "station": "USC2",
                "name": "MANOA LYON ARBO 785.2, HI US",
                "latitude": 21.3,
                "longitude": -157.8,
                "elevation": 10.0,
                "total_prcp": 0.0
            }
        ])
    );

    let (status, body) = test_app
        .get_json("/api/v1.0/rainfall/2020-02-01/2020-05-31")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
