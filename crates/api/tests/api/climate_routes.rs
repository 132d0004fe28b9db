use crate::helpers::{spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::{
    db::Error, DateRange, ErrorBody, PrecipitationReading, TemperatureReading, TemperatureSummary,
};
use serde_json::{from_slice, Value};
use std::sync::Arc;
use time::macros::date;

#[tokio::test]
async fn precipitation_lists_every_reading() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_precipitation()
        .times(1)
        .returning(|| Ok(mock_precipitation()));

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, body) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"date": "2010-01-01", "precipitation": 0.08},
            {"date": "2010-01-02", "precipitation": null},
        ])
    );
}

#[tokio::test]
async fn stations_lists_names() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_station_names().times(1).returning(|| {
        Ok(vec![
            String::from("WAIKIKI 717.2, HI US"),
            String::from("KANEOHE 838.1, HI US"),
        ])
    });

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, body) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = from_slice(&body).unwrap();
    assert_eq!(names, vec!["WAIKIKI 717.2, HI US", "KANEOHE 838.1, HI US"]);
}

#[tokio::test]
async fn tobs_uses_configured_station_and_window() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_station_temperatures()
        .withf(|station_id, since| {
            station_id == "USC00519281" && *since == date!(2016 - 08 - 23)
        })
        .times(1)
        .returning(|_, _| {
            Ok(vec![TemperatureReading {
                date: String::from("2016-08-23"),
                temperature: 77.0,
            }])
        });

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, body) = test_app.get("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{"date": "2016-08-23", "temperature": 77.0}])
    );
}

#[tokio::test]
async fn start_only_runs_through_dataset_end() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_summary()
        .withf(|range| *range == DateRange::new(date!(2017 - 08 - 01), date!(2017 - 08 - 23)))
        .times(1)
        .returning(|_| Ok(mock_summaries()));

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, body) = test_app.get("/api/v1.0/2017-08-01").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = from_slice(&body).unwrap();
    assert_eq!(
        json[0],
        serde_json::json!({"date": "2017-08-01", "min": 72.0, "max": 83.0, "avg": 77.5})
    );
}

#[tokio::test]
async fn compact_dates_are_accepted() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_summary()
        .withf(|range| *range == DateRange::new(date!(2017 - 08 - 01), date!(2017 - 08 - 23)))
        .times(1)
        .returning(|_| Ok(mock_summaries()));

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, _) = test_app.get("/api/v1.0/20170801").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn range_passes_both_bounds() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_summary()
        .withf(|range| *range == DateRange::new(date!(2017 - 08 - 01), date!(2017 - 08 - 02)))
        .times(1)
        .returning(|_| Ok(mock_summaries()));

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, body) = test_app.get("/api/v1.0/2017-08-01/2017-08-02").await;

    assert_eq!(status, StatusCode::OK);
    let summaries: Vec<TemperatureSummary> = from_slice(&body).unwrap();
    assert_eq!(summaries, mock_summaries());
}

#[tokio::test]
async fn malformed_start_is_rejected_without_querying() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_temperature_summary().times(0);

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, body) = test_app.get("/api/v1.0/2017-13-40").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = from_slice(&body).unwrap();
    assert_eq!(error.error, "invalid_date");
    assert!(error.message.contains("2017-13-40"));
}

#[tokio::test]
async fn malformed_end_is_rejected_without_querying() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_temperature_summary().times(0);

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, body) = test_app.get("/api/v1.0/2017-08-01/2017-8-2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorBody = from_slice(&body).unwrap();
    assert_eq!(error.error, "invalid_date");
    assert!(error.message.contains("2017-8-2"));
}

#[tokio::test]
async fn storage_failure_is_a_server_error() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_precipitation()
        .times(1)
        .returning(|| Err(Error::Query(sqlx::Error::PoolTimedOut)));

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, body) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorBody = from_slice(&body).unwrap();
    assert_eq!(error.error, "storage_error");
}

#[tokio::test]
async fn empty_results_are_successful() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperature_summary()
        .times(1)
        .returning(|_| Ok(vec![]));

    let test_app = spawn_app(Arc::new(climate_data));
    let (status, body) = test_app.get("/api/v1.0/2017-08-10/2017-08-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

fn mock_precipitation() -> Vec<PrecipitationReading> {
    vec![
        PrecipitationReading {
            date: String::from("2010-01-01"),
            precipitation: Some(0.08),
        },
        PrecipitationReading {
            date: String::from("2010-01-02"),
            precipitation: None,
        },
    ]
}

fn mock_summaries() -> Vec<TemperatureSummary> {
    vec![
        TemperatureSummary {
            date: String::from("2017-08-01"),
            min: 72.0,
            max: 83.0,
            avg: 77.5,
        },
        TemperatureSummary {
            date: String::from("2017-08-02"),
            min: 70.0,
            max: 84.0,
            avg: 76.2,
        },
    ]
}
