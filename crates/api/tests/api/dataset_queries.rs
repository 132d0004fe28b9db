//! End-to-end checks through the router against an in-memory dataset.

use crate::helpers::{seeded_pool, spawn_app, TestApp};
use axum::http::StatusCode;
use climate_api::{ClimateAccess, TemperatureReading, TemperatureSummary};
use serde_json::from_slice;
use std::{collections::HashSet, sync::Arc};

const STATIONS: &[(&str, &str)] = &[
    ("USC00519397", "WAIKIKI 717.2, HI US"),
    ("USC00513117", "KANEOHE 838.1, HI US"),
    ("USC00519281", "WAIHEE 837.5, HI US"),
    ("USC00519281", "WAIHEE 837.5, HI US"),
];

async fn dataset_app(measurements: &[(&str, &str, Option<f64>, f64)]) -> TestApp {
    let pool = seeded_pool(measurements, STATIONS).await;
    spawn_app(Arc::new(ClimateAccess::from_pool(pool)))
}

async fn summaries(test_app: &TestApp, uri: &str) -> Vec<TemperatureSummary> {
    let (status, body) = test_app.get(uri).await;
    assert_eq!(status, StatusCode::OK, "{uri}");
    from_slice(&body).unwrap()
}

#[tokio::test]
async fn single_day_aggregates_all_stations() {
    let test_app = dataset_app(&[
        ("USC00519397", "2017-01-01", Some(0.0), 70.0),
        ("USC00519281", "2017-01-01", Some(0.1), 80.0),
        ("USC00519397", "2017-01-02", None, 60.0),
    ])
    .await;

    let result = summaries(&test_app, "/api/v1.0/2017-01-01/2017-01-01").await;
    assert_eq!(
        result,
        vec![TemperatureSummary {
            date: String::from("2017-01-01"),
            min: 70.0,
            max: 80.0,
            avg: 75.0,
        }]
    );
}

#[tokio::test]
async fn range_is_open_range_cut_at_end() {
    let test_app = dataset_app(&[
        ("USC00519397", "2017-08-20", None, 81.0),
        ("USC00519281", "2017-08-20", None, 76.0),
        ("USC00519397", "2017-08-21", None, 82.0),
        ("USC00519281", "2017-08-22", None, 75.0),
        ("USC00513117", "2017-08-22", None, 79.0),
        ("USC00519397", "2017-08-23", None, 82.0),
    ])
    .await;

    let open = summaries(&test_app, "/api/v1.0/2017-08-21").await;
    let bounded = summaries(&test_app, "/api/v1.0/2017-08-21/2017-08-22").await;

    assert_eq!(open.len(), 3);
    let cut: Vec<_> = open
        .into_iter()
        .filter(|s| s.date.as_str() <= "2017-08-22")
        .collect();
    assert_eq!(bounded, cut);

    for summary in &bounded {
        assert!(summary.min <= summary.avg && summary.avg <= summary.max);
    }
}

#[tokio::test]
async fn reversed_range_returns_empty_list() {
    let test_app = dataset_app(&[("USC00519397", "2017-08-20", None, 81.0)]).await;

    let result = summaries(&test_app, "/api/v1.0/2017-08-23/2017-08-01").await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn tobs_is_empty_when_station_only_reported_before_window() {
    let test_app = dataset_app(&[
        ("USC00519281", "2015-06-01", None, 72.0),
        ("USC00519281", "2016-08-22", None, 78.0),
        ("USC00519397", "2017-01-01", None, 70.0),
    ])
    .await;

    let (status, body) = test_app.get("/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);
    let readings: Vec<TemperatureReading> = from_slice(&body).unwrap();
    assert!(readings.is_empty());
}

#[tokio::test]
async fn tobs_includes_window_start() {
    let test_app = dataset_app(&[
        ("USC00519281", "2016-08-22", None, 78.0),
        ("USC00519281", "2016-08-23", None, 77.0),
        ("USC00519281", "2017-08-18", None, 79.0),
    ])
    .await;

    let (_, body) = test_app.get("/api/v1.0/tobs").await;
    let readings: Vec<TemperatureReading> = from_slice(&body).unwrap();
    let dates: Vec<_> = readings.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2016-08-23", "2017-08-18"]);
}

#[tokio::test]
async fn station_roster_has_no_duplicates() {
    let test_app = dataset_app(&[]).await;

    let (status, body) = test_app.get("/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = from_slice(&body).unwrap();

    let distinct: HashSet<_> = STATIONS.iter().map(|(_, name)| *name).collect();
    assert_eq!(names.len(), distinct.len());
    assert_eq!(names.iter().collect::<HashSet<_>>().len(), names.len());
}
