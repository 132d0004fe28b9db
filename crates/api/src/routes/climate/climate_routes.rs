use axum::{
    extract::{Path, State},
    Json,
};
use log::debug;
use std::sync::Arc;

use crate::{
    routes::error::{ApiError, ErrorBody},
    AppState, DateRange, PrecipitationReading, TemperatureReading, TemperatureSummary,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Every precipitation reading in the dataset", content_type = "application/json", body = Vec<PrecipitationReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationReading>>, ApiError> {
    let readings = state.climate_db.precipitation().await?;
    Ok(Json(readings))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Distinct station names", content_type = "application/json", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let names = state.climate_db.station_names().await?;
    Ok(Json(names))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Last year of temperature observations at the most active station", content_type = "application/json", body = Vec<TemperatureReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureReading>>, ApiError> {
    let constants = &state.constants;
    let readings = state
        .climate_db
        .station_temperatures(
            constants.most_active_station.clone(),
            constants.tobs_window_start(),
        )
        .await?;
    Ok(Json(readings))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD (YYYYMMDD also accepted)"),
    ),
    responses(
        (status = OK, description = "Daily min/max/avg temperature from start through the end of the dataset", content_type = "application/json", body = Vec<TemperatureSummary>),
        (status = BAD_REQUEST, description = "Malformed start date", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureSummary>>, ApiError> {
    let range = state.constants.range(&start, None)?;
    summarize(&state, range).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD (YYYYMMDD also accepted)"),
        ("end" = String, Path, description = "Last date to include, YYYY-MM-DD (YYYYMMDD also accepted)"),
    ),
    responses(
        (status = OK, description = "Daily min/max/avg temperature from start through end, inclusive", content_type = "application/json", body = Vec<TemperatureSummary>),
        (status = BAD_REQUEST, description = "Malformed start or end date", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn temperature_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureSummary>>, ApiError> {
    let range = state.constants.range(&start, Some(&end))?;
    summarize(&state, range).await
}

async fn summarize(
    state: &AppState,
    range: DateRange,
) -> Result<Json<Vec<TemperatureSummary>>, ApiError> {
    let summaries = state.climate_db.temperature_summary(range).await?;
    debug!(
        "{} daily summaries between {} and {}",
        summaries.len(),
        range.start,
        range.end
    );
    Ok(Json(summaries))
}
