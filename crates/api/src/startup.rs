use crate::{
    db, index_handler, precipitation, routes, stations, temperature_from, temperature_range,
    tobs, ClimateAccess, ClimateData, DatasetConstants,
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
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
    pub constants: DatasetConstants,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::precipitation,
        routes::climate::climate_routes::stations,
        routes::climate::climate_routes::tobs,
        routes::climate::climate_routes::temperature_from,
        routes::climate::climate_routes::temperature_range,
    ),
    components(
        schemas(
                db::PrecipitationReading,
                db::TemperatureReading,
                db::TemperatureSummary,
                routes::error::ErrorBody
            )
    ),
    tags(
        (name = "hawaii climate api", description = "a read-only RESTful api over Hawaii weather station precipitation and temperature measurements")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    database: &str,
    max_connections: u32,
    constants: DatasetConstants,
) -> Result<AppState, anyhow::Error> {
    let climate_db = Arc::new(
        ClimateAccess::open(database, max_connections)
            .await
            .map_err(|e| anyhow!("error opening climate dataset: {}", e))?,
    );

    Ok(AppState {
        climate_db,
        constants,
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
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
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, path: {}, time: {}", response.status().as_str(), path, response_time);

    response
}
