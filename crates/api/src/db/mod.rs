pub mod climate_data;
pub mod profile;
pub mod schema;

pub use climate_data::*;
pub use profile::DatasetProfile;
pub use schema::{verify_schema, TableSchema, MEASUREMENT, SCHEMA_VERSION, STATION, TABLES};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One day's rainfall at one station.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow, ToSchema)]
pub struct PrecipitationReading {
    /// Measurement date, YYYY-MM-DD
    pub date: String,
    /// Rainfall in inches, null when the station did not report
    pub precipitation: Option<f64>,
}

/// One temperature observation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow, ToSchema)]
pub struct TemperatureReading {
    /// Measurement date, YYYY-MM-DD
    pub date: String,
    /// Observed temperature in degrees Fahrenheit
    pub temperature: f64,
}

/// Temperature statistics across every station reporting on one date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow, ToSchema)]
pub struct TemperatureSummary {
    /// Measurement date, YYYY-MM-DD
    pub date: String,
    pub min: f64,
    pub max: f64,
    /// Arithmetic mean of the day's observations
    pub avg: f64,
}
