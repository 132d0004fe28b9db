//! Offline analysis that regenerates the dataset constants.

use serde::Serialize;

use super::{ClimateAccess, Error};

/// Constants derived from the dataset, serialized with the same keys the
/// server reads from its config file.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DatasetProfile {
    pub most_active_station: String,
    pub dataset_end: String,
    pub tobs_window_days: i64,
    #[serde(skip)]
    pub observation_count: i64,
}

impl ClimateAccess {
    /// Find the station with the most measurements (ties go to the lowest
    /// station id) and the latest measurement date. `None` for an empty
    /// dataset.
    pub async fn profile(&self, tobs_window_days: i64) -> Result<Option<DatasetProfile>, Error> {
        let busiest: Option<(String, i64)> = sqlx::query_as(
            "SELECT station, COUNT(*) AS observations
             FROM measurement
             GROUP BY station
             ORDER BY observations DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await?;

        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(self.pool())
            .await?;

        Ok(match (busiest, latest) {
            (Some((station, count)), Some(dataset_end)) => Some(DatasetProfile {
                most_active_station: station,
                dataset_end,
                tobs_window_days,
                observation_count: count,
            }),
            _ => None,
        })
    }
}
