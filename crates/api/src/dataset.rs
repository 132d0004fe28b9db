use hawaii_climate_core::{
    DEFAULT_DATASET_END, DEFAULT_MOST_ACTIVE_STATION, DEFAULT_TOBS_WINDOW_DAYS,
};
use time::{Date, Duration};

use crate::{DateRange, ValidationError};

/// Longest temperature feed window accepted from configuration, in days.
pub const MAX_TOBS_WINDOW_DAYS: i64 = 36_525;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstantsError {
    #[error("invalid dataset_end: {0}")]
    DatasetEnd(#[from] ValidationError),
    #[error("tobs_window_days must be between 1 and {max}, got {0}", max = MAX_TOBS_WINDOW_DAYS)]
    WindowDays(i64),
}

/// Reject feed windows that are empty, reach past the end of the dataset, or
/// cannot be represented as a date offset.
pub fn check_window_days(days: i64) -> Result<i64, ConstantsError> {
    if (1..=MAX_TOBS_WINDOW_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(ConstantsError::WindowDays(days))
    }
}

/// Facts about the served dataset that are computed offline (see the
/// `climate-profile` binary) and supplied as configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConstants {
    /// Station with the most measurements.
    pub most_active_station: String,
    /// Latest measurement date; the implicit end of open ranges.
    pub dataset_end: Date,
    /// How far back the temperature feed reaches from `dataset_end`.
    pub tobs_window_days: i64,
}

impl DatasetConstants {
    pub fn new(
        most_active_station: impl Into<String>,
        dataset_end: Date,
        tobs_window_days: i64,
    ) -> Result<Self, ConstantsError> {
        Ok(Self {
            most_active_station: most_active_station.into(),
            dataset_end,
            tobs_window_days: check_window_days(tobs_window_days)?,
        })
    }

    /// First date included in the most-active-station temperature feed.
    pub fn tobs_window_start(&self) -> Date {
        let days = self.tobs_window_days.clamp(0, MAX_TOBS_WINDOW_DAYS);
        self.dataset_end.saturating_sub(Duration::days(days))
    }

    pub fn range(&self, start: &str, end: Option<&str>) -> Result<DateRange, ValidationError> {
        DateRange::from_params(start, end, self.dataset_end)
    }
}

impl Default for DatasetConstants {
    fn default() -> Self {
        Self {
            most_active_station: DEFAULT_MOST_ACTIVE_STATION.to_owned(),
            dataset_end: DEFAULT_DATASET_END,
            tobs_window_days: DEFAULT_TOBS_WINDOW_DAYS,
        }
    }
}
