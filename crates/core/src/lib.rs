//! Hawaii Climate Core Library
//!
//! Shared pieces for the climate API server and the dataset profiler:
//! - Configuration loading (XDG-compliant)
//! - Defaults for the served dataset

mod config;

pub use config::{find_config_file, load_config, ConfigSource};
use time::{macros::date, Date};

/// Application name used for XDG paths
pub const APP_NAME: &str = "hawaii-climate";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default location of the measurement dataset
pub const DEFAULT_DATABASE_PATH: &str = "./Resources/hawaii.sqlite";

/// Default size of the read-only connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Station with the most observations in the bundled dataset
pub const DEFAULT_MOST_ACTIVE_STATION: &str = "USC00519281";

/// Latest measurement date in the bundled dataset
pub const DEFAULT_DATASET_END: Date = date!(2017 - 08 - 23);

/// Length of the temperature feed window, counted back from the dataset end
pub const DEFAULT_TOBS_WINDOW_DAYS: i64 = 365;
