use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use hawaii_climate_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_API_PORT, DEFAULT_DATABASE_PATH,
    DEFAULT_DATASET_END, DEFAULT_MAX_CONNECTIONS, DEFAULT_MOST_ACTIVE_STATION,
    DEFAULT_TOBS_WINDOW_DAYS,
};
use log::LevelFilter;
use std::env;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::{parse_date, ConstantsError, DatasetConstants};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default, PartialEq)]
#[command(
    author,
    version,
    about = "Hawaii climate API - station precipitation and temperature measurements over HTTP"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $HAWAII_CLIMATE_CONFIG, ./climate.toml,
    /// $XDG_CONFIG_HOME/hawaii-climate/climate.toml, /etc/hawaii-climate/climate.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "HAWAII_CLIMATE_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(long, env = "HAWAII_CLIMATE_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "HAWAII_CLIMATE_PORT")]
    pub port: Option<u16>,

    /// Path to the measurement dataset (SQLite), opened read-only
    #[arg(short, long, env = "HAWAII_CLIMATE_DATABASE")]
    pub database: Option<String>,

    /// Maximum pooled connections to the dataset
    #[arg(long, env = "HAWAII_CLIMATE_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Station served by /api/v1.0/tobs (regenerate with climate-profile)
    #[arg(long, env = "HAWAII_CLIMATE_MOST_ACTIVE_STATION")]
    pub most_active_station: Option<String>,

    /// Latest date in the dataset, YYYY-MM-DD (regenerate with climate-profile)
    #[arg(long, env = "HAWAII_CLIMATE_DATASET_END")]
    pub dataset_end: Option<String>,

    /// Days of temperature history served by /api/v1.0/tobs
    #[arg(long, env = "HAWAII_CLIMATE_TOBS_WINDOW_DAYS")]
    pub tobs_window_days: Option<i64>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn host(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_API_PORT)
    }

    pub fn database(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn dataset_constants(&self) -> Result<DatasetConstants, ConstantsError> {
        let dataset_end = match self.dataset_end.as_deref() {
            Some(end) => parse_date(end)?,
            None => DEFAULT_DATASET_END,
        };
        DatasetConstants::new(
            self.most_active_station
                .clone()
                .unwrap_or_else(|| DEFAULT_MOST_ACTIVE_STATION.to_string()),
            dataset_end,
            self.tobs_window_days.unwrap_or(DEFAULT_TOBS_WINDOW_DAYS),
        )
    }

    /// Fill every unset value from `file`.
    pub fn or_file(self, file: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file.level),
            host: self.host.or(file.host),
            port: self.port.or(file.port),
            database: self.database.or(file.database),
            max_connections: self.max_connections.or(file.max_connections),
            most_active_station: self.most_active_station.or(file.most_active_station),
            dataset_end: self.dataset_end.or(file.dataset_end),
            tobs_window_days: self.tobs_window_days.or(file.tobs_window_days),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> anyhow::Result<(Cli, ConfigSource)> {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("HAWAII_CLIMATE_CONFIG", "climate.toml")
    };

    let file_config: Cli = load_config(&source)
        .map_err(|e| anyhow::anyhow!("error reading config {}: {}", source, e))?;

    // CLI args override file config (env vars are handled by clap)
    Ok((cli_args.or_file(file_config), source))
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    log_format().chain(std::io::stdout())
}

/// Colored, timestamped line format shared by both binaries, with no output attached.
pub fn log_format() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc()
                    .format(&Iso8601::DEFAULT)
                    .unwrap_or_default(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
}
