//! Recompute the dataset constants the API serves from configuration.
//!
//! Prints a TOML snippet that can be pasted into `climate.toml` whenever the
//! dataset is replaced.

use anyhow::{anyhow, Context};
use clap::Parser;
use climate_api::{check_window_days, get_log_level, log_format, ClimateAccess, Cli};
use hawaii_climate_core::{DEFAULT_DATABASE_PATH, DEFAULT_TOBS_WINDOW_DAYS};
use log::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Derive the most active station and dataset end date from a climate dataset"
)]
struct ProfileCli {
    /// Path to the measurement dataset (SQLite)
    #[arg(short, long, env = "HAWAII_CLIMATE_DATABASE", default_value = DEFAULT_DATABASE_PATH)]
    database: String,

    /// Days of temperature history the feed should cover
    #[arg(short, long, default_value_t = DEFAULT_TOBS_WINDOW_DAYS)]
    window_days: i64,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "HAWAII_CLIMATE_LEVEL")]
    level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ProfileCli::parse();
    let log_level = get_log_level(&Cli {
        level: args.level.clone(),
        ..Cli::default()
    });
    // stdout carries the TOML, so logs go to stderr
    log_format()
        .level(log_level)
        .chain(std::io::stderr())
        .apply()
        .context("error setting up logger")?;

    let window_days = check_window_days(args.window_days)?;
    let access = ClimateAccess::open(&args.database, 1)
        .await
        .with_context(|| format!("error opening {}", args.database))?;

    let profile = access
        .profile(window_days)
        .await?
        .ok_or_else(|| anyhow!("{} has no measurements", args.database))?;

    info!(
        "{} has {} observations, the most of any station",
        profile.most_active_station, profile.observation_count
    );
    print!("{}", toml::to_string(&profile)?);
    Ok(())
}
