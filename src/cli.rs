//! Command-line interface parsing for launchwx
//!
//! This module handles parsing of CLI arguments using clap, including the
//! station IDs for the launch and ground sites, the API key, and the cache
//! timeouts for each station.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// A station ID is empty or contains characters the API rejects
    #[error("Invalid station ID: '{0}'. Station IDs are alphanumeric, e.g. ILUMBY7")]
    InvalidStation(String),
}

/// launchwx - Paragliding site weather dashboard
#[derive(Parser, Debug)]
#[command(name = "launchwx")]
#[command(about = "Launch and landing-zone weather dashboard for a flying site")]
#[command(version)]
pub struct Cli {
    /// Weather station ID at the launch site
    #[arg(long, value_name = "STATION", default_value = "ILUMBY7")]
    pub launch: String,

    /// Weather station ID at the ground / landing zone, paired with the
    /// launch station for the lapse-rate card
    #[arg(long, value_name = "STATION", default_value = "ILUMBY2")]
    pub ground: String,

    /// Skip the ground station entirely (no lapse-rate card)
    #[arg(long)]
    pub no_ground: bool,

    /// API key for the personal-weather-station service
    #[arg(long, value_name = "KEY", env = "PWS_API_KEY")]
    pub api_key: String,

    /// Seconds a cached launch observation stays fresh (0 disables caching)
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    pub launch_ttl: u64,

    /// Seconds a cached ground observation stays fresh (0 disables caching)
    #[arg(long, value_name = "SECONDS", default_value_t = 1800)]
    pub ground_ttl: u64,

    /// Disable automatic background refresh
    #[arg(long)]
    pub no_refresh: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Station ID for the launch site
    pub launch_station: String,
    /// Station ID for the ground site, if lapse-rate pairing is enabled
    pub ground_station: Option<String>,
    /// API key for the weather service
    pub api_key: String,
    /// How long a cached launch observation stays fresh
    pub launch_ttl: Duration,
    /// How long a cached ground observation stays fresh
    pub ground_ttl: Duration,
    /// Whether the background refresh task should run
    pub refresh_enabled: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if a station ID fails validation
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        validate_station_id(&cli.launch)?;

        let ground_station = if cli.no_ground {
            None
        } else {
            validate_station_id(&cli.ground)?;
            Some(cli.ground.clone())
        };

        Ok(StartupConfig {
            launch_station: cli.launch.clone(),
            ground_station,
            api_key: cli.api_key.clone(),
            launch_ttl: Duration::from_secs(cli.launch_ttl),
            ground_ttl: Duration::from_secs(cli.ground_ttl),
            refresh_enabled: !cli.no_refresh,
        })
    }
}

/// Validates a station ID argument.
///
/// # Arguments
/// * `s` - The station ID string from CLI
///
/// # Returns
/// * `Ok(())` if the ID is non-empty and alphanumeric
/// * `Err(CliError::InvalidStation)` otherwise
pub fn validate_station_id(s: &str) -> Result<(), CliError> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CliError::InvalidStation(s.to_string()));
    }
    Ok(())
}
