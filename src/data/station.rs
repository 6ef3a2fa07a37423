//! Personal-weather-station API client
//!
//! This module fetches current observations from the Weather Underground
//! PWS API and parses them into our Observation data structures. Responses
//! are cached on disk; a cached observation is reused while the reading
//! itself (not the fetch) is younger than the caller's TTL, and a stale
//! copy is better than nothing when the network is down.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::cache::CacheManager;

use super::{Observation, ObservationMetrics};

/// Base URL for the PWS current-observations endpoint
const PWS_BASE_URL: &str = "https://api.weather.com/v2/pws/observations/current";

/// Errors that can occur when fetching station data
#[derive(Debug, Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse station response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The station responded but reported no observations
    #[error("No observations reported for station {0}")]
    NoObservations(String),
}

/// Client for fetching current observations from the PWS API
#[derive(Debug, Clone)]
pub struct StationClient {
    client: Client,
    api_key: String,
    cache: Option<CacheManager>,
}

impl StationClient {
    /// Creates a new StationClient for the given API key, without caching.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            cache: None,
        }
    }

    /// Attaches a disk cache used to avoid refetching fresh observations
    /// and to fall back on when the API is unreachable.
    pub fn with_cache(mut self, cache: CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Fetches the current observation for a station.
    ///
    /// A cached observation is returned without touching the network while
    /// its reading is younger than `cache_ttl` (a zero TTL disables the
    /// cache entirely). When the fetch fails and any cached copy exists,
    /// the stale copy is returned instead of the error.
    pub async fn fetch_current(
        &self,
        station_id: &str,
        cache_ttl: Duration,
    ) -> Result<Observation, StationError> {
        let key = cache_key(station_id);

        if !cache_ttl.is_zero() {
            if let Some(cached) = self.read_cached(&key) {
                // to_std fails on negative ages (clock skew); treat those as stale
                match cached.age(Utc::now()).to_std() {
                    Ok(age) if age < cache_ttl => {
                        debug!(
                            "using cached observation for {} (age {}s, ttl {}s)",
                            station_id,
                            age.as_secs(),
                            cache_ttl.as_secs()
                        );
                        return Ok(cached);
                    }
                    _ => {}
                }
            }
        }

        match self.fetch_remote(station_id).await {
            Ok(observation) => {
                if let Some(cache) = &self.cache {
                    if let Err(err) = cache.write(&key, &observation) {
                        warn!("failed to write observation cache for {}: {}", station_id, err);
                    }
                }
                Ok(observation)
            }
            Err(err) => {
                // Stale data beats an empty dashboard when the API is down.
                if let Some(cached) = self.read_cached(&key) {
                    warn!(
                        "fetch for {} failed ({}), falling back to cached observation",
                        station_id, err
                    );
                    return Ok(cached);
                }
                Err(err)
            }
        }
    }

    /// Reads a previously cached observation, if any.
    fn read_cached(&self, key: &str) -> Option<Observation> {
        self.cache
            .as_ref()
            .and_then(|cache| cache.read::<Observation>(key))
            .map(|cached| cached.data)
    }

    /// Fetches and parses an observation from the API.
    async fn fetch_remote(&self, station_id: &str) -> Result<Observation, StationError> {
        let url = format!(
            "{}?stationId={}&format=json&units=h&numericPrecision=decimal&apiKey={}",
            PWS_BASE_URL, station_id, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;

        parse_response(&text, station_id)
    }
}

/// Cache key for a station's current observation
fn cache_key(station_id: &str) -> String {
    format!("observation_{}", station_id.to_lowercase())
}

/// Parses the PWS API response body into an Observation
fn parse_response(text: &str, station_id: &str) -> Result<Observation, StationError> {
    let response: StationResponse = serde_json::from_str(text)?;
    response
        .observations
        .into_iter()
        .next()
        .map(Observation::from)
        .ok_or_else(|| StationError::NoObservations(station_id.to_string()))
}

/// PWS API response structure
#[derive(Debug, Deserialize)]
struct StationResponse {
    #[serde(default)]
    observations: Vec<ApiObservation>,
}

/// One observation as reported by the API
#[derive(Debug, Deserialize)]
struct ApiObservation {
    #[serde(rename = "obsTimeUtc")]
    obs_time_utc: DateTime<Utc>,
    lat: f64,
    lon: f64,
    winddir: Option<f64>,
    humidity: Option<f64>,
    uv: Option<f64>,
    #[serde(rename = "solarRadiation")]
    solar_radiation: Option<f64>,
    /// Metric measurement block; named for the API's UK hybrid unit set
    /// (km/h wind, Celsius temperatures, hPa pressure, feet elevation).
    uk_hybrid: Option<ApiMetrics>,
}

/// The uk_hybrid measurement block
#[derive(Debug, Deserialize, Default)]
struct ApiMetrics {
    elev: Option<f64>,
    #[serde(rename = "windSpeed")]
    wind_speed: Option<f64>,
    #[serde(rename = "windGust")]
    wind_gust: Option<f64>,
    temp: Option<f64>,
    #[serde(rename = "precipTotal")]
    precip_total: Option<f64>,
    #[serde(rename = "precipRate")]
    precip_rate: Option<f64>,
    #[serde(rename = "heatIndex")]
    heat_index: Option<f64>,
    dewpt: Option<f64>,
    #[serde(rename = "windChill")]
    wind_chill: Option<f64>,
    pressure: Option<f64>,
}

impl From<ApiObservation> for Observation {
    fn from(api: ApiObservation) -> Self {
        let metrics = api.uk_hybrid.unwrap_or_default();
        Observation {
            obs_time_utc: api.obs_time_utc,
            latitude: api.lat,
            longitude: api.lon,
            wind_direction_degrees: api.winddir,
            humidity_percent: api.humidity,
            uv_index: api.uv,
            solar_radiation_wm2: api.solar_radiation,
            metrics: ObservationMetrics {
                elevation_feet: metrics.elev,
                wind_speed_kph: metrics.wind_speed,
                wind_gust_kph: metrics.wind_gust,
                temperature_c: metrics.temp,
                total_precip_mm: metrics.precip_total,
                precip_rate_mm_per_hr: metrics.precip_rate,
                heat_index_c: metrics.heat_index,
                dew_point_c: metrics.dewpt,
                wind_chill_c: metrics.wind_chill,
                pressure_hpa: metrics.pressure,
            },
        }
    }
}
