//! Core data models for the launchwx dashboard
//!
//! This module contains the observation types shared across the station
//! client, the derived-metrics core, and the UI.

pub mod station;

pub use station::{StationClient, StationError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot reading from a personal weather station.
///
/// An observation is immutable once constructed and is only meaningful for
/// summary purposes when it carries temperature, pressure, elevation, and
/// wind direction; the classifiers treat any missing field as unavailable,
/// never as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Instant the reading was taken
    pub obs_time_utc: DateTime<Utc>,
    /// Station latitude in decimal degrees
    pub latitude: f64,
    /// Station longitude in decimal degrees
    pub longitude: f64,
    /// Direction the wind blows from, 0-360 degrees
    pub wind_direction_degrees: Option<f64>,
    /// Relative humidity percentage (0-100)
    pub humidity_percent: Option<f64>,
    /// UV index
    pub uv_index: Option<f64>,
    /// Solar radiation in W/m²
    pub solar_radiation_wm2: Option<f64>,
    /// Metric-unit measurement block
    pub metrics: ObservationMetrics,
}

impl Observation {
    /// Age of the reading relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.obs_time_utc)
    }
}

/// The nested measurement block of an observation.
///
/// Every field is optional: stations routinely omit sensors, and an absent
/// reading must stay distinguishable from a zero one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationMetrics {
    /// Station elevation in feet
    pub elevation_feet: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed_kph: Option<f64>,
    /// Wind gust in km/h
    pub wind_gust_kph: Option<f64>,
    /// Temperature in Celsius
    pub temperature_c: Option<f64>,
    /// Total precipitation today in mm
    pub total_precip_mm: Option<f64>,
    /// Precipitation rate in mm/hr
    pub precip_rate_mm_per_hr: Option<f64>,
    /// Heat index in Celsius
    pub heat_index_c: Option<f64>,
    /// Dew point in Celsius
    pub dew_point_c: Option<f64>,
    /// Wind chill in Celsius
    pub wind_chill_c: Option<f64>,
    /// Barometric pressure in hPa
    pub pressure_hpa: Option<f64>,
}
