//! Derived weather metrics
//!
//! This module is the computational core of the dashboard: a set of pure,
//! stateless classifiers that turn raw station observations into the
//! human-readable summaries the cards display. Nothing here performs I/O;
//! the [`Summarizer`] is handed already-fetched observations and returns a
//! fully derived [`WeatherSummary`].

pub mod bands;
pub mod compass;
pub mod lapse;
pub mod pressure;

pub use bands::{Band, BandTable};
pub use compass::CompassRose;
pub use lapse::{compute_lapse_rate, LapseRateInfo, StabilityBand, StabilityTable};
pub use pressure::sea_level_pressure_kpa;

use thiserror::Error;

use crate::data::Observation;

/// Errors produced while deriving a weather summary
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SummaryError {
    /// The primary observation is missing entirely; the caller should show
    /// a "no data available" state rather than a crash.
    #[error("no observation data available")]
    NoData,

    /// A wind direction fell outside every compass sector. The shipped rose
    /// covers the full circle, so this is a table-construction defect.
    #[error("wind direction {0} degrees does not fall in any compass sector")]
    InvalidInput(f64),

    /// A reading fell outside every band of a classification table, meaning
    /// the table lacks its infinite catch-all entry.
    #[error("value {0} does not fall in any classification band")]
    NoMatchingBand(f64),
}

/// A numeric reading paired with its qualitative band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandedValue {
    /// The raw reading
    pub value: f64,
    /// The band it classified into
    pub band: Band,
}

/// Barometric pressure in both reported and sea-level-adjusted forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSummary {
    /// Station pressure as reported, in hPa
    pub station_hpa: f64,
    /// Sea-level equivalent, in kPa
    pub sea_level_kpa: f64,
    /// Band classification of the sea-level value
    pub band: Band,
}

/// Everything the dashboard derives from one aggregation pass.
///
/// Each field is independently optional: a station that omits one metric
/// still gets summaries for all the others. Only the primary observation
/// itself is mandatory.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    /// Compass point the wind blows from
    pub wind_direction: Option<&'static str>,
    /// Sea-level-adjusted barometric pressure and its band
    pub barometric_pressure: Option<PressureSummary>,
    /// Dew point (°C) and comfort band
    pub dew_point: Option<BandedValue>,
    /// Relative humidity (%) and comfort band
    pub humidity: Option<BandedValue>,
    /// Heat index (°C) and risk band
    pub heat_index: Option<BandedValue>,
    /// Wind chill (°C) and risk band
    pub wind_chill: Option<BandedValue>,
    /// UV index and risk band
    pub uv_index: Option<BandedValue>,
    /// Lapse rate between launch and ground stations
    pub lapse: LapseRateInfo,
}

/// Derives weather summaries from station observations.
///
/// The classifier components are injected at construction so tests can
/// substitute their own tables; [`Summarizer::new`] wires up the canonical
/// set. The summarizer holds no mutable state and is safe to share.
#[derive(Debug, Clone)]
pub struct Summarizer {
    compass: CompassRose,
    pressure_bands: BandTable,
    dew_point_bands: BandTable,
    humidity_bands: BandTable,
    heat_index_bands: BandTable,
    wind_chill_bands: BandTable,
    uv_bands: BandTable,
    stability: StabilityTable,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer {
    /// Creates a summarizer with the canonical classification tables.
    pub fn new() -> Self {
        Self::with_components(
            CompassRose::sixteen_point(),
            BandTable::barometric_pressure(),
            BandTable::dew_point(),
            BandTable::humidity(),
            BandTable::heat_index(),
            BandTable::wind_chill(),
            BandTable::uv_index(),
            StabilityTable::standard(),
        )
    }

    /// Creates a summarizer from explicit classifier components.
    #[allow(clippy::too_many_arguments)]
    pub fn with_components(
        compass: CompassRose,
        pressure_bands: BandTable,
        dew_point_bands: BandTable,
        humidity_bands: BandTable,
        heat_index_bands: BandTable,
        wind_chill_bands: BandTable,
        uv_bands: BandTable,
        stability: StabilityTable,
    ) -> Self {
        Self {
            compass,
            pressure_bands,
            dew_point_bands,
            humidity_bands,
            heat_index_bands,
            wind_chill_bands,
            uv_bands,
            stability,
        }
    }

    /// Derives a [`WeatherSummary`] from a primary (launch) observation and
    /// an optional secondary (ground) observation.
    ///
    /// A missing primary observation fails with [`SummaryError::NoData`].
    /// Missing individual metrics are not errors: the corresponding output
    /// fields are `None` and every other summary is still computed. A
    /// missing secondary observation yields the defined "unavailable" lapse
    /// result.
    pub fn summarize(
        &self,
        primary: Option<&Observation>,
        secondary: Option<&Observation>,
    ) -> Result<WeatherSummary, SummaryError> {
        let observation = primary.ok_or(SummaryError::NoData)?;

        let wind_direction = match observation.wind_direction_degrees {
            Some(degrees) => Some(self.compass.classify(degrees)?),
            None => None,
        };

        let barometric_pressure = match (
            observation.metrics.elevation_feet,
            observation.metrics.pressure_hpa,
        ) {
            (Some(elevation_feet), Some(station_hpa)) => {
                let sea_level_kpa = sea_level_pressure_kpa(elevation_feet, station_hpa);
                Some(PressureSummary {
                    station_hpa,
                    sea_level_kpa,
                    band: self.pressure_bands.classify(sea_level_kpa)?,
                })
            }
            _ => None,
        };

        let dew_point = banded(&self.dew_point_bands, observation.metrics.dew_point_c)?;
        let humidity = banded(&self.humidity_bands, observation.humidity_percent)?;
        let heat_index = banded(&self.heat_index_bands, observation.metrics.heat_index_c)?;
        let wind_chill = banded(&self.wind_chill_bands, observation.metrics.wind_chill_c)?;
        let uv_index = banded(&self.uv_bands, observation.uv_index)?;

        let lapse = compute_lapse_rate(observation, secondary, &self.stability)?;

        Ok(WeatherSummary {
            wind_direction,
            barometric_pressure,
            dew_point,
            humidity,
            heat_index,
            wind_chill,
            uv_index,
            lapse,
        })
    }
}

/// Classifies an optional reading, propagating "missing" as `None`.
fn banded(table: &BandTable, value: Option<f64>) -> Result<Option<BandedValue>, SummaryError> {
    match value {
        Some(value) => Ok(Some(BandedValue {
            value,
            band: table.classify(value)?,
        })),
        None => Ok(None),
    }
}
