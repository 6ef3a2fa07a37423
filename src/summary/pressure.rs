//! Sea-level pressure adjustment
//!
//! Stations at different elevations report different station pressures for
//! the same synoptic situation. The barometric formula reduces a station
//! reading to its sea-level equivalent so the pressure bands compare like
//! with like.

/// Sea-level standard temperature (K)
const T0: f64 = 288.15;
/// Standard-atmosphere temperature lapse rate (K/m)
const L: f64 = 0.0065;
/// Gravitational acceleration (m/s²)
const G: f64 = 9.80665;
/// Specific gas constant for dry air (J/(kg·K))
const R: f64 = 287.05;
/// Feet to metres
const FEET_TO_METRES: f64 = 0.3048;

/// Converts a station pressure reading to its sea-level equivalent in kPa.
///
/// Defined for any elevation well below the top of the troposphere; the
/// input range is trusted, not validated.
pub fn sea_level_pressure_kpa(elevation_feet: f64, station_pressure_hpa: f64) -> f64 {
    let elevation_m = elevation_feet * FEET_TO_METRES;
    let exponent = G / (R * L);
    let factor = (1.0 - L * elevation_m / T0).powf(-exponent);
    (station_pressure_hpa * factor) / 10.0
}
