//! Temperature lapse rate and atmospheric stability
//!
//! Given observations from a launch station and a ground (landing-zone)
//! station at different elevations, the lapse rate is the temperature
//! change per 1000 ft of elevation between them. A strongly negative rate
//! means the air cools quickly with height and thermals are likely; a
//! positive rate is an inversion that suppresses lift.
//!
//! Sign convention: launch-minus-ground temperature over the absolute
//! elevation difference, in °C per 1000 ft.

use crate::data::Observation;

use super::SummaryError;

/// Elevation differences under this many thousand feet are treated as
/// co-located stations to avoid dividing by a near-zero span.
const MIN_ELEVATION_DIFF_THOUSAND_FEET: f64 = 0.001;

/// One stability classification band.
///
/// Several bands share a `name` but carry different descriptive text; the
/// sub-bands distinguish, for example, strong from marginal conditional
/// instability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityBand {
    /// Classification name, e.g. "Conditional Instability"
    pub name: &'static str,
    /// Upper bound on the lapse rate for this band (°C/1000 ft)
    pub max: f64,
    /// One-line description of what the air is doing
    pub detail: &'static str,
}

impl StabilityBand {
    /// Creates a stability band entry.
    pub const fn new(name: &'static str, max: f64, detail: &'static str) -> Self {
        Self { name, max, detail }
    }
}

/// Ordered table of stability bands, ascending by `max`, evaluated with a
/// first-match `rate <= max` rule.
#[derive(Debug, Clone)]
pub struct StabilityTable {
    bands: Vec<StabilityBand>,
}

impl Default for StabilityTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl StabilityTable {
    /// Creates a table from an explicit band list.
    pub fn new(bands: Vec<StabilityBand>) -> Self {
        Self { bands }
    }

    /// The canonical nine-band stability table.
    pub fn standard() -> Self {
        Self::new(vec![
            StabilityBand::new(
                "Unstable",
                -3.0,
                "Strong thermals, turbulent conditions possible",
            ),
            StabilityBand::new(
                "Conditional Instability",
                -2.5,
                "Thermals likely, some instability",
            ),
            StabilityBand::new("Conditional Instability", -2.0, "Weaker thermals developing"),
            StabilityBand::new(
                "Conditional Instability",
                -1.5,
                "Marginal thermal lift possible",
            ),
            StabilityBand::new(
                "Stable",
                -1.2,
                "Mostly smooth air, limited thermal activity",
            ),
            StabilityBand::new(
                "Stable",
                -0.5,
                "Very little thermal activity, smooth flying",
            ),
            StabilityBand::new("Stable", 0.0, "Cool and calm, no climb potential"),
            StabilityBand::new(
                "Inverted",
                0.5,
                "Temperature increases with height, suppresses lift",
            ),
            StabilityBand::new(
                "Strong Inversion",
                f64::INFINITY,
                "No lift, capped inversion layer",
            ),
        ])
    }

    /// Classifies a lapse rate, returning the first band whose bound it is
    /// at or below. Fails with [`SummaryError::NoMatchingBand`] only if the
    /// table lacks its catch-all entry.
    pub fn classify(&self, lapse_rate: f64) -> Result<StabilityBand, SummaryError> {
        self.bands
            .iter()
            .find(|b| lapse_rate <= b.max)
            .copied()
            .ok_or(SummaryError::NoMatchingBand(lapse_rate))
    }
}

/// Lapse rate between two stations, with its stability classification.
///
/// The all-`None` value is the defined "unavailable" result, produced when
/// the ground observation is absent or either station lacks the elevation
/// or temperature reading. It is not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapseRateInfo {
    /// Lapse rate in °C per 1000 ft, rounded to one decimal
    pub lapse_rate: Option<f64>,
    /// Absolute elevation difference in feet, rounded to one decimal
    pub elevation_diff_feet: Option<f64>,
    /// Stability classification of the lapse rate
    pub stability: Option<StabilityBand>,
}

impl LapseRateInfo {
    /// The defined result for "cannot be computed".
    pub fn unavailable() -> Self {
        Self {
            lapse_rate: None,
            elevation_diff_feet: None,
            stability: None,
        }
    }
}

/// Computes the lapse rate between a primary (launch) and secondary
/// (ground) observation and classifies it against `stability`.
///
/// Returns [`LapseRateInfo::unavailable`] when the secondary observation is
/// missing or either observation lacks elevation or temperature. A
/// near-zero elevation difference clamps the rate to 0 rather than letting
/// the division blow up.
pub fn compute_lapse_rate(
    primary: &Observation,
    secondary: Option<&Observation>,
    stability: &StabilityTable,
) -> Result<LapseRateInfo, SummaryError> {
    let Some(secondary) = secondary else {
        return Ok(LapseRateInfo::unavailable());
    };

    let (Some(primary_elev), Some(primary_temp), Some(secondary_elev), Some(secondary_temp)) = (
        primary.metrics.elevation_feet,
        primary.metrics.temperature_c,
        secondary.metrics.elevation_feet,
        secondary.metrics.temperature_c,
    ) else {
        return Ok(LapseRateInfo::unavailable());
    };

    let elev_diff_feet = (secondary_elev - primary_elev).abs();
    let elev_diff_thousand_feet = elev_diff_feet / 1000.0;
    let temp_diff = primary_temp - secondary_temp;

    let lapse_rate = if elev_diff_thousand_feet < MIN_ELEVATION_DIFF_THOUSAND_FEET {
        0.0
    } else {
        temp_diff / elev_diff_thousand_feet
    };

    let band = stability.classify(lapse_rate)?;

    Ok(LapseRateInfo {
        lapse_rate: Some(round_one_decimal(lapse_rate)),
        elevation_diff_feet: Some(round_one_decimal(elev_diff_feet)),
        stability: Some(band),
    })
}

/// Rounds to one decimal place for display-stable output.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ObservationMetrics;
    use chrono::{TimeZone, Utc};

    fn observation(elevation_feet: Option<f64>, temperature_c: Option<f64>) -> Observation {
        Observation {
            obs_time_utc: Utc.with_ymd_and_hms(2026, 8, 6, 17, 0, 0).unwrap(),
            latitude: 50.2274,
            longitude: -118.9801,
            wind_direction_degrees: Some(225.0),
            humidity_percent: Some(54.0),
            uv_index: Some(5.0),
            solar_radiation_wm2: Some(612.4),
            metrics: ObservationMetrics {
                elevation_feet,
                temperature_c,
                ..ObservationMetrics::default()
            },
        }
    }

    #[test]
    fn test_missing_secondary_is_unavailable() {
        let primary = observation(Some(3500.0), Some(18.0));
        let result =
            compute_lapse_rate(&primary, None, &StabilityTable::standard()).unwrap();
        assert_eq!(result, LapseRateInfo::unavailable());
    }

    #[test]
    fn test_missing_elevation_or_temperature_is_unavailable() {
        let table = StabilityTable::standard();
        let good = observation(Some(3500.0), Some(18.0));

        for broken in [
            observation(None, Some(18.0)),
            observation(Some(1600.0), None),
        ] {
            let result = compute_lapse_rate(&good, Some(&broken), &table).unwrap();
            assert_eq!(result, LapseRateInfo::unavailable());
            let result = compute_lapse_rate(&broken, Some(&good), &table).unwrap();
            assert_eq!(result, LapseRateInfo::unavailable());
        }
    }

    #[test]
    fn test_launch_warmer_than_ground_is_an_inversion() {
        // Launch at 1000 ft / 20°C, ground at 5000 ft / 10°C: 10°C over
        // 4000 ft gives +2.5 °C/1000 ft, past the Inverted band's 0.5 cap.
        let primary = observation(Some(1000.0), Some(20.0));
        let secondary = observation(Some(5000.0), Some(10.0));
        let result =
            compute_lapse_rate(&primary, Some(&secondary), &StabilityTable::standard()).unwrap();

        assert_eq!(result.lapse_rate, Some(2.5));
        assert_eq!(result.elevation_diff_feet, Some(4000.0));
        assert_eq!(result.stability.unwrap().name, "Strong Inversion");
    }

    #[test]
    fn test_cooling_aloft_reads_unstable() {
        // Launch 3600 ft / 12°C, ground 1600 ft / 19°C: the launch reading
        // is primary, so the rate is (12 - 19) / 2 = -3.5.
        let primary = observation(Some(3600.0), Some(12.0));
        let secondary = observation(Some(1600.0), Some(19.0));
        let result =
            compute_lapse_rate(&primary, Some(&secondary), &StabilityTable::standard()).unwrap();

        assert_eq!(result.lapse_rate, Some(-3.5));
        assert_eq!(result.elevation_diff_feet, Some(2000.0));
        assert_eq!(result.stability.unwrap().name, "Unstable");
    }

    #[test]
    fn test_near_zero_elevation_difference_clamps_to_zero() {
        let primary = observation(Some(1600.0), Some(21.0));
        let secondary = observation(Some(1600.5), Some(18.0));
        let result =
            compute_lapse_rate(&primary, Some(&secondary), &StabilityTable::standard()).unwrap();

        assert_eq!(result.lapse_rate, Some(0.0));
        assert_eq!(result.elevation_diff_feet, Some(0.5));
        assert_eq!(result.stability.unwrap().name, "Stable");
    }

    #[test]
    fn test_output_rounds_to_one_decimal() {
        // 5°C over 3000 ft: -1.666... rounds to -1.7.
        let primary = observation(Some(4600.0), Some(10.0));
        let secondary = observation(Some(1600.0), Some(15.0));
        let result =
            compute_lapse_rate(&primary, Some(&secondary), &StabilityTable::standard()).unwrap();

        assert_eq!(result.lapse_rate, Some(-1.7));
        assert_eq!(result.elevation_diff_feet, Some(3000.0));
    }

    #[test]
    fn test_classification_uses_unrounded_rate() {
        // -1.51 and -1.49 both display as -1.5 after rounding but sit on
        // opposite sides of the -1.5 sub-band boundary.
        let table = StabilityTable::standard();
        assert_eq!(
            table.classify(-1.51).unwrap().detail,
            "Marginal thermal lift possible"
        );
        assert_eq!(
            table.classify(-1.49).unwrap().detail,
            "Mostly smooth air, limited thermal activity"
        );
    }

    #[test]
    fn test_stability_band_boundaries() {
        let table = StabilityTable::standard();
        assert_eq!(table.classify(-3.0).unwrap().name, "Unstable");
        assert_eq!(table.classify(-2.9).unwrap().name, "Conditional Instability");
        assert_eq!(table.classify(-1.5).unwrap().detail, "Marginal thermal lift possible");
        assert_eq!(table.classify(0.0).unwrap().detail, "Cool and calm, no climb potential");
        assert_eq!(table.classify(0.5).unwrap().name, "Inverted");
        assert_eq!(table.classify(0.6).unwrap().name, "Strong Inversion");
    }

    #[test]
    fn test_malformed_stability_table_fails_loudly() {
        let table = StabilityTable::new(vec![StabilityBand::new("Unstable", -3.0, "only band")]);
        match table.classify(1.0) {
            Err(SummaryError::NoMatchingBand(rate)) => {
                assert!((rate - 1.0).abs() < f64::EPSILON);
            }
            other => panic!("Expected NoMatchingBand error, got {:?}", other),
        }
    }
}
