//! Qualitative band classification
//!
//! Each displayed quantity maps onto a fixed, ordered threshold table that
//! turns a numeric reading into a short label plus a one-line description.
//! Tables are evaluated in order and the first entry whose bound test the
//! value satisfies wins; every shipped table ends in an infinite catch-all,
//! so a lookup miss means the table itself is malformed.

use super::SummaryError;

/// One entry of a classification table.
///
/// `bound` is an upper bound (`value <= bound`) for ascending tables and a
/// lower bound (`value >= bound`) for descending ones; which comparison
/// applies is a property of the owning [`BandTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Short classification label, e.g. "Moderate"
    pub label: &'static str,
    /// Threshold for this entry
    pub bound: f64,
    /// One-line description shown under the value
    pub description: &'static str,
}

impl Band {
    /// Creates a band entry.
    pub const fn new(label: &'static str, bound: f64, description: &'static str) -> Self {
        Self {
            label,
            bound,
            description,
        }
    }
}

/// How a table's bounds are compared against the input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundKind {
    /// Entries carry ascending upper bounds; first entry with `value <= bound` wins.
    Upper,
    /// Entries carry descending lower bounds; first entry with `value >= bound` wins.
    Lower,
}

/// An ordered threshold table mapping a reading to a [`Band`].
#[derive(Debug, Clone)]
pub struct BandTable {
    kind: BoundKind,
    bands: Vec<Band>,
}

impl BandTable {
    /// Creates a table of ascending upper bounds (`value <= bound`).
    pub fn upper_bound(bands: Vec<Band>) -> Self {
        Self {
            kind: BoundKind::Upper,
            bands,
        }
    }

    /// Creates a table of descending lower bounds (`value >= bound`).
    pub fn lower_bound(bands: Vec<Band>) -> Self {
        Self {
            kind: BoundKind::Lower,
            bands,
        }
    }

    /// Classifies a reading against the table, returning the first matching
    /// band. Fails with [`SummaryError::NoMatchingBand`] only if the table
    /// lacks its infinite catch-all entry.
    pub fn classify(&self, value: f64) -> Result<Band, SummaryError> {
        let hit = match self.kind {
            BoundKind::Upper => self.bands.iter().find(|b| value <= b.bound),
            BoundKind::Lower => self.bands.iter().find(|b| value >= b.bound),
        };
        hit.copied().ok_or(SummaryError::NoMatchingBand(value))
    }

    /// Barometric pressure bands over the sea-level-adjusted reading in kPa.
    pub fn barometric_pressure() -> Self {
        Self::upper_bound(vec![
            Band::new("Very Low", 98.0, "Storms, maybe even severe weather"),
            Band::new("Low", 100.0, "Clouds, wind, likely rain"),
            Band::new("Normal", 102.0, "No big drama"),
            Band::new("High", f64::INFINITY, "Clear skies, stable weather"),
        ])
    }

    /// Dew point comfort bands (°C).
    pub fn dew_point() -> Self {
        Self::upper_bound(vec![
            Band::new("Dry", 10.0, "Dry and comfortable, minimal stickiness"),
            Band::new("Slightly Humid", 16.0, "Slightly humid yet still pleasant"),
            Band::new("Muggy", 18.0, "Noticeably muggy, sweat lingers"),
            Band::new(
                "Very Uncomfortable",
                21.0,
                "Very uncomfortable, heavy oppressive humidity",
            ),
            Band::new(
                "Oppressive",
                f64::INFINITY,
                "Oppressively humid, extremely sticky conditions",
            ),
        ])
    }

    /// Relative humidity comfort bands (%).
    pub fn humidity() -> Self {
        Self::upper_bound(vec![
            Band::new("Dry", 30.0, "Dry air, potential dehydration risk"),
            Band::new(
                "Comfortable",
                50.0,
                "Comfortable humidity, pleasant conditions",
            ),
            Band::new("Slightly Humid", 60.0, "Slight humidity, mild stickiness"),
            Band::new("Humid", 75.0, "Humid air, noticeable discomfort"),
            Band::new("Very Humid", f64::INFINITY, "Very humid, oppressive moisture"),
        ])
    }

    /// Heat index risk bands (°C).
    pub fn heat_index() -> Self {
        Self::upper_bound(vec![
            Band::new("Comfortable", 27.0, "Comfortable, minimal heat stress"),
            Band::new("Caution", 32.0, "Caution: some discomfort, stay hydrated"),
            Band::new(
                "Extreme Caution",
                39.0,
                "Extreme caution: heat cramps possible",
            ),
            Band::new("Danger", 46.0, "Danger: heatstroke likely, extreme caution"),
            Band::new(
                "Extreme Danger",
                f64::INFINITY,
                "Extreme danger: heat stroke imminent",
            ),
        ])
    }

    /// Wind chill risk bands (°C). Colder is worse, so this is the one
    /// lower-bound table: the first entry the reading is at or above wins.
    pub fn wind_chill() -> Self {
        Self::lower_bound(vec![
            Band::new("Minimal Risk", 0.0, "Minimal wind chill risk"),
            Band::new("Mild Cold", -10.0, "Mild cold, light jacket weather"),
            Band::new(
                "High Frostbite Risk",
                -28.0,
                "High frostbite risk, dress warm",
            ),
            Band::new(
                "Severe Frostbite Risk",
                -40.0,
                "Severe frostbite risk, limit exposure",
            ),
            Band::new(
                "Extreme Risk",
                f64::NEG_INFINITY,
                "Extreme risk, avoid outdoor exposure",
            ),
        ])
    }

    /// UV index risk bands.
    pub fn uv_index() -> Self {
        Self::upper_bound(vec![
            Band::new("Low", 2.9, "Minimal risk: light SPF, sunglasses"),
            Band::new("Moderate", 5.9, "Moderate risk: SPF 30+, hat"),
            Band::new("High", 7.9, "High risk: SPF 30-50, cover up"),
            Band::new("Very High", 10.9, "Very high risk: SPF 50+, cover up"),
            Band::new("Extreme", f64::INFINITY, "Extreme risk: stay indoors"),
        ])
    }
}
