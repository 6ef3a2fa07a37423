//! Wind direction classification
//!
//! Maps a wind direction angle to one of the 16 compass points. The circle
//! is partitioned into 22.5-degree sectors centred on each point, so the
//! north sector wraps around the 0/360 boundary.

use super::SummaryError;

/// A single compass sector covering `[min, max)` degrees.
#[derive(Debug, Clone, Copy)]
pub struct Sector {
    label: &'static str,
    min: f64,
    max: f64,
}

impl Sector {
    /// Creates a sector labelled `label` covering `[min, max)` degrees.
    pub const fn new(label: &'static str, min: f64, max: f64) -> Self {
        Self { label, min, max }
    }
}

/// An ordered set of compass sectors used to classify wind directions.
///
/// Classification returns the first sector containing the normalized angle.
/// The sectors of [`CompassRose::sixteen_point`] cover the full circle, so a
/// lookup miss there indicates a construction defect, not a bad reading.
#[derive(Debug, Clone)]
pub struct CompassRose {
    sectors: Vec<Sector>,
}

impl Default for CompassRose {
    fn default() -> Self {
        Self::sixteen_point()
    }
}

impl CompassRose {
    /// Creates a rose from an explicit sector list.
    pub fn new(sectors: Vec<Sector>) -> Self {
        Self { sectors }
    }

    /// The standard 16-point rose. North appears twice because its sector
    /// spans the 0/360 wrap.
    pub fn sixteen_point() -> Self {
        Self::new(vec![
            Sector::new("N", 348.75, 360.0),
            Sector::new("N", 0.0, 11.25),
            Sector::new("NNE", 11.25, 33.75),
            Sector::new("NE", 33.75, 56.25),
            Sector::new("ENE", 56.25, 78.75),
            Sector::new("E", 78.75, 101.25),
            Sector::new("ESE", 101.25, 123.75),
            Sector::new("SE", 123.75, 146.25),
            Sector::new("SSE", 146.25, 168.75),
            Sector::new("S", 168.75, 191.25),
            Sector::new("SSW", 191.25, 213.75),
            Sector::new("SW", 213.75, 236.25),
            Sector::new("WSW", 236.25, 258.75),
            Sector::new("W", 258.75, 281.25),
            Sector::new("WNW", 281.25, 303.75),
            Sector::new("NW", 303.75, 326.25),
            Sector::new("NNW", 326.25, 348.75),
        ])
    }

    /// Classifies a wind direction angle into a compass point label.
    ///
    /// Any finite angle is accepted; negative and over-360 values are
    /// normalized into `[0, 360)` first. Fails with
    /// [`SummaryError::InvalidInput`] if no sector matches, which is
    /// unreachable for a full-circle rose.
    pub fn classify(&self, degrees: f64) -> Result<&'static str, SummaryError> {
        let normalized = ((degrees % 360.0) + 360.0) % 360.0;
        self.sectors
            .iter()
            .find(|s| s.min <= normalized && normalized < s.max)
            .map(|s| s.label)
            .ok_or(SummaryError::InvalidInput(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_at_zero_and_full_circle() {
        let rose = CompassRose::sixteen_point();
        assert_eq!(rose.classify(0.0).unwrap(), "N");
        assert_eq!(rose.classify(360.0).unwrap(), "N");
        assert_eq!(rose.classify(359.9).unwrap(), "N");
    }

    #[test]
    fn test_negative_angles_normalize() {
        let rose = CompassRose::sixteen_point();
        // -11 normalizes to 349, inside the wrapped north sector
        assert_eq!(rose.classify(-11.0).unwrap(), rose.classify(349.0).unwrap());
        assert_eq!(rose.classify(-11.0).unwrap(), "N");
        // -90 normalizes to 270 (W)
        assert_eq!(rose.classify(-90.0).unwrap(), "W");
    }

    #[test]
    fn test_over_rotation_normalizes() {
        let rose = CompassRose::sixteen_point();
        assert_eq!(rose.classify(720.0).unwrap(), "N");
        assert_eq!(rose.classify(405.0).unwrap(), "NE");
    }

    #[test]
    fn test_sector_boundaries_are_inclusive_below() {
        let rose = CompassRose::sixteen_point();
        // Lower edge belongs to the sector, upper edge to the next one
        assert_eq!(rose.classify(11.25).unwrap(), "NNE");
        assert_eq!(rose.classify(11.24).unwrap(), "N");
        assert_eq!(rose.classify(348.75).unwrap(), "N");
        assert_eq!(rose.classify(348.74).unwrap(), "NNW");
    }

    #[test]
    fn test_all_sixteen_points_at_sector_centres() {
        let rose = CompassRose::sixteen_point();
        let expected = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W",
            "WNW", "NW", "NNW",
        ];
        for (i, label) in expected.iter().enumerate() {
            let centre = i as f64 * 22.5;
            assert_eq!(
                rose.classify(centre).unwrap(),
                *label,
                "sector centre {} should classify as {}",
                centre,
                label
            );
        }
    }

    #[test]
    fn test_total_over_full_sweep() {
        let rose = CompassRose::sixteen_point();
        let mut degrees = -720.0;
        while degrees < 720.0 {
            assert!(
                rose.classify(degrees).is_ok(),
                "classification should succeed for {}",
                degrees
            );
            degrees += 0.5;
        }
    }

    #[test]
    fn test_gapped_rose_fails_loudly() {
        // A rose missing the east half of the circle must report the miss
        // instead of defaulting to north.
        let rose = CompassRose::new(vec![Sector::new("N", 0.0, 90.0)]);
        match rose.classify(180.0) {
            Err(SummaryError::InvalidInput(degrees)) => {
                assert!((degrees - 180.0).abs() < f64::EPSILON);
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }
}
