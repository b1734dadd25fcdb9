//! Defines the `AqiLevel` enum, mapping a numeric Air Quality Index value to the
//! US-EPA style health category it falls into.

use std::fmt;

/// The health category an AQI value belongs to.
///
/// Each variant covers an inclusive upper bound on the index; see
/// [`AqiLevel::from_aqi`] for the exact breakpoints.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum AqiLevel {
    /// 0–50: air quality is satisfactory.
    Good,
    /// 51–100: acceptable, with a moderate concern for unusually sensitive people.
    Moderate,
    /// 101–150: members of sensitive groups may experience health effects.
    UnhealthyForSensitiveGroups,
    /// 151–200: everyone may begin to experience health effects.
    Unhealthy,
    /// 201–300: health alert, everyone may experience more serious effects.
    VeryUnhealthy,
    /// Above 300: health warnings of emergency conditions.
    Hazardous,
}

impl AqiLevel {
    /// Classifies an AQI value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waqi::AqiLevel;
    ///
    /// assert_eq!(AqiLevel::from_aqi(42), AqiLevel::Good);
    /// assert_eq!(AqiLevel::from_aqi(101), AqiLevel::UnhealthyForSensitiveGroups);
    /// assert_eq!(AqiLevel::from_aqi(500), AqiLevel::Hazardous);
    /// ```
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => AqiLevel::Good,
            51..=100 => AqiLevel::Moderate,
            101..=150 => AqiLevel::UnhealthyForSensitiveGroups,
            151..=200 => AqiLevel::Unhealthy,
            201..=300 => AqiLevel::VeryUnhealthy,
            _ => AqiLevel::Hazardous,
        }
    }

    /// Stable machine-readable key, suitable as a lookup key for localized strings.
    pub fn key(&self) -> &'static str {
        match self {
            AqiLevel::Good => "good",
            AqiLevel::Moderate => "moderate",
            AqiLevel::UnhealthyForSensitiveGroups => "sensitive",
            AqiLevel::Unhealthy => "unhealthy",
            AqiLevel::VeryUnhealthy => "veryUnhealthy",
            AqiLevel::Hazardous => "hazardous",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very Unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
