//! Geographic coordinates and the rectangular search windows built around them.

use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are decimal degrees.
///
/// # Examples
///
/// ```
/// use waqi::LatLon;
///
/// let istanbul = LatLon(41.0082, 28.9784);
/// assert_eq!(istanbul.0, 41.0082); // Latitude
/// assert_eq!(istanbul.1, 28.9784); // Longitude
/// assert!(istanbul.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// `true` when both components are finite, latitude is within `[-90, 90]`
    /// and longitude within `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite()
            && self.1.is_finite()
            && (-90.0..=90.0).contains(&self.0)
            && (-180.0..=180.0).contains(&self.1)
    }

    /// Great-circle distance to `other` in kilometers (haversine, Earth radius 6371 km).
    ///
    /// ```
    /// use waqi::LatLon;
    ///
    /// let new_york = LatLon(40.7128, -74.0060);
    /// let los_angeles = LatLon(34.0522, -118.2437);
    /// let d = new_york.distance_km(&los_angeles);
    /// assert!((d - 3936.0).abs() < 39.36);
    /// ```
    pub fn distance_km(&self, other: &LatLon) -> f64 {
        crate::stations::distance::distance_km(*self, *other)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// An axis-aligned latitude/longitude rectangle.
///
/// The box is built in plain degrees, so its east-west extent in kilometers shrinks
/// toward the poles. Edges are not clamped or wrapped at the poles or the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Builds the box `center ± half_width_deg` on both axes.
    pub fn around(center: LatLon, half_width_deg: f64) -> Self {
        Self {
            lat_min: center.0 - half_width_deg,
            lon_min: center.1 - half_width_deg,
            lat_max: center.0 + half_width_deg,
            lon_max: center.1 + half_width_deg,
        }
    }

    pub fn contains(&self, point: LatLon) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.0)
            && (self.lon_min..=self.lon_max).contains(&point.1)
    }

    /// Corner list in the order the bounds endpoint expects: `latMin,lngMin,latMax,lngMax`.
    pub(crate) fn to_query_value(self) -> String {
        format!(
            "{},{},{},{}",
            self.lat_min, self.lon_min, self.lat_max, self.lon_max
        )
    }
}
