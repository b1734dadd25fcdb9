use crate::types::lat_lon::LatLon;
use haversine::{distance, Location as HaversineLocation, Units};

/// Great-circle distance in kilometers between two coordinates (haversine, R = 6371 km).
pub fn distance_km(a: LatLon, b: LatLon) -> f64 {
    distance(
        HaversineLocation {
            latitude: a.0,
            longitude: a.1,
        },
        HaversineLocation {
            latitude: b.0,
            longitude: b.1,
        },
        Units::Kilometers,
    )
}
