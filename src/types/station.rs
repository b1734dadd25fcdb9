//! Defines the lightweight station records returned by the bounding-box and keyword
//! search endpoints, and the identifier used to address a station's full feed.

use crate::types::lat_lon::LatLon;
use crate::utils::deserialize_aqi;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The numeric station identifier the API calls `uid` (or `idx` inside a feed).
///
/// Treat it as opaque: it is only ever passed back to the feed-by-id endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub i64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<i64> for StationId {
    fn from(value: i64) -> Self {
        StationId(value)
    }
}

/// A station as listed by the bounding-box query.
///
/// Only `uid`, `lat` and `lon` take part in nearest-station selection; the rest is
/// carried along because the endpoint returns it anyway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateStation {
    pub uid: StationId,
    pub lat: f64,
    pub lon: f64,
    /// Latest AQI reading, `None` when the station reports `"-"`.
    #[serde(default, deserialize_with = "deserialize_aqi")]
    pub aqi: Option<u32>,
    #[serde(default)]
    pub station: Option<CandidateInfo>,
}

/// Display details attached to a bounding-box result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub name: String,
    /// Time of the last reading, as formatted by the provider.
    #[serde(default)]
    pub time: Option<String>,
}

impl CandidateStation {
    pub fn location(&self) -> LatLon {
        LatLon(self.lat, self.lon)
    }

    pub fn name(&self) -> Option<&str> {
        self.station.as_ref().map(|s| s.name.as_str())
    }
}

/// One hit of a keyword search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub uid: StationId,
    #[serde(default, deserialize_with = "deserialize_aqi")]
    pub aqi: Option<u32>,
    #[serde(default)]
    pub time: Option<SearchTime>,
    pub station: SearchStation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchTime {
    #[serde(default)]
    pub tz: Option<String>,
    #[serde(default)]
    pub stime: Option<String>,
    #[serde(default)]
    pub vtime: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStation {
    pub name: String,
    /// `[latitude, longitude]`.
    #[serde(default)]
    pub geo: Option<[f64; 2]>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SearchResult {
    pub fn location(&self) -> Option<LatLon> {
        self.station.geo.map(|[lat, lon]| LatLon(lat, lon))
    }
}
