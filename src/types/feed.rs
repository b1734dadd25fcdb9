//! The full live record of one monitoring station, as returned by the feed endpoints.

use crate::types::aqi_level::AqiLevel;
use crate::types::lat_lon::LatLon;
use crate::types::pollutant::Pollutant;
use crate::types::station::StationId;
use crate::utils::deserialize_aqi;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current air quality at a single station.
///
/// This is what the resolver hands back to its caller. It is a plain owned value with
/// no link back to the client that fetched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationFeed {
    /// Overall AQI, `None` when the station reports `"-"`.
    #[serde(default, deserialize_with = "deserialize_aqi")]
    pub aqi: Option<u32>,
    /// Identifier of the station this feed belongs to.
    pub idx: StationId,
    /// Agencies credited for the data.
    #[serde(default)]
    pub attributions: Vec<Attribution>,
    pub city: City,
    /// Key of the pollutant driving the overall AQI (the API spells it `dominentpol`).
    #[serde(rename = "dominentpol", default)]
    pub dominant_pollutant: String,
    /// Individual sub-indices keyed by the provider's short names (`pm25`, `o3`, `t`, `h`, ...).
    /// Weather readings such as temperature and humidity share this map.
    #[serde(default)]
    pub iaqi: BTreeMap<String, Measurement>,
    #[serde(default)]
    pub time: FeedTime,
    #[serde(default)]
    pub forecast: Option<Forecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    #[serde(default)]
    pub url: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// `[latitude, longitude]` of the station.
    #[serde(default)]
    pub geo: Option<[f64; 2]>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub v: f64,
}

/// When the feed was last updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedTime {
    /// Local time string, e.g. `"2024-05-02 12:00:00"`.
    #[serde(default)]
    pub s: Option<String>,
    /// Station UTC offset, e.g. `"+03:00"`.
    #[serde(default)]
    pub tz: Option<String>,
    #[serde(default)]
    pub v: Option<i64>,
    #[serde(default)]
    pub iso: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Daily forecasts keyed by pollutant short name.
    #[serde(default)]
    pub daily: BTreeMap<String, Vec<DailyForecast>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub avg: f64,
    pub day: NaiveDate,
    pub max: f64,
    pub min: f64,
}

impl StationFeed {
    pub fn station_id(&self) -> StationId {
        self.idx
    }

    pub fn name(&self) -> &str {
        &self.city.name
    }

    /// Coordinate of the station, if the provider reported one.
    pub fn location(&self) -> Option<LatLon> {
        self.city.geo.map(|[lat, lon]| LatLon(lat, lon))
    }

    /// Sub-index for a single pollutant.
    pub fn sub_index(&self, pollutant: Pollutant) -> Option<f64> {
        self.iaqi.get(pollutant.key()).map(|m| m.v)
    }

    /// The dominant pollutant, when it is one of the tracked [`Pollutant`]s.
    pub fn dominant(&self) -> Option<Pollutant> {
        self.dominant_pollutant.parse().ok()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.time.iso.map(|t| t.with_timezone(&Utc))
    }

    pub fn aqi_level(&self) -> Option<AqiLevel> {
        self.aqi.map(AqiLevel::from_aqi)
    }

    pub fn daily_forecast(&self, pollutant: Pollutant) -> &[DailyForecast] {
        self.forecast
            .as_ref()
            .and_then(|f| f.daily.get(pollutant.key()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
