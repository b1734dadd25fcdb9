mod error;
mod provider;
mod stations;
mod types;
mod utils;
mod waqi;

pub use error::WaqiError;
pub use waqi::*;

pub use provider::error::ProviderError;
pub use provider::response::ApiResponse;
pub use provider::waqi_client::{WaqiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use provider::AqiProvider;

pub use stations::distance::distance_km;
pub use stations::error::ResolveError;
pub use stations::resolve_station::{nearest_candidate, StationResolver, DEFAULT_SEARCH_RADIUS_DEG};

pub use types::aqi_level::AqiLevel;
pub use types::feed::{Attribution, City, DailyForecast, FeedTime, Forecast, Measurement, StationFeed};
pub use types::lat_lon::{BoundingBox, LatLon};
pub use types::pollutant::{Pollutant, UnknownPollutant};
pub use types::station::*;
