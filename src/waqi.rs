//! This module provides the main entry point for looking up live air quality.
//! It resolves a coordinate to the nearest monitoring station, and also exposes the
//! direct lookups (by station id, by IP, by keyword) a dashboard needs around it.

use crate::error::WaqiError;
use crate::provider::waqi_client::WaqiClient;
use crate::provider::AqiProvider;
use crate::stations::resolve_station::StationResolver;
use crate::types::feed::StationFeed;
use crate::types::lat_lon::LatLon;
use crate::types::station::{SearchResult, StationId};
use bon::bon;
use log::info;

/// Environment variable holding the API token, read by [`Waqi::from_env`].
pub const TOKEN_ENV_VAR: &str = "WAQI_TOKEN";
/// Optional environment variable overriding the API base URL, read by [`Waqi::from_env`].
pub const BASE_URL_ENV_VAR: &str = "WAQI_BASE_URL";

/// The main client struct for fetching live air quality data.
///
/// Holds a [`WaqiClient`] and a [`StationResolver`] built on top of it. Neither keeps any
/// state between calls, so a single `Waqi` can be shared freely across tasks.
///
/// # Examples
///
/// ```rust
/// # use waqi::{Waqi, WaqiError, LatLon};
/// # async fn run() -> Result<(), WaqiError> {
/// let waqi = Waqi::new("my-token")?;
/// let feed = waqi
///     .nearest_station()
///     .location(LatLon(41.0082, 28.9784))
///     .call()
///     .await?;
/// println!("{}: AQI {:?}", feed.name(), feed.aqi);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Waqi {
    client: WaqiClient,
    resolver: StationResolver<WaqiClient>,
}

#[bon]
impl Waqi {
    /// Wraps an already configured [`WaqiClient`].
    pub fn with_client(client: WaqiClient) -> Self {
        Self {
            resolver: StationResolver::new(client.clone()),
            client,
        }
    }

    /// Creates a client with the default base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WaqiError::Provider`] if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, WaqiError> {
        let client = WaqiClient::builder().token(token).build()?;
        Ok(Self::with_client(client))
    }

    /// Creates a client from `WAQI_TOKEN` and, if set, `WAQI_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`WaqiError::MissingToken`] if `WAQI_TOKEN` is unset or empty, and
    /// [`WaqiError::Provider`] if `WAQI_BASE_URL` is not an absolute URL.
    pub fn from_env() -> Result<Self, WaqiError> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(WaqiError::MissingToken(TOKEN_ENV_VAR))?;
        let base_url = std::env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|u| !u.trim().is_empty());
        let client = WaqiClient::builder()
            .token(token)
            .maybe_base_url(base_url)
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Changes the default half-width, in degrees, of the nearest-station search window.
    pub fn with_search_radius_deg(mut self, search_radius_deg: f64) -> Self {
        self.resolver = self.resolver.with_search_radius_deg(search_radius_deg);
        self
    }

    pub fn client(&self) -> &WaqiClient {
        &self.client
    }

    /// Fetches the feed of the monitoring station closest to a coordinate.
    ///
    /// Stations inside a square window around `location` are ranked by great-circle
    /// distance and the closest one's feed is returned. If the window listing fails or
    /// comes back empty, the provider's own coarser geo lookup is used instead.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** The point to resolve.
    /// * `.search_radius_deg(f64)`: Optional. Half-width of the search window in degrees.
    ///   Defaults to the resolver's setting, `0.5` unless changed with
    ///   [`Waqi::with_search_radius_deg`].
    ///
    /// # Errors
    ///
    /// Returns [`WaqiError::Resolve`] when the coordinate is invalid, when the chosen
    /// station's feed cannot be fetched, or when the geo fallback fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use waqi::{Waqi, WaqiError, LatLon};
    /// # async fn run() -> Result<(), WaqiError> {
    /// let waqi = Waqi::from_env()?;
    /// let feed = waqi
    ///     .nearest_station()
    ///     .location(LatLon(52.52, 13.40))
    ///     .search_radius_deg(0.25)
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn nearest_station(
        &self,
        location: LatLon,
        search_radius_deg: Option<f64>,
    ) -> Result<StationFeed, WaqiError> {
        let radius = search_radius_deg.unwrap_or(self.resolver.search_radius_deg());
        Ok(self.resolver.resolve_within(location, radius).await?)
    }

    /// Fetches the feed of one station by its identifier, e.g. one picked from
    /// [`Waqi::search`] results.
    pub async fn station(&self, station: StationId) -> Result<StationFeed, WaqiError> {
        Ok(self.client.feed_by_id(station).await?)
    }

    /// Fetches the feed the provider picks from the caller's IP address.
    pub async fn here(&self) -> Result<StationFeed, WaqiError> {
        Ok(self.client.feed_here().await?)
    }

    /// Searches stations by name or city.
    ///
    /// A blank keyword returns an empty list without contacting the provider.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use waqi::{Waqi, WaqiError};
    /// # async fn run() -> Result<(), WaqiError> {
    /// let waqi = Waqi::from_env()?;
    /// for hit in waqi.search().keyword("istanbul").call().await? {
    ///     println!("{} {} {:?}", hit.uid, hit.station.name, hit.aqi);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>, WaqiError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.client.search(keyword).await?)
    }

    /// Fetches the feed for the device's current position.
    ///
    /// With a `location` (e.g. from GPS) this is [`Waqi::nearest_station`]. Without one,
    /// because the position is unavailable or permission was denied, the IP-based
    /// feed from [`Waqi::here`] is returned. Resolution errors are not retried via IP.
    #[builder]
    pub async fn current_station(
        &self,
        location: Option<LatLon>,
    ) -> Result<StationFeed, WaqiError> {
        match location {
            Some(location) => self.nearest_station().location(location).call().await,
            None => {
                info!("No device location available, using IP-based feed");
                self.here().await
            }
        }
    }
}
