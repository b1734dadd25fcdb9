use crate::provider::error::ProviderError;
use crate::provider::response::ApiResponse;
use crate::provider::AqiProvider;
use crate::types::feed::StationFeed;
use crate::types::lat_lon::{BoundingBox, LatLon};
use crate::types::station::{CandidateStation, SearchResult, StationId};
use bon::bon;
use log::{debug, warn};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.waqi.info";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BOUNDS_ENDPOINT: &str = "/map/bounds/";
const HERE_ENDPOINT: &str = "/feed/here/";
const SEARCH_ENDPOINT: &str = "/search/";

/// Async client for the World Air Quality Index JSON API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct WaqiClient {
    http: Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for WaqiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaqiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[bon]
impl WaqiClient {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.token(..)`: **Required.** API token from <https://aqicn.org/data-platform/token/>.
    /// * `.base_url(..)`: Optional. Defaults to [`DEFAULT_BASE_URL`]. A trailing `/` is ignored.
    /// * `.timeout(Duration)`: Optional. Whole-request timeout, defaults to [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidBaseUrl`] if `base_url` is not an absolute URL, and
    /// [`ProviderError::ClientBuild`] if the HTTP client cannot be initialised
    /// (for example when no TLS backend is available).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use waqi::{WaqiClient, ProviderError};
    /// # use std::time::Duration;
    /// # fn run() -> Result<(), ProviderError> {
    /// let client = WaqiClient::builder()
    ///     .token("demo")
    ///     .timeout(Duration::from_secs(5))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] token: String,
        #[builder(into)] base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(ProviderError::ClientBuild)?;
        let base_url = base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim()
            .trim_end_matches('/')
            .to_string();
        Url::parse(&base_url)
            .map_err(|e| ProviderError::InvalidBaseUrl(base_url.clone(), e))?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }
}

impl WaqiClient {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Feed for the station the provider associates with the caller's IP address.
    pub async fn feed_here(&self) -> Result<StationFeed, ProviderError> {
        self.get(HERE_ENDPOINT, &[]).await
    }

    /// Stations whose name or city matches `keyword`.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>, ProviderError> {
        self.get(SEARCH_ENDPOINT, &[("keyword", keyword.to_string())])
            .await
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Issues a GET, checks the HTTP status and unwraps the `{status, data}` envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        debug!("Requesting {}", endpoint);

        let response = self
            .http
            .get(self.url_for(endpoint))
            .query(&[("token", self.token.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkRequest(endpoint.to_string(), e.without_url()))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", endpoint, e.status());
                let e = e.without_url();
                return Err(if let Some(status) = e.status() {
                    ProviderError::HttpStatus {
                        endpoint: endpoint.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ProviderError::NetworkRequest(endpoint.to_string(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkRequest(endpoint.to_string(), e.without_url()))?;

        ApiResponse::<T>::from_slice(&body)
            .map_err(|source| ProviderError::JsonParse {
                endpoint: endpoint.to_string(),
                source,
            })?
            .into_result(endpoint)
    }
}

impl AqiProvider for WaqiClient {
    async fn stations_in_bounds(
        &self,
        bounds: BoundingBox,
    ) -> Result<Vec<CandidateStation>, ProviderError> {
        self.get(BOUNDS_ENDPOINT, &[("latlng", bounds.to_query_value())])
            .await
    }

    async fn feed_by_id(&self, station: StationId) -> Result<StationFeed, ProviderError> {
        self.get(&format!("/feed/{}/", station), &[]).await
    }

    async fn feed_by_geo(&self, location: LatLon) -> Result<StationFeed, ProviderError> {
        self.get(&format!("/feed/geo:{};{}/", location.0, location.1), &[])
            .await
    }
}
