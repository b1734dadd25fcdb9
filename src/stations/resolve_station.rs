use crate::provider::AqiProvider;
use crate::stations::distance::distance_km;
use crate::stations::error::ResolveError;
use crate::types::feed::StationFeed;
use crate::types::lat_lon::{BoundingBox, LatLon};
use crate::types::station::CandidateStation;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;

/// Half the side of the square search window, in degrees of latitude and longitude.
///
/// Roughly 55 km north-south; the east-west extent shrinks with latitude.
pub const DEFAULT_SEARCH_RADIUS_DEG: f64 = 0.5;

/// Picks the candidate closest to `origin` by haversine distance.
///
/// When several candidates share the minimum distance the first one in `candidates`
/// wins. Candidates whose distance is not finite are skipped.
///
/// Returns the candidate together with its distance in kilometers.
pub fn nearest_candidate(
    origin: LatLon,
    candidates: &[CandidateStation],
) -> Option<(&CandidateStation, f64)> {
    candidates
        .iter()
        .map(|station| (station, distance_km(origin, station.location())))
        .filter(|(_, dist_km)| dist_km.is_finite())
        // min_by_key keeps the first of equal minima
        .min_by_key(|(_, dist_km)| OrderedFloat(*dist_km))
}

/// Maps a coordinate to the feed of the closest monitoring station.
///
/// The resolver holds no state beyond its provider and search window, so one instance
/// can serve any number of concurrent resolutions.
#[derive(Debug, Clone)]
pub struct StationResolver<P> {
    provider: P,
    search_radius_deg: f64,
}

impl<P: AqiProvider> StationResolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            search_radius_deg: DEFAULT_SEARCH_RADIUS_DEG,
        }
    }

    /// Overrides the half-width of the search window (default [`DEFAULT_SEARCH_RADIUS_DEG`]).
    pub fn with_search_radius_deg(mut self, search_radius_deg: f64) -> Self {
        self.search_radius_deg = search_radius_deg;
        self
    }

    pub fn search_radius_deg(&self) -> f64 {
        self.search_radius_deg
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves `location` to the nearest station's feed using the configured search window.
    ///
    /// See [`StationResolver::resolve_within`].
    pub async fn resolve_nearest_station(
        &self,
        location: LatLon,
    ) -> Result<StationFeed, ResolveError> {
        self.resolve_within(location, self.search_radius_deg).await
    }

    /// Resolves `location` to the nearest station's feed.
    ///
    /// 1. Lists the stations inside `location ± half_width_deg`.
    /// 2. If there is at least one, fetches the feed of the closest and returns it.
    ///    A failure here is returned as [`ResolveError::CandidateFetch`]; the geo
    ///    fallback is not tried once a station has been picked.
    /// 3. If the listing failed, was malformed, or was empty, returns the provider's
    ///    own geo feed for `location`, or [`ResolveError::Fallback`] if that fails too.
    ///
    /// At most two provider requests are made. Nothing is cached or retried.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidCoordinate`] without any request when `location`
    /// is not finite or out of range.
    pub async fn resolve_within(
        &self,
        location: LatLon,
        half_width_deg: f64,
    ) -> Result<StationFeed, ResolveError> {
        if !location.is_valid() {
            return Err(ResolveError::InvalidCoordinate {
                lat: location.0,
                lon: location.1,
            });
        }

        let bounds = BoundingBox::around(location, half_width_deg);
        match self.provider.stations_in_bounds(bounds).await {
            Ok(candidates) => {
                debug!(
                    "{} candidate stations within ±{}° of {}",
                    candidates.len(),
                    half_width_deg,
                    location
                );
                if let Some((nearest, dist_km)) = nearest_candidate(location, &candidates) {
                    info!(
                        "Nearest station to {} is {} ({}) at {:.2} km",
                        location,
                        nearest.uid,
                        nearest.name().unwrap_or("unnamed"),
                        dist_km
                    );
                    return self.provider.feed_by_id(nearest.uid).await.map_err(|source| {
                        ResolveError::CandidateFetch {
                            station_id: nearest.uid,
                            source,
                        }
                    });
                }
                info!(
                    "No stations within ±{}° of {}, falling back to geo feed",
                    half_width_deg, location
                );
            }
            Err(e) => {
                warn!(
                    "Nearest station search failed for {}, falling back to geo feed: {}",
                    location, e
                );
            }
        }

        self.provider
            .feed_by_geo(location)
            .await
            .map_err(|source| ResolveError::Fallback {
                lat: location.0,
                lon: location.1,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::error::ProviderError;
    use crate::types::feed::{City, FeedTime};
    use crate::types::station::StationId;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    const ORIGIN: LatLon = LatLon(41.0, 29.0);
    // One degree of latitude is ~111.19 km
    const KM_PER_DEG_LAT: f64 = 111.19;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Bounds(BoundingBox),
        ById(StationId),
        Geo(LatLon),
    }

    #[derive(Clone)]
    enum Outcome<T> {
        Ok(T),
        Transport,
        Malformed,
        Api(&'static str),
    }

    impl<T> Outcome<T> {
        fn into_result(self, endpoint: &str) -> Result<T, ProviderError> {
            match self {
                Outcome::Ok(value) => Ok(value),
                // An unsendable request yields a real reqwest::Error without touching the network
                Outcome::Transport => Err(ProviderError::NetworkRequest(
                    endpoint.to_string(),
                    reqwest::Client::new().get("not a url").build().unwrap_err(),
                )),
                Outcome::Malformed => Err(ProviderError::JsonParse {
                    endpoint: endpoint.to_string(),
                    source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
                }),
                Outcome::Api(message) => Err(ProviderError::Api {
                    endpoint: endpoint.to_string(),
                    message: message.to_string(),
                }),
            }
        }
    }

    struct FakeProvider {
        bounds: Outcome<Vec<CandidateStation>>,
        by_id: HashMap<StationId, Outcome<StationFeed>>,
        geo: Outcome<StationFeed>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeProvider {
        fn new(bounds: Outcome<Vec<CandidateStation>>, geo: Outcome<StationFeed>) -> Self {
            Self {
                bounds,
                by_id: HashMap::new(),
                geo,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_feed(mut self, id: i64, outcome: Outcome<StationFeed>) -> Self {
            self.by_id.insert(StationId(id), outcome);
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl AqiProvider for FakeProvider {
        async fn stations_in_bounds(
            &self,
            bounds: BoundingBox,
        ) -> Result<Vec<CandidateStation>, ProviderError> {
            self.record(Call::Bounds(bounds));
            self.bounds.clone().into_result("/map/bounds/")
        }

        async fn feed_by_id(&self, station: StationId) -> Result<StationFeed, ProviderError> {
            self.record(Call::ById(station));
            self.by_id
                .get(&station)
                .cloned()
                .unwrap_or(Outcome::Api("Unknown station"))
                .into_result("/feed/@/")
        }

        async fn feed_by_geo(&self, location: LatLon) -> Result<StationFeed, ProviderError> {
            self.record(Call::Geo(location));
            self.geo.clone().into_result("/feed/geo/")
        }
    }

    fn feed(id: i64, name: &str) -> StationFeed {
        StationFeed {
            aqi: Some(40),
            idx: StationId(id),
            attributions: Vec::new(),
            city: City {
                geo: None,
                name: name.to_string(),
                url: None,
            },
            dominant_pollutant: "pm25".to_string(),
            iaqi: BTreeMap::new(),
            time: FeedTime::default(),
            forecast: None,
        }
    }

    /// A candidate `km_north` kilometers due north of the origin.
    fn candidate_north(id: i64, km_north: f64) -> CandidateStation {
        candidate_at(id, LatLon(ORIGIN.0 + km_north / KM_PER_DEG_LAT, ORIGIN.1))
    }

    fn candidate_at(id: i64, location: LatLon) -> CandidateStation {
        CandidateStation {
            uid: StationId(id),
            lat: location.0,
            lon: location.1,
            aqi: None,
            station: None,
        }
    }

    fn origin_box() -> BoundingBox {
        BoundingBox::around(ORIGIN, DEFAULT_SEARCH_RADIUS_DEG)
    }

    #[test]
    fn test_nearest_candidate_picks_smallest_distance() {
        let candidates = vec![
            candidate_north(1, 5.0),
            candidate_north(2, 2.0),
            candidate_north(3, 8.0),
        ];
        let (nearest, dist_km) = nearest_candidate(ORIGIN, &candidates).unwrap();
        assert_eq!(nearest.uid, StationId(2));
        assert!((dist_km - 2.0).abs() < 0.05, "got {dist_km} km");
    }

    #[test]
    fn test_nearest_candidate_first_of_equal_distances_wins() {
        let spot = LatLon(41.01, 29.01);
        let candidates = vec![
            candidate_north(9, 30.0),
            candidate_at(4, spot),
            candidate_at(5, spot),
        ];
        let (nearest, _) = nearest_candidate(ORIGIN, &candidates).unwrap();
        assert_eq!(nearest.uid, StationId(4));
    }

    #[test]
    fn test_nearest_candidate_skips_non_finite() {
        let candidates = vec![
            candidate_at(1, LatLon(f64::NAN, 29.0)),
            candidate_north(2, 12.0),
        ];
        let (nearest, _) = nearest_candidate(ORIGIN, &candidates).unwrap();
        assert_eq!(nearest.uid, StationId(2));

        let only_bad = vec![candidate_at(1, LatLon(f64::NAN, f64::NAN))];
        assert!(nearest_candidate(ORIGIN, &only_bad).is_none());
        assert!(nearest_candidate(ORIGIN, &[]).is_none());
    }

    #[tokio::test]
    async fn test_resolves_nearest_of_several() {
        let provider = FakeProvider::new(
            Outcome::Ok(vec![
                candidate_north(1, 5.0),
                candidate_north(2, 2.0),
                candidate_north(3, 8.0),
            ]),
            Outcome::Ok(feed(99, "geo")),
        )
        .with_feed(1, Outcome::Ok(feed(1, "five")))
        .with_feed(2, Outcome::Ok(feed(2, "two")))
        .with_feed(3, Outcome::Ok(feed(3, "eight")));
        let resolver = StationResolver::new(provider);

        let result = resolver.resolve_nearest_station(ORIGIN).await.unwrap();
        assert_eq!(result.idx, StationId(2));
        assert_eq!(
            resolver.provider().calls(),
            vec![Call::Bounds(origin_box()), Call::ById(StationId(2))]
        );
    }

    #[tokio::test]
    async fn test_empty_bounds_uses_geo_feed() {
        let provider = FakeProvider::new(Outcome::Ok(vec![]), Outcome::Ok(feed(99, "geo")));
        let resolver = StationResolver::new(provider);

        let result = resolver.resolve_nearest_station(ORIGIN).await.unwrap();
        assert_eq!(result.idx, StationId(99));
        assert_eq!(
            resolver.provider().calls(),
            vec![Call::Bounds(origin_box()), Call::Geo(ORIGIN)]
        );
    }

    #[tokio::test]
    async fn test_unrankable_candidates_use_geo_feed() {
        let provider = FakeProvider::new(
            Outcome::Ok(vec![
                candidate_at(1, LatLon(f64::NAN, f64::NAN)),
                candidate_at(2, LatLon(f64::NAN, 29.0)),
            ]),
            Outcome::Ok(feed(99, "geo")),
        );
        let resolver = StationResolver::new(provider);

        let result = resolver.resolve_nearest_station(ORIGIN).await.unwrap();
        assert_eq!(result.idx, StationId(99));
        assert_eq!(
            resolver.provider().calls(),
            vec![Call::Bounds(origin_box()), Call::Geo(ORIGIN)]
        );
    }

    #[tokio::test]
    async fn test_bounds_transport_failure_is_recovered() {
        let provider = FakeProvider::new(Outcome::Transport, Outcome::Ok(feed(99, "geo")));
        let resolver = StationResolver::new(provider);

        let result = resolver.resolve_nearest_station(ORIGIN).await.unwrap();
        assert_eq!(result.idx, StationId(99));
        assert_eq!(
            resolver.provider().calls(),
            vec![Call::Bounds(origin_box()), Call::Geo(ORIGIN)]
        );
    }

    #[tokio::test]
    async fn test_bounds_malformed_or_error_status_is_recovered() {
        for bounds in [Outcome::Malformed, Outcome::Api("Over quota")] {
            let provider = FakeProvider::new(bounds, Outcome::Ok(feed(99, "geo")));
            let resolver = StationResolver::new(provider);

            let result = resolver.resolve_nearest_station(ORIGIN).await.unwrap();
            assert_eq!(result.idx, StationId(99));
            assert_eq!(resolver.provider().calls().len(), 2);
        }
    }

    #[tokio::test]
    async fn test_candidate_fetch_failure_does_not_fall_back() {
        let provider = FakeProvider::new(
            Outcome::Ok(vec![candidate_north(7, 3.0)]),
            Outcome::Ok(feed(99, "geo")),
        )
        .with_feed(7, Outcome::Transport);
        let resolver = StationResolver::new(provider);

        let err = resolver.resolve_nearest_station(ORIGIN).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::CandidateFetch {
                station_id: StationId(7),
                source: ProviderError::NetworkRequest(..)
            }
        ));
        let calls = resolver.provider().calls();
        assert_eq!(calls, vec![Call::Bounds(origin_box()), Call::ById(StationId(7))]);
        assert!(!calls.iter().any(|c| matches!(c, Call::Geo(_))));
    }

    #[tokio::test]
    async fn test_both_tiers_failing_is_terminal() {
        let provider = FakeProvider::new(Outcome::Transport, Outcome::Api("Unknown location"));
        let resolver = StationResolver::new(provider);

        let err = resolver.resolve_nearest_station(ORIGIN).await.unwrap_err();
        match err {
            ResolveError::Fallback { lat, lon, source } => {
                assert_eq!((lat, lon), (ORIGIN.0, ORIGIN.1));
                assert!(matches!(source, ProviderError::Api { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_resolution_is_idempotent() {
        let provider = FakeProvider::new(
            Outcome::Ok(vec![candidate_north(1, 4.0), candidate_north(2, 1.5)]),
            Outcome::Ok(feed(99, "geo")),
        )
        .with_feed(1, Outcome::Ok(feed(1, "four")))
        .with_feed(2, Outcome::Ok(feed(2, "one and a half")));
        let resolver = StationResolver::new(provider);

        let first = resolver.resolve_nearest_station(ORIGIN).await.unwrap();
        let second = resolver.resolve_nearest_station(ORIGIN).await.unwrap();
        assert_eq!(first.idx, second.idx);
        assert_eq!(resolver.provider().calls().len(), 4);
    }

    #[tokio::test]
    async fn test_invalid_coordinate_makes_no_requests() {
        let provider = FakeProvider::new(Outcome::Ok(vec![]), Outcome::Ok(feed(99, "geo")));
        let resolver = StationResolver::new(provider);

        for bad in [LatLon(91.0, 0.0), LatLon(0.0, 181.0), LatLon(f64::NAN, 0.0)] {
            let err = resolver.resolve_nearest_station(bad).await.unwrap_err();
            assert!(matches!(err, ResolveError::InvalidCoordinate { .. }));
        }
        assert!(resolver.provider().calls().is_empty());
    }

    #[tokio::test]
    async fn test_custom_search_window() {
        let provider = FakeProvider::new(Outcome::Ok(vec![]), Outcome::Ok(feed(99, "geo")));
        let resolver = StationResolver::new(provider).with_search_radius_deg(1.0);
        assert_eq!(resolver.search_radius_deg(), 1.0);

        resolver.resolve_nearest_station(ORIGIN).await.unwrap();
        resolver.resolve_within(ORIGIN, 0.25).await.unwrap();

        let calls = resolver.provider().calls();
        assert_eq!(calls[0], Call::Bounds(BoundingBox::around(ORIGIN, 1.0)));
        assert_eq!(calls[2], Call::Bounds(BoundingBox::around(ORIGIN, 0.25)));
    }
}
