//! The seam between station resolution and the HTTP provider.

pub mod error;
pub mod response;
pub mod waqi_client;

use crate::provider::error::ProviderError;
use crate::types::feed::StationFeed;
use crate::types::lat_lon::{BoundingBox, LatLon};
use crate::types::station::{CandidateStation, StationId};
use std::future::Future;

/// The three provider lookups the nearest-station resolver is built on.
///
/// Implementations must not cache between calls; every call reflects the provider's
/// current state.
pub trait AqiProvider: Send + Sync {
    /// All stations whose coordinates fall inside `bounds`.
    fn stations_in_bounds(
        &self,
        bounds: BoundingBox,
    ) -> impl Future<Output = Result<Vec<CandidateStation>, ProviderError>> + Send;

    /// The full feed of one specific station.
    fn feed_by_id(
        &self,
        station: StationId,
    ) -> impl Future<Output = Result<StationFeed, ProviderError>> + Send;

    /// The provider's own coarse "nearest feed to this point" lookup.
    fn feed_by_geo(
        &self,
        location: LatLon,
    ) -> impl Future<Output = Result<StationFeed, ProviderError>> + Send;
}
