use crate::provider::error::ProviderError;
use crate::types::station::StationId;
use thiserror::Error;

/// Terminal failures of a nearest-station resolution.
///
/// A failed bounding-box lookup is not listed here: it is recovered by falling back to
/// the provider's geo feed and only shows up in the logs.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    // The nearest candidate was chosen, but its feed could not be fetched
    #[error("Failed to fetch feed for nearest station {station_id}")]
    CandidateFetch {
        station_id: StationId,
        #[source]
        source: ProviderError,
    },

    #[error("Fallback geo feed lookup failed for ({lat}, {lon})")]
    Fallback {
        lat: f64,
        lon: f64,
        #[source]
        source: ProviderError,
    },
}
