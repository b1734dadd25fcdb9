pub mod distance;
pub mod error;
pub mod resolve_station;
