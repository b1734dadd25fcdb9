pub mod aqi_level;
pub mod feed;
pub mod lat_lon;
pub mod pollutant;
pub mod station;
