use std::env;
use waqi::{LatLon, Pollutant, Waqi, WaqiError};

/// Usage: `WAQI_TOKEN=... cargo run --example nearest_station -- 41.0082 28.9784`
#[tokio::main]
async fn main() -> Result<(), WaqiError> {
    // Set RUST_LOG=info (or debug) to see which resolution path was taken
    env_logger::init();

    let args: Vec<f64> = env::args().skip(1).filter_map(|a| a.parse().ok()).collect();
    let location = match args.as_slice() {
        [lat, lon] => Some(LatLon(*lat, *lon)),
        _ => None,
    };

    let waqi = Waqi::from_env()?;
    let feed = waqi.current_station().maybe_location(location).call().await?;

    println!("{} ({})", feed.name(), feed.idx);
    match (feed.aqi, feed.aqi_level()) {
        (Some(aqi), Some(level)) => println!("AQI {} - {}", aqi, level),
        _ => println!("No current AQI reading"),
    }
    if let Some(dominant) = feed.dominant() {
        println!("Dominant pollutant: {}", dominant);
    }
    for pollutant in Pollutant::ALL {
        if let Some(v) = feed.sub_index(pollutant) {
            println!("  {:<6} {}", pollutant, v);
        }
    }
    if let Some(updated) = feed.updated_at() {
        println!("Updated {}", updated);
    }

    Ok(())
}
