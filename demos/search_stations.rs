use std::env;
use waqi::{Waqi, WaqiError};

#[tokio::main]
async fn main() -> Result<(), WaqiError> {
    env_logger::init();

    let keyword = env::args().nth(1).unwrap_or_else(|| "istanbul".to_string());
    let waqi = Waqi::from_env()?;

    let results = waqi.search().keyword(&keyword).call().await?;
    println!("{} stations matching '{}'", results.len(), keyword);
    for hit in &results {
        println!(
            "{:>8}  {:>4}  {}",
            hit.uid.to_string(),
            hit.aqi.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
            hit.station.name
        );
    }

    if let Some(first) = results.first() {
        let feed = waqi.station(first.uid).await?;
        println!("\n{}: AQI {:?}, dominant {}", feed.name(), feed.aqi, feed.dominant_pollutant);
    }

    Ok(())
}
