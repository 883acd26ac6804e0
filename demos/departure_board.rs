//! Departure board for one station, the way the app's home screen shows it.
//!
//! This example shows how to:
//! - Create a client with a custom user agent
//! - Search for a station and pick the first stop or station result
//! - Fetch departures and read the response metadata
//! - Condense the departures into the snapshot the widget renders
//!
//! Run with: `cargo run --example departure_board -- "Südkreuz"`

use hafas_rest_client::options::{DeparturesOptions, LocationsOptions};
use hafas_rest_client::snapshot::{DeparturesSnapshot, SelectedStation};
use hafas_rest_client::{Client, Error};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("hafas_rest_client=debug,departure_board=info")
        .init();

    let endpoint = std::env::var("HAFAS_ENDPOINT")
        .unwrap_or_else(|_| "https://v6.vbb.transport.rest".to_string());
    let query = std::env::args().nth(1).unwrap_or_else(|| "Südkreuz".to_string());

    let client = Client::builder()
        .base_url(&endpoint)?
        .user_agent("departure-board-demo")
        .build()?;

    println!("=== Station search ===");
    let locations = client
        .locations::<Vec<Value>>(
            &query,
            &LocationsOptions {
                results: Some(10),
                language: Some("en".to_string()),
                ..Default::default()
            },
        )
        .await?;

    let Some(station) = locations.iter().find_map(SelectedStation::from_location) else {
        println!("No station found for {:?}", query);
        return Ok(());
    };
    println!("Selected: {} ({})", station.name, station.id);
    println!();

    println!("=== Departures ===");
    let departures = client
        .departures::<Value>(
            &station,
            &DeparturesOptions {
                duration: Some(60),
                lines_of_stops: Some(true),
                remarks: Some(false),
                language: Some("en".to_string()),
                ..Default::default()
            },
        )
        .await?;

    let snapshot = DeparturesSnapshot::from_departures(&departures);
    for row in &snapshot.departures {
        println!("{:>5}  {:<6} {}", row.display_time(), row.line, row.direction);
    }
    println!();

    println!("=== Response metadata ===");
    println!("Status: {}", departures.metadata().status);
    println!("Latency: {:?}", departures.metadata().latency);
    println!("Server-Timing: {:?}", departures.server_timing());
    println!("X-Cache: {:?}", departures.cache());
    println!();

    println!("=== Widget snapshot ===");
    match snapshot.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => println!("Could not serialize snapshot: {}", e),
    }

    Ok(())
}
