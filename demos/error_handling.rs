//! Example demonstrating how failures surface.
//!
//! This example shows how to:
//! - Tell validation errors apart from request failures
//! - Read the server's error message from an HTTP error
//! - Handle network errors and timeouts
//!
//! Run with: `cargo run --example error_handling`

use hafas_rest_client::metadata::{RequestMetadata, RequestOptions};
use hafas_rest_client::{Client, Error};
use serde_json::Value;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("hafas_rest_client=info")
        .init();

    let client = Client::new("https://v6.db.transport.rest")?;

    println!("=== Example 1: Invalid endpoint ===");
    match Client::new("v6.db.transport.rest") {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Construction failed: {}", e),
    }
    println!();

    println!("=== Example 2: Validation before any request ===");
    match client.stop::<Value>("", &()).await {
        Err(e) if e.is_validation() => println!("Rejected locally: {}", e),
        other => println!("Unexpected: {:?}", other.map(|r| r.into_body())),
    }
    println!();

    println!("=== Example 3: HTTP errors with server detail ===");
    match client.trip::<Value>("definitely-not-a-trip", &()).await {
        Ok(trip) => println!("Success: {}", *trip),
        Err(Error::HttpError {
            status,
            message,
            body,
            ..
        }) => {
            println!("HTTP Error!");
            println!("  Status: {}", status);
            println!("  Message: {}", message);
            println!("  JSON body: {:?}", body);
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 4: Network errors and timeouts ===");
    let metadata = RequestMetadata::new("/server-info")
        .with_options(RequestOptions::new().with_timeout(Duration::from_millis(1)));
    match client.call::<Value>(metadata).await {
        Ok(_) => println!("Answered within 1ms"),
        Err(e) if e.is_timeout() => println!("Timed out: {}", e),
        Err(Error::Network(e)) => println!("Network Error: {}", e),
        Err(e) => println!("Other error: {}", e),
    }

    Ok(())
}
