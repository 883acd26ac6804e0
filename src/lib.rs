//! # hafas-rest-client - typed client for hafas-rest-api transit endpoints
//!
//! A thin async client for servers implementing the
//! [hafas-rest-api](https://github.com/public-transport/hafas-rest-api) surface
//! (`v6.db.transport.rest`, `v6.vbb.transport.rest`, self-hosted instances).
//! Every operation maps to exactly one HTTP GET and returns the decoded JSON
//! payload in a [`Response`] that also carries headers, `Server-Timing` and
//! `X-Cache` without mixing them into the payload.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hafas_rest_client::{Client, options::DeparturesOptions};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Departures {
//!     departures: Vec<serde_json::Value>,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hafas_rest_client::Error> {
//!     let client = Client::builder()
//!         .base_url("https://v6.vbb.transport.rest")?
//!         .user_agent("my-departure-board")
//!         .build()?;
//!
//!     let options = DeparturesOptions {
//!         duration: Some(30),
//!         ..Default::default()
//!     };
//!     let board = client.departures::<Departures>("900058101", &options).await?;
//!
//!     println!("{} departures", board.departures.len());
//!     println!("X-Cache: {:?}", board.cache());
//!     Ok(())
//! }
//! ```
//!
//! ## Identifiers
//!
//! Stop-based operations take anything convertible into an [`Identifier`]:
//! a plain id, or a value with an `id` field such as a result of
//! [`Client::locations`]. Empty or missing ids are rejected with
//! [`Error::InvalidArgument`] before a request is made.
//!
//! ## Error Handling
//!
//! ```no_run
//! use hafas_rest_client::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("https://v6.db.transport.rest")?;
//! match client.trip::<serde_json::Value>("unknown-trip", &()).await {
//!     Ok(trip) => println!("{}", trip["trip"]["line"]["name"]),
//!     Err(Error::HttpError { status, message, .. }) => {
//!         // e.g. "HTTP error! status: 404 – trip not found"
//!         eprintln!("{} ({})", message, status);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom requests
//!
//! [`Client::call`] is the primitive behind every operation and accepts
//! per-call overrides for headers, method, mode, redirect policy and timeout
//! through [`metadata::RequestOptions`].

mod client;
mod error;
pub mod identifier;
pub mod metadata;
pub mod operations;
pub mod options;
mod query;
pub mod response;
pub mod snapshot;

pub use client::{Client, ClientBuilder, DEFAULT_USER_AGENT};
pub use error::{Error, Result};
pub use identifier::{BoundingBox, Identifier, Location};
pub use response::{Response, ResponseMetadata};
