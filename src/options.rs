//! Typed query options for the most common operations.
//!
//! Unset fields are not sent, leaving the server's defaults in effect. Every
//! operation also accepts any other `Serialize` value, such as
//! `serde_json::json!({...})`, for parameters not covered here.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Options for [`Client::locations`](crate::Client::locations).
///
/// ```
/// use hafas_rest_client::options::LocationsOptions;
///
/// let options = LocationsOptions {
///     results: Some(10),
///     language: Some("en".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(
///     serde_json::to_value(&options).unwrap(),
///     serde_json::json!({"results": 10, "language": "en"})
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poi: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_of_stops: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Options for [`Client::departures`](crate::Client::departures) and
/// [`Client::arrivals`](crate::Client::arrivals).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturesOptions {
    /// Start of the time window. Defaults to now on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<DateTime<Utc>>,
    /// Only show departures heading towards this stop id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Length of the time window in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_of_stops: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopovers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_related_stations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Options for [`Client::nearby`](crate::Client::nearby).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<u32>,
    /// Maximum walking distance in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poi: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_of_stops: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Options for [`Client::journeys`](crate::Client::journeys).
///
/// `departure` and `arrival` are mutually exclusive on the server.
/// `earlier_than`/`later_than` take the refs returned with a previous
/// journeys response to page through results.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneysOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earlier_than: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub later_than: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<u32>,
    /// Stop id the journeys must pass through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopovers: Option<bool>,
    /// Maximum number of transfers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfers: Option<u32>,
    /// Minimum time for a single transfer in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bike: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}
