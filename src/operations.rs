//! Resource operations of the hafas-rest-api surface.
//!
//! Each operation validates its arguments, builds a [`RequestMetadata`] and
//! hands it to [`Client::call`]. Validation failures are returned before any
//! request is sent. Payloads are decoded into whatever type the caller asks
//! for; `serde_json::Value` works for all of them.
//!
//! Operation-specific parameters go into the query first. The `opt` argument
//! is merged on top, so its fields win on conflict.

use crate::{
    identifier::{BoundingBox, Location},
    metadata::RequestMetadata,
    Client, Error, Identifier, Response, Result,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{de::DeserializeOwned, Serialize};

/// Characters left alone when an id is placed in a path segment: ASCII
/// alphanumerics and `- _ . ! ~ * ' ( )`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes an id for use as a single path segment.
///
/// ```
/// use hafas_rest_client::operations::encode_segment;
///
/// assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
/// assert_eq!(encode_segment("900058101"), "900058101");
/// ```
pub fn encode_segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// Extracts the id of a stop or station argument.
fn station_id(station: &Identifier, missing: &'static str, no_id: &'static str) -> Result<String> {
    if station.is_missing() {
        return Err(Error::InvalidArgument(missing));
    }
    station
        .id()
        .map(str::to_string)
        .ok_or(Error::InvalidArgument(no_id))
}

fn non_empty<'a>(value: &'a str, message: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        Err(Error::InvalidArgument(message))
    } else {
        Ok(value)
    }
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct JourneysQuery<'a> {
    from: &'a Identifier,
    to: &'a Identifier,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TripsByNameQuery<'a> {
    line_name_or_fahrt_nr: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JourneysFromTripQuery<'a> {
    from_trip_id: &'a str,
    previous_stopover: serde_json::Value,
    to: &'a Identifier,
}

impl Client {
    /// Searches stops, stations, addresses and points of interest by name.
    ///
    /// `GET /locations?query=...`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hafas_rest_client::{Client, options::LocationsOptions};
    ///
    /// # async fn example() -> Result<(), hafas_rest_client::Error> {
    /// let client = Client::new("https://v6.vbb.transport.rest")?;
    /// let options = LocationsOptions {
    ///     results: Some(10),
    ///     language: Some("en".to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let found = client
    ///     .locations::<Vec<serde_json::Value>>("Südkreuz", &options)
    ///     .await?;
    /// for location in found.iter() {
    ///     println!("{} {}", location["id"], location["name"]);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn locations<T>(
        &self,
        query: &str,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let metadata = RequestMetadata::new("/locations")
            .with_query(&SearchQuery { query })?
            .with_query(opt)?;
        self.call(metadata).await
    }

    /// Finds stops close to a location.
    ///
    /// `GET /stops/nearby?latitude=...&longitude=...`
    pub async fn nearby<T>(
        &self,
        location: &Location,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let metadata = RequestMetadata::new("/stops/nearby")
            .with_query(location)?
            .with_query(opt)?;
        self.call(metadata).await
    }

    /// Lists stops reachable from an address, with travel durations.
    ///
    /// `GET /stops/reachable-from?latitude=...&longitude=...&address=...`
    pub async fn reachable_from<T>(
        &self,
        location: &Location,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let metadata = RequestMetadata::new("/stops/reachable-from")
            .with_query(location)?
            .with_query(opt)?;
        self.call(metadata).await
    }

    /// Fetches a single stop or station.
    ///
    /// `GET /stops/{id}`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `id` is empty or missing, or a
    /// reference without an `id`.
    pub async fn stop<T>(
        &self,
        id: impl Into<Identifier>,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let stop_id = station_id(&id.into(), "invalid id", "invalid stop id")?;
        let metadata =
            RequestMetadata::new(format!("/stops/{}", encode_segment(&stop_id))).with_query(opt)?;
        self.call(metadata).await
    }

    /// Fetches upcoming departures at a stop or station.
    ///
    /// `GET /stops/{id}/departures`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hafas_rest_client::{Client, options::DeparturesOptions};
    ///
    /// # async fn example() -> Result<(), hafas_rest_client::Error> {
    /// let client = Client::new("http://localhost:3333")?;
    /// let options = DeparturesOptions {
    ///     duration: Some(60),
    ///     lines_of_stops: Some(true),
    ///     remarks: Some(false),
    ///     ..Default::default()
    /// };
    ///
    /// let board = client
    ///     .departures::<serde_json::Value>("900058101", &options)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `station` is empty or missing, or a
    /// reference without an `id`.
    pub async fn departures<T>(
        &self,
        station: impl Into<Identifier>,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let stop_id = station_id(&station.into(), "invalid station", "invalid station id")?;
        let metadata =
            RequestMetadata::new(format!("/stops/{}/departures", encode_segment(&stop_id)))
                .with_query(opt)?;
        self.call(metadata).await
    }

    /// Fetches upcoming arrivals at a stop or station.
    ///
    /// `GET /stops/{id}/arrivals`
    pub async fn arrivals<T>(
        &self,
        station: impl Into<Identifier>,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let stop_id = station_id(&station.into(), "invalid station", "invalid station id")?;
        let metadata = RequestMetadata::new(format!("/stops/{}/arrivals", encode_segment(&stop_id)))
            .with_query(opt)?;
        self.call(metadata).await
    }

    /// Plans journeys between two places.
    ///
    /// Plain ids are sent as `from=<id>`; structured places such as a
    /// [`Location`] are sent with dotted keys (`from.latitude=...`).
    ///
    /// `GET /journeys`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `from` or `to` is empty or null.
    pub async fn journeys<T>(
        &self,
        from: impl Into<Identifier>,
        to: impl Into<Identifier>,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let (from, to) = (from.into(), to.into());
        if from.is_missing() {
            return Err(Error::InvalidArgument("invalid from"));
        }
        if to.is_missing() {
            return Err(Error::InvalidArgument("invalid to"));
        }
        let metadata = RequestMetadata::new("/journeys")
            .with_query(&JourneysQuery { from: &from, to: &to })?
            .with_query(opt)?;
        self.call(metadata).await
    }

    /// Refreshes a journey by the refresh token it was returned with.
    ///
    /// `GET /journeys/{ref}`
    pub async fn refresh_journey<T>(
        &self,
        refresh_token: &str,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let refresh_token = non_empty(refresh_token, "invalid ref")?;
        let metadata = RequestMetadata::new(format!("/journeys/{}", encode_segment(refresh_token)))
            .with_query(opt)?;
        self.call(metadata).await
    }

    /// Fetches a trip, i.e. one vehicle's run along a line.
    ///
    /// `GET /trips/{id}`
    pub async fn trip<T>(&self, id: &str, opt: &(impl Serialize + ?Sized)) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let id = non_empty(id, "invalid id")?;
        let metadata =
            RequestMetadata::new(format!("/trips/{}", encode_segment(id))).with_query(opt)?;
        self.call(metadata).await
    }

    /// Lists vehicles currently inside a bounding box.
    ///
    /// `GET /radar?north=...&west=...&south=...&east=...`
    pub async fn radar<T>(
        &self,
        bbox: &BoundingBox,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let metadata = RequestMetadata::new("/radar")
            .with_query(bbox)?
            .with_query(opt)?;
        self.call(metadata).await
    }

    /// Finds trips by line name or train number.
    ///
    /// `GET /trips/by-name?lineNameOrFahrtNr=...`
    pub async fn trips_by_name<T>(
        &self,
        line_name_or_fahrt_nr: &str,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let metadata = RequestMetadata::new("/trips/by-name")
            .with_query(&TripsByNameQuery {
                line_name_or_fahrt_nr,
            })?
            .with_query(opt)?;
        self.call(metadata).await
    }

    /// Lists current service remarks and warnings.
    ///
    /// `GET /remarks`
    pub async fn remarks<T>(&self, opt: &(impl Serialize + ?Sized)) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let metadata = RequestMetadata::new("/remarks").with_query(opt)?;
        self.call(metadata).await
    }

    /// Searches lines by name.
    ///
    /// `GET /lines?query=...`
    pub async fn lines<T>(
        &self,
        query: &str,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let metadata = RequestMetadata::new("/lines")
            .with_query(&SearchQuery { query })?
            .with_query(opt)?;
        self.call(metadata).await
    }

    /// Fetches information about the upstream HAFAS server.
    ///
    /// `GET /server-info`
    pub async fn server_info<T>(&self, opt: &(impl Serialize + ?Sized)) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let metadata = RequestMetadata::new("/server-info").with_query(opt)?;
        self.call(metadata).await
    }

    /// Plans journeys continuing from a trip the traveller is currently on.
    ///
    /// `previous_stopover` is the last stopover of that trip already passed;
    /// it is sent with dotted keys (`previousStopover.stop.id=...`).
    ///
    /// `GET /journeys/from-trip`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `from_trip_id` is empty, the stopover
    /// serializes to null, or `to` is empty or null.
    pub async fn journeys_from_trip<T>(
        &self,
        from_trip_id: &str,
        previous_stopover: &(impl Serialize + ?Sized),
        to: impl Into<Identifier>,
        opt: &(impl Serialize + ?Sized),
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let from_trip_id = non_empty(from_trip_id, "invalid fromTripId")?;
        let previous_stopover = serde_json::to_value(previous_stopover)
            .map_err(|e| Error::InvalidQuery(e.to_string()))?;
        if previous_stopover.is_null() {
            return Err(Error::InvalidArgument("invalid previousStopover"));
        }
        let to = to.into();
        if to.is_missing() {
            return Err(Error::InvalidArgument("invalid to"));
        }

        let metadata = RequestMetadata::new("/journeys/from-trip")
            .with_query(&JourneysFromTripQuery {
                from_trip_id,
                previous_stopover,
                to: &to,
            })?
            .with_query(opt)?;
        self.call(metadata).await
    }
}
