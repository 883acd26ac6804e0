//! Response envelope that keeps decoded data apart from response metadata.
//!
//! A [`Response`] derefs to its payload and serializes as exactly that
//! payload. Headers, timing and cache information travel alongside in
//! [`ResponseMetadata`] and are only reachable through dedicated accessors.

use http::{HeaderMap, StatusCode};
use serde::{Serialize, Serializer};
use std::time::Duration;
use url::Url;

/// Header carrying server-side timing information.
pub const SERVER_TIMING: &str = "server-timing";

/// Header carrying the cache status of a proxy in front of the API.
pub const CACHE: &str = "x-cache";

/// Side-channel data taken from the HTTP response.
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// The HTTP status code.
    pub status: StatusCode,

    /// The final URL, after any redirects were followed.
    pub url: Url,

    /// The response headers.
    pub headers: HeaderMap,

    /// The `Server-Timing` header value, if present and non-empty.
    pub server_timing: Option<String>,

    /// The `X-Cache` header value, if present and non-empty.
    pub cache: Option<String>,

    /// The raw response body.
    pub raw_body: String,

    /// Time from sending the request until the body was read.
    pub latency: Duration,
}

impl ResponseMetadata {
    /// Builds metadata from a response's parts, extracting the timing and
    /// cache headers.
    pub fn new(
        status: StatusCode,
        url: Url,
        headers: HeaderMap,
        raw_body: String,
        latency: Duration,
    ) -> Self {
        let server_timing = header_string(&headers, SERVER_TIMING);
        let cache = header_string(&headers, CACHE);
        Self {
            status,
            url,
            headers,
            server_timing,
            cache,
            raw_body,
            latency,
        }
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A successful response: the decoded payload plus its metadata.
///
/// # Examples
///
/// ```no_run
/// use hafas_rest_client::Client;
///
/// # async fn example() -> Result<(), hafas_rest_client::Error> {
/// let client = Client::new("https://v6.bvg.transport.rest")?;
/// let departures = client
///     .departures::<serde_json::Value>("900058101", &())
///     .await?;
///
/// // The payload, as sent by the server
/// println!("{}", serde_json::to_string(&departures).unwrap());
///
/// // The side channel
/// println!("Server-Timing: {:?}", departures.server_timing());
/// println!("X-Cache: {:?}", departures.cache());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    data: T,
    metadata: ResponseMetadata,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(data: T, metadata: ResponseMetadata) -> Self {
        Self { data, metadata }
    }

    /// The decoded payload.
    pub fn body(&self) -> &T {
        &self.data
    }

    /// Consumes the envelope, returning the payload.
    pub fn into_body(self) -> T {
        self.data
    }

    /// Consumes the envelope, returning payload and metadata separately.
    pub fn into_parts(self) -> (T, ResponseMetadata) {
        (self.data, self.metadata)
    }

    /// The side-channel metadata.
    pub fn metadata(&self) -> &ResponseMetadata {
        &self.metadata
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.metadata.headers
    }

    /// Returns a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.metadata.headers.get(name)?.to_str().ok()
    }

    /// The `Server-Timing` header, if the server sent one.
    pub fn server_timing(&self) -> Option<&str> {
        self.metadata.server_timing.as_deref()
    }

    /// The `X-Cache` header, if the server sent one.
    pub fn cache(&self) -> Option<&str> {
        self.metadata.cache.as_deref()
    }

    /// Maps the payload to a different type, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            metadata: self.metadata,
        }
    }
}

impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde_json::json;

    fn metadata(headers: HeaderMap) -> ResponseMetadata {
        ResponseMetadata::new(
            StatusCode::OK,
            Url::parse("https://example.org/stops/1/departures").unwrap(),
            headers,
            r#"{"departures":[]}"#.to_string(),
            Duration::from_millis(12),
        )
    }

    #[test]
    fn serializes_payload_only() {
        let mut headers = HeaderMap::new();
        headers.insert("server-timing", HeaderValue::from_static("x"));
        headers.insert("x-cache", HeaderValue::from_static("HIT"));
        let response = Response::new(json!({"departures": []}), metadata(headers));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"departures": []})
        );
        assert_eq!(response.server_timing(), Some("x"));
        assert_eq!(response.cache(), Some("HIT"));
        assert_eq!(response["departures"], json!([]));
    }

    #[test]
    fn missing_or_empty_headers_are_none() {
        let mut headers = HeaderMap::new();
        headers.insert("x-cache", HeaderValue::from_static(""));
        let response = Response::new((), metadata(headers));

        assert_eq!(response.server_timing(), None);
        assert_eq!(response.cache(), None);
    }

    #[test]
    fn map_keeps_metadata() {
        let mut headers = HeaderMap::new();
        headers.insert("x-cache", HeaderValue::from_static("MISS"));
        let response = Response::new(vec![1, 2, 3], metadata(headers)).map(|v| v.len());

        assert_eq!(*response, 3);
        assert_eq!(response.cache(), Some("MISS"));
        assert_eq!(response.metadata().status, StatusCode::OK);
    }
}
