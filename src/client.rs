//! HTTP client bound to one transit API endpoint.
//!
//! The [`Client`] type is the main entry point. Every resource operation
//! funnels through [`Client::call`], which resolves the path, encodes the
//! query, applies the per-call overrides, and turns the response into either
//! a [`Response`] or an [`Error`].

use crate::{
    metadata::{RedirectPolicy, RequestMetadata},
    query,
    response::ResponseMetadata,
    Error, Response, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "hafas-rest-api-client";

const MAX_REDIRECTS: usize = 10;

/// A client for a hafas-rest-api endpoint.
///
/// The client holds only immutable configuration, so it can be cloned cheaply
/// and shared between any number of concurrent calls. Each call is exactly one
/// HTTP round trip: there is no retrying and no caching.
///
/// # Examples
///
/// ```no_run
/// use hafas_rest_client::Client;
///
/// # async fn example() -> Result<(), hafas_rest_client::Error> {
/// let client = Client::builder()
///     .base_url("https://v6.bvg.transport.rest")?
///     .user_agent("my-departure-board")
///     .build()?;
///
/// let departures = client
///     .departures::<serde_json::Value>("900058101", &())
///     .await?;
/// println!("{}", departures["departures"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    following: reqwest::Client,
    not_following: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a client for `endpoint` with the default configuration.
    ///
    /// # Errors
    ///
    /// Fails immediately if `endpoint` is not an absolute URL.
    ///
    /// ```
    /// use hafas_rest_client::Client;
    ///
    /// assert!(Client::new("https://v6.db.transport.rest").is_ok());
    /// assert!(Client::new("v6.db.transport.rest").is_err());
    /// assert!(Client::new("").is_err());
    /// ```
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        Self::builder().base_url(endpoint)?.build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The endpoint all request paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Issues one request and decodes its JSON body.
    ///
    /// This is the primitive behind every resource operation. The path is
    /// resolved against the endpoint, its own query parameters are merged with
    /// `metadata.query`, and the overrides in `metadata.options` take
    /// precedence over the defaults (GET, follow redirects, the client
    /// timeout, and the client's default headers). A request mode is only
    /// sent, as `Sec-Fetch-Mode`, when one is set explicitly.
    ///
    /// # Errors
    ///
    /// - [`Error::Network`] if the transport fails.
    /// - [`Error::HttpError`] for a non-2xx status; the message includes the
    ///   status and, for JSON error bodies, the server's `msg`.
    /// - [`Error::UnexpectedRedirect`] for a 3xx under [`RedirectPolicy::Error`].
    /// - [`Error::DeserializationFailed`] if the body does not decode as `T`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hafas_rest_client::{Client, metadata::{RequestMetadata, RequestOptions}};
    /// use std::time::Duration;
    ///
    /// # async fn example() -> Result<(), hafas_rest_client::Error> {
    /// let client = Client::new("https://v6.db.transport.rest")?;
    ///
    /// let metadata = RequestMetadata::new("/stops/8011160/departures")
    ///     .with_query_param("duration", 30)
    ///     .with_options(RequestOptions::new().with_timeout(Duration::from_secs(5)));
    ///
    /// let departures = client.call::<serde_json::Value>(metadata).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<T>(&self, metadata: RequestMetadata) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.resolve(&metadata)?;
        let options = metadata.options;

        let method = options.method.unwrap_or(Method::GET);
        let redirect = options.redirect.unwrap_or_default();

        let mut headers = self.inner.default_headers.clone();
        if let Some(mode) = options.mode {
            headers.insert(
                HeaderName::from_static("sec-fetch-mode"),
                HeaderValue::from_static(mode.as_str()),
            );
        }
        for name in options.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &options.headers {
            headers.append(name.clone(), value.clone());
        }

        let http_client = match redirect {
            RedirectPolicy::Follow => &self.inner.following,
            RedirectPolicy::Manual | RedirectPolicy::Error => &self.inner.not_following,
        };

        tracing::debug!(
            method = %method,
            url = %url,
            redirect = ?redirect,
            "Executing HTTP request"
        );

        let mut request = http_client
            .request(method.clone(), url.clone())
            .headers(headers);
        if let Some(timeout) = options.timeout.or(self.inner.timeout) {
            request = request.timeout(timeout);
        }

        let start_time = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    method = %method,
                    url = %url,
                    "Request failed"
                );
                return Err(Error::Network(e));
            }
        };

        let status = response.status();
        tracing::info!(
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "Received HTTP response"
        );

        if status.is_redirection() && redirect == RedirectPolicy::Error {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            tracing::warn!(status = status.as_u16(), location = ?location, "Refusing redirect");
            return Err(Error::UnexpectedRedirect { status, location });
        }

        if !status.is_success() {
            return Err(http_error(response).await);
        }

        let final_url = response.url().clone();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;
        let latency = start_time.elapsed();

        match serde_json::from_str::<T>(&raw_body) {
            Ok(data) => Ok(Response::new(
                data,
                ResponseMetadata::new(status, final_url, headers, raw_body, latency),
            )),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }

    /// Resolves the request path against the endpoint and writes the merged
    /// query string.
    fn resolve(&self, metadata: &RequestMetadata) -> Result<Url> {
        let mut url = self.inner.base_url.join(&metadata.path)?;
        query::apply(&mut url, &metadata.query);
        Ok(url)
    }
}

/// Renders a `msg` value for the error message.
///
/// Empty strings, `0`, `false` and `null` carry no detail. Other scalars are
/// rendered as text, arrays and objects as compact JSON.
fn error_detail(msg: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match msg {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Builds the error for a non-2xx response.
///
/// If the response declares a JSON content type, its body is decoded and a
/// `msg` field is appended to the message. Any failure while doing so leaves
/// the plain status message in place.
async fn http_error(response: reqwest::Response) -> Error {
    let status = response.status();
    let headers = response.headers().clone();
    let raw_response = response.text().await.unwrap_or_default();

    let mut message = format!("HTTP error! status: {}", status.as_u16());
    let body = if is_json(&headers) {
        serde_json::from_str::<serde_json::Value>(&raw_response).ok()
    } else {
        None
    };
    if let Some(detail) = body
        .as_ref()
        .and_then(|b| b.get("msg"))
        .and_then(error_detail)
    {
        message.push_str(" – ");
        message.push_str(&detail);
    }

    if status.is_server_error() {
        tracing::warn!(
            status = status.as_u16(),
            response = %raw_response,
            "Server error (5xx)"
        );
    } else {
        tracing::error!(
            status = status.as_u16(),
            response = %raw_response,
            "Client error"
        );
    }

    Error::HttpError {
        status,
        message,
        headers,
        raw_response,
        body,
    }
}

/// Returns `true` if the `Content-Type` media type is `application/json`,
/// ignoring parameters such as `charset`.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```
/// use hafas_rest_client::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), hafas_rest_client::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://v6.vbb.transport.rest")?
///     .user_agent("departure-board/1.0")
///     .timeout(Duration::from_secs(10))
///     .default_header("Accept-Language", "en")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<Url>,
    user_agent: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Sets the endpoint all request paths are resolved against.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute or cannot be used as a base
    /// for relative paths.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        if url.cannot_be_a_base() {
            return Err(Error::ConfigurationError(format!(
                "Endpoint cannot be used as a base URL: {}",
                url
            )));
        }
        self.base_url = Some(url);
        Ok(self)
    }

    /// Sets the `User-Agent` sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// Default headers take precedence over `Accept` and `User-Agent`; per-call
    /// headers take precedence over default headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the default request timeout. Without one, calls wait indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided, the user agent is not a
    /// valid header value, or the HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::ConfigurationError("Base URL is required".to_string()))?;

        let user_agent = HeaderValue::try_from(self.user_agent.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid user agent: {}", e)))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(header::USER_AGENT, user_agent);
        default_headers.extend(self.default_headers);

        let following = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;
        let not_following = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                following,
                not_following,
                base_url,
                default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_detail_skips_empty_values() {
        assert_eq!(error_detail(&json!(null)), None);
        assert_eq!(error_detail(&json!(false)), None);
        assert_eq!(error_detail(&json!(0)), None);
        assert_eq!(error_detail(&json!("")), None);
    }

    #[test]
    fn error_detail_renders_non_string_values() {
        assert_eq!(
            error_detail(&json!("stop not found")).as_deref(),
            Some("stop not found")
        );
        assert_eq!(error_detail(&json!(42)).as_deref(), Some("42"));
        assert_eq!(error_detail(&json!(true)).as_deref(), Some("true"));
        assert_eq!(
            error_detail(&json!({"code": "NOT_FOUND"})).as_deref(),
            Some(r#"{"code":"NOT_FOUND"}"#)
        );
        assert_eq!(error_detail(&json!(["a"])).as_deref(), Some(r#"["a"]"#));
    }

    #[test]
    fn rejects_malformed_endpoints() {
        assert!(matches!(Client::new(""), Err(Error::InvalidUrl(_))));
        assert!(matches!(
            Client::new("v6.db.transport.rest/stops"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Client::new("mailto:someone@example.org"),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn accepts_absolute_endpoints() {
        let client = Client::new("http://localhost:3333").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3333/");
    }

    #[test]
    fn build_requires_base_url() {
        assert!(matches!(
            ClientBuilder::new().build(),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("Application/JSON; charset=utf-8"),
        );
        assert!(is_json(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json(&headers));
    }

    #[test]
    fn paths_resolve_against_endpoint_root() {
        let client = Client::new("https://example.org/api/").unwrap();
        let metadata = RequestMetadata::new("/stops/nearby?results=3")
            .with_query_param("latitude", 52.5);
        let url = client.resolve(&metadata).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/stops/nearby?results=3&latitude=52.5"
        );
    }
}
