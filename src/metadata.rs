//! Request descriptors and per-call overrides.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// The fetch mode of a request, sent to the server as `Sec-Fetch-Mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Cross-origin request.
    Cors,
    /// Cross-origin request without CORS semantics.
    NoCors,
    /// Same-origin request.
    SameOrigin,
    /// Navigation request.
    Navigate,
}

impl RequestMode {
    /// The header value for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMode::Cors => "cors",
            RequestMode::NoCors => "no-cors",
            RequestMode::SameOrigin => "same-origin",
            RequestMode::Navigate => "navigate",
        }
    }
}

/// How redirects returned by the server are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectPolicy {
    /// Follow redirects automatically (up to 10 hops).
    #[default]
    Follow,
    /// Do not follow; a 3xx response is treated as a non-success status.
    Manual,
    /// Fail with [`Error::UnexpectedRedirect`](crate::Error::UnexpectedRedirect).
    Error,
}

/// Per-call overrides for the request defaults.
///
/// Every field that is set replaces the corresponding default; fields left
/// unset keep it. Headers are merged name-by-name over the default headers.
///
/// # Examples
///
/// ```
/// use hafas_rest_client::metadata::{RedirectPolicy, RequestOptions};
/// use std::time::Duration;
///
/// let options = RequestOptions::new()
///     .with_header("Accept-Language", "en")
///     .unwrap()
///     .with_redirect(RedirectPolicy::Manual)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(options.redirect, Some(RedirectPolicy::Manual));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Headers that take precedence over the client's default headers.
    pub headers: HeaderMap,

    /// The HTTP method. Defaults to GET.
    pub method: Option<Method>,

    /// The fetch mode. When unset, no `Sec-Fetch-Mode` header is sent.
    pub mode: Option<RequestMode>,

    /// The redirect policy. Defaults to [`RedirectPolicy::Follow`].
    pub redirect: Option<RedirectPolicy>,

    /// Gives up on the call after this long. Defaults to the client timeout.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates options that keep every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header override.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Overrides the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Overrides the fetch mode.
    pub fn with_mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Overrides the redirect policy.
    pub fn with_redirect(mut self, redirect: RedirectPolicy) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Overrides the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Everything needed to issue one request: a path relative to the endpoint,
/// the query mapping, and the per-call overrides.
///
/// A descriptor is built fresh for each call and consumed by
/// [`Client::call`](crate::Client::call).
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The request path, resolved against the client's endpoint. It may carry
    /// a query string of its own.
    pub path: String,

    /// Query parameters. Nested values are encoded with dotted keys.
    pub query: Map<String, Value>,

    /// Per-call overrides.
    pub options: RequestOptions,
}

impl RequestMetadata {
    /// Creates a descriptor for `path` with no query and default options.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Map::new(),
            options: RequestOptions::default(),
        }
    }

    /// Adds a single query parameter, replacing any earlier value for `key`.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merges every field of `params` into the query, replacing earlier values.
    ///
    /// `params` must serialize to a JSON object; `()` and `None` add nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`](crate::Error::InvalidQuery) for values
    /// that serialize to anything other than an object or null.
    pub fn with_query<Q>(mut self, params: &Q) -> Result<Self, crate::Error>
    where
        Q: Serialize + ?Sized,
    {
        let params = crate::query::to_query_map(params)?;
        self.query.extend(params);
        Ok(self)
    }

    /// Replaces the per-call overrides.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}
