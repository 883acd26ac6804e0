//! Error types for transit API calls.
//!
//! Every failed call produces exactly one [`Error`]. HTTP failures keep the
//! status, headers and raw body of the failed response, and carry the server's
//! JSON error detail in their message when the server sent one.

use http::{HeaderMap, StatusCode};

/// The error type for all client operations.
///
/// # Examples
///
/// ```no_run
/// use hafas_rest_client::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("https://v6.db.transport.rest")?;
///
/// match client.stop::<serde_json::Value>("8011160", &()).await {
///     Ok(stop) => println!("Stop: {}", stop["name"]),
///     Err(Error::HttpError { status, message, .. }) => {
///         eprintln!("HTTP {}: {}", status, message);
///     }
///     Err(e) if e.is_validation() => eprintln!("bad argument: {}", e),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection refused, DNS lookup failed,
    /// timeout, etc.).
    ///
    /// The underlying `reqwest::Error` is kept as-is. No response exists for
    /// these errors, so no enrichment is attempted.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server returned a non-2xx HTTP status code.
    ///
    /// `message` always starts with `HTTP error! status: <code>`. If the
    /// response declared a JSON content type and its body had a `msg` field,
    /// that text is appended after ` – `.
    #[error("{message}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// Human-readable message, enriched with the server's `msg` if present
        message: String,
        /// The response headers
        headers: HeaderMap,
        /// The raw response body (empty if it could not be read)
        raw_response: String,
        /// The decoded JSON error body, if the response declared JSON and it parsed
        body: Option<serde_json::Value>,
    },

    /// The server answered with a redirect while the request used
    /// [`RedirectPolicy::Error`](crate::metadata::RedirectPolicy::Error).
    #[error(
        "Unexpected redirect (status {status}) to {}",
        .location.as_deref().unwrap_or("<none>")
    )]
    UnexpectedRedirect {
        /// The redirect status code
        status: StatusCode,
        /// The `Location` header, if any
        location: Option<String>,
    },

    /// The response had a success status but its body could not be decoded
    /// into the requested type.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// A required identifier or reference was missing or empty.
    ///
    /// Raised before any network I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Query options did not serialize to a key/value mapping.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid configuration was provided, such as an invalid header or an
    /// endpoint that cannot serve as a base URL.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The endpoint or a request path could not be parsed as a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::UnexpectedRedirect { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the decoded JSON error body sent by the server, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Error::HttpError { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` for errors raised by argument validation, before any
    /// request was sent.
    ///
    /// ```
    /// use hafas_rest_client::Error;
    ///
    /// assert!(Error::InvalidArgument("invalid id").is_validation());
    /// assert!(!Error::ConfigurationError("x".into()).is_validation());
    /// ```
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::InvalidQuery(_))
    }

    /// Returns `true` if the transport gave up because of a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Network(e) if e.is_timeout())
    }
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
