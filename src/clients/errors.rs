//! Error taxonomy for API calls.
//!
//! Every call through a [`Connection`](crate::clients::Connection) or the
//! [`ApiConnection`](crate::clients::ApiConnection) façade returns
//! [`ApiError`] on failure. Failure responses are mapped to a kind by
//! [`classify`]:
//!
//! | Status | Kind |
//! |--------|------|
//! | 401 | [`ApiError::Unauthorized`] |
//! | 403 with an abuse signal | [`ApiError::Abuse`] |
//! | 403 otherwise | [`ApiError::Forbidden`] |
//! | 404 | [`ApiError::NotFound`] |
//! | any other 4xx/5xx | [`ApiError::Api`] |
//!
//! Each kind keeps the originating [`Response`] so callers can inspect its
//! headers and rate-limit snapshot after the fact. Nothing here retries:
//! callers that want to back off read [`AbuseError::retry_after_seconds`]
//! and reschedule themselves.
//!
//! # Example
//!
//! ```rust,ignore
//! match api.get::<Bug>("Bugs/42", None).await {
//!     Ok(bug) => println!("{}", bug.name),
//!     Err(ApiError::Abuse(e)) => {
//!         let delay = e.retry_after_seconds().unwrap_or(60);
//!         println!("Backing off for {delay}s");
//!     }
//!     Err(ApiError::NotFound(_)) => println!("No such bug"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use std::error::Error as StdError;

use thiserror::Error;

use crate::auth::AuthenticationError;
use crate::clients::http_response::Response;
use crate::error::ArgumentError;

/// Header carrying the number of seconds to wait before retrying.
pub const RETRY_AFTER_HEADER: &str = "Retry-After";

type BoxError = Box<dyn StdError + Send + Sync>;

/// A failure response from the API.
///
/// The message is taken from the JSON body's `message` or `error` field when
/// present, otherwise a default for the kind of failure is used.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResponseError {
    message: String,
    response: Response,
    #[source]
    source: Option<BoxError>,
}

impl ResponseError {
    /// Wraps a failure response.
    #[must_use]
    pub fn new(response: Response) -> Self {
        Self::with_source(response, None)
    }

    /// Wraps a failure response together with an inner cause.
    #[must_use]
    pub fn with_source(response: Response, source: Option<BoxError>) -> Self {
        let message = server_message(&response)
            .unwrap_or_else(|| default_message(response.status_code()).to_string());
        Self {
            message,
            response,
            source,
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status code of the response.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.response.status_code()
    }

    /// The originating response.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }
}

/// A 403 response caused by abuse detection or rate limiting.
///
/// Carries the number of seconds after which it is safe to retry, when the
/// server sent a usable `Retry-After` header.
///
/// # Panics
///
/// Constructing an `AbuseError` from a response whose status is not 403 is a
/// programming error and fails a debug assertion.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use sniper::clients::{AbuseError, Response};
/// use serde_json::json;
///
/// let mut headers = HashMap::new();
/// headers.insert("Retry-After".to_string(), "30".to_string());
///
/// let error = AbuseError::new(Response::new(403, json!({}), headers, None));
/// assert_eq!(error.retry_after_seconds(), Some(30));
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AbuseError {
    message: String,
    response: Response,
    retry_after_seconds: Option<u32>,
    #[source]
    source: Option<BoxError>,
}

impl AbuseError {
    /// Wraps a 403 abuse response.
    #[must_use]
    pub fn new(response: Response) -> Self {
        Self::with_source(response, None)
    }

    /// Wraps a 403 abuse response together with an inner cause.
    #[must_use]
    pub fn with_source(response: Response, source: Option<BoxError>) -> Self {
        debug_assert_eq!(
            response.status_code(),
            403,
            "AbuseError created with wrong status code"
        );
        let retry_after_seconds = parse_retry_after_seconds(&response);
        let message = server_message(&response)
            .unwrap_or_else(|| "Request Forbidden - Abuse Detection".to_string());
        Self {
            message,
            response,
            retry_after_seconds,
            source,
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Seconds to wait before retrying, if the server said.
    #[must_use]
    pub const fn retry_after_seconds(&self) -> Option<u32> {
        self.retry_after_seconds
    }

    /// The originating response.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }
}

/// Reads `Retry-After` as a non-negative number of seconds.
///
/// Missing, non-numeric and negative values all mean "no hint".
fn parse_retry_after_seconds(response: &Response) -> Option<u32> {
    let seconds = response
        .header(RETRY_AFTER_HEADER)?
        .trim()
        .parse::<i64>()
        .ok()?;
    u32::try_from(seconds).ok()
}

/// Unified error type for API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was missing or empty. No request was sent.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The credentials did not match the authentication handler.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// 401 Unauthorized.
    #[error(transparent)]
    Unauthorized(ResponseError),

    /// 403 Forbidden, not related to abuse detection.
    #[error(transparent)]
    Forbidden(ResponseError),

    /// 403 Forbidden raised by abuse detection or rate limiting.
    #[error(transparent)]
    Abuse(#[from] AbuseError),

    /// 404 Not Found.
    #[error(transparent)]
    NotFound(ResponseError),

    /// Any other 4xx or 5xx response.
    #[error("API request failed with status {}: {}", .0.status_code(), .0)]
    Api(ResponseError),

    /// The endpoint could not be resolved to a URL.
    #[error("Invalid endpoint URI '{uri}': {source}")]
    InvalidUri {
        /// The endpoint that failed to resolve.
        uri: String,
        /// Why it failed.
        source: url::ParseError,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected type.
    #[error("Failed to deserialize response body: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl ApiError {
    /// The originating response, for errors raised from a failure status.
    #[must_use]
    pub const fn response(&self) -> Option<&Response> {
        match self {
            Self::Unauthorized(e) | Self::Forbidden(e) | Self::NotFound(e) | Self::Api(e) => {
                Some(e.response())
            }
            Self::Abuse(e) => Some(e.response()),
            _ => None,
        }
    }

    /// The HTTP status code, for errors raised from a failure status.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(Response::status_code)
    }

    /// Seconds to wait before retrying, for abuse errors that carry a hint.
    #[must_use]
    pub const fn retry_after_seconds(&self) -> Option<u32> {
        match self {
            Self::Abuse(e) => e.retry_after_seconds(),
            _ => None,
        }
    }

    /// Returns `true` for a 404 Not Found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Maps a failure response to its error kind.
///
/// The caller decides that `response` is a failure (status 400 or above);
/// any status not listed in the module table maps to [`ApiError::Api`].
#[must_use]
pub fn classify(response: Response) -> ApiError {
    match response.status_code() {
        401 => ApiError::Unauthorized(ResponseError::new(response)),
        403 if is_abuse(&response) => {
            let error = AbuseError::new(response);
            tracing::warn!(
                retry_after_seconds = ?error.retry_after_seconds(),
                "Request rejected by abuse detection: {}",
                error.message()
            );
            ApiError::Abuse(error)
        }
        403 => ApiError::Forbidden(ResponseError::new(response)),
        404 => ApiError::NotFound(ResponseError::new(response)),
        _ => ApiError::Api(ResponseError::new(response)),
    }
}

const ABUSE_MESSAGE_MARKERS: [&str; 3] = ["abuse", "secondary rate limit", "rate limit exceeded"];

/// A 403 is abuse-related when the server asks for a delay, reports an
/// exhausted quota, or says so in the body.
fn is_abuse(response: &Response) -> bool {
    if response.header(RETRY_AFTER_HEADER).is_some()
        || response.api_info().rate_limit().is_exhausted()
    {
        return true;
    }

    let mentions_abuse = |field: &str, needles: &[&str]| {
        body_field(response.body(), field).is_some_and(|value| {
            let value = value.to_ascii_lowercase();
            needles.iter().any(|needle| value.contains(needle))
        })
    };

    mentions_abuse("message", &ABUSE_MESSAGE_MARKERS)
        || mentions_abuse("documentation_url", &["abuse"])
}

/// Reads a string field from a JSON object body, ignoring key case.
fn body_field<'a>(body: &'a serde_json::Value, field: &str) -> Option<&'a str> {
    body.as_object()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(field))
        .and_then(|(_, value)| value.as_str())
}

fn server_message(response: &Response) -> Option<String> {
    body_field(response.body(), "message")
        .or_else(|| body_field(response.body(), "error"))
        .filter(|message| !message.trim().is_empty())
        .map(String::from)
}

const fn default_message(status_code: u16) -> &'static str {
    match status_code {
        401 => "Must be authenticated to access this resource.",
        403 => "Request Forbidden",
        404 => "The requested resource was not found.",
        _ => "An error occurred with this API request",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(status: u16, body: serde_json::Value, headers: &[(&str, &str)]) -> Response {
        let headers = headers
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>();
        Response::new(status, body, headers, Some("application/json".to_string()))
    }

    #[test]
    fn test_classify_401_as_unauthorized() {
        let error = classify(response(401, json!({}), &[]));
        assert!(matches!(error, ApiError::Unauthorized(_)));
        assert_eq!(error.status_code(), Some(401));
        assert_eq!(
            error.to_string(),
            "Must be authenticated to access this resource."
        );
    }

    #[test]
    fn test_classify_plain_403_as_forbidden() {
        let error = classify(response(403, json!({"Message": "Access denied"}), &[]));
        assert!(matches!(error, ApiError::Forbidden(_)));
        assert_eq!(error.to_string(), "Access denied");
    }

    #[test]
    fn test_classify_403_with_retry_after_as_abuse() {
        let error = classify(response(403, json!({}), &[("Retry-After", "30")]));
        assert!(matches!(error, ApiError::Abuse(_)));
        assert_eq!(error.retry_after_seconds(), Some(30));
    }

    #[test]
    fn test_classify_403_with_abuse_message_as_abuse() {
        let error = classify(response(
            403,
            json!({"message": "You have triggered an abuse detection mechanism."}),
            &[],
        ));
        assert!(matches!(error, ApiError::Abuse(_)));
        assert_eq!(error.retry_after_seconds(), None);
    }

    #[test]
    fn test_classify_403_with_abuse_documentation_as_abuse() {
        let error = classify(response(
            403,
            json!({"message": "Slow down", "documentation_url": "https://docs.example.com/abuse-rate-limits"}),
            &[],
        ));
        assert!(matches!(error, ApiError::Abuse(_)));
    }

    #[test]
    fn test_classify_403_with_exhausted_rate_limit_as_abuse() {
        let error = classify(response(
            403,
            json!({}),
            &[("X-RateLimit-Limit", "60"), ("X-RateLimit-Remaining", "0")],
        ));
        assert!(matches!(error, ApiError::Abuse(_)));
    }

    #[test]
    fn test_classify_404_as_not_found() {
        let error = classify(response(404, json!({}), &[]));
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "The requested resource was not found.");
    }

    #[test]
    fn test_classify_other_statuses_as_generic() {
        for status in [400, 409, 422, 500, 503] {
            let error = classify(response(status, json!({"error": "boom"}), &[]));
            assert!(matches!(error, ApiError::Api(_)), "status {status}");
            assert_eq!(error.status_code(), Some(status));
            assert_eq!(
                error.to_string(),
                format!("API request failed with status {status}: boom")
            );
        }
    }

    #[test]
    fn test_retry_after_parsing() {
        let retry = |value: &str| {
            AbuseError::new(response(403, json!({}), &[("Retry-After", value)]))
                .retry_after_seconds()
        };

        assert_eq!(retry("30"), Some(30));
        assert_eq!(retry("0"), Some(0));
        assert_eq!(retry(" 12 "), Some(12));
        assert_eq!(retry("-5"), None);
        assert_eq!(retry("soon"), None);
        assert_eq!(retry("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    #[test]
    fn test_retry_after_absent() {
        let error = AbuseError::new(response(403, json!({}), &[]));
        assert_eq!(error.retry_after_seconds(), None);
        assert_eq!(error.message(), "Request Forbidden - Abuse Detection");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "AbuseError created with wrong status code")]
    fn test_abuse_error_rejects_non_403_response() {
        let _ = AbuseError::new(response(404, json!({}), &[("Retry-After", "30")]));
    }

    #[test]
    fn test_errors_keep_originating_response() {
        let error = classify(response(
            403,
            json!({}),
            &[("Retry-After", "10"), ("X-RateLimit-Remaining", "0")],
        ));

        let response = error.response().unwrap();
        assert_eq!(response.header("Retry-After"), Some("10"));
        assert_eq!(response.api_info().rate_limit().remaining, 0);
    }

    #[test]
    fn test_inner_cause_is_exposed_as_source() {
        let cause: BoxError = "socket closed".into();
        let error = ResponseError::with_source(response(500, json!({}), &[]), Some(cause));

        let source = StdError::source(&error).unwrap();
        assert_eq!(source.to_string(), "socket closed");
    }

    #[test]
    fn test_argument_error_converts() {
        let error: ApiError = ArgumentError::Empty { name: "uri" }.into();
        assert!(matches!(error, ApiError::Argument(_)));
        assert!(error.response().is_none());
        assert!(error.status_code().is_none());
    }
}
