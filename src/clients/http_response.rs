//! The response envelope returned by every transport call.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::api_info::{header_value, parse_response_headers, ApiInfo};

/// An HTTP response envelope.
///
/// Bundles the status code, body, headers, content type, and the
/// [`ApiInfo`] parsed from the headers at construction time. The envelope is
/// immutable once built and safe to share across threads.
///
/// The body type defaults to [`serde_json::Value`]; HTML endpoints return a
/// `Response<String>`.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use sniper::clients::Response;
/// use serde_json::json;
///
/// let mut headers = HashMap::new();
/// headers.insert("X-RateLimit-Remaining".to_string(), "41".to_string());
///
/// let content_type = Some("application/json".to_string());
/// let response = Response::new(200, json!({"Id": 7}), headers, content_type);
///
/// assert!(response.is_success());
/// assert_eq!(response.api_info().rate_limit().remaining, 41);
/// assert_eq!(response.header("x-ratelimit-remaining"), Some("41"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Response<T = serde_json::Value> {
    status_code: u16,
    body: T,
    headers: HashMap<String, String>,
    content_type: Option<String>,
    api_info: ApiInfo,
}

impl<T> Response<T> {
    /// Creates a response, parsing [`ApiInfo`] from `headers`.
    #[must_use]
    pub fn new(
        status_code: u16,
        body: T,
        headers: HashMap<String, String>,
        content_type: Option<String>,
    ) -> Self {
        let api_info = parse_response_headers(&headers);
        Self {
            status_code,
            body,
            headers,
            content_type,
            api_info,
        }
    }

    /// Creates a response with a pre-built [`ApiInfo`] instead of parsing
    /// one from the headers.
    ///
    /// Intended for tests and fake transports that need metadata the headers
    /// do not describe.
    #[must_use]
    pub const fn from_parts(
        status_code: u16,
        body: T,
        headers: HashMap<String, String>,
        content_type: Option<String>,
        api_info: ApiInfo,
    ) -> Self {
        Self {
            status_code,
            body,
            headers,
            content_type,
            api_info,
        }
    }

    /// The HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code <= 299
    }

    /// Returns `true` if the status code is 400 or above.
    ///
    /// Only failures are classified into errors; a 1xx or 3xx reply that was
    /// not followed is still a valid envelope.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.status_code >= 400
    }

    /// The response body.
    #[must_use]
    pub const fn body(&self) -> &T {
        &self.body
    }

    /// Consumes the response and returns the body.
    #[must_use]
    pub fn into_body(self) -> T {
        self.body
    }

    /// The response headers, with names as received.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns a header value, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        header_value(&self.headers, name)
    }

    /// The content type of the response.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Metadata parsed from the response headers.
    #[must_use]
    pub const fn api_info(&self) -> &ApiInfo {
        &self.api_info
    }

    /// Converts the body, keeping status, headers and metadata.
    #[must_use]
    pub fn map_body<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            status_code: self.status_code,
            body: f(self.body),
            headers: self.headers,
            content_type: self.content_type,
            api_info: self.api_info,
        }
    }
}

impl Response<serde_json::Value> {
    /// Deserializes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the body does not match `T`.
    pub fn deserialize_body<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body)
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Response>();
};
