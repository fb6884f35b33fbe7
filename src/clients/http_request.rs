//! HTTP request types for the Sniper client.
//!
//! This module provides the [`Request`] type and its builder, plus
//! [`RequestOptions`] for the pass-through arguments of the
//! [`ApiConnection`](crate::clients::ApiConnection) verbs.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// The `Accept` request header.
pub const ACCEPT_HEADER: &str = "Accept";
/// The `Content-Type` request header.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
/// The request header carrying a two-factor authentication code.
pub const TWO_FACTOR_HEADER: &str = "X-TP-OTP";
/// Content type used for JSON bodies when none is given.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods supported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// An outgoing request.
///
/// A request is owned by the call that builds it. Its header map is mutated
/// by exactly one [`Authenticator`](crate::Authenticator) before dispatch and
/// must not be shared between concurrent requests.
///
/// # Example
///
/// ```rust
/// use sniper::clients::{HttpMethod, Request};
/// use serde_json::json;
///
/// let request = Request::builder(HttpMethod::Post, "Bugs")
///     .body(json!({"Name": "Crash on save"}))
///     .content_type("application/json")
///     .build();
///
/// assert_eq!(request.method, HttpMethod::Post);
/// assert!(request.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Request {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The endpoint URI, relative to the base URL or absolute.
    pub endpoint: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// The request body, if any.
    pub body: Option<serde_json::Value>,
    /// The content type of the body.
    pub content_type: Option<String>,
    /// Query parameters to append to the URL.
    pub parameters: Option<HashMap<String, String>>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl Request {
    /// Creates a new builder for constructing a `Request`.
    #[must_use]
    pub fn builder(method: HttpMethod, endpoint: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, endpoint)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug)]
pub struct RequestBuilder {
    method: HttpMethod,
    endpoint: String,
    headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
    content_type: Option<String>,
    parameters: Option<HashMap<String, String>>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            body: None,
            content_type: None,
            parameters: None,
            timeout: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the body.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Applies pass-through options: accept header, content type,
    /// two-factor code and timeout.
    #[must_use]
    pub fn options(mut self, options: &RequestOptions) -> Self {
        if let Some(accepts) = &options.accepts {
            self.headers
                .insert(ACCEPT_HEADER.to_string(), accepts.clone());
        }
        if let Some(code) = &options.two_factor_code {
            self.headers
                .insert(TWO_FACTOR_HEADER.to_string(), code.clone());
        }
        if let Some(content_type) = &options.content_type {
            self.content_type = Some(content_type.clone());
        }
        if let Some(timeout) = options.timeout {
            self.timeout = Some(timeout);
        }
        self
    }

    /// Builds the [`Request`].
    ///
    /// A body without an explicit content type is sent as JSON.
    #[must_use]
    pub fn build(self) -> Request {
        let content_type = match (&self.body, self.content_type) {
            (Some(_), None) => Some(JSON_CONTENT_TYPE.to_string()),
            (_, content_type) => content_type,
        };

        Request {
            method: self.method,
            endpoint: self.endpoint,
            headers: self.headers,
            body: self.body,
            content_type,
            parameters: self.parameters,
            timeout: self.timeout,
        }
    }
}

/// Optional arguments passed straight through to the transport.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sniper::clients::RequestOptions;
///
/// let options = RequestOptions::new()
///     .accepts("application/vnd.tp.v2+json")
///     .timeout(Duration::from_secs(90));
///
/// assert_eq!(options.accepts.as_deref(), Some("application/vnd.tp.v2+json"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Value for the `Accept` header.
    pub accepts: Option<String>,
    /// Content type of the request body.
    pub content_type: Option<String>,
    /// Two-factor authentication code.
    pub two_factor_code: Option<String>,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `Accept` header value.
    #[must_use]
    pub fn accepts(mut self, accepts: impl Into<String>) -> Self {
        self.accepts = Some(accepts.into());
        self
    }

    /// Sets the body content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the two-factor authentication code.
    #[must_use]
    pub fn two_factor_code(mut self, code: impl Into<String>) -> Self {
        self.two_factor_code = Some(code.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
