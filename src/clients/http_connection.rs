//! reqwest-backed transport for the API.
//!
//! [`HttpConnection`] resolves endpoints against the configured base URL,
//! attaches default headers and credentials, sends the request once, and
//! turns the reply into a [`Response`] envelope. Failure statuses are
//! classified into [`ApiError`] kinds.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::auth::{authenticate_request, Credentials};
use crate::clients::connection::Connection;
use crate::clients::errors::{classify, ApiError};
use crate::clients::http_request::{
    HttpMethod, Request, RequestOptions, ACCEPT_HEADER, CONTENT_TYPE_HEADER,
};
use crate::clients::http_response::Response;
use crate::config::{BaseUrl, ConnectionConfig};
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

const HTML_CONTENT_TYPE: &str = "text/html";

/// HTTP transport for the API.
///
/// The connection handles:
/// - Endpoint resolution against the base URL
/// - Default headers including User-Agent and Accept
/// - Running exactly one authentication handler per request
/// - Envelope construction and failure classification
///
/// It never retries; see [`AbuseError`](crate::clients::AbuseError) for the
/// back-off hint.
///
/// # Thread Safety
///
/// `HttpConnection` is `Send + Sync`, making it safe to share across async
/// tasks. Every request gets its own header map.
///
/// # Example
///
/// ```rust,ignore
/// use sniper::{BaseUrl, ConnectionConfig, Credentials, HttpConnection};
/// use sniper::clients::{HttpMethod, Request};
///
/// let config = ConnectionConfig::builder()
///     .base_url(BaseUrl::new("https://company.tpondemand.com/api/v1")?)
///     .credentials(Credentials::token("abcda1234a")?)
///     .build()?;
///
/// let connection = HttpConnection::new(&config)?;
/// let response = connection
///     .send(Request::builder(HttpMethod::Get, "Bugs").parameter("take", "25").build())
///     .await?;
/// ```
#[derive(Debug)]
pub struct HttpConnection {
    client: reqwest::Client,
    base_url: BaseUrl,
    credentials: Credentials,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpConnection>();
};

impl HttpConnection {
    /// Creates a connection from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying reqwest client
    /// cannot be created (for example a TLS initialization failure).
    pub fn new(config: &ConnectionConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Sniper Client v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert(ACCEPT_HEADER.to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            credentials: config.credentials().clone(),
            default_headers,
            timeout: config.timeout(),
        })
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the credentials attached to every request.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the default headers for this connection.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and returns the JSON envelope.
    ///
    /// Bodies that are not valid JSON are kept as a JSON string; an empty
    /// body becomes `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if:
    /// - the endpoint cannot be resolved (`InvalidUri`)
    /// - a network error occurs (`Network`)
    /// - the status is 400 or above (the classified kind)
    ///
    /// Informational and redirect statuses that reqwest does not follow are
    /// returned as `Ok` with the envelope intact.
    pub async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let response = self
            .dispatch(request)
            .await?
            .map_body(|text| parse_body(&text));
        if response.is_failure() {
            Err(classify(response))
        } else {
            Ok(response)
        }
    }

    /// Sends a request and returns the body as raw text.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_raw(&self, request: Request) -> Result<Response<String>, ApiError> {
        let response = self.dispatch(request).await?;
        if response.is_failure() {
            Err(classify(response.map_body(|text| parse_body(&text))))
        } else {
            Ok(response)
        }
    }

    async fn dispatch(&self, mut request: Request) -> Result<Response<String>, ApiError> {
        authenticate_request(&mut request, &self.credentials)?;

        let url = self
            .base_url
            .join(&request.endpoint)
            .map_err(|source| ApiError::InvalidUri {
                uri: request.endpoint.clone(),
                source,
            })?;

        tracing::debug!("{} {}", request.method, url);

        let mut headers = self.default_headers.clone();
        if let Some(content_type) = &request.content_type {
            headers.insert(CONTENT_TYPE_HEADER.to_string(), content_type.clone());
        }
        headers.extend(request.headers);

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(parameters) = &request.parameters {
            req_builder = req_builder.query(parameters);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(serialize_body(body, request.content_type.as_deref()));
        }

        if let Some(timeout) = request.timeout.or(self.timeout) {
            req_builder = req_builder.timeout(timeout);
        }

        let res = req_builder.send().await?;

        let status_code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let content_type = res_headers.get("content-type").cloned();
        let text = res.text().await?;

        let response = Response::new(status_code, text, res_headers, content_type);

        if response.api_info().rate_limit().is_exhausted() {
            tracing::warn!(
                "Rate limit exhausted; quota of {} resets at {}",
                response.api_info().rate_limit().limit,
                response.api_info().rate_limit().reset
            );
        }

        Ok(response)
    }

    /// Flattens response headers into a single-valued map, joining repeated
    /// headers with `", "`. Bytes that are not valid UTF-8 become U+FFFD.
    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        let mut result: HashMap<String, String> = HashMap::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            result
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.to_string());
        }
        result
    }

    fn build_request(
        method: HttpMethod,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Request {
        let mut builder = Request::builder(method, uri);
        if let Some(body) = body {
            builder = builder.body(body.clone());
        }
        builder.options(options).build()
    }
}

fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

fn serialize_body(body: &serde_json::Value, content_type: Option<&str>) -> String {
    match body {
        serde_json::Value::String(raw) if !content_type.is_some_and(|ct| ct.contains("json")) => {
            raw.clone()
        }
        _ => body.to_string(),
    }
}

#[async_trait]
impl Connection for HttpConnection {
    async fn get(
        &self,
        uri: &str,
        parameters: Option<&HashMap<String, String>>,
        accepts: Option<&str>,
    ) -> Result<Response, ApiError> {
        let mut builder = Request::builder(HttpMethod::Get, uri);
        if let Some(parameters) = parameters {
            builder = builder.parameters(parameters.clone());
        }
        if let Some(accepts) = accepts {
            builder = builder.header(ACCEPT_HEADER, accepts);
        }
        self.send(builder.build()).await
    }

    async fn get_html(
        &self,
        uri: &str,
        parameters: Option<&HashMap<String, String>>,
    ) -> Result<Response<String>, ApiError> {
        let mut builder =
            Request::builder(HttpMethod::Get, uri).header(ACCEPT_HEADER, HTML_CONTENT_TYPE);
        if let Some(parameters) = parameters {
            builder = builder.parameters(parameters.clone());
        }
        self.send_raw(builder.build()).await
    }

    async fn post(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        self.send(Self::build_request(HttpMethod::Post, uri, body, options))
            .await
    }

    async fn put(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        self.send(Self::build_request(HttpMethod::Put, uri, body, options))
            .await
    }

    async fn patch(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        self.send(Self::build_request(HttpMethod::Patch, uri, body, options))
            .await
    }

    async fn delete(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        self.send(Self::build_request(HttpMethod::Delete, uri, body, options))
            .await
    }
}
