//! HTTP client types for the API.
//!
//! This module turns an authenticated HTTP transport into typed calls. It
//! parses server metadata out of response headers and classifies failure
//! responses.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Connection`]: The raw transport contract (GET/POST/PUT/PATCH/DELETE)
//! - [`HttpConnection`]: The reqwest-backed [`Connection`]
//! - [`ApiConnection`]: Typed verb methods over a [`Connection`]
//! - [`Request`] / [`RequestOptions`]: An outgoing request and its pass-through options
//! - [`Response`]: The envelope returned by every transport call
//! - [`ApiInfo`] / [`RateLimit`]: Pagination links, OAuth scopes and rate-limit counters
//! - [`ApiError`]: Every failure an API call can produce
//! - [`AssigneesClient`]: Assignee checks built on [`ApiConnection`]
//!
//! # Example
//!
//! ```rust,ignore
//! use sniper::{ApiConnection, BaseUrl, ConnectionConfig, Credentials};
//! use sniper::clients::ApiError;
//!
//! let config = ConnectionConfig::builder()
//!     .base_url(BaseUrl::new("https://company.tpondemand.com/api/v1")?)
//!     .credentials(Credentials::token("abcda1234a")?)
//!     .build()?;
//!
//! let api = ApiConnection::from_config(&config)?;
//!
//! match api.get::<serde_json::Value>("Bugs", None).await {
//!     Ok(bugs) => println!("{bugs}"),
//!     Err(ApiError::Abuse(e)) => println!("back off for {:?}s", e.retry_after_seconds()),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! # Failure Handling
//!
//! No call is ever retried. Status codes map to errors as follows:
//!
//! - **401**: [`ApiError::Unauthorized`]
//! - **403**: [`ApiError::Abuse`] when the server signals abuse detection,
//!   otherwise [`ApiError::Forbidden`]
//! - **404**: [`ApiError::NotFound`]
//! - **Other 4xx/5xx**: [`ApiError::Api`]
//!
//! Every status error keeps the [`Response`] it came from.

mod api_connection;
mod api_info;
mod assignees;
mod connection;
mod errors;
mod http_connection;
mod http_request;
mod http_response;

pub use api_connection::ApiConnection;
pub use api_info::{
    parse_response_headers, ApiInfo, RateLimit, ACCEPTED_OAUTH_SCOPES_HEADER, LINK_HEADER,
    OAUTH_SCOPES_HEADER, RATE_LIMIT_LIMIT_HEADER, RATE_LIMIT_REMAINING_HEADER,
    RATE_LIMIT_RESET_HEADER,
};
pub use assignees::AssigneesClient;
pub use connection::Connection;
pub use errors::{classify, AbuseError, ApiError, ResponseError, RETRY_AFTER_HEADER};
pub use http_connection::{HttpConnection, CLIENT_VERSION};
pub use http_request::{
    HttpMethod, Request, RequestBuilder, RequestOptions, ACCEPT_HEADER, CONTENT_TYPE_HEADER,
    JSON_CONTENT_TYPE, TWO_FACTOR_HEADER,
};
pub use http_response::Response;
