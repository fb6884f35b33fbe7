//! The transport contract consumed by [`ApiConnection`](crate::clients::ApiConnection).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::errors::ApiError;
use crate::clients::http_request::RequestOptions;
use crate::clients::http_response::Response;

/// A raw transport that performs HTTP round trips.
///
/// Every method returns the full [`Response`] envelope on success. Failure
/// statuses come back as the classified [`ApiError`] with the envelope
/// attached. Implementations must not retry or cache.
///
/// [`HttpConnection`](crate::clients::HttpConnection) is the reqwest-backed
/// implementation; tests can substitute their own.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Sends a GET request and returns the JSON envelope.
    async fn get(
        &self,
        uri: &str,
        parameters: Option<&HashMap<String, String>>,
        accepts: Option<&str>,
    ) -> Result<Response, ApiError>;

    /// Sends a GET request for an HTML document.
    async fn get_html(
        &self,
        uri: &str,
        parameters: Option<&HashMap<String, String>>,
    ) -> Result<Response<String>, ApiError>;

    /// Sends a POST request.
    async fn post(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError>;

    /// Sends a PUT request.
    async fn put(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError>;

    /// Sends a PATCH request.
    async fn patch(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError>;

    /// Sends a DELETE request.
    async fn delete(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError>;
}

#[async_trait]
impl<C: Connection + ?Sized> Connection for Arc<C> {
    async fn get(
        &self,
        uri: &str,
        parameters: Option<&HashMap<String, String>>,
        accepts: Option<&str>,
    ) -> Result<Response, ApiError> {
        (**self).get(uri, parameters, accepts).await
    }

    async fn get_html(
        &self,
        uri: &str,
        parameters: Option<&HashMap<String, String>>,
    ) -> Result<Response<String>, ApiError> {
        (**self).get_html(uri, parameters).await
    }

    async fn post(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        (**self).post(uri, body, options).await
    }

    async fn put(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        (**self).put(uri, body, options).await
    }

    async fn patch(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        (**self).patch(uri, body, options).await
    }

    async fn delete(
        &self,
        uri: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        (**self).delete(uri, body, options).await
    }
}
