//! Typed façade over a [`Connection`].
//!
//! # Overview
//!
//! [`ApiConnection`] exposes one method per request shape the API uses. Each
//! method validates its arguments before anything reaches the transport,
//! then unwraps the [`Response`](crate::clients::Response) envelope and
//! deserializes the body into the caller's type. Transport errors propagate
//! unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use sniper::{ApiConnection, BaseUrl, ConnectionConfig, Credentials};
//!
//! #[derive(Deserialize)]
//! struct Bug {
//!     #[serde(rename = "Id")]
//!     id: u64,
//! }
//!
//! let config = ConnectionConfig::builder()
//!     .base_url(BaseUrl::new("https://company.tpondemand.com/api/v1")?)
//!     .credentials(Credentials::basic("admin", "secret")?)
//!     .build()?;
//!
//! let api = ApiConnection::from_config(&config)?;
//! let bug: Bug = api.get("Bugs/42", None).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::connection::Connection;
use crate::clients::errors::ApiError;
use crate::clients::http_connection::HttpConnection;
use crate::clients::http_request::RequestOptions;
use crate::config::ConnectionConfig;
use crate::error::{ensure_not_empty, ensure_not_empty_if_present, ensure_not_null, ConfigError};

/// Typed API access over a shared [`Connection`].
///
/// # Thread Safety
///
/// `ApiConnection` is `Send + Sync` and cheap to clone; clones share the
/// underlying transport.
#[derive(Clone)]
pub struct ApiConnection {
    connection: Arc<dyn Connection>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConnection>();
};

impl std::fmt::Debug for ApiConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConnection").finish_non_exhaustive()
    }
}

impl ApiConnection {
    /// Wraps an existing transport.
    #[must_use]
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    /// Builds an [`HttpConnection`] from `config` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// created.
    pub fn from_config(config: &ConnectionConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(HttpConnection::new(config)?)))
    }

    /// The underlying transport.
    #[must_use]
    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    // GET

    /// Gets the resource at `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty, otherwise any error
    /// from the transport or from deserializing the body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        uri: &str,
        parameters: Option<&HashMap<String, String>>,
    ) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        let response = self.connection.get(uri, parameters, None).await?;
        Ok(response.deserialize_body()?)
    }

    /// Gets the resource at `uri` with a specific `Accept` header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` or `accepts` is empty.
    pub async fn get_with_accepts<T: DeserializeOwned>(
        &self,
        uri: &str,
        parameters: Option<&HashMap<String, String>>,
        accepts: &str,
    ) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_empty("accepts", accepts)?;
        let response = self.connection.get(uri, parameters, Some(accepts)).await?;
        Ok(response.deserialize_body()?)
    }

    /// Gets the HTML document at `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty.
    pub async fn get_html(
        &self,
        uri: &str,
        parameters: Option<&HashMap<String, String>>,
    ) -> Result<String, ApiError> {
        ensure_not_empty("uri", uri)?;
        let response = self.connection.get_html(uri, parameters).await?;
        Ok(response.into_body())
    }

    // POST

    /// Posts to `uri` without a body and ignores the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty.
    pub async fn post_no_content(&self, uri: &str) -> Result<(), ApiError> {
        ensure_not_empty("uri", uri)?;
        self.connection
            .post(uri, None, &RequestOptions::default())
            .await?;
        Ok(())
    }

    /// Posts to `uri` without a body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty.
    pub async fn post_empty<T: DeserializeOwned>(&self, uri: &str) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        let response = self
            .connection
            .post(uri, None, &RequestOptions::default())
            .await?;
        Ok(response.deserialize_body()?)
    }

    /// Posts `data` to `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty or `data` is null.
    pub async fn post<T: DeserializeOwned>(&self, uri: &str, data: &Value) -> Result<T, ApiError> {
        self.post_with_options(uri, data, &RequestOptions::default())
            .await
    }

    /// Posts `data` to `uri` with an explicit accept header, content type or
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty, `data` is null, or
    /// an option is supplied as an empty string.
    pub async fn post_with_options<T: DeserializeOwned>(
        &self,
        uri: &str,
        data: &Value,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_null("data", data)?;
        validate_options(options)?;
        let response = self.connection.post(uri, Some(data), options).await?;
        Ok(response.deserialize_body()?)
    }

    /// Posts `data` to `uri` with a two-factor authentication code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` or `two_factor_code` is empty,
    /// `data` is null, or an option is supplied as an empty string.
    pub async fn post_with_two_factor<T: DeserializeOwned>(
        &self,
        uri: &str,
        data: &Value,
        two_factor_code: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        ensure_not_empty("two_factor_code", two_factor_code)?;
        let options = options.clone().two_factor_code(two_factor_code);
        self.post_with_options(uri, data, &options).await
    }

    // PUT

    /// Puts to `uri` without a body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty.
    pub async fn put_no_content(&self, uri: &str) -> Result<(), ApiError> {
        ensure_not_empty("uri", uri)?;
        self.connection
            .put(uri, None, &RequestOptions::default())
            .await?;
        Ok(())
    }

    /// Puts `data` to `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty or `data` is null.
    pub async fn put<T: DeserializeOwned>(&self, uri: &str, data: &Value) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_null("data", data)?;
        let response = self
            .connection
            .put(uri, Some(data), &RequestOptions::default())
            .await?;
        Ok(response.deserialize_body()?)
    }

    /// Puts `data` to `uri` with a two-factor authentication code and an
    /// optional accept header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` or `two_factor_code` is
    /// empty, `data` is null, or `accepts` is supplied but empty.
    pub async fn put_with_two_factor<T: DeserializeOwned>(
        &self,
        uri: &str,
        data: &Value,
        two_factor_code: &str,
        accepts: Option<&str>,
    ) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_null("data", data)?;
        ensure_not_empty("two_factor_code", two_factor_code)?;
        ensure_not_empty_if_present("accepts", accepts)?;

        let mut options = RequestOptions::new().two_factor_code(two_factor_code);
        if let Some(accepts) = accepts {
            options = options.accepts(accepts);
        }

        let response = self.connection.put(uri, Some(data), &options).await?;
        Ok(response.deserialize_body()?)
    }

    // PATCH

    /// Patches `uri` without a body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty.
    pub async fn patch_no_content(&self, uri: &str) -> Result<(), ApiError> {
        ensure_not_empty("uri", uri)?;
        self.connection
            .patch(uri, None, &RequestOptions::default())
            .await?;
        Ok(())
    }

    /// Patches `uri` without a body, using a specific `Accept` header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` or `accepts` is empty.
    pub async fn patch_no_content_with_accepts(
        &self,
        uri: &str,
        accepts: &str,
    ) -> Result<(), ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_empty("accepts", accepts)?;
        self.connection
            .patch(uri, None, &RequestOptions::new().accepts(accepts))
            .await?;
        Ok(())
    }

    /// Patches `uri` with `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty or `data` is null.
    pub async fn patch<T: DeserializeOwned>(&self, uri: &str, data: &Value) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_null("data", data)?;
        let response = self
            .connection
            .patch(uri, Some(data), &RequestOptions::default())
            .await?;
        Ok(response.deserialize_body()?)
    }

    /// Patches `uri` with `data`, using a specific `Accept` header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` or `accepts` is empty, or
    /// `data` is null.
    pub async fn patch_with_accepts<T: DeserializeOwned>(
        &self,
        uri: &str,
        data: &Value,
        accepts: &str,
    ) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_null("data", data)?;
        ensure_not_empty("accepts", accepts)?;
        let response = self
            .connection
            .patch(uri, Some(data), &RequestOptions::new().accepts(accepts))
            .await?;
        Ok(response.deserialize_body()?)
    }

    // DELETE

    /// Deletes the resource at `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty.
    pub async fn delete(&self, uri: &str) -> Result<(), ApiError> {
        ensure_not_empty("uri", uri)?;
        self.connection
            .delete(uri, None, &RequestOptions::default())
            .await?;
        Ok(())
    }

    /// Deletes the resource at `uri` with a two-factor authentication code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` or `two_factor_code` is empty.
    pub async fn delete_with_two_factor(
        &self,
        uri: &str,
        two_factor_code: &str,
    ) -> Result<(), ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_empty("two_factor_code", two_factor_code)?;
        self.connection
            .delete(
                uri,
                None,
                &RequestOptions::new().two_factor_code(two_factor_code),
            )
            .await?;
        Ok(())
    }

    /// Deletes at `uri`, sending `data` as the request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty or `data` is null.
    pub async fn delete_with_body(&self, uri: &str, data: &Value) -> Result<(), ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_null("data", data)?;
        self.connection
            .delete(uri, Some(data), &RequestOptions::default())
            .await?;
        Ok(())
    }

    /// Deletes at `uri` with a body and a specific `Accept` header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` or `accepts` is empty, or
    /// `data` is null.
    pub async fn delete_with_body_and_accepts(
        &self,
        uri: &str,
        data: &Value,
        accepts: &str,
    ) -> Result<(), ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_null("data", data)?;
        ensure_not_empty("accepts", accepts)?;
        self.connection
            .delete(uri, Some(data), &RequestOptions::new().accepts(accepts))
            .await?;
        Ok(())
    }

    /// Deletes at `uri` with a body and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` is empty or `data` is null.
    pub async fn delete_and_read<T: DeserializeOwned>(
        &self,
        uri: &str,
        data: &Value,
    ) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_null("data", data)?;
        let response = self
            .connection
            .delete(uri, Some(data), &RequestOptions::default())
            .await?;
        Ok(response.deserialize_body()?)
    }

    /// Deletes at `uri` with a body and a specific `Accept` header, returning
    /// the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if `uri` or `accepts` is empty, or
    /// `data` is null.
    pub async fn delete_and_read_with_accepts<T: DeserializeOwned>(
        &self,
        uri: &str,
        data: &Value,
        accepts: &str,
    ) -> Result<T, ApiError> {
        ensure_not_empty("uri", uri)?;
        ensure_not_null("data", data)?;
        ensure_not_empty("accepts", accepts)?;
        let response = self
            .connection
            .delete(uri, Some(data), &RequestOptions::new().accepts(accepts))
            .await?;
        Ok(response.deserialize_body()?)
    }
}

fn validate_options(options: &RequestOptions) -> Result<(), ApiError> {
    ensure_not_empty_if_present("accepts", options.accepts.as_deref())?;
    ensure_not_empty_if_present("content_type", options.content_type.as_deref())?;
    ensure_not_empty_if_present("two_factor_code", options.two_factor_code.as_deref())?;
    Ok(())
}
