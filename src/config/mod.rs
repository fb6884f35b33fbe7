//! Configuration types for the Sniper client.
//!
//! # Overview
//!
//! - [`ConnectionConfig`]: Settings used to build an
//!   [`HttpConnection`](crate::clients::HttpConnection)
//! - [`ConnectionConfigBuilder`]: A builder for [`ConnectionConfig`]
//! - [`BaseUrl`]: A validated API base URL
//!
//! # Example
//!
//! ```rust
//! use sniper::{BaseUrl, ConnectionConfig, Credentials};
//!
//! let config = ConnectionConfig::builder()
//!     .base_url(BaseUrl::new("https://company.tpondemand.com/api/v1").unwrap())
//!     .credentials(Credentials::token("abcda1234a").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::time::Duration;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Configuration for a connection to the API.
///
/// `ConnectionConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    base_url: BaseUrl,
    credentials: Credentials,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ConnectionConfig {
    /// Creates a new builder for constructing a `ConnectionConfig`.
    #[must_use]
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the credentials attached to every request.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the default request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConnectionConfig>();
};

/// Builder for constructing [`ConnectionConfig`] instances.
///
/// `base_url` is required.
///
/// # Defaults
///
/// - `credentials`: [`Credentials::anonymous`]
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no client-side timeout)
#[derive(Debug, Default)]
pub struct ConnectionConfigBuilder {
    base_url: Option<BaseUrl>,
    credentials: Option<Credentials>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ConnectionConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the credentials.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the default timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ConnectionConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<ConnectionConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(ConnectionConfig {
            base_url,
            credentials: self.credentials.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
