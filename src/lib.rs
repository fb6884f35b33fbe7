//! # Sniper Client
//!
//! The REST client core for the Targetprocess API. It provides typed request
//! methods, credential handling, response metadata parsing and a structured
//! error taxonomy.
//!
//! ## Overview
//!
//! This crate provides:
//! - Connection configuration via [`ConnectionConfig`] and [`ConnectionConfigBuilder`]
//! - Anonymous, Basic and Token credentials with one [`Authenticator`] per kind
//! - A reqwest-backed transport ([`HttpConnection`]) behind the [`clients::Connection`] trait
//! - Typed verb methods on [`ApiConnection`]
//! - Pagination links, OAuth scopes and rate-limit counters parsed from response headers
//! - Failure classification, including abuse detection with a `Retry-After` hint
//!
//! ## Quick Start
//!
//! ```rust
//! use sniper::{BaseUrl, ConnectionConfig, Credentials};
//!
//! let config = ConnectionConfig::builder()
//!     .base_url(BaseUrl::new("https://company.tpondemand.com/api/v1").unwrap())
//!     .credentials(Credentials::basic("admin", "secret").unwrap())
//!     .user_agent_prefix("Reporter/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://company.tpondemand.com/api/v1/");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use sniper::{ApiConnection, ApiError};
//!
//! let api = ApiConnection::from_config(&config)?;
//!
//! let bug: serde_json::Value = api.get("Bugs/42", None).await?;
//!
//! let created: serde_json::Value = api
//!     .post("Bugs", &serde_json::json!({"Name": "Crash on save", "Project": {"Id": 7}}))
//!     .await?;
//! ```
//!
//! ## Backing Off
//!
//! The client never retries. An abuse response carries the server's
//! suggested delay:
//!
//! ```rust,ignore
//! match api.get::<serde_json::Value>("Bugs", None).await {
//!     Err(ApiError::Abuse(e)) => {
//!         let wait = e.retry_after_seconds().unwrap_or(60);
//!         tokio::time::sleep(std::time::Duration::from_secs(wait.into())).await;
//!     }
//!     other => { /* ... */ }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Arguments are validated before any request is sent
//! - **Immutable responses**: [`clients::Response`] and [`clients::ApiInfo`] never change after construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::{
    authenticate_request, AuthenticationError, AuthenticationType, Authenticator, Credentials,
};
pub use config::{BaseUrl, ConnectionConfig, ConnectionConfigBuilder};
pub use error::{ArgumentError, ConfigError};

// Re-export client types
pub use clients::{
    AbuseError, ApiConnection, ApiError, ApiInfo, AssigneesClient, HttpConnection, RateLimit,
    Response,
};
