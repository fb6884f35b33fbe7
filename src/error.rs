//! Configuration and argument error types for the Sniper client.
//!
//! This module contains the errors raised before any request leaves the
//! process: invalid connection configuration and invalid call arguments.
//!
//! # Error Handling
//!
//! Constructors and builders return `Result<T, ConfigError>`, and every
//! [`ApiConnection`](crate::clients::ApiConnection) verb validates its
//! arguments up front, returning [`ArgumentError`] without touching the
//! transport.
//!
//! # Example
//!
//! ```rust
//! use sniper::{ArgumentError, Credentials};
//!
//! let result = Credentials::token("");
//! assert!(matches!(result, Err(ArgumentError::Empty { name: "token" })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL could not be parsed or is not an absolute HTTP(S) URL.
    #[error("Invalid base URL '{url}'. Please provide an absolute URL with an http or https scheme (e.g., 'https://company.tpondemand.com/api/v1/').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// Why the client could not be created.
        reason: String,
    },
}

/// A required argument was missing or empty.
///
/// Raised locally and immediately, never retried, and always before any
/// transport call is made.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// The argument was absent (for example a `null` JSON body).
    #[error("Value cannot be null. (Parameter '{name}')")]
    Null {
        /// The name of the offending parameter.
        name: &'static str,
    },

    /// The argument was an empty or whitespace-only string.
    #[error("String cannot be empty. (Parameter '{name}')")]
    Empty {
        /// The name of the offending parameter.
        name: &'static str,
    },
}

impl ArgumentError {
    /// Returns the name of the parameter that failed validation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null { name } | Self::Empty { name } => name,
        }
    }
}

/// Ensures `value` is not empty or whitespace-only.
pub(crate) fn ensure_not_empty(name: &'static str, value: &str) -> Result<(), ArgumentError> {
    if value.trim().is_empty() {
        return Err(ArgumentError::Empty { name });
    }
    Ok(())
}

/// Ensures an explicitly supplied optional string is not empty.
pub(crate) fn ensure_not_empty_if_present(
    name: &'static str,
    value: Option<&str>,
) -> Result<(), ArgumentError> {
    value.map_or(Ok(()), |v| ensure_not_empty(name, v))
}

/// Ensures a request body is present.
pub(crate) fn ensure_not_null(
    name: &'static str,
    value: &serde_json::Value,
) -> Result<(), ArgumentError> {
    if value.is_null() {
        return Err(ArgumentError::Null { name });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("absolute URL"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let message = error.to_string();
        assert!(message.contains("base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_argument_error_names_parameter() {
        let error = ArgumentError::Null { name: "data" };
        assert_eq!(error.name(), "data");
        assert!(error.to_string().contains("'data'"));

        let error = ArgumentError::Empty { name: "uri" };
        assert_eq!(error.name(), "uri");
        assert!(error.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_ensure_not_empty_rejects_whitespace() {
        assert_eq!(
            ensure_not_empty("uri", "   "),
            Err(ArgumentError::Empty { name: "uri" })
        );
        assert!(ensure_not_empty("uri", "Bugs").is_ok());
    }

    #[test]
    fn test_ensure_not_empty_if_present_allows_absent() {
        assert!(ensure_not_empty_if_present("accepts", None).is_ok());
        assert_eq!(
            ensure_not_empty_if_present("accepts", Some("")),
            Err(ArgumentError::Empty { name: "accepts" })
        );
    }

    #[test]
    fn test_ensure_not_null_rejects_null_body() {
        assert_eq!(
            ensure_not_null("data", &serde_json::Value::Null),
            Err(ArgumentError::Null { name: "data" })
        );
        assert!(ensure_not_null("data", &json!({})).is_ok());
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let _: &dyn std::error::Error = &error;
        let _: &dyn std::error::Error = &ArgumentError::Empty { name: "uri" };
    }
}
