//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with clear error messages.

use crate::error::ConfigError;
use std::fmt;
use url::Url;

/// A validated API base URL.
///
/// The URL must be absolute and use the `http` or `https` scheme. The path is
/// normalized to end with `/` so relative endpoint URIs resolve beneath it
/// rather than replacing its last segment.
///
/// # Example
///
/// ```rust
/// use sniper::BaseUrl;
///
/// let base = BaseUrl::new("https://company.tpondemand.com/api/v1").unwrap();
/// assert_eq!(base.as_ref(), "https://company.tpondemand.com/api/v1/");
///
/// let bugs = base.join("Bugs/42").unwrap();
/// assert_eq!(bugs.as_str(), "https://company.tpondemand.com/api/v1/Bugs/42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL cannot be parsed,
    /// is relative, or has a scheme other than `http`/`https`.
    pub fn new(url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = url.as_ref();
        let invalid = || ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
        };

        let mut parsed = Url::parse(raw).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(invalid());
        }

        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self(parsed))
    }

    /// Resolves an endpoint URI against this base.
    ///
    /// Absolute URIs (such as pagination links returned by the server) are
    /// returned unchanged. Leading slashes on relative URIs are ignored so
    /// the base path is always kept.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the endpoint cannot be resolved.
    pub fn join(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        match Url::parse(endpoint) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.0.join(endpoint.trim_start_matches('/'))
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the host name of the URL, if any.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the underlying [`Url`].
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_appends_trailing_slash() {
        let base = BaseUrl::new("https://company.tpondemand.com/api/v1").unwrap();
        assert_eq!(base.as_ref(), "https://company.tpondemand.com/api/v1/");
    }

    #[test]
    fn test_base_url_keeps_existing_trailing_slash() {
        let base = BaseUrl::new("https://company.tpondemand.com/api/v1/").unwrap();
        assert_eq!(base.as_ref(), "https://company.tpondemand.com/api/v1/");
    }

    #[test]
    fn test_base_url_rejects_relative_url() {
        let result = BaseUrl::new("api/v1");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { url }) if url == "api/v1"));
    }

    #[test]
    fn test_base_url_rejects_non_http_scheme() {
        assert!(BaseUrl::new("ftp://company.tpondemand.com").is_err());
        assert!(BaseUrl::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_join_keeps_base_path_for_leading_slash() {
        let base = BaseUrl::new("https://company.tpondemand.com/api/v1").unwrap();
        let url = base.join("/UserStories/7").unwrap();
        assert_eq!(
            url.as_str(),
            "https://company.tpondemand.com/api/v1/UserStories/7"
        );
    }

    #[test]
    fn test_join_returns_absolute_urls_unchanged() {
        let base = BaseUrl::new("https://company.tpondemand.com/api/v1").unwrap();
        let url = base.join("https://other.example.com/page2").unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/page2");
    }

    #[test]
    fn test_host_name() {
        let base = BaseUrl::new("https://company.tpondemand.com/api/v1").unwrap();
        assert_eq!(base.host_name(), Some("company.tpondemand.com"));
    }
}
