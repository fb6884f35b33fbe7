//! Credentials used to authenticate outgoing requests.

use std::fmt;

use crate::error::{ensure_not_empty, ArgumentError};

/// The kind of credentials, which selects the authentication handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthenticationType {
    /// No authentication header is attached.
    Anonymous,
    /// HTTP basic authentication with a login and password.
    Basic,
    /// Access-token authentication.
    Token,
}

impl fmt::Display for AuthenticationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Basic => write!(f, "basic"),
            Self::Token => write!(f, "token"),
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub(crate) enum Secret {
    #[default]
    Anonymous,
    Basic {
        login: String,
        password: String,
    },
    Token(String),
}

/// Immutable credentials for the API.
///
/// Created by the caller and validated on construction: a basic login and an
/// access token must be non-empty, while a basic password may be empty.
///
/// # Security
///
/// The `Debug` implementation masks passwords and tokens.
///
/// # Example
///
/// ```rust
/// use sniper::{AuthenticationType, Credentials};
///
/// let credentials = Credentials::basic("admin", "secret").unwrap();
/// assert_eq!(credentials.kind(), AuthenticationType::Basic);
/// assert_eq!(credentials.login(), Some("admin"));
/// assert!(!format!("{credentials:?}").contains("secret"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) secret: Secret,
}

impl Credentials {
    /// Credentials that attach no authentication header.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            secret: Secret::Anonymous,
        }
    }

    /// Creates basic credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Empty`] if `login` is empty.
    pub fn basic(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ArgumentError> {
        let login = login.into();
        ensure_not_empty("login", &login)?;
        Ok(Self {
            secret: Secret::Basic {
                login,
                password: password.into(),
            },
        })
    }

    /// Creates access-token credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Empty`] if `token` is empty.
    pub fn token(token: impl Into<String>) -> Result<Self, ArgumentError> {
        let token = token.into();
        ensure_not_empty("token", &token)?;
        Ok(Self {
            secret: Secret::Token(token),
        })
    }

    /// Returns the kind of these credentials.
    #[must_use]
    pub const fn kind(&self) -> AuthenticationType {
        match self.secret {
            Secret::Anonymous => AuthenticationType::Anonymous,
            Secret::Basic { .. } => AuthenticationType::Basic,
            Secret::Token(_) => AuthenticationType::Token,
        }
    }

    /// Returns the login for basic credentials.
    #[must_use]
    pub fn login(&self) -> Option<&str> {
        match &self.secret {
            Secret::Basic { login, .. } => Some(login),
            _ => None,
        }
    }

    /// Returns the password for basic credentials.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        match &self.secret {
            Secret::Basic { password, .. } => Some(password),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.secret {
            Secret::Anonymous => write!(f, "Credentials::Anonymous"),
            Secret::Basic { login, .. } => write!(f, "Credentials::Basic({login}, *****)"),
            Secret::Token(_) => write!(f, "Credentials::Token(*****)"),
        }
    }
}
