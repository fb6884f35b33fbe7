//! Authentication handlers that attach credentials to outgoing requests.
//!
//! Exactly one handler runs per request. It is chosen once from the
//! credential kind with [`Authenticator::for_credentials`] and is the only
//! code that writes the `Authorization` header.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::auth::credentials::{AuthenticationType, Credentials, Secret};
use crate::clients::Request;

/// The `Authorization` request header.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Error returned when credentials do not match the handler they were given to.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The handler cannot apply credentials of this kind.
    #[error("The {handler} authentication handler cannot apply {credentials} credentials.")]
    Mismatch {
        /// The kind of handler that was asked to authenticate.
        handler: AuthenticationType,
        /// The kind of credentials that was supplied.
        credentials: AuthenticationType,
    },
}

/// An authentication handler.
///
/// # Example
///
/// ```rust
/// use sniper::{Authenticator, Credentials};
/// use sniper::clients::{HttpMethod, Request};
///
/// let credentials = Credentials::token("abcda1234a").unwrap();
/// let mut request = Request::builder(HttpMethod::Get, "Bugs").build();
///
/// Authenticator::for_credentials(&credentials)
///     .authenticate(&mut request, &credentials)
///     .unwrap();
///
/// assert_eq!(request.headers["Authorization"], "Token abcda1234a");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authenticator {
    /// Attaches nothing.
    Anonymous,
    /// Attaches `Authorization: Basic <base64(login:password)>`.
    Basic,
    /// Attaches `Authorization: Token <token>`.
    Token,
}

impl Authenticator {
    /// Selects the handler matching the kind of `credentials`.
    #[must_use]
    pub const fn for_credentials(credentials: &Credentials) -> Self {
        match credentials.kind() {
            AuthenticationType::Anonymous => Self::Anonymous,
            AuthenticationType::Basic => Self::Basic,
            AuthenticationType::Token => Self::Token,
        }
    }

    /// Returns the credential kind this handler accepts.
    #[must_use]
    pub const fn kind(&self) -> AuthenticationType {
        match self {
            Self::Anonymous => AuthenticationType::Anonymous,
            Self::Basic => AuthenticationType::Basic,
            Self::Token => AuthenticationType::Token,
        }
    }

    /// Authenticates `request` by mutating its headers in place.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::Mismatch`] if `credentials` are not of
    /// the kind this handler accepts. The request is left untouched.
    pub fn authenticate(
        &self,
        request: &mut Request,
        credentials: &Credentials,
    ) -> Result<(), AuthenticationError> {
        match (self, &credentials.secret) {
            (Self::Anonymous, Secret::Anonymous) => Ok(()),
            (Self::Basic, Secret::Basic { login, password }) => {
                debug_assert!(!login.is_empty(), "basic credentials without a login");
                let encoded = STANDARD.encode(format!("{login}:{password}").as_bytes());
                request
                    .headers
                    .insert(AUTHORIZATION_HEADER.to_string(), format!("Basic {encoded}"));
                Ok(())
            }
            (Self::Token, Secret::Token(token)) => {
                request
                    .headers
                    .insert(AUTHORIZATION_HEADER.to_string(), format!("Token {token}"));
                Ok(())
            }
            _ => Err(AuthenticationError::Mismatch {
                handler: self.kind(),
                credentials: credentials.kind(),
            }),
        }
    }
}

/// Selects the handler for `credentials` and applies it to `request`.
///
/// # Errors
///
/// Never fails for well-formed credentials; the error type is shared with
/// [`Authenticator::authenticate`].
pub fn authenticate_request(
    request: &mut Request,
    credentials: &Credentials,
) -> Result<(), AuthenticationError> {
    Authenticator::for_credentials(credentials).authenticate(request, credentials)
}
