//! Authentication types for the Sniper client.
//!
//! # Overview
//!
//! - [`Credentials`]: Immutable anonymous, basic, or token credentials
//! - [`AuthenticationType`]: The credential kind
//! - [`Authenticator`]: The handler that writes the `Authorization` header
//!
//! # Example
//!
//! ```rust
//! use sniper::{authenticate_request, Credentials};
//! use sniper::clients::{HttpMethod, Request};
//!
//! let credentials = Credentials::basic("admin", "secret").unwrap();
//! let mut request = Request::builder(HttpMethod::Get, "Bugs").build();
//!
//! authenticate_request(&mut request, &credentials).unwrap();
//! assert_eq!(request.headers["Authorization"], "Basic YWRtaW46c2VjcmV0");
//! ```

mod authenticator;
mod credentials;

pub use authenticator::{
    authenticate_request, AuthenticationError, Authenticator, AUTHORIZATION_HEADER,
};
pub use credentials::{AuthenticationType, Credentials};
