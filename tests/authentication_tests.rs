//! Integration tests for credentials and authentication handlers.

use sniper::clients::{HttpMethod, Request};
use sniper::{
    authenticate_request, ArgumentError, AuthenticationError, AuthenticationType, Authenticator,
    Credentials,
};

fn request() -> Request {
    Request::builder(HttpMethod::Get, "Bugs").build()
}

#[test]
fn test_basic_header_is_base64_of_login_and_password() {
    let cases = [
        ("admin", "secret", "Basic YWRtaW46c2VjcmV0"),
        ("admin", "", "Basic YWRtaW46"),
        (
            "that-github-guy",
            "Sup3rS3cr3t!",
            "Basic dGhhdC1naXRodWItZ3V5OlN1cDNyUzNjcjN0IQ==",
        ),
    ];

    for (login, password, expected) in cases {
        let credentials = Credentials::basic(login, password).unwrap();
        let mut request = request();

        Authenticator::Basic
            .authenticate(&mut request, &credentials)
            .unwrap();

        assert_eq!(request.headers["Authorization"], expected, "login {login}");
    }
}

#[test]
fn test_token_header() {
    let credentials = Credentials::token("abcda1234a").unwrap();
    let mut request = request();

    Authenticator::Token
        .authenticate(&mut request, &credentials)
        .unwrap();

    assert_eq!(request.headers["Authorization"], "Token abcda1234a");
}

#[test]
fn test_every_mismatched_pair_fails() {
    let all_credentials = [
        Credentials::anonymous(),
        Credentials::basic("admin", "secret").unwrap(),
        Credentials::token("abcda1234a").unwrap(),
    ];
    let handlers = [
        Authenticator::Anonymous,
        Authenticator::Basic,
        Authenticator::Token,
    ];

    for handler in handlers {
        for credentials in &all_credentials {
            let mut request = request();
            let result = handler.authenticate(&mut request, credentials);

            if handler.kind() == credentials.kind() {
                assert!(result.is_ok(), "{handler:?} with {credentials:?}");
            } else {
                assert_eq!(
                    result,
                    Err(AuthenticationError::Mismatch {
                        handler: handler.kind(),
                        credentials: credentials.kind(),
                    })
                );
                assert!(!request.headers.contains_key("Authorization"));
            }
        }
    }
}

#[test]
fn test_mismatch_message() {
    let credentials = Credentials::basic("admin", "secret").unwrap();
    let error = Authenticator::Token
        .authenticate(&mut request(), &credentials)
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "The token authentication handler cannot apply basic credentials."
    );
}

#[test]
fn test_authenticate_request_picks_handler_by_kind() {
    let mut request = request();
    authenticate_request(&mut request, &Credentials::anonymous()).unwrap();
    assert!(request.headers.is_empty());

    let token = Credentials::token("t0k").unwrap();
    authenticate_request(&mut request, &token).unwrap();
    assert_eq!(request.headers["Authorization"], "Token t0k");
}

#[test]
fn test_empty_credentials_are_rejected() {
    assert_eq!(
        Credentials::basic("", "secret").unwrap_err(),
        ArgumentError::Empty { name: "login" }
    );
    assert_eq!(
        Credentials::token("   ").unwrap_err(),
        ArgumentError::Empty { name: "token" }
    );
}

#[test]
fn test_credentials_debug_masks_secrets() {
    let basic = format!("{:?}", Credentials::basic("admin", "secret").unwrap());
    let token = format!("{:?}", Credentials::token("abcda1234a").unwrap());

    assert!(basic.contains("admin"));
    assert!(!basic.contains("secret"));
    assert!(!token.contains("abcda1234a"));
}

#[test]
fn test_authentication_type_display() {
    assert_eq!(AuthenticationType::Anonymous.to_string(), "anonymous");
    assert_eq!(AuthenticationType::Basic.to_string(), "basic");
    assert_eq!(AuthenticationType::Token.to_string(), "token");
}
