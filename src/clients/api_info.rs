//! Response metadata parsed from HTTP headers.
//!
//! [`parse_response_headers`] derives an [`ApiInfo`] from a response's header
//! map: pagination links from `Link`, granted and accepted OAuth scopes, and
//! a [`RateLimit`] snapshot. Parsing never fails. Missing or malformed
//! metadata degrades to empty or default fields.
//!
//! # Link truncation
//!
//! The `Link` header is split on commas and read segment by segment. The
//! first segment without a recognised relation (`next`, `prev`, `first`,
//! `last`) or without an absolute `<uri>` stops parsing: links after it are
//! dropped, links before it are kept.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use url::Url;

/// Header carrying pagination links.
pub const LINK_HEADER: &str = "Link";
/// Header listing the OAuth scopes granted to the token.
pub const OAUTH_SCOPES_HEADER: &str = "X-OAuth-Scopes";
/// Header listing the OAuth scopes the endpoint accepts.
pub const ACCEPTED_OAUTH_SCOPES_HEADER: &str = "X-Accepted-OAuth-Scopes";
/// Header with the request quota for the current window.
pub const RATE_LIMIT_LIMIT_HEADER: &str = "X-RateLimit-Limit";
/// Header with the requests left in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "X-RateLimit-Remaining";
/// Header with the window reset time in UTC epoch seconds.
pub const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

const LINK_RELATIONS: [&str; 4] = ["next", "prev", "first", "last"];

/// Looks up a header value, preferring an exact name match and falling back
/// to an ASCII case-insensitive one.
pub(crate) fn header_value<'a>(
    headers: &'a HashMap<String, String>,
    name: &str,
) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .map(String::as_str)
}

/// Rate-limit snapshot taken from the three rate-limit headers.
///
/// An absent or unparseable header yields `0` (or the Unix epoch for the
/// reset time) without affecting the other fields.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use sniper::clients::RateLimit;
///
/// let mut headers = HashMap::new();
/// headers.insert("X-RateLimit-Limit".to_string(), "5000".to_string());
/// headers.insert("X-RateLimit-Remaining".to_string(), "oops".to_string());
///
/// let rate_limit = RateLimit::from_headers(&headers);
/// assert_eq!(rate_limit.limit, 5000);
/// assert_eq!(rate_limit.remaining, 0);
/// assert_eq!(rate_limit.reset_as_utc_epoch_seconds(), 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// The maximum number of requests allowed in the window.
    pub limit: u32,
    /// The number of requests left in the window.
    pub remaining: u32,
    /// When the window resets.
    pub reset: DateTime<Utc>,
}

impl RateLimit {
    /// Creates a snapshot from raw values.
    #[must_use]
    pub fn new(limit: u32, remaining: u32, reset_as_utc_epoch_seconds: i64) -> Self {
        Self {
            limit,
            remaining,
            reset: from_epoch_seconds(reset_as_utc_epoch_seconds),
        }
    }

    /// Parses the rate-limit headers.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, String>) -> Self {
        let number = |name| {
            header_value(headers, name)
                .and_then(|value| value.trim().parse::<u32>().ok())
                .unwrap_or(0)
        };
        let reset = header_value(headers, RATE_LIMIT_RESET_HEADER)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(0);

        Self::new(
            number(RATE_LIMIT_LIMIT_HEADER),
            number(RATE_LIMIT_REMAINING_HEADER),
            reset,
        )
    }

    /// Returns the reset time as UTC epoch seconds.
    #[must_use]
    pub fn reset_as_utc_epoch_seconds(&self) -> i64 {
        self.reset.timestamp()
    }

    /// Returns `true` when a quota was reported and none of it is left.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.limit > 0 && self.remaining == 0
    }
}

fn from_epoch_seconds(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).single().unwrap_or_default()
}

/// Metadata about an API response, parsed once from its headers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiInfo {
    links: HashMap<String, Url>,
    oauth_scopes: Vec<String>,
    accepted_oauth_scopes: Vec<String>,
    rate_limit: RateLimit,
}

impl ApiInfo {
    /// Creates an `ApiInfo` from already-parsed parts.
    #[must_use]
    pub const fn new(
        links: HashMap<String, Url>,
        oauth_scopes: Vec<String>,
        accepted_oauth_scopes: Vec<String>,
        rate_limit: RateLimit,
    ) -> Self {
        Self {
            links,
            oauth_scopes,
            accepted_oauth_scopes,
            rate_limit,
        }
    }

    /// Pagination links keyed by relation. Only relations the server sent
    /// are present.
    #[must_use]
    pub const fn links(&self) -> &HashMap<String, Url> {
        &self.links
    }

    /// OAuth scopes granted to the token, in header order.
    #[must_use]
    pub fn oauth_scopes(&self) -> &[String] {
        &self.oauth_scopes
    }

    /// OAuth scopes the endpoint accepts, in header order.
    #[must_use]
    pub fn accepted_oauth_scopes(&self) -> &[String] {
        &self.accepted_oauth_scopes
    }

    /// The rate-limit snapshot.
    #[must_use]
    pub const fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// URL of the next page.
    #[must_use]
    pub fn next_page_url(&self) -> Option<&Url> {
        self.links.get("next")
    }

    /// URL of the previous page.
    #[must_use]
    pub fn previous_page_url(&self) -> Option<&Url> {
        self.links.get("prev")
    }

    /// URL of the first page.
    #[must_use]
    pub fn first_page_url(&self) -> Option<&Url> {
        self.links.get("first")
    }

    /// URL of the last page.
    #[must_use]
    pub fn last_page_url(&self) -> Option<&Url> {
        self.links.get("last")
    }
}

/// Parses response headers into an [`ApiInfo`].
///
/// Pure and idempotent: the input is not modified and repeated calls on the
/// same map produce equal values.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use sniper::clients::parse_response_headers;
///
/// let mut headers = HashMap::new();
/// headers.insert("Link".to_string(), r#"<https://x/p2>; rel="next""#.to_string());
/// headers.insert("X-OAuth-Scopes".to_string(), "repo, user".to_string());
///
/// let info = parse_response_headers(&headers);
/// assert_eq!(info.next_page_url().unwrap().as_str(), "https://x/p2");
/// assert!(info.last_page_url().is_none());
/// assert_eq!(info.oauth_scopes(), ["repo", "user"]);
/// ```
#[must_use]
pub fn parse_response_headers(headers: &HashMap<String, String>) -> ApiInfo {
    let links = header_value(headers, LINK_HEADER)
        .map(parse_links)
        .unwrap_or_default();

    ApiInfo {
        links,
        oauth_scopes: parse_scopes(header_value(headers, OAUTH_SCOPES_HEADER)),
        accepted_oauth_scopes: parse_scopes(header_value(headers, ACCEPTED_OAUTH_SCOPES_HEADER)),
        rate_limit: RateLimit::from_headers(headers),
    }
}

fn parse_scopes(value: Option<&str>) -> Vec<String> {
    value.map_or_else(Vec::new, |value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|scope| !scope.is_empty())
            .map(String::from)
            .collect()
    })
}

fn parse_links(value: &str) -> HashMap<String, Url> {
    let mut links = HashMap::new();

    for segment in value.split(',') {
        let Some(relation) = link_relation(segment) else {
            tracing::debug!("Stopped reading Link header at segment without a relation: {segment}");
            break;
        };
        let Some(url) = link_uri(segment).and_then(|uri| Url::parse(uri).ok()) else {
            tracing::debug!("Stopped reading Link header at segment without a URI: {segment}");
            break;
        };
        links.entry(relation.to_string()).or_insert(url);
    }

    links
}

/// Finds `rel="<relation>"` (case-insensitive) for a known relation.
fn link_relation(segment: &str) -> Option<&'static str> {
    let lowered = segment.to_ascii_lowercase();
    lowered.match_indices("rel=\"").find_map(|(index, marker)| {
        let rest = &lowered[index + marker.len()..];
        LINK_RELATIONS.into_iter().find(|relation| {
            rest.strip_prefix(*relation)
                .is_some_and(|tail| tail.starts_with('"'))
        })
    })
}

/// Extracts the text between the first `<` and the last `>`.
fn link_uri(segment: &str) -> Option<&str> {
    let start = segment.find('<')? + 1;
    let end = segment.rfind('>')?;
    (end > start).then(|| &segment[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parses_all_link_relations() {
        let info = parse_response_headers(&headers(&[(
            "Link",
            r#"<https://tp.example.com/api/v1/Bugs?skip=50>; rel="next", <https://tp.example.com/api/v1/Bugs?skip=0>; rel="prev", <https://tp.example.com/api/v1/Bugs?skip=0>; rel="first", <https://tp.example.com/api/v1/Bugs?skip=450>; rel="last""#,
        )]));

        assert_eq!(
            info.next_page_url().unwrap().as_str(),
            "https://tp.example.com/api/v1/Bugs?skip=50"
        );
        assert_eq!(
            info.previous_page_url().unwrap().as_str(),
            "https://tp.example.com/api/v1/Bugs?skip=0"
        );
        assert!(info.first_page_url().is_some());
        assert_eq!(
            info.last_page_url().unwrap().as_str(),
            "https://tp.example.com/api/v1/Bugs?skip=450"
        );
    }

    #[test]
    fn test_missing_link_header_yields_no_links() {
        let info = parse_response_headers(&HashMap::new());

        assert!(info.links().is_empty());
        assert!(info.next_page_url().is_none());
        assert!(info.previous_page_url().is_none());
        assert!(info.first_page_url().is_none());
        assert!(info.last_page_url().is_none());
    }

    #[test]
    fn test_malformed_segment_truncates_remaining_links() {
        let info = parse_response_headers(&headers(&[(
            "Link",
            r#"<https://x/p2>; rel="next", <https://x/p1>; rel="self", <https://x/p9>; rel="last""#,
        )]));

        assert_eq!(info.next_page_url().unwrap().as_str(), "https://x/p2");
        assert!(info.last_page_url().is_none());
        assert_eq!(info.links().len(), 1);
    }

    #[test]
    fn test_first_segment_malformed_yields_no_links() {
        let info = parse_response_headers(&headers(&[(
            "Link",
            r#"https://x/p2; rel="next", <https://x/p9>; rel="last""#,
        )]));

        assert!(info.links().is_empty());
    }

    #[test]
    fn test_relative_uri_counts_as_malformed() {
        let info = parse_response_headers(&headers(&[(
            "Link",
            r#"</Bugs?skip=50>; rel="next", <https://x/p9>; rel="last""#,
        )]));

        assert!(info.links().is_empty());
    }

    #[test]
    fn test_relation_match_is_case_insensitive() {
        let info = parse_response_headers(&headers(&[("Link", r#"<https://x/p2>; REL="Next""#)]));

        assert_eq!(info.next_page_url().unwrap().as_str(), "https://x/p2");
    }

    #[test]
    fn test_first_duplicate_relation_wins() {
        let info = parse_response_headers(&headers(&[(
            "Link",
            r#"<https://x/a>; rel="next", <https://x/b>; rel="next""#,
        )]));

        assert_eq!(info.next_page_url().unwrap().as_str(), "https://x/a");
    }

    #[test]
    fn test_scopes_are_trimmed_and_ordered() {
        let info = parse_response_headers(&headers(&[
            ("X-OAuth-Scopes", "repo, user"),
            ("X-Accepted-OAuth-Scopes", "user,  , admin:org,"),
        ]));

        assert_eq!(info.oauth_scopes(), ["repo", "user"]);
        assert_eq!(info.accepted_oauth_scopes(), ["user", "admin:org"]);
    }

    #[test]
    fn test_missing_scope_headers_yield_empty_lists() {
        let info = parse_response_headers(&HashMap::new());

        assert!(info.oauth_scopes().is_empty());
        assert!(info.accepted_oauth_scopes().is_empty());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let info = parse_response_headers(&headers(&[
            ("x-oauth-scopes", "repo"),
            ("link", r#"<https://x/p2>; rel="next""#),
            ("x-ratelimit-limit", "100"),
        ]));

        assert_eq!(info.oauth_scopes(), ["repo"]);
        assert!(info.next_page_url().is_some());
        assert_eq!(info.rate_limit().limit, 100);
    }

    #[test]
    fn test_rate_limit_parsing() {
        let rate_limit = RateLimit::from_headers(&headers(&[
            ("X-RateLimit-Limit", "5000"),
            ("X-RateLimit-Remaining", "4999"),
            ("X-RateLimit-Reset", "1372700873"),
        ]));

        assert_eq!(rate_limit.limit, 5000);
        assert_eq!(rate_limit.remaining, 4999);
        assert_eq!(rate_limit.reset_as_utc_epoch_seconds(), 1_372_700_873);
        assert_eq!(rate_limit.reset.to_rfc3339(), "2013-07-01T17:47:53+00:00");
    }

    #[test]
    fn test_rate_limit_defaults_each_field_independently() {
        let rate_limit = RateLimit::from_headers(&headers(&[
            ("X-RateLimit-Limit", "5000"),
            ("X-RateLimit-Remaining", "-1"),
            ("X-RateLimit-Reset", "soon"),
        ]));

        assert_eq!(rate_limit.limit, 5000);
        assert_eq!(rate_limit.remaining, 0);
        assert_eq!(rate_limit.reset_as_utc_epoch_seconds(), 0);
    }

    #[test]
    fn test_rate_limit_absent_headers_default() {
        let rate_limit = RateLimit::from_headers(&HashMap::new());
        assert_eq!(rate_limit, RateLimit::default());
        assert!(!rate_limit.is_exhausted());
    }

    #[test]
    fn test_rate_limit_exhausted() {
        assert!(RateLimit::new(60, 0, 0).is_exhausted());
        assert!(!RateLimit::new(60, 1, 0).is_exhausted());
    }

    #[test]
    fn test_parser_is_idempotent_and_leaves_input_unchanged() {
        let input = headers(&[
            (
                "Link",
                r#"<https://x/p2>; rel="next", <https://x/p5>; rel="last""#,
            ),
            ("X-OAuth-Scopes", "repo, user"),
            ("X-RateLimit-Remaining", "10"),
        ]);
        let snapshot = input.clone();

        let first = parse_response_headers(&input);
        let second = parse_response_headers(&input);

        assert_eq!(first, second);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_link_uri_requires_content_between_brackets() {
        assert_eq!(link_uri("<https://x>; rel=\"next\""), Some("https://x"));
        assert_eq!(link_uri("<>; rel=\"next\""), None);
        assert_eq!(link_uri("rel=\"next\""), None);
    }
}
