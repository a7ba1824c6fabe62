//! Route matching logic.
//!
//! # Responsibilities
//! - Match request paths against a route's prefix on segment boundaries
//! - Match hostnames against exact or single-label wildcard patterns
//!
//! # Design Decisions
//! - Host matching is case-insensitive (RFC 9110)
//! - Path matching is case-sensitive
//! - `/` owns every path
//! - No regex to guarantee O(n) matching

/// Matches a request path against a route's path prefix.
///
/// `/notme` matches `/notme`, `/notme/x` and `/notme?q=1` but not `/notme2`.
#[derive(Debug, Clone, Copy)]
pub struct PathPrefixMatcher<'a> {
    prefix: &'a str,
}

impl<'a> PathPrefixMatcher<'a> {
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix }
    }

    pub fn matches(&self, path: &str) -> bool {
        if self.prefix.is_empty() || self.prefix == "/" {
            return true;
        }

        let Some(rest) = path.strip_prefix(self.prefix) else {
            return false;
        };

        if rest.is_empty() || self.prefix.ends_with('/') {
            return true;
        }

        matches!(rest.as_bytes()[0], b'/' | b'?' | b'#')
    }
}

/// Matches a hostname against `example.com` or `*.example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPattern {
    Exact(String),
    /// Stored without the leading `*.`.
    Wildcard(String),
}

impl HostPattern {
    /// Parse a pattern. Returns `None` for empty or malformed patterns.
    pub fn parse(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim().to_lowercase();
        if pattern.is_empty() {
            return None;
        }

        match pattern.strip_prefix("*.") {
            Some(suffix) if !suffix.is_empty() && !suffix.contains('*') => {
                Some(HostPattern::Wildcard(suffix.to_string()))
            }
            Some(_) => None,
            None if pattern.contains('*') => None,
            None => Some(HostPattern::Exact(pattern)),
        }
    }

    pub fn matches(&self, hostname: &str) -> bool {
        let hostname = hostname.to_lowercase();
        match self {
            HostPattern::Exact(expected) => hostname == *expected,
            // Exactly one label in front of the suffix.
            HostPattern::Wildcard(suffix) => hostname
                .strip_suffix(suffix.as_str())
                .and_then(|head| head.strip_suffix('.'))
                .map(|label| !label.is_empty() && !label.contains('.'))
                .unwrap_or(false),
        }
    }
}
