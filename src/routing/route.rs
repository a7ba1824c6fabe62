//! Route descriptors.
//!
//! # Responsibilities
//! - Parse backend endpoints into immutable `UrlTarget`s
//! - Hold the canonical `RouteSpec` handed back to the host
//! - Model the raw inputs a resolver or a registration can supply
//!
//! # Design Decisions
//! - Canonical specs are shared as `Arc<RouteSpec>` and never mutated
//! - `RouteRecord` is deliberately not `Clone`: its identity is its memo slot
//! - Hand-authored specs carry `is_resolved = false` and are passed through

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::routing::matcher::PathPrefixMatcher;

/// Default path prefix owned by a route.
pub const ROOT_PATH: &str = "/";

/// Errors raised while parsing a backend URL.
#[derive(Debug, Error)]
pub enum TargetError {
    /// The string is not a valid URL.
    #[error("invalid target url {raw:?}: {source}")]
    Parse {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed but has no host to connect to.
    #[error("target url {0:?} has no host")]
    MissingHost(String),
}

/// A parsed backend endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UrlTarget {
    scheme: String,
    hostname: String,
    port: u16,
    path: String,
    href: String,
}

impl UrlTarget {
    /// Parse a backend URL. Bare `host:port` strings are treated as `http://`.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let trimmed = raw.trim();
        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

        let url = Url::parse(&candidate).map_err(|source| TargetError::Parse {
            raw: raw.to_string(),
            source,
        })?;

        let hostname = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(TargetError::MissingHost(raw.to_string())),
        };

        let port = url.port_or_known_default().unwrap_or(80);

        Ok(Self {
            scheme: url.scheme().to_string(),
            hostname,
            port,
            path: url.path().to_string(),
            href: url.to_string(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base path requests are forwarded under.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `host:port`, suitable for opening a connection.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    pub fn as_str(&self) -> &str {
        &self.href
    }
}

impl fmt::Display for UrlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}

/// Canonical route descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSpec {
    path: String,
    urls: Vec<UrlTarget>,
    is_resolved: bool,
}

impl RouteSpec {
    /// Build a hand-authored spec. It is passed through canonicalization
    /// untouched and is not validated.
    pub fn new(path: impl Into<String>, urls: Vec<UrlTarget>) -> Self {
        Self {
            path: path.into(),
            urls,
            is_resolved: false,
        }
    }

    /// Build a canonicalized spec. Callers guarantee `urls` is non-empty.
    pub(crate) fn resolved(path: impl Into<String>, urls: Vec<UrlTarget>) -> Self {
        debug_assert!(!urls.is_empty(), "resolved route without targets");
        Self {
            path: path.into(),
            urls,
            is_resolved: true,
        }
    }

    /// Path prefix this route claims ownership of.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn urls(&self) -> &[UrlTarget] {
        &self.urls
    }

    /// True when produced by the canonicalizer rather than supplied by hand.
    pub fn is_resolved(&self) -> bool {
        self.is_resolved
    }

    /// True if `path` falls under this route's prefix.
    pub fn matches(&self, path: &str) -> bool {
        PathPrefixMatcher::new(&self.path).matches(path)
    }
}

/// A route described as a path plus one or more URL strings.
///
/// Each constructed record is its own cache identity: the same
/// `Arc<RouteRecord>` always canonicalizes to the same `Arc<RouteSpec>`,
/// while an equal record built separately gets its own result.
#[derive(Debug)]
pub struct RouteRecord {
    path: Option<String>,
    urls: Vec<String>,
    canonical: OnceLock<Option<Arc<RouteSpec>>>,
}

impl RouteRecord {
    /// Record with a single URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_urls([url.into()])
    }

    /// Record with several URLs, order preserved.
    pub fn with_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: None,
            urls: urls.into_iter().map(Into::into).collect(),
            canonical: OnceLock::new(),
        }
    }

    /// Set the path prefix this record owns.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub(crate) fn canonical_slot(&self) -> &OnceLock<Option<Arc<RouteSpec>>> {
        &self.canonical
    }
}

/// Raw, uncanonicalized route description.
#[derive(Debug, Clone)]
pub enum RouteInput {
    /// A single backend URL.
    Url(String),
    /// A path plus URL list, memoized by identity.
    Record(Arc<RouteRecord>),
    /// An already-canonical spec, returned as-is.
    Canonical(Arc<RouteSpec>),
}

impl From<&str> for RouteInput {
    fn from(url: &str) -> Self {
        RouteInput::Url(url.to_string())
    }
}

impl From<String> for RouteInput {
    fn from(url: String) -> Self {
        RouteInput::Url(url)
    }
}

impl From<RouteRecord> for RouteInput {
    fn from(record: RouteRecord) -> Self {
        RouteInput::Record(Arc::new(record))
    }
}

impl From<Arc<RouteRecord>> for RouteInput {
    fn from(record: Arc<RouteRecord>) -> Self {
        RouteInput::Record(record)
    }
}

impl From<RouteSpec> for RouteInput {
    fn from(spec: RouteSpec) -> Self {
        RouteInput::Canonical(Arc::new(spec))
    }
}

impl From<Arc<RouteSpec>> for RouteInput {
    fn from(spec: Arc<RouteSpec>) -> Self {
        RouteInput::Canonical(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let target = UrlTarget::parse("https://api.example.com:8443/v1").unwrap();
        assert_eq!(target.scheme(), "https");
        assert_eq!(target.hostname(), "api.example.com");
        assert_eq!(target.port(), 8443);
        assert_eq!(target.path(), "/v1");
        assert_eq!(target.authority(), "api.example.com:8443");
    }

    #[test]
    fn test_parse_defaults() {
        let target = UrlTarget::parse("http://127.0.0.1").unwrap();
        assert_eq!(target.port(), 80);
        assert_eq!(target.path(), "/");

        let target = UrlTarget::parse("https://secure.local").unwrap();
        assert_eq!(target.port(), 443);
    }

    #[test]
    fn test_parse_bare_host_port() {
        let target = UrlTarget::parse("127.0.0.1:9999").unwrap();
        assert_eq!(target.scheme(), "http");
        assert_eq!(target.hostname(), "127.0.0.1");
        assert_eq!(target.port(), 9999);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(UrlTarget::parse("http://").is_err());
        assert!(UrlTarget::parse("http://[::1").is_err());
        assert!(matches!(
            UrlTarget::parse("file:///etc/hosts"),
            Err(TargetError::MissingHost(_))
        ));
    }

    #[test]
    fn test_hand_authored_spec_is_not_resolved() {
        let spec = RouteSpec::new("/", vec![]);
        assert!(!spec.is_resolved());
        assert!(spec.urls().is_empty());
    }
}
