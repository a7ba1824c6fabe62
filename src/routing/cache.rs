//! Route canonicalization and memoization.
//!
//! # Responsibilities
//! - Convert a `RouteInput` into a canonical `RouteSpec`
//! - Return the identical `Arc<RouteSpec>` for repeated equivalent inputs
//!
//! # Design Decisions
//! - URL strings are keyed by value in a process-wide `DashMap`
//! - Records memoize in their own slot, so identity is the record itself
//! - Canonical specs skip both parsing and lookup
//! - Failures are not cached for strings; they return `None` every time
//! - Entries are never evicted; distinct inputs are bounded by configuration

use std::sync::{Arc, LazyLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::observability::metrics;
use crate::routing::route::{RouteInput, RouteRecord, RouteSpec, UrlTarget, ROOT_PATH};

static ROUTE_CACHE: LazyLock<RouteCache> = LazyLock::new(RouteCache::new);

/// Canonicalize `input` through the process-wide cache.
///
/// Returns `None` when the input is not a usable route: an unparseable URL,
/// a URL without a host, or a record without any URL.
pub fn build_route(input: &RouteInput) -> Option<Arc<RouteSpec>> {
    ROUTE_CACHE.build(input)
}

/// Number of URL strings memoized by the process-wide cache.
pub fn cached_routes() -> usize {
    ROUTE_CACHE.len()
}

/// Memo table for string route inputs.
#[derive(Debug, Default)]
pub struct RouteCache {
    by_url: DashMap<String, Arc<RouteSpec>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self, input: &RouteInput) -> Option<Arc<RouteSpec>> {
        match input {
            RouteInput::Canonical(spec) => Some(Arc::clone(spec)),
            RouteInput::Url(raw) => self.build_url(raw),
            RouteInput::Record(record) => record
                .canonical_slot()
                .get_or_init(|| canonicalize_record(record))
                .clone(),
        }
    }

    fn build_url(&self, raw: &str) -> Option<Arc<RouteSpec>> {
        if let Some(spec) = self.by_url.get(raw) {
            return Some(Arc::clone(spec.value()));
        }

        // The shard stays locked while we parse, so concurrent callers for
        // the same string all observe a single canonical object.
        let spec = match self.by_url.entry(raw.to_string()) {
            Entry::Occupied(entry) => return Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let target = parse_target(raw)?;
                let spec = Arc::new(RouteSpec::resolved(ROOT_PATH, vec![target]));
                entry.insert(Arc::clone(&spec));
                spec
            }
        };

        metrics::record_cache_size(self.by_url.len());
        Some(spec)
    }

    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}

fn canonicalize_record(record: &RouteRecord) -> Option<Arc<RouteSpec>> {
    if record.urls().is_empty() {
        tracing::debug!(path = ?record.path(), "Route record has no url");
        return None;
    }

    let urls = record
        .urls()
        .iter()
        .map(|raw| parse_target(raw))
        .collect::<Option<Vec<_>>>()?;

    let path = record
        .path()
        .filter(|path| !path.is_empty())
        .unwrap_or(ROOT_PATH);

    Some(Arc::new(RouteSpec::resolved(path, urls)))
}

fn parse_target(raw: &str) -> Option<UrlTarget> {
    match UrlTarget::parse(raw) {
        Ok(target) => Some(target),
        Err(e) => {
            tracing::debug!(error = %e, "Discarding unusable route target");
            None
        }
    }
}
