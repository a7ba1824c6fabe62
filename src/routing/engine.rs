//! Route resolution engine.
//!
//! # Responsibilities
//! - Own the resolver registry and the default routing table
//! - Walk resolvers in priority order for each request
//! - Canonicalize answers and enforce path ownership
//!
//! # Design Decisions
//! - A failing or panicking resolver counts as "no opinion"
//! - A route whose path does not own the request falls through, it never
//!   aborts the walk
//! - First accepted route wins; later resolvers are not consulted

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::ConfigError;
use crate::observability::metrics;
use crate::routing::cache::build_route;
use crate::routing::registry::{ResolverEntry, ResolverRegistry};
use crate::routing::resolver::{ResolverHandle, ResolverSet};
use crate::routing::route::{RouteInput, RouteSpec};
use crate::routing::table::RoutingTable;

/// Resolves `(hostname, path)` pairs to canonical routes.
#[derive(Debug)]
pub struct RouteEngine {
    registry: ResolverRegistry,
    table: Arc<RoutingTable>,
    default_resolver: ResolverHandle,
}

impl RouteEngine {
    /// Engine holding only the built-in routing resolver, at priority 0.
    pub fn new() -> Self {
        let table = Arc::new(RoutingTable::new());
        let default_resolver = ResolverHandle::from_arc(table.clone());
        let registry = ResolverRegistry::new();
        registry.add(default_resolver.clone(), 0);

        Self {
            registry,
            table,
            default_resolver,
        }
    }

    /// Engine with extra resolvers installed at construction.
    pub fn with_resolvers(
        resolvers: impl Into<ResolverSet>,
        priority: Option<i32>,
    ) -> Result<Self, ConfigError> {
        let engine = Self::new();
        engine.add_resolver(resolvers, priority)?;
        Ok(engine)
    }

    /// Register `target` for an exact hostname. The raw input is stored and
    /// only validated when a request resolves to it.
    pub fn register(&self, hostname: impl Into<String>, target: impl Into<RouteInput>) {
        self.table.register(hostname, target.into());
    }

    /// Install one or more resolvers. Re-adding a handle updates its
    /// priority instead of duplicating it. A missing priority means 0 for a
    /// new handle and leaves an already installed handle where it is.
    pub fn add_resolver(
        &self,
        resolvers: impl Into<ResolverSet>,
        priority: Option<i32>,
    ) -> Result<(), ConfigError> {
        let handles = resolvers.into().into_vec();
        if handles.is_empty() {
            return Err(ConfigError::EmptyResolverSet);
        }

        self.registry.add_many(handles, priority);
        Ok(())
    }

    /// Remove a resolver by identity. No-op if absent.
    pub fn remove_resolver(&self, resolver: &ResolverHandle) {
        if self.registry.contains(resolver) {
            tracing::info!(resolver = resolver.name(), id = %resolver.id(), "Resolver removed");
        }
        self.registry.remove(resolver);
    }

    /// Swap a group of resolvers in one step; requests see either the old
    /// set or the new one.
    pub fn replace_resolvers(&self, old: &[ResolverHandle], new: Vec<(ResolverHandle, i32)>) {
        tracing::info!(removed = old.len(), added = new.len(), "Replacing resolvers");
        self.registry.batch(old, new);
    }

    /// Current resolver ordering.
    pub fn resolvers(&self) -> Arc<Vec<ResolverEntry>> {
        self.registry.snapshot()
    }

    /// Handle of the built-in routing resolver, e.g. to remove it.
    pub fn default_resolver(&self) -> &ResolverHandle {
        &self.default_resolver
    }

    pub fn routing_table(&self) -> &RoutingTable {
        &self.table
    }

    /// Find the route for a request, or `None` if nothing claims it.
    pub fn resolve(&self, hostname: &str, path: &str) -> Option<Arc<RouteSpec>> {
        let entries = self.registry.snapshot();

        for entry in entries.iter() {
            let Some(input) = invoke(entry, hostname, path) else {
                continue;
            };

            let Some(route) = build_route(&input) else {
                tracing::debug!(
                    resolver = entry.handle.name(),
                    hostname,
                    path,
                    "Resolver returned an unusable route"
                );
                continue;
            };

            if !route.matches(path) {
                tracing::trace!(
                    resolver = entry.handle.name(),
                    hostname,
                    path,
                    route_path = route.path(),
                    "Route does not own path"
                );
                continue;
            }

            tracing::debug!(
                resolver = entry.handle.name(),
                hostname,
                path,
                targets = route.urls().len(),
                "Route resolved"
            );
            metrics::record_resolution("matched");
            return Some(route);
        }

        metrics::record_resolution("no_match");
        None
    }
}

impl Default for RouteEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn invoke(entry: &ResolverEntry, hostname: &str, path: &str) -> Option<RouteInput> {
    let handle = &entry.handle;
    match panic::catch_unwind(AssertUnwindSafe(|| handle.resolve(hostname, path))) {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            tracing::warn!(
                resolver = handle.name(),
                id = %handle.id(),
                hostname,
                path,
                error = %e,
                "Resolver failed, skipping"
            );
            metrics::record_resolver_failure(handle.name());
            None
        }
        Err(payload) => {
            tracing::warn!(
                resolver = handle.name(),
                id = %handle.id(),
                hostname,
                path,
                panic = panic_message(&*payload),
                "Resolver panicked, skipping"
            );
            metrics::record_resolver_failure(handle.name());
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic>")
}
