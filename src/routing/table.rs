//! Static hostname routing table.
//!
//! Backs the built-in `routing` resolver: an exact hostname lookup that
//! returns whatever was registered, uncanonicalized. Path filtering is left to
//! the engine.

use dashmap::DashMap;

use crate::routing::resolver::{ResolveResult, Resolver};
use crate::routing::route::RouteInput;

/// Name of the built-in resolver.
pub const ROUTING_RESOLVER: &str = "routing";

/// Hostname to route input map.
#[derive(Debug, Default)]
pub struct RoutingTable {
    routes: DashMap<String, RouteInput>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `target` for `hostname`, replacing any previous target.
    pub fn register(&self, hostname: impl Into<String>, target: RouteInput) {
        let hostname = hostname.into();
        if self.routes.insert(hostname.clone(), target).is_some() {
            tracing::info!(hostname = %hostname, "Route replaced");
        } else {
            tracing::info!(hostname = %hostname, "Route registered");
        }
    }

    pub fn get(&self, hostname: &str) -> Option<RouteInput> {
        self.routes.get(hostname).map(|r| r.value().clone())
    }

    /// Registered hostnames, sorted.
    pub fn hostnames(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self.routes.iter().map(|r| r.key().clone()).collect();
        hosts.sort();
        hosts
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Resolver for RoutingTable {
    fn resolve(&self, hostname: &str, _path: &str) -> ResolveResult {
        Ok(self.get(hostname))
    }

    fn name(&self) -> &str {
        ROUTING_RESOLVER
    }
}
