//! Startup orchestration.
//!
//! # Responsibilities
//! - Register configured routes with the engine
//! - Build and install configured resolvers
//! - Apply reloaded configuration without a window of missing resolvers
//!
//! # Design Decisions
//! - Fail fast: unknown resolvers and bad patterns abort startup
//! - Routes are only ever overwritten; hosts removed from the file keep
//!   their last target until restart
//! - The balancing strategy is read once at startup

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::{ConfigError, ProxyConfig, ResolverConfig};
use crate::load_balancer::{selector_for, TargetSelector};
use crate::routing::{HostPatternResolver, ResolverCatalog, ResolverHandle, RouteEngine};

/// A running engine plus the resolvers that came from configuration.
pub struct Runtime {
    engine: Arc<RouteEngine>,
    catalog: ResolverCatalog,
    selector: Arc<dyn TargetSelector>,
    installed: Mutex<Vec<ResolverHandle>>,
}

impl Runtime {
    /// Build an engine from `config`, looking up named resolvers in `catalog`.
    pub fn start(config: &ProxyConfig, catalog: ResolverCatalog) -> Result<Self, ConfigError> {
        let resolvers = build_resolvers(config, &catalog)?;
        let engine = Arc::new(RouteEngine::new());

        register_routes(&engine, config);
        let installed = resolvers.iter().map(|(handle, _)| handle.clone()).collect();
        engine.replace_resolvers(&[], resolvers);

        tracing::info!(
            routes = config.routes.len(),
            resolvers = engine.resolvers().len(),
            strategy = ?config.balancing.strategy,
            "Routing engine ready"
        );

        Ok(Self {
            engine,
            catalog,
            selector: selector_for(config.balancing.strategy),
            installed: Mutex::new(installed),
        })
    }

    /// Apply a new configuration. On error nothing changes.
    pub fn reload(&self, config: &ProxyConfig) -> Result<(), ConfigError> {
        let resolvers = build_resolvers(config, &self.catalog)?;
        let mut installed = self.installed();

        let stale: Vec<ResolverHandle> = installed
            .iter()
            .filter(|old| !resolvers.iter().any(|(new, _)| new == *old))
            .cloned()
            .collect();

        register_routes(&self.engine, config);
        *installed = resolvers.iter().map(|(handle, _)| handle.clone()).collect();
        self.engine.replace_resolvers(&stale, resolvers);

        tracing::info!(
            routes = config.routes.len(),
            resolvers = self.engine.resolvers().len(),
            "Configuration reloaded"
        );
        Ok(())
    }

    pub fn engine(&self) -> &Arc<RouteEngine> {
        &self.engine
    }

    pub fn selector(&self) -> Arc<dyn TargetSelector> {
        Arc::clone(&self.selector)
    }

    fn installed(&self) -> MutexGuard<'_, Vec<ResolverHandle>> {
        self.installed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn register_routes(engine: &RouteEngine, config: &ProxyConfig) {
    for route in &config.routes {
        engine.register(route.host.clone(), route.target.to_input());
    }
}

fn build_resolvers(
    config: &ProxyConfig,
    catalog: &ResolverCatalog,
) -> Result<Vec<(ResolverHandle, i32)>, ConfigError> {
    config
        .resolvers
        .iter()
        .map(|resolver| -> Result<(ResolverHandle, i32), ConfigError> {
            let handle = match resolver {
                ResolverConfig::Wildcard {
                    pattern, target, ..
                } => HostPatternResolver::new(pattern, target.to_input())
                    .map(ResolverHandle::new)
                    .ok_or_else(|| ConfigError::InvalidPattern(pattern.clone()))?,
                ResolverConfig::Named { name, .. } => catalog
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownResolver(name.clone()))?,
            };
            Ok((handle, resolver.priority()))
        })
        .collect()
}
