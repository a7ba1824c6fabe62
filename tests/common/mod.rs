//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use revio::config::parse_config;
use revio::routing::{ResolverCatalog, ResolverHandle, RouteRecord};
use revio::{RouteEngine, Runtime};

pub const REGISTERED_HOST: &str = "mysite.example.com";
pub const REGISTERED_TARGET: &str = "127.0.0.1:9999";
pub const RESOLVER_A_TARGET: &str = "http://172.12.0.1/home";

/// Resolver that claims every request except paths under `/ignore`.
pub fn resolver_a() -> ResolverHandle {
    let route = Arc::new(RouteRecord::new(RESOLVER_A_TARGET));
    ResolverHandle::from_fn("resolver-a", move |_host, path| {
        if path.starts_with("/ignore") {
            None
        } else {
            Some(route.clone().into())
        }
    })
}

/// Resolver that always answers with a route owning `/notme`.
pub fn notme_resolver() -> ResolverHandle {
    let route = Arc::new(RouteRecord::new("http://172.12.0.1/home").with_path("/notme"));
    ResolverHandle::from_fn("notme", move |_host, _path| Some(route.clone().into()))
}

/// Engine with `mysite.example.com` registered and no extra resolvers.
pub fn engine_with_registration() -> RouteEngine {
    let engine = RouteEngine::new();
    engine.register(REGISTERED_HOST, REGISTERED_TARGET);
    engine
}

/// Runtime built from an inline TOML document.
pub fn runtime_from(toml: &str, catalog: ResolverCatalog) -> Runtime {
    let config = parse_config(toml).unwrap();
    Runtime::start(&config, catalog).unwrap()
}
