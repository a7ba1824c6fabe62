//! Metrics collection and exposition.
//!
//! # Metrics
//! - `revio_resolutions_total` (counter): resolutions by outcome (`matched`, `no_match`)
//! - `revio_resolver_failures_total` (counter): resolver errors and panics by resolver
//! - `revio_route_cache_size` (gauge): memoized URL routes
//! - `revio_resolvers` (gauge): resolvers in the registry

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_resolution(outcome: &'static str) {
    metrics::counter!("revio_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_resolver_failure(resolver: &str) {
    metrics::counter!("revio_resolver_failures_total", "resolver" => resolver.to_string())
        .increment(1);
}

pub fn record_cache_size(size: usize) {
    metrics::gauge!("revio_route_cache_size").set(size as f64);
}

pub fn record_resolver_count(count: usize) {
    metrics::gauge!("revio_resolvers").set(count as f64);
}
