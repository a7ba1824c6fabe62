//! Admin API.
//!
//! Read-only views of the resolver chain plus route registration, guarded by
//! a Bearer token. Not part of request handling.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::lifecycle::shutdown;
use crate::lifecycle::Runtime;
use self::auth::admin_auth_middleware;
use self::handlers::*;

/// State shared by admin handlers.
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<Runtime>,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(runtime: Arc<Runtime>, api_key: &str) -> Self {
        Self {
            runtime,
            api_key: Arc::from(api_key),
        }
    }
}

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/resolvers", get(get_resolvers))
        .route("/admin/resolve", get(get_resolve))
        .route("/admin/routes", axum::routing::post(post_route))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the admin API until `shutdown_rx` fires.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "Admin API listening");

    axum::serve(listener, setup_admin_router(state))
        .with_graceful_shutdown(shutdown::recv(shutdown_rx))
        .await?;

    tracing::info!("Admin API stopped");
    Ok(())
}
