use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::admin::AppState;
use crate::config::RouteTarget;
use crate::routing::{cache, RouteSpec, UrlTarget};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub resolvers: usize,
    pub routes: usize,
    pub cached_routes: usize,
}

#[derive(Serialize)]
pub struct ResolverStatus {
    pub id: u64,
    pub name: String,
    pub priority: i32,
}

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub host: String,
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/".to_string()
}

#[derive(Serialize)]
struct ResolveResponse<'a> {
    route: &'a RouteSpec,
    selected: Option<&'a UrlTarget>,
}

#[derive(Deserialize)]
pub struct RegisterRoute {
    pub host: String,
    pub target: RouteTarget,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let engine = state.runtime.engine();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        resolvers: engine.resolvers().len(),
        routes: engine.routing_table().len(),
        cached_routes: cache::cached_routes(),
    })
}

pub async fn get_resolvers(State(state): State<AppState>) -> Json<Vec<ResolverStatus>> {
    let statuses = state
        .runtime
        .engine()
        .resolvers()
        .iter()
        .map(|entry| ResolverStatus {
            id: entry.handle.id().as_u64(),
            name: entry.handle.name().to_string(),
            priority: entry.priority,
        })
        .collect();

    Json(statuses)
}

pub async fn get_resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Response {
    let Some(route) = state.runtime.engine().resolve(&query.host, &query.path) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "no route", "host": query.host, "path": query.path })),
        )
            .into_response();
    };

    let selector = state.runtime.selector();
    Json(ResolveResponse {
        route: &route,
        selected: selector.select(&route),
    })
    .into_response()
}

pub async fn post_route(
    State(state): State<AppState>,
    Json(body): Json<RegisterRoute>,
) -> Response {
    if body.host.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "host must not be empty" })),
        )
            .into_response();
    }

    state
        .runtime
        .engine()
        .register(body.host, body.target.to_input());
    StatusCode::NO_CONTENT.into_response()
}
