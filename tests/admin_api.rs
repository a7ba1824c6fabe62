//! Admin API tests, driven through the router without a socket.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use revio::admin::{setup_admin_router, AppState};
use revio::routing::ResolverCatalog;

mod common;

const API_KEY: &str = "test-key";

fn router() -> Router {
    let runtime = common::runtime_from(
        r#"
        [balancing]
        strategy = "round_robin"

        [[routes]]
        host = "mysite.example.com"
        target = "127.0.0.1:9999"

        [[routes]]
        host = "api.example.com"
        target = { path = "/v1", url = ["http://10.0.0.1:8080", "http://10.0.0.2:8080"] }
        "#,
        ResolverCatalog::new(),
    );
    setup_admin_router(AppState::new(Arc::new(runtime), API_KEY))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let app = router();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/admin/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/status")
                .header(header::AUTHORIZATION, "Bearer wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_reports_engine_state() {
    let response = router().oneshot(get("/admin/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "operational");
    assert_eq!(body["resolvers"], 1);
    assert_eq!(body["routes"], 2);
}

#[tokio::test]
async fn test_resolvers_lists_default() {
    let response = router().oneshot(get("/admin/resolvers")).await.unwrap();
    let body = json_body(response).await;

    let resolvers = body.as_array().unwrap();
    assert_eq!(resolvers.len(), 1);
    assert_eq!(resolvers[0]["name"], "routing");
    assert_eq!(resolvers[0]["priority"], 0);
}

#[tokio::test]
async fn test_resolve_returns_route_and_selection() {
    let app = router();

    let response = app
        .clone()
        .oneshot(get("/admin/resolve?host=api.example.com&path=/v1/users"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["route"]["path"], "/v1");
    assert_eq!(body["route"]["urls"].as_array().unwrap().len(), 2);
    let first = body["selected"]["href"].clone();

    // Round robin moves to the other target on the next request.
    let response = app
        .oneshot(get("/admin/resolve?host=api.example.com&path=/v1"))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_ne!(body["selected"]["href"], first);
}

#[tokio::test]
async fn test_resolve_without_route_is_404() {
    let response = router()
        .oneshot(get("/admin/resolve?host=unknown.example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["error"], "no route");
    assert_eq!(body["host"], "unknown.example.com");
    assert_eq!(body["path"], "/");
}

#[tokio::test]
async fn test_post_route_registers_host() {
    let app = router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/admin/routes")
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"host":"new.example.com","target":"http://10.9.9.9:7000"}"#,
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get("/admin/resolve?host=new.example.com&path=/x"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["selected"]["hostname"], "10.9.9.9");
    assert_eq!(body["selected"]["port"], 7000);
}

#[tokio::test]
async fn test_post_route_rejects_empty_host() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/admin/routes")
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"host":"  ","target":"http://10.9.9.9"}"#))
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
