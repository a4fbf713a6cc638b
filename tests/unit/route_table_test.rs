//! Unit tests for the route table

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use hookrest_gateway::{
    config::Settings,
    loader::{LoadReport, MountError, RouteTable},
    provider::RouteSpec,
    AppState,
};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceExt;

async fn one() -> &'static str {
    "one"
}

async fn two() -> &'static str {
    "two"
}

fn state() -> Arc<AppState> {
    Arc::new(AppState {
        settings: Settings::default(),
        load_report: LoadReport::default(),
        endpoints: Vec::new(),
        started_at: Instant::now(),
    })
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn test_first_registration_wins() {
    let mut table = RouteTable::new();
    table.mount("a.toml", vec![RouteSpec::get("/x", one)]).unwrap();

    let err = table
        .mount("b.toml", vec![RouteSpec::get("/x", two)])
        .unwrap_err();

    assert!(matches!(err, MountError::Duplicate { ref owner, .. } if owner == "a.toml"));
    assert_eq!(table.endpoints().len(), 1);
    assert_eq!(table.endpoints()[0].module, "a.toml");
}

#[test]
fn test_param_name_conflict_rejected() {
    let mut table = RouteTable::new();
    table
        .mount("a.toml", vec![RouteSpec::get("/users/:id", one)])
        .unwrap();

    let err = table
        .mount("b.toml", vec![RouteSpec::post("/users/:name", two)])
        .unwrap_err();

    assert!(matches!(err, MountError::Conflict { ref existing, .. } if existing == "/users/:id"));
}

#[test]
fn test_invalid_path_rejected() {
    let mut table = RouteTable::new();
    let err = table
        .mount("a.toml", vec![RouteSpec::get("no-slash", one)])
        .unwrap_err();

    assert!(matches!(err, MountError::InvalidPath { .. }));
    assert!(table.is_empty());
}

#[test]
fn test_gateway_routes_not_counted() {
    let mut table = RouteTable::new();
    table
        .reserve(Method::GET, "/health", axum::routing::get(one))
        .unwrap();
    table.mount("a.toml", vec![RouteSpec::get("/a", one)]).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.endpoints().len(), 2);
    assert!(table.contains(&Method::GET, "/health"));
}

#[tokio::test]
async fn test_router_serves_methods_from_different_modules() {
    let mut table = RouteTable::new();
    table.mount("a.toml", vec![RouteSpec::get("/x", one)]).unwrap();
    table.mount("b.toml", vec![RouteSpec::post("/x", two)]).unwrap();

    let app = table.into_router().with_state(state());

    let response = app
        .clone()
        .oneshot(Request::get("/x").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "one");

    let response = app
        .clone()
        .oneshot(Request::post("/x").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "two");

    let response = app
        .oneshot(Request::delete("/x").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_static_segment_beside_param() {
    let mut table = RouteTable::new();
    table
        .mount("a.toml", vec![RouteSpec::get("/items/:id", one)])
        .unwrap();
    table
        .mount("b.toml", vec![RouteSpec::get("/items/latest", two)])
        .unwrap();

    let app = table.into_router().with_state(state());

    let response = app
        .clone()
        .oneshot(Request::get("/items/latest").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "two");

    let response = app
        .oneshot(Request::get("/items/7").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "one");
}
