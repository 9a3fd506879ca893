//! HTTP endpoint tests, driven through the router without binding a socket.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::sample_file;
use http_body_util::BodyExt;
use ncinfo::server::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn test_app(variable: &str) -> (TempDir, Router) {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = sample_file(temp_dir.path());
    let state = AppState::load(
        path,
        variable.to_string(),
        vec!["time".to_string(), "z".to_string()],
    )
    .expect("Failed to load state");
    (temp_dir, router(Arc::new(state)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).expect("JSON body");
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = test_app("concentration");
    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_get_info() {
    let (_dir, app) = test_app("concentration");
    let (status, body) = get(app, "/get-info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_model"], json!("NETCDF4"));
    assert_eq!(body["dimensions"]["record"], json!("<unlimited>"));
    assert_eq!(
        body["variables"]["concentration"]["dimensions"],
        json!(["time", "z", "y", "x"])
    );
}

#[tokio::test]
async fn test_get_data() {
    let (_dir, app) = test_app("concentration");
    let (status, body) = get(app, "/get-data?time_index=1&z_index=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dimensions"], json!(["y", "x"]));
    assert_eq!(body["values"], json!([[1200.0, 1201.0], [1210.0, 1211.0]]));
}

#[tokio::test]
async fn test_get_data_rejects_bad_arguments() {
    let (_dir, app) = test_app("concentration");

    let (status, body) = get(app.clone(), "/get-data?time_index=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing required argument z_index"));

    let (status, body) = get(app.clone(), "/get-data?time_index=-1&z_index=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("Invalid argument time_index: Negative values not allowed")
    );

    let (status, body) = get(app.clone(), "/get-data?time_index=one&z_index=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid argument time_index"));

    let (status, body) = get(app, "/get-data?time_index=0&z_index=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("out of range"));
}

#[tokio::test]
async fn test_get_data_unknown_variable() {
    let (_dir, app) = test_app("pressure");
    let (status, body) = get(app, "/get-data?time_index=0&z_index=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Variable 'pressure' not found in file"));
}
