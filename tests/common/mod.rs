#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    response::Response,
};
use serde_json::Value;
use tower::ServiceExt;

use todo_api::{
    app::build_app,
    config::{AppConfig, DatabaseConfig},
    db::connection,
    state::AppState,
};

/// Fresh, isolated in-memory store per call.
pub async fn app_state() -> Arc<AppState> {
    let cfg = AppConfig {
        database: DatabaseConfig::in_memory(),
        ..Default::default()
    };
    let db = connection::connect(&cfg.database)
        .await
        .expect("connect to in-memory sqlite");
    AppState::new(cfg, db)
}

pub async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response {
    build_app(state.clone()).oneshot(request).await.unwrap()
}

pub async fn json_response(state: &Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
    let response = send(state, request).await;
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    raw_json_request(method, uri, &body.to_string())
}

pub fn raw_json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn create_todo(state: &Arc<AppState>, body: Value) -> (StatusCode, Value) {
    json_response(state, json_request("POST", "/api/todos", body)).await
}

pub async fn list_todos(state: &Arc<AppState>) -> Vec<Value> {
    let (status, json) = json_response(state, empty_request("GET", "/api/todos")).await;
    assert_eq!(status, StatusCode::OK);
    json.as_array().expect("list should be an array").clone()
}

pub fn created_id(json: &Value) -> i64 {
    json["id"].as_i64().expect("create should return an integer id")
}
