#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use spendwise_core::utils::time_utils::local_today;
use spendwise_server::{api::app_router, build_state, config::Config};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

pub async fn test_app() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn expense(name: &str, category: &str, amount: f64) -> Value {
    json!({
        "name": name,
        "amount": amount,
        "kind": "EXPENSE",
        "category": category,
        "date": local_today().to_string(),
    })
}

pub fn income(name: &str, category: &str, amount: f64) -> Value {
    json!({
        "name": name,
        "amount": amount,
        "kind": "INCOME",
        "category": category,
        "date": local_today().to_string(),
    })
}
