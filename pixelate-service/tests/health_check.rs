mod common;

use axum::http::StatusCode;
use common::{test_config, TestApp};

#[tokio::test]
async fn health_check_returns_ok_true() {
    let app = TestApp::spawn(test_config(None)).await;

    let response = app
        .client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::spawn(test_config(None)).await;

    let response = app
        .client
        .get(format!("{}/api/health", app.address))
        .header("x-request-id", "health-probe-1")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.headers()["x-request-id"], "health-probe-1");
}

#[tokio::test]
async fn index_page_is_served_from_static_dir() {
    let app = TestApp::spawn(test_config(None)).await;

    let response = app
        .client
        .get(format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("/api/pixelate"));
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let app = TestApp::spawn(test_config(None)).await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, format!("{}/api/pixelate", app.address))
        .header("origin", "https://example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
