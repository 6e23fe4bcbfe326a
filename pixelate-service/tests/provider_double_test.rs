//! Drives the HTTP surface against the recording provider double, so call
//! counts are asserted on the collaborator itself.

mod common;

use axum::http::StatusCode;
use common::{image_form, test_config, TestApp, TEST_PROMPT};
use pixelate_service::services::providers::mock::MockImageProvider;
use serde_json::{json, Value};
use std::sync::Arc;

fn png_form() -> reqwest::multipart::Form {
    image_form(b"\x89PNG-bytes".to_vec(), "sprite.png", "image/png")
}

#[tokio::test]
async fn misconfigured_gateway_never_reaches_provider() {
    let provider = Arc::new(MockImageProvider::replying(
        200,
        json!({ "data": [{ "b64_json": "QUJD" }] }),
    ));
    let app = TestApp::spawn_with_provider(test_config(None), provider.clone()).await;

    let response = app.post_pixelate(png_form()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn identical_uploads_each_reach_provider() {
    let provider = Arc::new(MockImageProvider::replying(
        200,
        json!({ "data": [{ "b64_json": "QUJD" }] }),
    ));
    let app = TestApp::spawn_with_provider(
        test_config(Some("https://contoso.openai.azure.com")),
        provider.clone(),
    )
    .await;

    for _ in 0..2 {
        let response = app.post_pixelate(png_form()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["image"], "data:image/png;base64,QUJD");
    }

    assert_eq!(provider.call_count(), 2);

    let recorded = provider.recorded();
    assert_eq!(recorded[0].prompt, TEST_PROMPT);
    assert_eq!(recorded[0].image.file_name.as_deref(), Some("sprite.png"));
    assert_eq!(
        recorded[0].url,
        "https://contoso.openai.azure.com/openai/deployments/gpt-image-1/images/edits?api-version=2025-04-01-preview"
    );
}

#[tokio::test]
async fn connection_reset_is_reported_as_retry_later() {
    let provider = Arc::new(MockImageProvider::failing("connection reset by peer"));
    let app = TestApp::spawn_with_provider(
        test_config(Some("https://contoso.openai.azure.com")),
        provider.clone(),
    )
    .await;

    let response = app.post_pixelate(png_form()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "generation failed, try again later" }));
    assert_eq!(provider.call_count(), 1);
}
