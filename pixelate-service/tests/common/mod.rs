//! Test helper module for pixelate-service integration tests.
//!
//! Spawns the real application on a random port. The upstream is either a
//! `wiremock` server or an address with nothing listening.

#![allow(dead_code)]

use pixelate_service::config::{GatewayConfig, PixelateConfig, UploadConfig};
use pixelate_service::models::ConversionPrompt;
use pixelate_service::services::providers::ImageEditProvider;
use pixelate_service::startup::Application;
use reqwest::multipart::{Form, Part};
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_PROMPT: &str = "turn this into pixel art";
pub const EDITS_PATH: &str = "/openai/deployments/gpt-image-1/images/edits";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(config: PixelateConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        Self::launch(app).await
    }

    /// Spawn with an in-process upstream double instead of a real HTTP client.
    pub async fn spawn_with_provider(
        config: PixelateConfig,
        provider: Arc<dyn ImageEditProvider>,
    ) -> Self {
        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");
        Self::launch(app).await
    }

    async fn launch(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_pixelate(&self, form: Form) -> reqwest::Response {
        self.client
            .post(format!("{}/api/pixelate", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Config pointing at `endpoint` with a test credential, on a random port.
pub fn test_config(endpoint: Option<&str>) -> PixelateConfig {
    PixelateConfig {
        common: CoreConfig { port: 0 },
        gateway: GatewayConfig::new(endpoint, Some(TEST_API_KEY)),
        prompt: ConversionPrompt::custom(TEST_PROMPT),
        upload: UploadConfig::default(),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
    }
}

pub fn image_form(data: Vec<u8>, file_name: &str, mime: &str) -> Form {
    Form::new().part(
        "image",
        Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .unwrap(),
    )
}

/// An endpoint where nothing accepts connections.
pub fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
