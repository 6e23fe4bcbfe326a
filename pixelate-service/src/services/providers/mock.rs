//! Recording provider double for tests.

use super::{ImageEditProvider, ProviderError, UpstreamReply};
use crate::services::ImageEditRequest;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Replays one scripted outcome for every call and records each request.
pub struct MockImageProvider {
    outcome: Result<UpstreamReply, String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<ImageEditRequest>>,
}

impl MockImageProvider {
    pub fn replying(status: u16, body: serde_json::Value) -> Self {
        Self {
            outcome: Ok(UpstreamReply::new(status, body.to_string())),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails as if the connection dropped.
    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Hold each call open for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.recorded().len()
    }

    pub fn recorded(&self) -> Vec<ImageEditRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ImageEditProvider for MockImageProvider {
    async fn edit(&self, request: &ImageEditRequest) -> Result<UpstreamReply, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.outcome
            .clone()
            .map_err(ProviderError::NetworkError)
    }
}
