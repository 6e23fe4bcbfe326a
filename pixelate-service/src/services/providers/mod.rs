//! Upstream image-edit transports.
//!
//! The gateway builds an [`ImageEditRequest`] and hands it to an
//! [`ImageEditProvider`], which performs exactly one round trip and returns
//! the raw status and body. Classification of that reply happens in
//! [`crate::services::interpreter`].

pub mod azure;
pub mod mock;

use crate::services::ImageEditRequest;
use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Raw upstream answer, not yet interpreted.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for image-edit backends (e.g., Azure OpenAI `images/edits`).
#[async_trait]
pub trait ImageEditProvider: Send + Sync {
    /// Send one edit request. Never retries.
    async fn edit(&self, request: &ImageEditRequest) -> Result<UpstreamReply, ProviderError>;
}
