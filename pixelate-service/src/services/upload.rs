//! Upload receiver: pulls the image file out of a multipart body and
//! enforces the upload size limit before the gateway sees it.

use crate::config::UploadConfig;
use crate::error::ConversionError;
use crate::models::UploadedImage;
use async_trait::async_trait;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use thiserror::Error;

/// Allowance for multipart boundaries and part headers on top of the file limit.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum UploadRejection {
    #[error("upload exceeds limit of {limit} bytes")]
    TooLarge { limit: usize },

    #[error("malformed multipart body: {0}")]
    Malformed(String),
}

impl From<UploadRejection> for ConversionError {
    fn from(rejection: UploadRejection) -> Self {
        match rejection {
            UploadRejection::TooLarge { limit } => ConversionError::PayloadTooLarge { limit },
            UploadRejection::Malformed(reason) => ConversionError::InvalidUpload(reason),
        }
    }
}

#[async_trait]
pub trait UploadReceiver: Send + Sync {
    /// Largest accepted file, in bytes.
    fn max_bytes(&self) -> usize;

    /// Whole-body limit for the route, so oversized requests stop streaming early.
    fn body_limit(&self) -> usize {
        self.max_bytes().saturating_add(MULTIPART_OVERHEAD_BYTES)
    }

    /// Returns `Ok(None)` when the body has no image file part.
    async fn receive(&self, multipart: Multipart) -> Result<Option<UploadedImage>, UploadRejection>;
}

/// Reads a single named file field, buffering it in memory.
pub struct MultipartUploadReceiver {
    field_name: String,
    max_bytes: usize,
}

impl MultipartUploadReceiver {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            field_name: config.field_name.clone(),
            max_bytes: config.max_bytes,
        }
    }

    fn classify(&self, err: MultipartError) -> UploadRejection {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadRejection::TooLarge {
                limit: self.max_bytes,
            }
        } else {
            UploadRejection::Malformed(err.body_text())
        }
    }
}

#[async_trait]
impl UploadReceiver for MultipartUploadReceiver {
    fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    async fn receive(
        &self,
        mut multipart: Multipart,
    ) -> Result<Option<UploadedImage>, UploadRejection> {
        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| self.classify(e))?
        {
            if field.name() != Some(self.field_name.as_str()) {
                continue;
            }

            // Only file parts count. A part with `filename=""` is still a file.
            let Some(file_name) = field.file_name().map(str::to_string) else {
                tracing::debug!(field = %self.field_name, "Ignoring non-file part");
                continue;
            };
            let content_type = field.content_type().map(str::to_string);

            let mut data = Vec::new();
            while let Some(chunk) = field.chunk().await.map_err(|e| self.classify(e))? {
                if data.len() + chunk.len() > self.max_bytes {
                    return Err(UploadRejection::TooLarge {
                        limit: self.max_bytes,
                    });
                }
                data.extend_from_slice(&chunk);
            }

            return Ok(Some(UploadedImage::new(
                data,
                content_type.as_deref(),
                Some(file_name.as_str()),
            )));
        }

        Ok(None)
    }
}
