//! The conversion pipeline: validate, build, call upstream once, interpret.

use crate::config::GatewayConfig;
use crate::error::ConversionError;
use crate::models::{ConversionPrompt, GeneratedImage, UploadedImage};
use crate::services::edit_request::ImageEditRequest;
use crate::services::interpreter::interpret_reply;
use crate::services::providers::ImageEditProvider;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub struct ConversionGateway {
    config: GatewayConfig,
    prompt: ConversionPrompt,
    provider: Arc<dyn ImageEditProvider>,
    upstream_permits: Option<Semaphore>,
}

impl ConversionGateway {
    pub fn new(
        config: GatewayConfig,
        prompt: ConversionPrompt,
        provider: Arc<dyn ImageEditProvider>,
    ) -> Self {
        let upstream_permits = config
            .max_concurrent_requests
            .map(|limit| Semaphore::new(limit.max(1)));

        if !config.is_configured() {
            tracing::warn!(
                "Upstream endpoint or API key not set; conversions will be refused until configured"
            );
        }

        Self {
            config,
            prompt,
            provider,
            upstream_permits,
        }
    }

    /// Fails fast when the upstream endpoint or credential is missing.
    pub fn ensure_configured(&self) -> Result<(), ConversionError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            tracing::error!("Conversion refused: upstream endpoint or API key is not configured");
            Err(ConversionError::Configuration)
        }
    }

    /// Runs one conversion. Each call makes at most one upstream request.
    pub async fn convert(
        &self,
        upload: Option<UploadedImage>,
    ) -> Result<GeneratedImage, ConversionError> {
        self.ensure_configured()?;
        let image = upload.ok_or(ConversionError::MissingFile)?;

        tracing::info!(
            size = image.size(),
            mime_type = %image.mime_type,
            file_name = image.file_name_or_default(),
            "Converting uploaded image"
        );

        let request = ImageEditRequest::build(&self.config, &self.prompt, image)?;

        let _permit = match &self.upstream_permits {
            Some(permits) => Some(permits.acquire().await.map_err(|e| {
                ConversionError::Transport(format!("upstream limiter closed: {}", e))
            })?),
            None => None,
        };

        let reply = self.provider.edit(&request).await.map_err(|e| {
            tracing::error!(url = %request.url, error = %e, "Image edit request failed");
            ConversionError::Transport(e.to_string())
        })?;

        match interpret_reply(&reply) {
            Ok(image) => {
                tracing::info!(url = %request.url, status = reply.status, "Image generated");
                Ok(image)
            }
            Err(err) => {
                tracing::error!(
                    url = %request.url,
                    status = reply.status,
                    body = %String::from_utf8_lossy(&reply.body),
                    error = %err,
                    "Image edit API returned no usable image"
                );
                Err(err)
            }
        }
    }
}
