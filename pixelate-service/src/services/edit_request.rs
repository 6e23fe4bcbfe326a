use crate::config::GatewayConfig;
use crate::error::ConversionError;
use crate::models::{ConversionPrompt, UploadedImage};
use secrecy::Secret;

/// Multipart field carrying the image bytes.
pub const IMAGE_FIELD: &str = "image[]";

pub const OUTPUT_SIZE: &str = "1024x1024";
pub const IMAGE_COUNT: &str = "1";
pub const OUTPUT_QUALITY: &str = "high";

/// Header carrying the raw API credential.
pub const API_KEY_HEADER: &str = "api-key";

/// `{endpoint}/openai/deployments/{deployment}/images/edits?api-version={version}`
pub fn edits_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    format!(
        "{}/openai/deployments/{}/images/edits?api-version={}",
        endpoint.trim_end_matches('/'),
        deployment,
        api_version
    )
}

/// Everything needed for a single upstream edit call.
#[derive(Debug, Clone)]
pub struct ImageEditRequest {
    pub url: String,
    pub api_key: Secret<String>,
    pub image: UploadedImage,
    pub prompt: String,
    pub model: String,
}

impl ImageEditRequest {
    pub fn build(
        config: &GatewayConfig,
        prompt: &ConversionPrompt,
        image: UploadedImage,
    ) -> Result<Self, ConversionError> {
        let (endpoint, api_key) = config.target().ok_or(ConversionError::Configuration)?;

        Ok(Self {
            url: edits_url(endpoint, &config.deployment, &config.api_version),
            api_key: api_key.clone(),
            image,
            prompt: prompt.as_str().to_string(),
            model: config.deployment.clone(),
        })
    }

    /// Text fields in wire order. The image part precedes them.
    pub fn text_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("prompt", self.prompt.as_str()),
            ("model", self.model.as_str()),
            ("size", OUTPUT_SIZE),
            ("n", IMAGE_COUNT),
            ("quality", OUTPUT_QUALITY),
        ]
    }
}
