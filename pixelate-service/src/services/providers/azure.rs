//! Azure OpenAI image-edit provider.

use super::{ImageEditProvider, ProviderError, UpstreamReply};
use crate::models::upload::DEFAULT_MIME_TYPE;
use crate::models::UploadedImage;
use crate::services::edit_request::{ImageEditRequest, API_KEY_HEADER, IMAGE_FIELD};
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use secrecy::ExposeSecret;

/// Sends edit requests to an Azure OpenAI deployment over HTTP.
pub struct AzureImageProvider {
    client: Client,
}

impl AzureImageProvider {
    /// Uses the transport's default timeouts.
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProviderError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn image_part(image: &UploadedImage) -> Result<Part, ProviderError> {
    let part = |mime: &str| {
        Part::bytes(image.data.to_vec())
            .file_name(image.file_name_or_default().to_string())
            .mime_str(mime)
    };

    part(&image.mime_type)
        .or_else(|_| {
            tracing::warn!(
                mime_type = %image.mime_type,
                "Upload declared an unparseable MIME type, forwarding as {}",
                DEFAULT_MIME_TYPE
            );
            part(DEFAULT_MIME_TYPE)
        })
        .map_err(|e| ProviderError::InvalidRequest(e.to_string()))
}

fn build_form(request: &ImageEditRequest) -> Result<Form, ProviderError> {
    let form = Form::new().part(IMAGE_FIELD, image_part(&request.image)?);

    Ok(request
        .text_fields()
        .into_iter()
        .fold(form, |form, (name, value)| form.text(name, value.to_string())))
}

#[async_trait]
impl ImageEditProvider for AzureImageProvider {
    async fn edit(&self, request: &ImageEditRequest) -> Result<UpstreamReply, ProviderError> {
        let form = build_form(request)?;

        let mut api_key = HeaderValue::from_str(request.api_key.expose_secret()).map_err(|_| {
            ProviderError::InvalidRequest("API key is not a valid header value".to_string())
        })?;
        api_key.set_sensitive(true);

        tracing::info!(
            url = %request.url,
            model = %request.model,
            image_bytes = request.image.size(),
            "Calling image edit API"
        );

        let response = self
            .client
            .post(&request.url)
            .header(API_KEY_HEADER, api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkError(format!("Failed to read response body: {}", e)))?;

        tracing::debug!(status, body_bytes = body.len(), "Image edit API responded");

        Ok(UpstreamReply { status, body })
    }
}
