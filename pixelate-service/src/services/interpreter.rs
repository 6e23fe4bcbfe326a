//! Classification of raw upstream replies.

use crate::error::ConversionError;
use crate::models::GeneratedImage;
use crate::services::providers::UpstreamReply;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ImageEditResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    b64_json: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Turns an upstream reply into an image or a classified failure.
///
/// The body must be JSON whatever the status; anything else counts as a
/// failed round trip. A body that parses but does not have the expected
/// shape counts as an empty result.
pub fn interpret_reply(reply: &UpstreamReply) -> Result<GeneratedImage, ConversionError> {
    let value: serde_json::Value = serde_json::from_slice(&reply.body).map_err(|e| {
        ConversionError::Transport(format!(
            "malformed upstream JSON (status {}): {}",
            reply.status, e
        ))
    })?;

    if !reply.is_success() {
        let message = serde_json::from_value::<ErrorEnvelope>(value)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .filter(|m| !m.trim().is_empty());

        return Err(ConversionError::Upstream {
            status: reply.status,
            message,
        });
    }

    let response: ImageEditResponse = serde_json::from_value(value).unwrap_or_default();

    match response.data.into_iter().next() {
        Some(ImageData {
            b64_json: Some(b64),
        }) if !b64.is_empty() => Ok(GeneratedImage::new(b64)),
        _ => Err(ConversionError::EmptyResult),
    }
}
