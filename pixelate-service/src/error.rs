use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use service_core::error::error_response;
use thiserror::Error;

pub const MSG_MISCONFIGURED: &str = "service misconfigured";
pub const MSG_FILE_REQUIRED: &str = "image file required";
pub const MSG_INVALID_UPLOAD: &str = "invalid upload";
pub const MSG_GENERATION_FAILED: &str = "generation failed, try again later";

/// Every way a conversion request can fail.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("upstream endpoint or credential is not configured")]
    Configuration,

    #[error("no image file in request")]
    MissingFile,

    #[error("upload exceeds limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("malformed upload: {0}")]
    InvalidUpload(String),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {status}")]
    Upstream { status: u16, message: Option<String> },

    /// Upstream answered successfully but produced no usable image.
    #[error("upstream returned no usable image")]
    EmptyResult,

    /// The round trip itself failed.
    #[error("upstream round trip failed: {0}")]
    Transport(String),
}

impl ConversionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConversionError::Configuration | ConversionError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ConversionError::MissingFile | ConversionError::InvalidUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            ConversionError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ConversionError::Upstream { .. } | ConversionError::EmptyResult => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Message shown to the caller. Only an upstream-provided message is passed through.
    pub fn public_message(&self) -> String {
        match self {
            ConversionError::Configuration => MSG_MISCONFIGURED.to_string(),
            ConversionError::MissingFile => MSG_FILE_REQUIRED.to_string(),
            ConversionError::PayloadTooLarge { limit } => {
                format!("image exceeds upload limit of {} bytes", limit)
            }
            ConversionError::InvalidUpload(_) => MSG_INVALID_UPLOAD.to_string(),
            ConversionError::Upstream {
                message: Some(message),
                ..
            } => message.clone(),
            ConversionError::Upstream { message: None, .. }
            | ConversionError::EmptyResult
            | ConversionError::Transport(_) => MSG_GENERATION_FAILED.to_string(),
        }
    }
}

impl IntoResponse for ConversionError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), &self.public_message())
    }
}
