use serde::Serialize;

/// MIME type declared on every returned data URI.
pub const GENERATED_MIME_TYPE: &str = "image/png";

/// Base64 image payload returned by the upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    b64: String,
}

impl GeneratedImage {
    pub fn new(b64: impl Into<String>) -> Self {
        Self { b64: b64.into() }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", GENERATED_MIME_TYPE, self.b64)
    }
}

/// Caller-facing success body. Failures render as `{ "error": ... }`
/// through `service_core::error::error_response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub image: String,
}

impl From<GeneratedImage> for ConversionResult {
    fn from(image: GeneratedImage) -> Self {
        ConversionResult {
            image: image.data_uri(),
        }
    }
}
