use axum::body::Bytes;
use std::fmt;

/// Filename forwarded upstream when the client part carries none.
pub const DEFAULT_FILE_NAME: &str = "upload.png";

/// MIME type assumed when the client part carries none.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// An image file received from the caller, forwarded upstream untouched.
#[derive(Clone)]
pub struct UploadedImage {
    pub data: Bytes,
    pub mime_type: String,
    pub file_name: Option<String>,
}

impl UploadedImage {
    pub fn new(data: impl Into<Bytes>, mime_type: Option<&str>, file_name: Option<&str>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MIME_TYPE)
                .to_string(),
            file_name: file_name.filter(|n| !n.is_empty()).map(str::to_string),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn file_name_or_default(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }
}

// Keeps payload bytes out of logs.
impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("size", &self.size())
            .field("mime_type", &self.mime_type)
            .field("file_name", &self.file_name)
            .finish()
    }
}
