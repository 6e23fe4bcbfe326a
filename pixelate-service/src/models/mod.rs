//! Request-scoped values flowing through the conversion pipeline.

pub mod conversion;
pub mod prompt;
pub mod upload;

pub use conversion::{ConversionResult, GeneratedImage};
pub use prompt::{ConversionPrompt, PromptPreset};
pub use upload::UploadedImage;
