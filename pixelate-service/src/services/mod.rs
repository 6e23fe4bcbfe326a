pub mod edit_request;
pub mod gateway;
pub mod interpreter;
pub mod providers;
pub mod upload;

pub use edit_request::ImageEditRequest;
pub use gateway::ConversionGateway;
pub use interpreter::interpret_reply;
pub use upload::{MultipartUploadReceiver, UploadReceiver, UploadRejection};
