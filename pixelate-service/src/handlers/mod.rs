//! HTTP handlers for the pixelate service.

pub mod health;
pub mod pixelate;

pub use health::health_check;
pub use pixelate::pixelate;
