// Request/response models exposed through the OpenAPI layer
pub mod auth;
pub mod common;
pub mod complaints;
