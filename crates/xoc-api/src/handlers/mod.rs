//! HTTP handlers

pub mod chat;
pub mod demo;
pub mod health;

pub use chat::chat;
pub use demo::start_demo;
pub use health::{create_error_response, health_check};
