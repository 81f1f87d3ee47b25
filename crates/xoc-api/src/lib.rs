//! # xoc-api
//!
//! Thin HTTP surface over the demo engine: a chat proxy to the agent and a
//! server-sent-event stream that narrates a full demo run.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

pub mod handlers;
pub mod types;

pub use types::*;

use handlers::{chat, health_check, start_demo};

/// Create the API router with all endpoints
pub fn create_router(state: ApiState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/health", get(health_check))
        .route("/chat", post(chat))
        .route("/start-demo", get(start_demo))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!("⚠️ Invalid CORS_ORIGIN {:?}, cross-origin requests disabled: {}", origin, e);
            cors
        }
    }
}
