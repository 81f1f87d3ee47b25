//! Shared API state and request/response bodies

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use xoc_core::constants::SERVER_STEP_DELAY;
use xoc_core::{AgentSession, DemoOptions};

/// API state shared by every handler
#[derive(Clone)]
pub struct ApiState {
    /// The single agent session, `None` when the agent failed to initialize
    pub session: Option<Arc<Mutex<AgentSession>>>,
    pub demo_options: DemoOptions,
    pub cors_origin: String,
}

impl ApiState {
    pub fn new(session: Option<AgentSession>) -> Self {
        Self {
            session: session.map(|session| Arc::new(Mutex::new(session))),
            demo_options: DemoOptions::default().with_step_delay(SERVER_STEP_DELAY),
            cors_origin: "http://localhost:3000".to_string(),
        }
    }

    pub fn with_demo_options(mut self, demo_options: DemoOptions) -> Self {
        self.demo_options = demo_options;
        self
    }

    pub fn with_cors_origin(mut self, cors_origin: impl Into<String>) -> Self {
        self.cors_origin = cors_origin.into();
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Error body: a short machine-facing error and a line for the end user
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "userMessage")]
    pub user_message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}
