//! Free-form chat proxied to the agent session

use super::create_error_response;
use crate::types::*;
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info};
use xoc_core::summarize_chat_reply;

/// Forward one message to the agent and return its summarized reply.
///
/// Waits for the session if a demo run currently holds it.
pub async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let message = request
        .message
        .filter(|message| !message.trim().is_empty())
        .ok_or_else(|| {
            create_error_response(
                StatusCode::BAD_REQUEST,
                "Message is required",
                "Please enter a message.",
            )
        })?;

    let session = state.session.as_ref().ok_or_else(|| {
        create_error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Agent not initialized",
            "The AI agent is not ready. Please check your environment variables and restart the server.",
        )
    })?;

    info!("[Chat] Dispatching message: \"{}\"", message);
    let mut session = session.lock().await;
    match session.dispatch(&message).await {
        Ok(reply) => Ok(Json(ChatResponse {
            response: summarize_chat_reply(&reply),
        })),
        Err(e) => {
            error!("[Chat] ❌ Error processing message: {}", e);
            Err(create_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "Sorry, there was an error processing your message. Please check the server logs for details.",
            ))
        }
    }
}
