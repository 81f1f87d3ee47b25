//! Demo runs streamed to the browser as server-sent events

use super::create_error_response;
use crate::types::*;
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use tokio::sync::{mpsc, OwnedMutexGuard};
use tracing::{debug, error, info, warn};
use xoc_core::constants::{COMPLETION_SENTINEL, START_MESSAGE};
use xoc_core::{
    AgentSession, ChannelNarrator, DemoOptions, DemoOrchestrator, DemoOutcome, NarrationEvent,
    Narrator,
};

const DEMO_CHANNEL_CAPACITY: usize = 32;

/// Start a demo run and stream its narration.
///
/// Frames are `data: {"message": …, "isUser": …}`. The stream ends after the
/// `Demo completed!` sentinel. Only one run may hold the session at a time.
pub async fn start_demo(State(state): State<ApiState>) -> Response {
    let Some(session) = state.session.clone() else {
        return create_error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Agent not initialized",
            "The AI agent is not ready.",
        )
        .into_response();
    };

    let session = match session.try_lock_owned() {
        Ok(session) => session,
        Err(_) => {
            warn!("[StartDemo] ⚠️ Rejected: a demo is already running");
            return create_error_response(
                StatusCode::CONFLICT,
                "Demo already running",
                "A demo is already in progress. Please wait for it to finish.",
            )
            .into_response();
        }
    };

    let (tx, mut rx) = mpsc::channel::<NarrationEvent>(DEMO_CHANNEL_CAPACITY);
    tokio::spawn(run_demo(session, tx, state.demo_options.clone()));

    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            let last = event.is_completion_sentinel();
            yield Event::default().json_data(&event);
            if last {
                break;
            }
        }
    };

    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// Drive one run over the locked session, framed by the start message and
/// the completion sentinel.
async fn run_demo(
    mut session: OwnedMutexGuard<AgentSession>,
    tx: mpsc::Sender<NarrationEvent>,
    options: DemoOptions,
) {
    let narrator = ChannelNarrator::new(tx);
    if narrator.notify(START_MESSAGE, false).await.is_err() {
        info!("[StartDemo] Subscriber left before the demo started");
        return;
    }

    let outcome = DemoOrchestrator::new(&mut session, options)
        .run(&narrator)
        .await;
    match &outcome {
        DemoOutcome::Completed { commands_issued } => {
            info!("[StartDemo] ✅ Demo run finished: {} commands", commands_issued)
        }
        DemoOutcome::Aborted { balance_wei } => {
            warn!("[StartDemo] ⚠️ Demo aborted, balance {} wei", balance_wei)
        }
        DemoOutcome::Failed { error, .. } if error.is_observer_gone() => {
            info!("[StartDemo] Subscriber disconnected, demo stopped")
        }
        DemoOutcome::Failed { error, commands_issued } => error!(
            "[StartDemo] ❌ Demo failed after {} commands: {}",
            commands_issued, error
        ),
    }

    if let Err(e) = narrator.notify(COMPLETION_SENTINEL, false).await {
        debug!("[StartDemo] Completion sentinel not delivered: {}", e);
    }
}
