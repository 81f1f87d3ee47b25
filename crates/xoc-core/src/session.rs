use crate::env;
use anyhow::{Context, Result};
use tracing::info;
use xoc_agent::{AgentSession, RemoteAgent, ScriptedAgent, SessionConfig};

/// Build an agent session from the environment.
///
/// `AGENT_MOCK` selects the offline scripted agent; otherwise the session
/// talks to the agent service at `AGENT_API_URL`. Every call starts a new
/// conversation thread.
pub fn session_from_env() -> Result<AgentSession> {
    let config = SessionConfig::fresh();

    if env::agent::use_mock() {
        info!("[Session] Using scripted agent (thread {})", config.thread_id);
        return Ok(AgentSession::new(ScriptedAgent::new(), config));
    }

    let agent = RemoteAgent::new(
        env::agent::api_url(),
        env::agent::api_key(),
        env::agent::timeout(),
    )
    .context("Failed to create agent client")?;
    info!(
        "[Session] Using agent at {} (thread {})",
        agent.api_url(),
        config.thread_id
    );
    Ok(AgentSession::new(agent, config))
}
