//! # xoc-agent
//!
//! Boundary to the tool-using chat agent that executes demo commands on-chain.
//!
//! The agent is a black box: it accepts one natural-language message and
//! answers with a stream of chunks, each tagged as coming from the model
//! (`agent`) or from a tool invocation (`tools`). [`AgentSession`] pairs an
//! agent with its conversation config and folds a streamed answer into the
//! full reply text.

pub mod error;
pub mod remote;
pub mod scripted;

pub use error::AgentError;
pub use remote::{decode_chunk_line, RemoteAgent};
pub use scripted::{CommandLog, ScriptedAgent};

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use tracing::{debug, instrument};

/// Stream of reply chunks produced for a single message.
pub type ReplyStream = BoxStream<'static, Result<AgentChunk, AgentError>>;

/// One fragment of a streamed agent reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentChunk {
    /// Text produced by the model itself.
    Agent(String),
    /// Output returned by a tool the model invoked.
    Tools(String),
}

impl AgentChunk {
    pub fn text(&self) -> &str {
        match self {
            AgentChunk::Agent(text) | AgentChunk::Tools(text) => text,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            AgentChunk::Agent(_) => "agent",
            AgentChunk::Tools(_) => "tools",
        }
    }
}

/// Conversation settings sent with every message of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Conversation thread the agent keeps its memory under.
    pub thread_id: String,
}

impl SessionConfig {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
        }
    }

    /// Config with a freshly generated thread id.
    pub fn fresh() -> Self {
        Self::new(format!("xoc-demo-{}", uuid::Uuid::new_v4()))
    }
}

/// A conversational agent that answers messages with streamed chunks.
#[async_trait]
pub trait Agent: Send {
    /// Send `message` to the agent and return its reply as a chunk stream.
    async fn stream(
        &mut self,
        message: &str,
        config: &SessionConfig,
    ) -> Result<ReplyStream, AgentError>;
}

/// An agent bound to one conversation.
///
/// A session is a single-owner resource: every operation takes `&mut self`,
/// so two demo runs can never interleave messages on the same thread.
pub struct AgentSession {
    agent: Box<dyn Agent>,
    config: SessionConfig,
}

impl AgentSession {
    pub fn new(agent: impl Agent + 'static, config: SessionConfig) -> Self {
        Self {
            agent: Box::new(agent),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Send `message` and accumulate every chunk, in arrival order, into the
    /// full reply.
    #[instrument(skip(self), fields(thread_id = %self.config.thread_id))]
    pub async fn dispatch(&mut self, message: &str) -> Result<String, AgentError> {
        let mut stream = self.agent.stream(message, &self.config).await?;
        let mut reply = String::new();
        let mut chunks = 0usize;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            debug!(
                "[AgentSession] Received {} chunk ({} bytes)",
                chunk.source(),
                chunk.text().len()
            );
            reply.push_str(chunk.text());
            chunks += 1;
        }

        debug!(
            "[AgentSession] Reply complete: {} chunks, {} bytes",
            chunks,
            reply.len()
        );
        Ok(reply)
    }
}
