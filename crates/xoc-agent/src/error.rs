use thiserror::Error;

/// Errors raised while dispatching a message to the agent
#[derive(Debug, Error)]
pub enum AgentError {
    /// Transport-level failure talking to the agent service
    #[error("Agent request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The agent service answered with a non-success status
    #[error("Agent returned error: {status} - {body}")]
    Status { status: u16, body: String },

    /// A streamed line could not be decoded
    #[error("Malformed agent chunk: {0}")]
    MalformedChunk(String),

    /// The agent failed while executing the command
    #[error("Agent execution failed: {0}")]
    Execution(String),
}

impl AgentError {
    /// Create a new malformed chunk error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedChunk(msg.into())
    }

    /// Create a new execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}
