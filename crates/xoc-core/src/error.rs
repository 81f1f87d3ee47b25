use thiserror::Error;
use xoc_agent::AgentError;

/// Errors raised by a narration sink
#[derive(Debug, Error)]
pub enum NarrationError {
    /// The subscriber went away; no further events can be delivered
    #[error("Narration subscriber closed")]
    Closed,

    /// Writing to the console failed
    #[error("Narration I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An event could not be serialized for the wire
    #[error("Narration serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that end a demo run in the `Failed` state
#[derive(Debug, Error)]
pub enum DemoError {
    /// The agent failed to execute a command
    #[error("agent dispatch failed for \"{command}\": {source}")]
    Dispatch {
        command: String,
        #[source]
        source: AgentError,
    },

    /// The observer could not be notified
    #[error("narration failed: {0}")]
    Narration(#[from] NarrationError),
}

impl DemoError {
    /// Create a new dispatch error for `command`
    pub fn dispatch(command: impl Into<String>, source: AgentError) -> Self {
        Self::Dispatch {
            command: command.into(),
            source,
        }
    }

    /// Whether the run ended because the observer disconnected
    pub fn is_observer_gone(&self) -> bool {
        matches!(self, DemoError::Narration(NarrationError::Closed))
    }
}
