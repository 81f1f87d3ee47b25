//! Narration channel: delivers every command and reply of a run to an
//! observer, in the order they happen.

use crate::constants::COMPLETION_SENTINEL;
use crate::error::NarrationError;
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// One unit of narration, tagged by speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationEvent {
    #[serde(rename = "message")]
    pub text: String,
    /// `true` for commands issued on the user's behalf, `false` for agent replies.
    #[serde(rename = "isUser")]
    pub is_user_turn: bool,
}

impl NarrationEvent {
    pub fn new(text: impl Into<String>, is_user_turn: bool) -> Self {
        Self {
            text: text.into(),
            is_user_turn,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// Whether this is the last event of a demo stream.
    pub fn is_completion_sentinel(&self) -> bool {
        !self.is_user_turn && self.text == COMPLETION_SENTINEL
    }

    /// Wire form: `{"message": …, "isUser": …}`.
    pub fn to_json(&self) -> Result<String, NarrationError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Receives narration events from a demo run.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Deliver one event. An error stops the run.
    async fn notify(&self, text: &str, is_user_turn: bool) -> Result<(), NarrationError>;
}

/// Prints narration to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNarrator {
    typewriter: bool,
}

impl ConsoleNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type user turns out character by character, as if entered live.
    pub fn with_typewriter(mut self, typewriter: bool) -> Self {
        self.typewriter = typewriter;
        self
    }

    async fn type_out(&self, text: &str) -> Result<(), NarrationError> {
        print_flush("\nPrompt: ")?;
        for c in text.chars() {
            print_flush(&c.to_string())?;
            let pause = Duration::from_millis(rand::thread_rng().gen_range(0..100));
            tokio::time::sleep(pause).await;
        }
        print_flush("\n")?;
        tokio::time::sleep(Duration::from_millis(500)).await;

        tokio::time::sleep(Duration::from_secs(1)).await;
        print_flush("↵\n")?;
        tokio::time::sleep(Duration::from_secs(1)).await;
        Ok(())
    }
}

fn print_flush(text: &str) -> Result<(), NarrationError> {
    let mut out = std::io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[async_trait]
impl Narrator for ConsoleNarrator {
    async fn notify(&self, text: &str, is_user_turn: bool) -> Result<(), NarrationError> {
        if is_user_turn && self.typewriter {
            return self.type_out(text).await;
        }

        if is_user_turn {
            print_flush(&format!("\nPrompt: {text}\n"))
        } else {
            print_flush(&format!("{text}\n-------------------\n"))
        }
    }
}

/// Pushes narration into a bounded channel feeding one remote subscriber.
///
/// Once the receiving side is dropped every `notify` fails with
/// [`NarrationError::Closed`].
#[derive(Debug, Clone)]
pub struct ChannelNarrator {
    tx: mpsc::Sender<NarrationEvent>,
}

impl ChannelNarrator {
    pub fn new(tx: mpsc::Sender<NarrationEvent>) -> Self {
        Self { tx }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait]
impl Narrator for ChannelNarrator {
    async fn notify(&self, text: &str, is_user_turn: bool) -> Result<(), NarrationError> {
        self.tx
            .send(NarrationEvent::new(text, is_user_turn))
            .await
            .map_err(|_| {
                debug!("[ChannelNarrator] Subscriber gone, dropping event");
                NarrationError::Closed
            })
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingNarrator {
    events: Mutex<Vec<NarrationEvent>>,
    close_after: Option<usize>,
}

impl RecordingNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `limit` events, then behave like a disconnected subscriber.
    pub fn closing_after(limit: usize) -> Self {
        Self {
            events: Mutex::default(),
            close_after: Some(limit),
        }
    }

    pub fn events(&self) -> Vec<NarrationEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.text).collect()
    }
}

#[async_trait]
impl Narrator for RecordingNarrator {
    async fn notify(&self, text: &str, is_user_turn: bool) -> Result<(), NarrationError> {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.close_after.is_some_and(|limit| events.len() >= limit) {
            return Err(NarrationError::Closed);
        }
        events.push(NarrationEvent::new(text, is_user_turn));
        Ok(())
    }
}
