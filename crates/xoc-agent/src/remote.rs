//! HTTP client for an agent service that streams its reply as
//! newline-delimited JSON.
//!
//! Each line mirrors one step of a ReAct-style agent graph:
//!
//! ```text
//! {"agent":{"messages":[{"content":"Wrapping 0.0001 ETH..."}]}}
//! {"tools":{"messages":[{"content":"Successfully wrapped 0.0001 ETH to WETH"}]}}
//! ```

use crate::{Agent, AgentChunk, AgentError, ReplyStream, SessionConfig};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Agent reached over HTTP.
pub struct RemoteAgent {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct StreamRequest<'a> {
    message: &'a str,
    thread_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct WireChunk {
    agent: Option<WireMessages>,
    tools: Option<WireMessages>,
}

#[derive(Debug, Deserialize)]
struct WireMessages {
    #[serde(default)]
    messages: Vec<WireMessage>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Value,
}

impl WireMessages {
    fn first_content(&self) -> String {
        match self.messages.first().map(|m| &m.content) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

impl RemoteAgent {
    /// Creates a new `RemoteAgent` whose requests are bounded by `timeout`.
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AgentError> {
        let api_url = api_url.into();
        let client = Client::builder().timeout(timeout).build()?;

        info!(
            "[RemoteAgent] Using agent endpoint {} (api key {})",
            api_url,
            if api_key.is_some() { "set" } else { "not set" }
        );

        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl Agent for RemoteAgent {
    #[instrument(skip(self, config), fields(thread_id = %config.thread_id))]
    async fn stream(
        &mut self,
        message: &str,
        config: &SessionConfig,
    ) -> Result<ReplyStream, AgentError> {
        let mut request = self.client.post(&self.api_url).json(&StreamRequest {
            message,
            thread_id: &config.thread_id,
        });
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!("[RemoteAgent] Agent answered {}: {}", status, body);
            return Err(AgentError::Status { status, body });
        }

        let mut bytes = response.bytes_stream();
        let chunks = async_stream::stream! {
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(piece) = bytes.next().await {
                let piece = match piece {
                    Ok(piece) => piece,
                    Err(e) => {
                        yield Err(AgentError::from(e));
                        return;
                    }
                };
                buffer.extend_from_slice(&piece);

                while let Some(newline) = buffer.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=newline).collect();
                    match decode_line_bytes(&line) {
                        Ok(Some(chunk)) => yield Ok(chunk),
                        Ok(None) => {}
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }

            match decode_line_bytes(&buffer) {
                Ok(Some(chunk)) => yield Ok(chunk),
                Ok(None) => {}
                Err(e) => yield Err(e),
            }
        };

        Ok(Box::pin(chunks))
    }
}

fn decode_line_bytes(line: &[u8]) -> Result<Option<AgentChunk>, AgentError> {
    let line = std::str::from_utf8(line)
        .map_err(|e| AgentError::malformed(format!("invalid UTF-8: {e}")))?;
    decode_chunk_line(line)
}

/// Decode one line of the agent's stream.
///
/// Blank lines and lines carrying neither an `agent` nor a `tools` entry
/// yield `None`.
pub fn decode_chunk_line(line: &str) -> Result<Option<AgentChunk>, AgentError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let wire: WireChunk = serde_json::from_str(line)
        .map_err(|e| AgentError::malformed(format!("{e}: {line}")))?;

    if let Some(agent) = wire.agent {
        return Ok(Some(AgentChunk::Agent(agent.first_content())));
    }
    if let Some(tools) = wire.tools {
        return Ok(Some(AgentChunk::Tools(tools.first_content())));
    }

    debug!("[RemoteAgent] Skipping untagged chunk: {}", line);
    Ok(None)
}
