//! Offline agent with canned replies.
//!
//! Answers balance questions with a wallet-details report and every other
//! command with a success line plus a random transaction hash, the same
//! shapes the real wallet tools produce. Used for `--mock` runs and tests.

use crate::{Agent, AgentChunk, AgentError, ReplyStream, SessionConfig};
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// Demo wallet address reported by the scripted agent.
pub const SCRIPTED_WALLET_ADDRESS: &str = "0x8Fe1A2C5E7d4b3a96F0c2D1e4B7a5C3d9E8f6A21";

/// Shared, append-only record of every message an agent received.
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Arc<Mutex<Vec<String>>>);

impl CommandLog {
    fn push(&self, message: &str) {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }

    pub fn commands(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.commands().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ScriptedAgent {
    balance_eth: String,
    replies: HashMap<String, String>,
    fail_on: Option<String>,
    latency: Duration,
    log: CommandLog,
}

impl Default for ScriptedAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self {
            balance_eth: "0.0003".to_string(),
            replies: HashMap::new(),
            fail_on: None,
            latency: Duration::ZERO,
            log: CommandLog::default(),
        }
    }

    /// ETH balance reported for wallet queries, as a decimal string.
    pub fn with_balance(mut self, balance_eth: impl Into<String>) -> Self {
        self.balance_eth = balance_eth.into();
        self
    }

    /// Fixed reply for an exact command.
    pub fn with_reply(mut self, command: &str, reply: &str) -> Self {
        self.replies.insert(command.to_string(), reply.to_string());
        self
    }

    /// Fail with an execution error when `command` is received.
    pub fn failing_on(mut self, command: &str) -> Self {
        self.fail_on = Some(command.to_string());
        self
    }

    /// Delay before each reply, to mimic on-chain confirmation time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn command_log(&self) -> CommandLog {
        self.log.clone()
    }

    fn reply_chunks(&self, message: &str) -> Vec<AgentChunk> {
        if let Some(reply) = self.replies.get(message) {
            return vec![AgentChunk::Agent(reply.clone())];
        }

        if message.to_lowercase().contains("balance") {
            let report = format!(
                "Wallet Details:\n- Address: {SCRIPTED_WALLET_ADDRESS}\n- Network: base-mainnet\n- ETH Balance: {} ETH",
                self.balance_eth
            );
            return vec![
                AgentChunk::Tools(report),
                AgentChunk::Agent("\nYour wallet is ready on Base Mainnet.".to_string()),
            ];
        }

        vec![
            AgentChunk::Tools(format!(
                "Successfully executed: {message}.\nTransaction hash: {}",
                random_tx_hash()
            )),
            AgentChunk::Agent("\nThe operation has been confirmed on-chain.".to_string()),
        ]
    }
}

/// Random `0x`-prefixed 32-byte transaction hash.
pub fn random_tx_hash() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    format!("0x{}", hex::encode(bytes))
}

#[async_trait]
impl Agent for ScriptedAgent {
    async fn stream(
        &mut self,
        message: &str,
        config: &SessionConfig,
    ) -> Result<ReplyStream, AgentError> {
        self.log.push(message);
        info!(
            "[ScriptedAgent] thread {} received: \"{}\"",
            config.thread_id, message
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.fail_on.as_deref() == Some(message) {
            return Err(AgentError::execution(format!(
                "transaction reverted while executing \"{message}\""
            )));
        }

        let chunks = self
            .reply_chunks(message)
            .into_iter()
            .map(Ok::<AgentChunk, AgentError>);
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}
