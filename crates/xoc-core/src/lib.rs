//! # xoc-core
//!
//! Orchestration engine for the automated Alux / Xocolatl demo.
//!
//! A run checks the wallet balance once through the agent, then walks the
//! two protocol phases command by command, narrating every command and every
//! reply to an observer. Replies are free text; all pattern matching over
//! them lives in [`extractor`].

pub mod constants;
pub mod env;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod narration;
pub mod orchestrator;
pub mod phases;
pub mod session;

pub use error::{DemoError, NarrationError};
pub use extractor::{
    extract_balance, format_ether, format_transaction_link, parse_ether, summarize_chat_reply,
};
pub use gate::{BalanceGate, GateVerdict};
pub use narration::{
    ChannelNarrator, ConsoleNarrator, NarrationEvent, Narrator, RecordingNarrator,
};
pub use orchestrator::{DemoOptions, DemoOrchestrator, DemoOutcome, DemoState};
pub use phases::{demo_phases, DemoPhase};
pub use session::session_from_env;

/// Re-export the agent boundary for convenience
pub use xoc_agent::{AgentError, AgentSession, SessionConfig};
