//! Balance precondition checked once before any phase runs.

use crate::constants::{BALANCE_QUERY, REQUIRED_BALANCE_WEI};
use crate::error::DemoError;
use crate::extractor::{extract_balance, format_ether};
use crate::narration::Narrator;
use tracing::{info, instrument, warn};
use xoc_agent::AgentSession;

/// Result of the balance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    Passed { balance_wei: u128 },
    Insufficient { balance_wei: u128 },
}

impl GateVerdict {
    pub fn passed(&self) -> bool {
        matches!(self, GateVerdict::Passed { .. })
    }

    pub fn balance_wei(&self) -> u128 {
        match self {
            GateVerdict::Passed { balance_wei } | GateVerdict::Insufficient { balance_wei } => {
                *balance_wei
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceGate {
    required_wei: u128,
}

impl Default for BalanceGate {
    fn default() -> Self {
        Self::new(REQUIRED_BALANCE_WEI)
    }
}

impl BalanceGate {
    pub fn new(required_wei: u128) -> Self {
        Self { required_wei }
    }

    pub fn required_wei(&self) -> u128 {
        self.required_wei
    }

    /// Human-readable shortfall line narrated when the check fails.
    pub fn shortfall_message(&self) -> String {
        format!(
            "Insufficient balance. Need at least {} ETH",
            format_ether(self.required_wei)
        )
    }

    /// Ask the agent for the wallet balance and compare it with the threshold.
    ///
    /// On a shortfall exactly one narration event is emitted. An unreadable
    /// report counts as a zero balance.
    #[instrument(skip_all, fields(required_wei = %self.required_wei))]
    pub async fn check(
        &self,
        session: &mut AgentSession,
        narrator: &dyn Narrator,
    ) -> Result<GateVerdict, DemoError> {
        let report = session
            .dispatch(BALANCE_QUERY)
            .await
            .map_err(|e| DemoError::dispatch(BALANCE_QUERY, e))?;

        let balance_wei = extract_balance(&report);
        if balance_wei >= self.required_wei {
            info!(
                "[BalanceGate] Balance {} ETH covers required {} ETH",
                format_ether(balance_wei),
                format_ether(self.required_wei)
            );
            return Ok(GateVerdict::Passed { balance_wei });
        }

        warn!(
            "[BalanceGate] Balance {} ETH below required {} ETH",
            format_ether(balance_wei),
            format_ether(self.required_wei)
        );
        narrator.notify(&self.shortfall_message(), false).await?;
        Ok(GateVerdict::Insufficient { balance_wei })
    }
}
