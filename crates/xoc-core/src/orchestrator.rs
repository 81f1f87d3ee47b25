//! Demo orchestrator: balance gate, then every phase's commands in strict
//! order, narrating each command and each reply.
//!
//! A run moves through
//! `Idle → CheckingBalance → RunningPhase(0..N) → Completed`, or stops in
//! `Aborted` (balance too low) or `Failed` (dispatch or narration error).
//! Failure is fail-fast: commands are causally ordered on-chain, so nothing
//! after a failed step is attempted.

use crate::constants::{COMPLETION_MESSAGE, DEFAULT_STEP_DELAY, PACING_DELAY};
use crate::error::DemoError;
use crate::extractor::format_transaction_link;
use crate::gate::BalanceGate;
use crate::narration::Narrator;
use crate::phases::{demo_phases, DemoPhase};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use xoc_agent::AgentSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOptions {
    /// Pause after each command's reply before the next command.
    pub step_delay: Duration,
    /// Narrate a banner before each phase.
    pub announce_phases: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            announce_phases: false,
        }
    }
}

impl DemoOptions {
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    pub fn with_phase_announcements(mut self, announce_phases: bool) -> Self {
        self.announce_phases = announce_phases;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoState {
    Idle,
    CheckingBalance,
    RunningPhase { index: usize, name: String },
    Aborted,
    Completed,
    Failed,
}

impl DemoState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DemoState::Aborted | DemoState::Completed | DemoState::Failed
        )
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum DemoOutcome {
    /// Every command of every phase ran.
    Completed { commands_issued: usize },
    /// The balance gate stopped the run before any command.
    Aborted { balance_wei: u128 },
    /// A dispatch or narration error stopped the run.
    Failed {
        error: DemoError,
        commands_issued: usize,
    },
}

impl DemoOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, DemoOutcome::Completed { .. })
    }

    /// Phase commands whose reply was fully received.
    pub fn commands_issued(&self) -> usize {
        match self {
            DemoOutcome::Completed { commands_issued }
            | DemoOutcome::Failed {
                commands_issued, ..
            } => *commands_issued,
            DemoOutcome::Aborted { .. } => 0,
        }
    }
}

/// Drives one demo run over a session it borrows exclusively.
pub struct DemoOrchestrator<'s> {
    session: &'s mut AgentSession,
    phases: Vec<DemoPhase>,
    gate: BalanceGate,
    options: DemoOptions,
    state: DemoState,
    commands_issued: usize,
}

impl<'s> DemoOrchestrator<'s> {
    pub fn new(session: &'s mut AgentSession, options: DemoOptions) -> Self {
        Self {
            session,
            phases: demo_phases(),
            gate: BalanceGate::default(),
            options,
            state: DemoState::Idle,
            commands_issued: 0,
        }
    }

    /// Replace the default Alux and Xocolatl phases.
    pub fn with_phases(mut self, phases: Vec<DemoPhase>) -> Self {
        self.phases = phases;
        self
    }

    pub fn with_gate(mut self, gate: BalanceGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn state(&self) -> &DemoState {
        &self.state
    }

    /// Run the whole demo, narrating through `narrator`.
    ///
    /// Never returns an error: every failure ends in [`DemoOutcome::Failed`]
    /// after a best-effort failure notice to the observer.
    #[instrument(skip_all, fields(thread_id = %self.session.config().thread_id))]
    pub async fn run(&mut self, narrator: &dyn Narrator) -> DemoOutcome {
        self.state = DemoState::Idle;
        self.commands_issued = 0;

        match self.drive(narrator).await {
            Ok(outcome) => outcome,
            Err(error) => self.fail(error, narrator).await,
        }
    }

    async fn drive(&mut self, narrator: &dyn Narrator) -> Result<DemoOutcome, DemoError> {
        self.transition(DemoState::CheckingBalance);
        let verdict = self.gate.check(&mut *self.session, narrator).await?;
        if !verdict.passed() {
            self.transition(DemoState::Aborted);
            return Ok(DemoOutcome::Aborted {
                balance_wei: verdict.balance_wei(),
            });
        }

        let phases = self.phases.clone();
        let total_steps: usize = phases.iter().map(|phase| phase.steps.len()).sum();
        let mut step_number = 0;

        for (index, phase) in phases.iter().enumerate() {
            self.transition(DemoState::RunningPhase {
                index,
                name: phase.name.clone(),
            });
            if self.options.announce_phases {
                narrator.notify(&phase.banner(), false).await?;
            }

            for command in &phase.steps {
                step_number += 1;
                info!(
                    "[Orchestrator] Executing step {}/{} ({}): {}",
                    step_number, total_steps, phase.name, command
                );
                self.run_step(command, narrator).await?;

                if step_number < total_steps {
                    tokio::time::sleep(self.options.step_delay).await;
                }
            }
        }

        narrator.notify(COMPLETION_MESSAGE, false).await?;
        self.transition(DemoState::Completed);
        info!(
            "[Orchestrator] ✅ Demo completed: {} commands issued",
            self.commands_issued
        );
        Ok(DemoOutcome::Completed {
            commands_issued: self.commands_issued,
        })
    }

    async fn run_step(&mut self, command: &str, narrator: &dyn Narrator) -> Result<(), DemoError> {
        narrator.notify(command, true).await?;
        tokio::time::sleep(PACING_DELAY).await;

        let reply = self
            .session
            .dispatch(command)
            .await
            .map_err(|e| DemoError::dispatch(command, e))?;
        self.commands_issued += 1;

        let reply = format_transaction_link(&reply);
        debug!("[Orchestrator] Reply for \"{}\": {}", command, reply);
        narrator.notify(&reply, false).await?;
        Ok(())
    }

    async fn fail(&mut self, error: DemoError, narrator: &dyn Narrator) -> DemoOutcome {
        error!(
            "[Orchestrator] ❌ Demo failed during {:?} after {} commands: {}",
            self.state, self.commands_issued, error
        );
        self.transition(DemoState::Failed);

        if let Err(e) = narrator.notify(&format!("Demo failed: {error}"), false).await {
            warn!("[Orchestrator] ⚠️ Could not deliver failure notice: {}", e);
        }

        DemoOutcome::Failed {
            error,
            commands_issued: self.commands_issued,
        }
    }

    fn transition(&mut self, next: DemoState) {
        debug!("[Orchestrator] {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
