use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use xoc_agent::{AgentSession, ScriptedAgent, SessionConfig};
use xoc_core::{
    constants::DEFAULT_STEP_DELAY, env, format_ether, session_from_env, ConsoleNarrator,
    DemoOptions, DemoOrchestrator, DemoOutcome,
};

/// Runs the automated Alux and Xocolatl demo in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Pause between commands in milliseconds [default: DEMO_STEP_DELAY_MS or 15000]
    #[arg(long)]
    step_delay_ms: Option<u64>,

    /// Use the offline scripted agent instead of the agent service.
    #[arg(long)]
    mock: bool,

    /// ETH balance the scripted agent reports (with --mock).
    #[arg(long, default_value = "0.0003")]
    balance: String,

    /// Type each command out as if entered live.
    #[arg(long)]
    typewriter: bool,

    /// Print a banner before each protocol phase.
    #[arg(long)]
    announce_phases: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,xoc_core=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_session(cli: &Cli) -> Result<AgentSession> {
    if cli.mock {
        let agent = ScriptedAgent::new()
            .with_balance(cli.balance.clone())
            .with_latency(Duration::from_millis(500));
        return Ok(AgentSession::new(agent, SessionConfig::fresh()));
    }
    session_from_env().context("Failed to initialize agent session")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file in the current directory.
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let step_delay = cli
        .step_delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| env::demo::step_delay(DEFAULT_STEP_DELAY));
    let options = DemoOptions::default()
        .with_step_delay(step_delay)
        .with_phase_announcements(cli.announce_phases);

    let mut session = build_session(&cli)?;
    info!(
        "[xoc-runner] Starting demo on thread {} ({:?} between commands)",
        session.config().thread_id,
        step_delay
    );

    let narrator = ConsoleNarrator::new().with_typewriter(cli.typewriter);
    let outcome = DemoOrchestrator::new(&mut session, options)
        .run(&narrator)
        .await;

    match outcome {
        DemoOutcome::Completed { commands_issued } => {
            info!("[xoc-runner] ✅ {} commands completed", commands_issued);
            Ok(())
        }
        DemoOutcome::Aborted { balance_wei } => bail!(
            "Demo aborted: wallet holds {} ETH",
            format_ether(balance_wei)
        ),
        DemoOutcome::Failed {
            error,
            commands_issued,
        } => Err(error).context(format!(
            "Demo failed after {commands_issued} completed commands"
        )),
    }
}
