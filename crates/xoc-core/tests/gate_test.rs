//! Tests for the balance gate and the phase tables

use rstest::rstest;
use xoc_agent::{AgentSession, ScriptedAgent, SessionConfig};
use xoc_core::constants::{BALANCE_QUERY, REQUIRED_BALANCE_WEI};
use xoc_core::phases::{alux_phase, xocolatl_phase};
use xoc_core::{demo_phases, BalanceGate, DemoError, GateVerdict, RecordingNarrator};

#[rstest]
#[case("0.0003", GateVerdict::Passed { balance_wei: 300_000_000_000_000 })]
#[case("0.0002", GateVerdict::Passed { balance_wei: 200_000_000_000_000 })]
#[case("0.00019", GateVerdict::Insufficient { balance_wei: 190_000_000_000_000 })]
#[case("0", GateVerdict::Insufficient { balance_wei: 0 })]
#[tokio::test]
async fn test_gate_verdicts(#[case] balance: &str, #[case] expected: GateVerdict) {
    let mut session = AgentSession::new(
        ScriptedAgent::new().with_balance(balance),
        SessionConfig::new("gate-test"),
    );
    let narrator = RecordingNarrator::new();

    let verdict = BalanceGate::default()
        .check(&mut session, &narrator)
        .await
        .unwrap();

    assert_eq!(verdict, expected);
    if verdict.passed() {
        assert!(narrator.events().is_empty());
    } else {
        assert_eq!(
            narrator.texts(),
            vec!["Insufficient balance. Need at least 0.0002 ETH"]
        );
    }
}

#[tokio::test]
async fn test_gate_dispatch_error_names_the_query() {
    let mut session = AgentSession::new(
        ScriptedAgent::new().failing_on(BALANCE_QUERY),
        SessionConfig::new("gate-test"),
    );
    let narrator = RecordingNarrator::new();

    let err = BalanceGate::default()
        .check(&mut session, &narrator)
        .await
        .unwrap_err();

    match err {
        DemoError::Dispatch { command, .. } => assert_eq!(command, BALANCE_QUERY),
        other => panic!("expected dispatch error, got {other:?}"),
    }
    assert!(narrator.events().is_empty());
}

#[test]
fn test_default_gate_threshold() {
    let gate = BalanceGate::default();
    assert_eq!(gate.required_wei(), REQUIRED_BALANCE_WEI);
    assert_eq!(
        gate.shortfall_message(),
        "Insufficient balance. Need at least 0.0002 ETH"
    );
}

#[test]
fn test_phase_tables() {
    let alux = alux_phase();
    assert_eq!(alux.name, "Alux");
    assert_eq!(
        alux.steps,
        vec![
            "wrap 0.0001 eth to weth",
            "approve 0.0001 weth in the alux protocol",
            "supply 0.0001 weth as collateral in the alux protocol",
            "borrow 0.05 xoc in the alux protocol",
            "approve 0.05 xoc in the alux protocol",
            "repay 0.05 xoc in the alux protocol",
            "withdraw 0.0001 weth from alux protocol",
        ]
    );

    let xocolatl = xocolatl_phase();
    assert_eq!(xocolatl.name, "Xocolatl");
    assert_eq!(
        xocolatl.steps,
        vec![
            "approve 0.0001 weth in the xocolatl protocol",
            "supply 0.0001 weth as collateral in xocolatl",
            "mint 0.05 xoc",
        ]
    );

    let names: Vec<String> = demo_phases().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Alux", "Xocolatl"]);
}
