//! Command tables for the two protocol phases.
//!
//! Order inside a phase is load-bearing: each command relies on the on-chain
//! state left by the previous one (approve before supply, supply before
//! borrow, borrow before repay).

use crate::constants::{DEMO_AMOUNT_ETH, DEMO_AMOUNT_XOC};

/// A named, ordered group of commands for one protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPhase {
    pub name: String,
    pub steps: Vec<String>,
}

impl DemoPhase {
    pub fn new(name: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Banner narrated before the phase when phase announcements are on.
    pub fn banner(&self) -> String {
        format!("\n=== Starting {} Protocol Demo ===\n", self.name)
    }
}

/// Alux lending: collateralize WETH, borrow XOC, repay, withdraw.
pub fn alux_phase() -> DemoPhase {
    let eth = DEMO_AMOUNT_ETH;
    let xoc = DEMO_AMOUNT_XOC;
    DemoPhase::new(
        "Alux",
        vec![
            format!("wrap {eth} eth to weth"),
            format!("approve {eth} weth in the alux protocol"),
            format!("supply {eth} weth as collateral in the alux protocol"),
            format!("borrow {xoc} xoc in the alux protocol"),
            format!("approve {xoc} xoc in the alux protocol"),
            format!("repay {xoc} xoc in the alux protocol"),
            format!("withdraw {eth} weth from alux protocol"),
        ],
    )
}

/// Xocolatl: deposit WETH collateral and mint XOC.
pub fn xocolatl_phase() -> DemoPhase {
    let eth = DEMO_AMOUNT_ETH;
    let xoc = DEMO_AMOUNT_XOC;
    DemoPhase::new(
        "Xocolatl",
        vec![
            format!("approve {eth} weth in the xocolatl protocol"),
            format!("supply {eth} weth as collateral in xocolatl"),
            format!("mint {xoc} xoc"),
        ],
    )
}

/// Both phases, in execution order.
pub fn demo_phases() -> Vec<DemoPhase> {
    vec![alux_phase(), xocolatl_phase()]
}
