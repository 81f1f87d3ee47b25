//! Fixed amounts, thresholds, timings and message texts of the demo

use std::time::Duration;

/// ETH amount used by every WETH command of the demo
pub const DEMO_AMOUNT_ETH: &str = "0.0001";

/// XOC amount used by every XOC command of the demo
pub const DEMO_AMOUNT_XOC: &str = "0.05";

/// Wei per ETH (10^18)
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Decimal places of ETH
pub const ETH_DECIMALS: usize = 18;

/// Minimum wallet balance required to start the demo (0.0002 ETH)
pub const REQUIRED_BALANCE_WEI: u128 = 200_000_000_000_000;

/// Command sent to the agent by the balance gate
pub const BALANCE_QUERY: &str = "show wallet balance in base mainnet";

/// Pause between narrating a command and dispatching it
pub const PACING_DELAY: Duration = Duration::from_millis(1_000);

/// Default pause between two consecutive commands
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(15_000);

/// Pause between commands used by the HTTP demo stream
pub const SERVER_STEP_DELAY: Duration = Duration::from_millis(5_000);

/// Explorer URL prefix for transaction links
pub const BASESCAN_TX_URL: &str = "https://basescan.org/tx/";

/// Final narration line of a successful run
pub const COMPLETION_MESSAGE: &str = "Demo completed successfully!";

/// First line pushed on a demo stream
pub const START_MESSAGE: &str = "Starting demo...";

/// Last line pushed on a demo stream; subscribers close after it
pub const COMPLETION_SENTINEL: &str = "Demo completed!";
