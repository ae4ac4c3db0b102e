//! Wire tags and client defaults.

use std::time::Duration;

/// Leading payload byte of a donate instruction.
pub const DONATE_TAG: u8 = 1;

/// Leading payload byte of a withdraw instruction.
pub const WITHDRAW_TAG: u8 = 2;

/// Local validator started by `solana-test-validator`.
pub const DEFAULT_CLUSTER_URL: &str = "http://localhost:8899";

/// Public devnet endpoint.
pub const DEVNET_CLUSTER_URL: &str = "https://api.devnet.solana.com";

/// How long a submitted signature is polled before giving up.
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause between signature status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
