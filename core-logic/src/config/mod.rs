use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint settings shared by every wallet of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default)]
    pub name: String,
    pub rpc_endpoint: String,
    /// Queried from the node when absent.
    #[serde(default)]
    pub chain_id: Option<u64>,
}

/// Fixed pauses inserted between operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after the approval phase and after every supply.
    pub step_delay_ms: u64,
    /// Pause between two consecutive wallets.
    pub account_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 5000,
            account_delay_ms: 10000,
        }
    }
}

impl PacingConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn account_delay(&self) -> Duration {
        Duration::from_millis(self.account_delay_ms)
    }
}
