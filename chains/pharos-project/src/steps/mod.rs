//! Step library: faucet claim, token approval and lending-pool supply.
//!
//! Every step retries its chain calls with the configured fixed-delay
//! policy and then swallows the final error. A failed step is logged and
//! reported as [`StepResult::Failed`]; it never aborts the caller.

mod approve;
mod faucet;
mod supply;

pub use faucet::FAUCET_ORDER;

use crate::chain::ChainClient;
use crate::contracts::ContractAddresses;
use anyhow::Result;
use core_logic::{with_retry, RetryConfig, StepResult, STEP_TARGET};
use ethers::types::{Address, Bytes};
use tracing::{debug, info, warn};

/// Step handle bound to one wallet client.
pub struct Steps<'a, C: ChainClient + ?Sized> {
    client: &'a C,
    contracts: &'a ContractAddresses,
    retry: RetryConfig,
}

impl<'a, C: ChainClient + ?Sized> Steps<'a, C> {
    pub fn new(client: &'a C, contracts: &'a ContractAddresses, retry: RetryConfig) -> Self {
        Self {
            client,
            contracts,
            retry,
        }
    }

    pub fn address(&self) -> Address {
        self.client.address()
    }

    /// Sends `data` to `to` and waits for the receipt, retrying on failure.
    async fn send(&self, operation: &str, to: Address, data: Bytes) -> Result<Option<String>> {
        let confirmation = with_retry(self.retry, operation, || {
            self.client.send_transaction(to, data.clone())
        })
        .await?;

        if let Some(block) = confirmation.block_number {
            debug!("{} confirmed in block {}", operation, block);
        }

        Ok(Some(format!("{:?}", confirmation.tx_hash)))
    }

    /// Converts a step outcome into a [`StepResult`], logging it.
    fn settle(&self, label: &str, outcome: Result<Option<String>>) -> StepResult {
        match outcome {
            Ok(tx_hash) => {
                info!(
                    target: STEP_TARGET,
                    "Success [{}] {}",
                    label,
                    tx_hash.as_deref().unwrap_or("no transaction needed")
                );
                StepResult::succeeded(tx_hash)
            }
            Err(e) => {
                warn!(
                    target: STEP_TARGET,
                    wallet = ?self.address(),
                    "Failed [{}] {:#}",
                    label,
                    e
                );
                StepResult::failed(self.retry.attempts(), &e)
            }
        }
    }
}
