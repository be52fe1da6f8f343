use crate::chain::{ChainClient, ClientFactory};
use crate::workflow::{AccountWorkflow, WorkflowOutcome, WorkflowSettings};
use anyhow::{Context, Result};
use core_logic::{Pacer, PrivateKey, PROGRESS_TARGET};
use ethers::types::Address;
use rand::Rng;
use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccountStatus {
    Completed(WorkflowOutcome),
    /// The wallet could not be constructed; no step ran.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountReport {
    /// 1-based position in the credential list.
    pub index: usize,
    pub address: Option<Address>,
    #[serde(flatten)]
    pub status: AccountStatus,
}

impl AccountReport {
    pub fn outcome(&self) -> Option<&WorkflowOutcome> {
        match &self.status {
            AccountStatus::Completed(outcome) => Some(outcome),
            AccountStatus::Failed { .. } => None,
        }
    }
}

/// One entry per credential, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub accounts: Vec<AccountReport>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path, json).context(format!("Failed to write report {}", path.display()))
    }
}

/// Runs the account workflow for every wallet, one after another.
pub struct BatchRunner<'a, F: ClientFactory, P: Pacer + ?Sized> {
    factory: &'a F,
    settings: &'a WorkflowSettings,
    pacer: &'a P,
}

impl<'a, F: ClientFactory, P: Pacer + ?Sized> BatchRunner<'a, F, P> {
    pub fn new(factory: &'a F, settings: &'a WorkflowSettings, pacer: &'a P) -> Self {
        Self {
            factory,
            settings,
            pacer,
        }
    }

    /// Processes every key in order. A wallet that cannot be constructed is
    /// recorded as failed and the batch moves on; the report always holds
    /// one entry per key.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        keys: &[PrivateKey],
        times: u32,
        rng: &mut R,
    ) -> BatchReport {
        let total = keys.len();
        let mut report = BatchReport {
            accounts: Vec::with_capacity(total),
        };

        for (i, key) in keys.iter().enumerate() {
            let index = i + 1;

            let account = match self.factory.connect(key) {
                Ok(client) => {
                    let address = client.address();
                    info!(target: PROGRESS_TARGET, "Account {}/{}: {:?}", index, total, address);

                    let outcome = AccountWorkflow::new(&client, self.pacer, self.settings)
                        .run(times, &mut *rng)
                        .await;

                    AccountReport {
                        index,
                        address: Some(address),
                        status: AccountStatus::Completed(outcome),
                    }
                }
                Err(e) => {
                    error!("Account {}/{}: wallet setup failed: {:#}", index, total, e);
                    AccountReport {
                        index,
                        address: None,
                        status: AccountStatus::Failed {
                            error: format!("{:#}", e),
                        },
                    }
                }
            };
            report.accounts.push(account);

            if index < total {
                self.pacer.pause(self.settings.pacing.account_delay()).await;
            }
        }

        report
    }
}
