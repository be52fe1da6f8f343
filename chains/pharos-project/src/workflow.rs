//! Per-wallet workflow: faucet claim, approvals, then `times` supply cycles.

use crate::amount::SupplyAmount;
use crate::chain::ChainClient;
use crate::contracts::{Asset, ContractAddresses};
use crate::steps::Steps;
use core_logic::{PacingConfig, Pacer, RetryConfig, StepResult, PROGRESS_TARGET};
use ethers::types::{Address, U256};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

/// Order in which lending-pool allowances are set.
pub const APPROVE_ORDER: [Asset; 3] = [Asset::Gold, Asset::Tesla, Asset::Nvidia];

/// A step result labelled with the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub label: String,
    #[serde(flatten)]
    pub result: StepResult,
}

impl StepRecord {
    pub fn new(label: impl Into<String>, result: StepResult) -> Self {
        Self {
            label: label.into(),
            result,
        }
    }
}

/// Read-only inputs shared by every wallet of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub contracts: ContractAddresses,
    /// Allowance requested for each asset, in token units.
    pub approve_amount: U256,
    pub retry: RetryConfig,
    pub pacing: PacingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowOutcome {
    pub address: Address,
    pub steps: Vec<StepRecord>,
    pub cycles_run: u32,
    /// Cycles in which all three supplies succeeded.
    pub cycles_completed: u32,
}

impl WorkflowOutcome {
    pub fn succeeded(&self) -> usize {
        self.steps.iter().filter(|s| s.result.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.steps.len() - self.succeeded()
    }
}

pub struct AccountWorkflow<'a, C: ChainClient + ?Sized, P: Pacer + ?Sized> {
    client: &'a C,
    pacer: &'a P,
    settings: &'a WorkflowSettings,
}

impl<'a, C: ChainClient + ?Sized, P: Pacer + ?Sized> AccountWorkflow<'a, C, P> {
    pub fn new(client: &'a C, pacer: &'a P, settings: &'a WorkflowSettings) -> Self {
        Self {
            client,
            pacer,
            settings,
        }
    }

    /// Drives one wallet through the whole sequence.
    ///
    /// Step failures are recorded in the outcome and never stop the run.
    pub async fn run<R: Rng + ?Sized>(&self, times: u32, rng: &mut R) -> WorkflowOutcome {
        let settings = self.settings;
        let steps = Steps::new(self.client, &settings.contracts, settings.retry);
        let mut records = Vec::new();

        info!(target: PROGRESS_TARGET, "Faucet...");
        records.extend(steps.claim_faucet().await);

        info!(target: PROGRESS_TARGET, "Approving...");
        for asset in APPROVE_ORDER {
            let result = steps
                .approve(asset, settings.contracts.lending_pool, settings.approve_amount)
                .await;
            records.push(StepRecord::new(format!("approve:{}", asset), result));
        }

        self.pacer.pause(settings.pacing.step_delay()).await;

        info!(target: PROGRESS_TARGET, "Starting supply loop...");
        let mut cycles_completed = 0;

        for i in 1..=times {
            info!(target: PROGRESS_TARGET, "{}/{}", i, times);

            let amount1 = SupplyAmount::random(&mut *rng);
            let amount2 = SupplyAmount::random(&mut *rng);
            debug!("Cycle {} amounts: {} / {}", i, amount1, amount2);

            let cycle = [
                (Asset::Tesla, amount1),
                (Asset::Nvidia, amount1),
                (Asset::Gold, amount2),
            ];

            let mut all_ok = true;
            for (asset, amount) in cycle {
                let result = steps.supply(asset, amount.to_units()).await;
                all_ok &= result.is_success();
                records.push(StepRecord::new(format!("supply#{}:{}", i, asset), result));

                self.pacer.pause(settings.pacing.step_delay()).await;
            }

            if all_ok {
                cycles_completed += 1;
            }
        }

        WorkflowOutcome {
            address: steps.address(),
            steps: records,
            cycles_run: times,
            cycles_completed,
        }
    }
}
