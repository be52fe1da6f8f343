use super::Steps;
use crate::chain::ChainClient;
use crate::contracts::{faucet_mint_calldata, Asset};
use crate::workflow::StepRecord;

/// Order in which faucet mints are requested.
pub const FAUCET_ORDER: [Asset; 3] = [Asset::Gold, Asset::Nvidia, Asset::Tesla];

impl<C: ChainClient + ?Sized> Steps<'_, C> {
    /// Mints test tokens for every asset from the faucet contract.
    ///
    /// The three mints are independent: a failed mint does not prevent the
    /// following ones.
    pub async fn claim_faucet(&self) -> Vec<StepRecord> {
        let mut records = Vec::with_capacity(FAUCET_ORDER.len());

        for asset in FAUCET_ORDER {
            let label = format!("faucet:{}", asset);
            let data = faucet_mint_calldata(self.contracts.asset(asset), self.address());

            let outcome = self.send(&label, self.contracts.faucet, data).await;
            let result = self.settle(&label, outcome);
            records.push(StepRecord::new(label, result));
        }

        records
    }
}
