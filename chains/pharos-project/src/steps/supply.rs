use super::Steps;
use crate::chain::ChainClient;
use crate::contracts::{supply_calldata, Asset};
use core_logic::StepResult;
use ethers::types::U256;

impl<C: ChainClient + ?Sized> Steps<'_, C> {
    /// Deposits `amount` of `asset` into the lending pool for this wallet.
    pub async fn supply(&self, asset: Asset, amount: U256) -> StepResult {
        let label = format!("supply:{}", asset);
        let data = supply_calldata(self.contracts.asset(asset), amount, self.address());

        let outcome = self.send(&label, self.contracts.lending_pool, data).await;
        self.settle(&label, outcome)
    }
}
