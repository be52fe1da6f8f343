use super::Steps;
use crate::chain::ChainClient;
use crate::contracts::{allowance_calldata, approve_calldata, Asset};
use anyhow::Result;
use core_logic::{with_retry, NetworkError, StepResult};
use ethers::abi::AbiDecode;
use ethers::types::{Address, U256};
use tracing::debug;

impl<C: ChainClient + ?Sized> Steps<'_, C> {
    /// Approves `spender` for `amount` of `asset`.
    ///
    /// Skips the transaction when the current allowance already covers
    /// `amount`, so repeated runs only pay for a read.
    pub async fn approve(&self, asset: Asset, spender: Address, amount: U256) -> StepResult {
        let label = format!("approve:{}", asset);
        let outcome = self.approve_inner(&label, asset, spender, amount).await;
        self.settle(&label, outcome)
    }

    async fn approve_inner(
        &self,
        label: &str,
        asset: Asset,
        spender: Address,
        amount: U256,
    ) -> Result<Option<String>> {
        let token = self.contracts.asset(asset);

        let current = with_retry(self.retry, &format!("{} allowance", label), || {
            self.allowance(token, spender)
        })
        .await?;

        if current >= amount {
            debug!("{} allowance {} already covers {}", label, current, amount);
            return Ok(None);
        }

        self.send(label, token, approve_calldata(spender, amount))
            .await
    }

    async fn allowance(&self, token: Address, spender: Address) -> Result<U256> {
        let raw = self
            .client
            .call(token, allowance_calldata(self.address(), spender))
            .await?;

        let allowance = U256::decode(&raw).map_err(|e| NetworkError::InvalidResponse {
            endpoint: format!("{:?}", token),
            reason: format!("allowance() returned undecodable data: {}", e),
        })?;

        Ok(allowance)
    }
}
