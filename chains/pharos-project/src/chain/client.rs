use super::{ChainClient, ClientFactory, TxConfirmation};
use anyhow::{Context, Result};
use async_trait::async_trait;
use core_logic::{with_retry, NetworkError, PrivateKey, RetryConfig};
use ethers::prelude::*;
use ethers::types::transaction::eip2718::TypedTransaction;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// HTTP provider with a request timeout on the underlying client.
pub fn build_provider(rpc_url: &str, timeout: Duration) -> Result<Provider<Http>> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let url = reqwest::Url::parse(rpc_url).context(format!("Invalid RPC URL: {}", rpc_url))?;

    Ok(Provider::new(Http::new_with_client(url, client)))
}

pub async fn fetch_chain_id(provider: &Provider<Http>, retry: RetryConfig) -> Result<u64> {
    let chain_id = with_retry(retry, "eth_chainId", || async {
        provider
            .get_chainid()
            .await
            .context("eth_chainId request failed")
    })
    .await?;

    Ok(chain_id.as_u64())
}

/// ethers-backed wallet client.
#[derive(Debug, Clone)]
pub struct EvmClient {
    inner: Arc<SignerClient>,
}

impl EvmClient {
    pub fn new(provider: Provider<Http>, wallet: LocalWallet) -> Self {
        Self {
            inner: Arc::new(SignerMiddleware::new(provider, wallet)),
        }
    }
}

#[async_trait]
impl ChainClient for EvmClient {
    fn address(&self) -> Address {
        self.inner.address()
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let tx: TypedTransaction = TransactionRequest::new()
            .from(self.address())
            .to(to)
            .data(data)
            .into();

        self.inner
            .call(&tx, None)
            .await
            .context(format!("eth_call to {:?} failed", to))
    }

    async fn send_transaction(&self, to: Address, data: Bytes) -> Result<TxConfirmation> {
        let tx = TransactionRequest::new().to(to).data(data);

        let pending = self
            .inner
            .send_transaction(tx, None)
            .await
            .context(format!("Failed to submit transaction to {:?}", to))?;
        let tx_hash = pending.tx_hash();

        let receipt = pending
            .await
            .context(format!("Failed waiting for {:?}", tx_hash))?
            .ok_or_else(|| NetworkError::Dropped {
                tx_hash: format!("{:?}", tx_hash),
            })?;

        if receipt.status != Some(U64::from(1)) {
            return Err(NetworkError::Reverted {
                tx_hash: format!("{:?}", tx_hash),
                block: receipt
                    .block_number
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "?".to_string()),
            }
            .into());
        }

        Ok(TxConfirmation {
            tx_hash,
            block_number: receipt.block_number,
        })
    }
}

/// Creates wallet clients that share one provider.
#[derive(Debug, Clone)]
pub struct EvmClientFactory {
    provider: Provider<Http>,
    chain_id: u64,
}

impl EvmClientFactory {
    pub fn new(provider: Provider<Http>, chain_id: u64) -> Self {
        Self { provider, chain_id }
    }
}

impl ClientFactory for EvmClientFactory {
    type Client = EvmClient;

    fn connect(&self, key: &PrivateKey) -> Result<EvmClient> {
        let wallet = key
            .expose()
            .parse::<LocalWallet>()
            .context("Invalid private key")?
            .with_chain_id(self.chain_id);

        Ok(EvmClient::new(self.provider.clone(), wallet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_factory_binds_wallet_address() {
        let provider = build_provider("http://127.0.0.1:8545", Duration::from_secs(5)).unwrap();
        let factory = EvmClientFactory::new(provider, 688688);

        let client = factory.connect(&PrivateKey::new(TEST_KEY)).unwrap();
        let expected: LocalWallet = TEST_KEY.parse().unwrap();

        assert_eq!(client.address(), expected.address());
    }

    #[test]
    fn test_factory_rejects_bad_key() {
        let provider = build_provider("http://127.0.0.1:8545", Duration::from_secs(5)).unwrap();
        let factory = EvmClientFactory::new(provider, 688688);

        assert!(factory.connect(&PrivateKey::new("not-a-key")).is_err());
    }

    #[test]
    fn test_build_provider_rejects_bad_url() {
        assert!(build_provider("not a url", Duration::from_secs(5)).is_err());
    }
}
