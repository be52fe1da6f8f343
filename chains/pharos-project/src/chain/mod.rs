//! Chain client abstraction used by the step library.

pub mod client;

pub use client::{build_provider, fetch_chain_id, EvmClient, EvmClientFactory};

use anyhow::Result;
use async_trait::async_trait;
use core_logic::PrivateKey;
use ethers::types::{Address, Bytes, H256, U64};

/// A mined, successful transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxConfirmation {
    pub tx_hash: H256,
    pub block_number: Option<U64>,
}

/// One signing wallet bound to an RPC endpoint.
///
/// `send_transaction` resolves only once the transaction is mined. A
/// reverted or dropped transaction is an error.
#[async_trait]
pub trait ChainClient: Send + Sync {
    fn address(&self) -> Address;

    /// Read-only `eth_call` from this wallet's address.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    async fn send_transaction(&self, to: Address, data: Bytes) -> Result<TxConfirmation>;
}

/// Builds a [`ChainClient`] from a private key.
pub trait ClientFactory: Send + Sync {
    type Client: ChainClient;

    fn connect(&self, key: &PrivateKey) -> Result<Self::Client>;
}
