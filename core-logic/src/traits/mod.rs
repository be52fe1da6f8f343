use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Suspends the current task between operations.
///
/// Implementations must return only after the full duration has elapsed
/// and must never fail.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Outcome of one attempted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepResult {
    /// The operation completed. `tx_hash` is `None` when no transaction
    /// was needed.
    Succeeded { tx_hash: Option<String> },
    /// Every attempt failed; `error` holds the last cause.
    Failed { attempts: u32, error: String },
}

impl StepResult {
    pub fn succeeded(tx_hash: Option<String>) -> Self {
        StepResult::Succeeded { tx_hash }
    }

    pub fn failed(attempts: u32, error: &anyhow::Error) -> Self {
        StepResult::Failed {
            attempts,
            error: format!("{:#}", error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepResult::Succeeded { .. })
    }

    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            StepResult::Succeeded { tx_hash } => tx_hash.as_deref(),
            StepResult::Failed { .. } => None,
        }
    }
}

#[async_trait]
pub trait WalletLoader: Send + Sync {
    type Wallet;

    /// Load signing credentials in their configured order.
    async fn load_wallets(&self) -> Result<Vec<Self::Wallet>>;
}
