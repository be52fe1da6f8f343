use crate::error::WalletError;
use crate::traits::WalletLoader;
use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw signing key as read from the environment. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(***REDACTED***)")
    }
}

/// Loads private keys from numbered environment variables.
///
/// `PRIVATE_KEY_1`, `PRIVATE_KEY_2`, ... are read in order until the first
/// missing index. If none is set, a single `PRIVATE_KEY` is used instead.
pub struct WalletManager {
    keys: Vec<PrivateKey>,
}

impl WalletManager {
    pub const NUMBERED_PREFIX: &'static str = "PRIVATE_KEY_";
    pub const FALLBACK_KEY: &'static str = "PRIVATE_KEY";

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut keys = Vec::new();
        let mut index = 1;
        while let Some(value) = present(&format!("{}{}", Self::NUMBERED_PREFIX, index)) {
            keys.push(PrivateKey::new(value.trim()));
            index += 1;
        }

        if keys.is_empty() {
            if let Some(value) = present(Self::FALLBACK_KEY) {
                keys.push(PrivateKey::new(value.trim()));
            }
        }

        Self { keys }
    }

    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn into_keys(self) -> Vec<PrivateKey> {
        self.keys
    }
}

#[async_trait]
impl WalletLoader for WalletManager {
    type Wallet = PrivateKey;

    async fn load_wallets(&self) -> Result<Vec<PrivateKey>> {
        if self.keys.is_empty() {
            return Err(WalletError::NoCredentials {
                numbered: format!("{}<n>", Self::NUMBERED_PREFIX),
                fallback: Self::FALLBACK_KEY.to_string(),
            }
            .into());
        }
        Ok(self.keys.clone())
    }
}
