use crate::contracts::{ContractAddresses, TOKEN_DECIMALS};
use crate::workflow::WorkflowSettings;
use anyhow::{Context, Result};
use config::{Config, File};
use core_logic::{ChainConfig, ConfigError, PacingConfig, RetryConfig};
use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_RPC_URL: &str = "https://testnet.dplabs-internal.com";
pub const FAUCET_ADDRESS: &str = "0x0e29d74af0489f4b08fbfc774e25c0d3b5f43285";
pub const LENDING_POOL_ADDRESS: &str = "0x11d1ca4012d94846962bca2fbd58e5a27ddcbfc5";
pub const GOLD_ADDRESS: &str = "0xaaf03cbb486201099edd0a52e03def18cd0c7354";
pub const NVIDIA_ADDRESS: &str = "0xa778b48339d3c6b4bc5a75b37c6ce210797076b1";
pub const TESLA_ADDRESS: &str = "0xaaf3a7f1676385883593d7ea7ea4fccc675ee5d6";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PharosConfig {
    pub chain: ChainConfig,
    pub contracts: ContractsConfig,
    /// Allowance granted to the lending pool, in whole tokens.
    pub approve_amount: String,
    pub rpc_timeout_secs: u64,
    pub retry: RetryConfig,
    pub pacing: PacingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractsConfig {
    pub faucet: String,
    pub lending_pool: String,
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub gold: String,
    pub nvidia: String,
    pub tesla: String,
}

impl Default for PharosConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig {
                name: "pharos-testnet".to_string(),
                rpc_endpoint: DEFAULT_RPC_URL.to_string(),
                chain_id: None,
            },
            contracts: ContractsConfig::default(),
            approve_amount: "1000.0".to_string(),
            rpc_timeout_secs: 30,
            retry: RetryConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            faucet: FAUCET_ADDRESS.to_string(),
            lending_pool: LENDING_POOL_ADDRESS.to_string(),
            assets: AssetsConfig::default(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            gold: GOLD_ADDRESS.to_string(),
            nvidia: NVIDIA_ADDRESS.to_string(),
            tesla: TESLA_ADDRESS.to_string(),
        }
    }
}

impl PharosConfig {
    /// Loads `path` over the built-in defaults. A missing file is not an
    /// error; every key in the file is optional.
    pub fn load(path: &str) -> Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default config")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name(path).required(false))
            .build()
            .context(format!("Failed to read config {}", path))?;

        settings
            .try_deserialize()
            .context(format!("Invalid config {}", path))
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    /// Checks every value that would otherwise fail later, mid-batch.
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.chain.rpc_endpoint).is_err() {
            return Err(ConfigError::InvalidRpcUrl {
                url: self.chain.rpc_endpoint.clone(),
            }
            .into());
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        self.workflow_settings()?;
        Ok(())
    }

    pub fn contract_addresses(&self) -> Result<ContractAddresses> {
        let c = &self.contracts;
        Ok(ContractAddresses {
            faucet: parse_address("contracts.faucet", &c.faucet)?,
            lending_pool: parse_address("contracts.lending_pool", &c.lending_pool)?,
            gold: parse_address("contracts.assets.gold", &c.assets.gold)?,
            nvidia: parse_address("contracts.assets.nvidia", &c.assets.nvidia)?,
            tesla: parse_address("contracts.assets.tesla", &c.assets.tesla)?,
        })
    }

    pub fn approve_amount_units(&self) -> Result<U256> {
        let units = ethers::utils::parse_units(self.approve_amount.trim(), TOKEN_DECIMALS).map_err(
            |e| ConfigError::InvalidValue {
                field: "approve_amount".to_string(),
                reason: e.to_string(),
            },
        )?;
        Ok(units.into())
    }

    pub fn workflow_settings(&self) -> Result<WorkflowSettings> {
        Ok(WorkflowSettings {
            contracts: self.contract_addresses()?,
            approve_amount: self.approve_amount_units()?,
            retry: self.retry,
            pacing: self.pacing,
        })
    }
}

fn parse_address(field: &str, value: &str) -> Result<Address, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("'{}' is not a 20-byte hex address", value),
    })
}

/// Parses the supply-cycle count entered by the user.
///
/// Only the leading integer counts: `"50abc"` is 50 and `"2.5"` is 2.
pub fn parse_times(input: &str) -> Result<u32, ConfigError> {
    let trimmed = input.trim();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digit_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    let value: i64 = trimmed[..sign_len + digit_len]
        .parse()
        .map_err(|source| ConfigError::ParseError {
            field: "times".to_string(),
            source,
        })?;

    if value <= 0 {
        return Err(ConfigError::InvalidValue {
            field: "times".to_string(),
            reason: "Please enter a valid positive number.".to_string(),
        });
    }

    u32::try_from(value).map_err(|_| ConfigError::InvalidValue {
        field: "times".to_string(),
        reason: format!("{} is too large", value),
    })
}
