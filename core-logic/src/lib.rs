//! # Core Logic - Shared Utilities for Testnet Automation
//!
//! Chain-agnostic building blocks used by the chain crates: fixed-delay
//! retry, pacing, credential loading, logging and typed errors.
//!
//! ## Modules
//!
//! - [`config`] - Configuration structures shared across chains
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - Core trait definitions
//! - `utils` - Retry, pacing, wallet loading and logger setup

pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

pub use config::{ChainConfig, PacingConfig};
pub use error::{ConfigError, NetworkError, WalletError};
pub use traits::{Pacer, StepResult, WalletLoader};

pub use utils::{
    setup_logger, with_retry, PrivateKey, RetryConfig, TokioPacer, WalletManager,
    PROGRESS_TARGET, STEP_TARGET,
};
