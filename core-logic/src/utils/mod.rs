//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod logger;
pub(crate) mod pacer;
pub(crate) mod retry;
pub(crate) mod wallet_manager;

pub use logger::{setup_logger, PROGRESS_TARGET, STEP_TARGET};
pub use pacer::TokioPacer;
pub use retry::{with_retry, RetryConfig};
pub use wallet_manager::{PrivateKey, WalletManager};
