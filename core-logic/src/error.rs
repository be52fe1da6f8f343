//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid RPC URL format: '{url}'")]
    InvalidRpcUrl { url: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Parse error for '{field}': {source}")]
    ParseError {
        field: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Wallet and credential errors
#[derive(Error, Debug, Clone)]
pub enum WalletError {
    #[error("No private keys found: set {numbered} or {fallback}")]
    NoCredentials { numbered: String, fallback: String },
}

/// Network and RPC-related errors
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Transaction {tx_hash} reverted in block {block}")]
    Reverted { tx_hash: String, block: String },

    #[error("Transaction {tx_hash} dropped before confirmation")]
    Dropped { tx_hash: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}
