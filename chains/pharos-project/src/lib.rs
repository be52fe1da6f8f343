//! Pharos testnet supply runner.
//!
//! Claims faucet tokens, approves the lending pool and supplies random
//! amounts for every configured wallet, one wallet at a time.

pub mod amount;
pub mod batch;
pub mod chain;
pub mod config;
pub mod contracts;
pub mod steps;
pub mod workflow;

pub use batch::{AccountReport, AccountStatus, BatchReport, BatchRunner};
pub use workflow::{AccountWorkflow, StepRecord, WorkflowOutcome, WorkflowSettings};
