#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use core_logic::{PacingConfig, Pacer, PrivateKey, RetryConfig};
use ethers::types::{Address, Bytes, H256, U256, U64};
use pharos_project::chain::{ChainClient, ClientFactory, TxConfirmation};
use pharos_project::contracts::ContractAddresses;
use pharos_project::workflow::WorkflowSettings;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MINT: [u8; 4] = [0xc6, 0xc3, 0xbb, 0xe6];
pub const ALLOWANCE: [u8; 4] = [0xdd, 0x62, 0xed, 0x3e];
pub const APPROVE: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];
pub const SUPPLY: [u8; 4] = [0x61, 0x7b, 0xa0, 0x37];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Call {
        wallet: Address,
        to: Address,
        selector: [u8; 4],
    },
    Send {
        wallet: Address,
        to: Address,
        selector: [u8; 4],
    },
    Pause(Duration),
}

impl Event {
    pub fn selector(&self) -> Option<[u8; 4]> {
        match self {
            Event::Call { selector, .. } | Event::Send { selector, .. } => Some(*selector),
            Event::Pause(_) => None,
        }
    }

    pub fn is_chain(&self) -> bool {
        !matches!(self, Event::Pause(_))
    }
}

/// Shared, ordered record of chain requests and pauses.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn chain_events(&self) -> Vec<Event> {
        self.events().into_iter().filter(Event::is_chain).collect()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Pause(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, selector: [u8; 4]) -> usize {
        self.events()
            .iter()
            .filter(|e| e.selector() == Some(selector))
            .count()
    }
}

/// Decides whether the n-th chain request (0-based) fails.
pub type FailurePlan = Arc<dyn Fn(usize, &Event) -> bool + Send + Sync>;

pub fn never_fail() -> FailurePlan {
    Arc::new(|_: usize, _: &Event| false)
}

pub fn always_fail() -> FailurePlan {
    Arc::new(|_: usize, _: &Event| true)
}

/// In-memory chain client that records every request.
pub struct MockChain {
    address: Address,
    log: EventLog,
    fail: FailurePlan,
    requests: AtomicUsize,
    allowances: Mutex<HashMap<Address, U256>>,
    default_allowance: U256,
}

impl MockChain {
    pub fn new(address: Address, log: EventLog) -> Self {
        Self {
            address,
            log,
            fail: never_fail(),
            requests: AtomicUsize::new(0),
            allowances: Mutex::new(HashMap::new()),
            default_allowance: U256::zero(),
        }
    }

    pub fn with_allowance(mut self, allowance: U256) -> Self {
        self.default_allowance = allowance;
        self
    }

    pub fn with_failures(mut self, fail: FailurePlan) -> Self {
        self.fail = fail;
        self
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn record(&self, event: Event) -> Result<usize> {
        let n = self.requests.fetch_add(1, Ordering::SeqCst);
        let failed = (self.fail)(n, &event);
        self.log.push(event);

        if failed {
            return Err(anyhow!("mock rpc error #{}", n + 1));
        }
        Ok(n)
    }
}

fn selector(data: &Bytes) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(&data[..4]);
    out
}

fn word(data: &Bytes, index: usize) -> U256 {
    let start = 4 + 32 * index;
    U256::from_big_endian(&data[start..start + 32])
}

#[async_trait]
impl ChainClient for MockChain {
    fn address(&self) -> Address {
        self.address
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.record(Event::Call {
            wallet: self.address,
            to,
            selector: selector(&data),
        })?;

        let allowance = self
            .allowances
            .lock()
            .unwrap()
            .get(&to)
            .copied()
            .unwrap_or(self.default_allowance);

        let mut out = [0u8; 32];
        allowance.to_big_endian(&mut out);
        Ok(Bytes::from(out.to_vec()))
    }

    async fn send_transaction(&self, to: Address, data: Bytes) -> Result<TxConfirmation> {
        let sel = selector(&data);
        let n = self.record(Event::Send {
            wallet: self.address,
            to,
            selector: sel,
        })?;

        if sel == APPROVE {
            self.allowances.lock().unwrap().insert(to, word(&data, 1));
        }

        Ok(TxConfirmation {
            tx_hash: H256::from_low_u64_be(n as u64 + 1),
            block_number: Some(U64::from(n as u64 + 100)),
        })
    }
}

/// Builds mock clients from numeric "keys"; anything else fails to parse.
pub struct MockFactory {
    pub log: EventLog,
    pub allowance: U256,
    pub fail: FailurePlan,
}

impl MockFactory {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            allowance: U256::zero(),
            fail: never_fail(),
        }
    }
}

impl ClientFactory for MockFactory {
    type Client = MockChain;

    fn connect(&self, key: &PrivateKey) -> Result<MockChain> {
        let id: u64 = key
            .expose()
            .parse()
            .map_err(|_| anyhow!("invalid private key"))?;

        Ok(MockChain::new(Address::from_low_u64_be(id), self.log.clone())
            .with_allowance(self.allowance)
            .with_failures(self.fail.clone()))
    }
}

/// Pacer that records the pause in the log and then sleeps.
pub struct RecordingPacer {
    log: EventLog,
}

impl RecordingPacer {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.log.push(Event::Pause(duration));
        tokio::time::sleep(duration).await;
    }
}

pub fn contracts() -> ContractAddresses {
    ContractAddresses {
        faucet: Address::repeat_byte(0xfa),
        lending_pool: Address::repeat_byte(0x11),
        gold: Address::repeat_byte(0xa1),
        nvidia: Address::repeat_byte(0xa2),
        tesla: Address::repeat_byte(0xa3),
    }
}

pub fn approve_amount() -> U256 {
    U256::from(1000u64) * U256::exp10(18)
}

pub fn settings() -> WorkflowSettings {
    WorkflowSettings {
        contracts: contracts(),
        approve_amount: approve_amount(),
        retry: RetryConfig::default(),
        pacing: PacingConfig::default(),
    }
}
