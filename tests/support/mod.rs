// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

//! Scripted collaborators standing in for the chain endpoint, the quoting
//! service and the platform API.
#![allow(dead_code)]

use alloy::primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;
use pharos_daily::api::platform::PlatformApi;
use pharos_daily::api::route::{RouteApi, RouteQuote};
use pharos_daily::domain::constants::SWAP_ROUTER;
use pharos_daily::domain::error::AppError;
use pharos_daily::network::chain::{ChainClient, ChainConnector, FeeEstimate};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct MockChain {
    pub native_balance: Mutex<U256>,
    pub token_balance: Mutex<U256>,
    pub allowance: Mutex<U256>,
    /// Raw transaction payloads accepted by `submit_raw`, in order.
    pub sent: Mutex<Vec<Vec<u8>>>,
    /// When set, any submitted transaction flips the allowance to MAX,
    /// imitating a confirmed unlimited approval.
    pub grant_allowance_on_submit: bool,
    pub inclusion_status: bool,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            native_balance: Mutex::new(U256::from(10u128.pow(18))),
            token_balance: Mutex::new(U256::from(10u128.pow(24))),
            allowance: Mutex::new(U256::MAX),
            sent: Mutex::new(Vec::new()),
            grant_allowance_on_submit: false,
            inclusion_status: true,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn native_balance(&self, _owner: Address) -> Result<U256, AppError> {
        Ok(*self.native_balance.lock().unwrap())
    }

    async fn pending_nonce(&self, _owner: Address) -> Result<u64, AppError> {
        Ok(0)
    }

    async fn token_balance(&self, _token: Address, _owner: Address) -> Result<U256, AppError> {
        Ok(*self.token_balance.lock().unwrap())
    }

    async fn allowance(
        &self,
        _token: Address,
        _owner: Address,
        _spender: Address,
    ) -> Result<U256, AppError> {
        Ok(*self.allowance.lock().unwrap())
    }

    async fn fee_estimate(&self) -> Result<FeeEstimate, AppError> {
        Ok(FeeEstimate::default())
    }

    async fn submit_raw(&self, raw: Vec<u8>) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(raw);
        if self.grant_allowance_on_submit {
            *self.allowance.lock().unwrap() = U256::MAX;
        }
        Ok(())
    }

    async fn await_inclusion(&self, _hash: B256) -> Result<bool, AppError> {
        Ok(self.inclusion_status)
    }
}

pub struct MockConnector {
    pub chain: Arc<MockChain>,
    pub reachable: bool,
}

impl MockConnector {
    pub fn new(chain: Arc<MockChain>) -> Self {
        Self {
            chain,
            reachable: true,
        }
    }
}

#[async_trait]
impl ChainConnector for MockConnector {
    async fn connect(&self, _proxy: Option<&str>) -> Result<Arc<dyn ChainClient>, AppError> {
        if self.reachable {
            Ok(self.chain.clone())
        } else {
            Err(AppError::Connection("scripted outage".into()))
        }
    }
}

pub struct MockRoutes {
    pub available: bool,
    pub calls: AtomicUsize,
}

impl MockRoutes {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RouteApi for MockRoutes {
    async fn quote(
        &self,
        _from_token: Address,
        _to_token: Address,
        _amount: U256,
        _user: Address,
        _proxy: Option<&str>,
    ) -> Result<Option<RouteQuote>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.available {
            Ok(Some(RouteQuote {
                to: SWAP_ROUTER,
                data: Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
                value: U256::ZERO,
            }))
        } else {
            Ok(None)
        }
    }
}

pub struct MockPlatform {
    pub failing_logins: HashSet<Address>,
    pub logins: AtomicUsize,
    pub check_ins: AtomicUsize,
    pub reports: AtomicUsize,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            failing_logins: HashSet::new(),
            logins: AtomicUsize::new(0),
            check_ins: AtomicUsize::new(0),
            reports: AtomicUsize::new(0),
        }
    }

    pub fn failing_for(addresses: impl IntoIterator<Item = Address>) -> Self {
        let mut platform = Self::new();
        platform.failing_logins = addresses.into_iter().collect();
        platform
    }
}

#[async_trait]
impl PlatformApi for MockPlatform {
    async fn login(
        &self,
        address: Address,
        _signature: &str,
        _proxy: Option<&str>,
    ) -> Result<String, AppError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        if self.failing_logins.contains(&address) {
            Err(AppError::Auth {
                address: format!("{address:#x}"),
                reason: "scripted login rejection".into(),
            })
        } else {
            Ok(format!("jwt-{address:#x}"))
        }
    }

    async fn check_in(
        &self,
        _address: Address,
        token: &str,
        _proxy: Option<&str>,
    ) -> Result<(), AppError> {
        assert!(token.starts_with("jwt-"), "check-in without session token");
        self.check_ins.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn report_transaction(
        &self,
        _address: Address,
        token: &str,
        _tx_hash: B256,
        _proxy: Option<&str>,
    ) -> Result<bool, AppError> {
        assert!(token.starts_with("jwt-"), "report without session token");
        self.reports.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}
