// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::domain::error::AppError;
use crate::network::provider::{ConnectionFactory, HttpProvider};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;
use alloy::rpc::types::BlockNumberOrTag;
use alloy::sol;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract Erc20 {
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

/// Network fee suggestion; either side may be absent when the node does not
/// answer, in which case call sites fall back to their fixed floors.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeEstimate {
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

#[derive(Debug, Clone, Copy)]
pub struct FeeFloor {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

impl FeeEstimate {
    pub fn or_floor(&self, floor: FeeFloor) -> (u128, u128) {
        (
            self.max_fee_per_gas.unwrap_or(floor.max_fee_per_gas),
            self.max_priority_fee_per_gas
                .unwrap_or(floor.max_priority_fee_per_gas),
        )
    }
}

/// Capability set the executors need from the blockchain endpoint.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn native_balance(&self, owner: Address) -> Result<U256, AppError>;
    async fn pending_nonce(&self, owner: Address) -> Result<u64, AppError>;
    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, AppError>;
    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, AppError>;
    async fn fee_estimate(&self) -> Result<FeeEstimate, AppError>;
    async fn submit_raw(&self, raw: Vec<u8>) -> Result<(), AppError>;
    /// Wait until the transaction is observed mined; returns its status.
    async fn await_inclusion(&self, hash: B256) -> Result<bool, AppError>;
}

pub struct RpcChain {
    provider: HttpProvider,
    receipt_poll: Duration,
    receipt_timeout: Duration,
}

impl RpcChain {
    pub fn new(provider: HttpProvider, receipt_poll: Duration, receipt_timeout: Duration) -> Self {
        Self {
            provider,
            receipt_poll,
            receipt_timeout,
        }
    }
}

#[async_trait]
impl ChainClient for RpcChain {
    async fn native_balance(&self, owner: Address) -> Result<U256, AppError> {
        self.provider
            .get_balance(owner)
            .await
            .map_err(|e| AppError::Connection(format!("Balance query failed: {}", e)))
    }

    async fn pending_nonce(&self, owner: Address) -> Result<u64, AppError> {
        self.provider
            .get_transaction_count(owner)
            .pending()
            .await
            .map_err(|e| AppError::Connection(format!("Pending nonce query failed: {}", e)))
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, AppError> {
        Erc20::new(token, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| AppError::Connection(format!("Token balance failed: {}", e)))
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, AppError> {
        Erc20::new(token, self.provider.clone())
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| AppError::Connection(format!("Allowance query failed: {}", e)))
    }

    async fn fee_estimate(&self) -> Result<FeeEstimate, AppError> {
        // Mirrors eth_feeHistory-less nodes: tip from the dedicated RPC, max
        // fee derived from the latest base fee. Missing pieces stay None and
        // the per-call floors take over.
        let priority = self.provider.get_max_priority_fee_per_gas().await.ok();
        let base = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .ok()
            .flatten()
            .and_then(|b| b.header.base_fee_per_gas)
            .map(|v| v as u128);

        let max_fee = match (base, priority) {
            (Some(base), Some(tip)) => Some(base.saturating_mul(2).saturating_add(tip)),
            _ => None,
        };

        Ok(FeeEstimate {
            max_fee_per_gas: max_fee,
            max_priority_fee_per_gas: priority,
        })
    }

    async fn submit_raw(&self, raw: Vec<u8>) -> Result<(), AppError> {
        self.provider
            .send_raw_transaction(raw.as_slice())
            .await
            .map_err(|e| AppError::Connection(format!("Transaction submit failed: {}", e)))?;
        Ok(())
    }

    async fn await_inclusion(&self, hash: B256) -> Result<bool, AppError> {
        let deadline = Instant::now() + self.receipt_timeout;
        loop {
            if let Ok(Some(receipt)) = self.provider.get_transaction_receipt(hash).await {
                return Ok(receipt.status());
            }
            if Instant::now() >= deadline {
                return Err(AppError::Transaction {
                    hash: format!("{hash:#x}"),
                    reason: "confirmation timed out".into(),
                });
            }
            sleep(self.receipt_poll).await;
        }
    }
}

/// Builds a per-account chain handle, probing the endpoint before use so a
/// dead or misproxied connection skips the account instead of failing later.
#[async_trait]
pub trait ChainConnector: Send + Sync {
    async fn connect(&self, proxy: Option<&str>) -> Result<Arc<dyn ChainClient>, AppError>;
}

pub struct RpcConnector {
    rpc_url: String,
    receipt_poll: Duration,
    receipt_timeout: Duration,
}

impl RpcConnector {
    pub fn new(rpc_url: String, receipt_poll: Duration, receipt_timeout: Duration) -> Self {
        Self {
            rpc_url,
            receipt_poll,
            receipt_timeout,
        }
    }
}

#[async_trait]
impl ChainConnector for RpcConnector {
    async fn connect(&self, proxy: Option<&str>) -> Result<Arc<dyn ChainClient>, AppError> {
        let provider = ConnectionFactory::http(&self.rpc_url, proxy)?;
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| AppError::Connection(format!("Endpoint probe failed: {}", e)))?;
        tracing::debug!(target: "rpc", chain_id, proxy = proxy.unwrap_or("none"), "Connected to endpoint");

        Ok(Arc::new(RpcChain::new(
            provider,
            self.receipt_poll,
            self.receipt_timeout,
        )))
    }
}
