// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::daily::account::Account;
use crate::domain::constants::CHAIN_ID;
use crate::domain::error::AppError;
use crate::network::chain::{ChainClient, FeeFloor};
use crate::network::nonce::NonceTracker;
use alloy::consensus::{SignableTransaction, TxEip1559, TxEnvelope};
use alloy::eips::eip2718::Encodable2718;
use alloy::eips::eip2930::AccessList;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, B256, Bytes, TxKind, U256};
use std::sync::Arc;

/// Everything a value-moving call needs besides nonce and fees.
pub struct TxPlan {
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
    pub gas_limit: u64,
    pub fee_floor: FeeFloor,
}

/// Builds, signs and submits EIP-1559 transactions for one chain handle,
/// pulling nonces from the shared tracker and fees from the endpoint with
/// per-call floors.
#[derive(Clone)]
pub struct TxSubmitter {
    chain: Arc<dyn ChainClient>,
    nonces: Arc<NonceTracker>,
}

impl TxSubmitter {
    pub fn new(chain: Arc<dyn ChainClient>, nonces: Arc<NonceTracker>) -> Self {
        Self { chain, nonces }
    }

    pub async fn send(&self, account: &Account, plan: TxPlan) -> Result<B256, AppError> {
        let nonce = self
            .nonces
            .next_nonce(self.chain.as_ref(), account.address)
            .await?;
        let fees = self.chain.fee_estimate().await?;
        let (max_fee_per_gas, max_priority_fee_per_gas) = fees.or_floor(plan.fee_floor);

        let mut tx = TxEip1559 {
            chain_id: CHAIN_ID,
            nonce,
            gas_limit: plan.gas_limit,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            to: TxKind::Call(plan.to),
            value: plan.value,
            access_list: AccessList::default(),
            input: plan.input,
        };

        let signature = TxSignerSync::sign_transaction_sync(&account.signer, &mut tx)
            .map_err(|e| AppError::Signing(format!("Sign tx failed: {}", e)))?;
        let signed: TxEnvelope = tx.into_signed(signature).into();
        let hash = *signed.tx_hash();

        self.chain.submit_raw(signed.encoded_2718()).await?;
        Ok(hash)
    }

    /// Block until the transaction is mined; a revert is a step failure.
    pub async fn confirm(&self, hash: B256) -> Result<(), AppError> {
        if self.chain.await_inclusion(hash).await? {
            Ok(())
        } else {
            Err(AppError::Transaction {
                hash: format!("{hash:#x}"),
                reason: "reverted on-chain".into(),
            })
        }
    }
}
