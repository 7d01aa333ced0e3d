// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::fmt::{short_address, short_hash, units_to_float};
use crate::common::sampling::Sampler;
use crate::daily::account::Account;
use crate::daily::session::SessionManager;
use crate::daily::submitter::{TxPlan, TxSubmitter};
use crate::domain::constants::{
    NATIVE_DECIMALS, TRANSFER_GAS_LIMIT, TRANSFER_MAX_FEE_FLOOR, TRANSFER_PRIORITY_FEE_FLOOR,
};
use crate::domain::error::AppError;
use crate::network::chain::{ChainClient, FeeFloor};
use alloy::primitives::{Address, B256, Bytes, U256};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Native-asset transfers to random third-party recipients, each followed by
/// a best-effort report to the platform.
pub struct TransferExecutor {
    chain: Arc<dyn ChainClient>,
    submitter: TxSubmitter,
}

impl TransferExecutor {
    pub fn new(chain: Arc<dyn ChainClient>, submitter: TxSubmitter) -> Self {
        Self { chain, submitter }
    }

    /// Run the whole repetition loop for one account and return how many
    /// transfers confirmed. An insufficient balance aborts the remaining
    /// repetitions outright; later attempts would be just as underfunded.
    pub async fn run(
        &self,
        account: &Account,
        recipients: &[Address],
        repetitions: u32,
        session: &SessionManager,
        sampler: &Mutex<Sampler>,
        pause: Duration,
    ) -> u32 {
        let mut successful = 0;

        for round in 1..=repetitions {
            let (recipient, amount) = {
                let mut sampler = sampler.lock().await;
                let recipient = sampler.recipient(recipients, account.address);
                (recipient, sampler.transfer_amount())
            };
            let Some(recipient) = recipient else {
                tracing::warn!(target: "transfer", "No foreign recipient available; skipping transfers");
                break;
            };

            match self.chain.native_balance(account.address).await {
                Ok(balance) if balance < amount => {
                    tracing::warn!(
                        target: "transfer",
                        balance = %balance,
                        required = %amount,
                        "Native balance too low; aborting remaining transfers"
                    );
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(target: "transfer", round, repetitions, error = %e, "Balance check failed");
                    continue;
                }
            }

            tracing::info!(
                target: "transfer",
                round,
                repetitions,
                amount = units_to_float(amount, NATIVE_DECIMALS),
                recipient = %short_address(recipient),
                "Sending native transfer"
            );
            match self.try_transfer(account, recipient, amount).await {
                Ok(hash) => {
                    successful += 1;
                    session.report_transaction(account, hash).await;
                    sleep(pause).await;
                }
                Err(e) => {
                    tracing::warn!(
                        target: "transfer",
                        round,
                        repetitions,
                        recipient = %short_address(recipient),
                        error = %e,
                        "Transfer failed"
                    );
                }
            }
        }

        successful
    }

    async fn try_transfer(
        &self,
        account: &Account,
        recipient: Address,
        amount: U256,
    ) -> Result<B256, AppError> {
        let hash = self
            .submitter
            .send(
                account,
                TxPlan {
                    to: recipient,
                    value: amount,
                    input: Bytes::new(),
                    gas_limit: TRANSFER_GAS_LIMIT,
                    fee_floor: FeeFloor {
                        max_fee_per_gas: TRANSFER_MAX_FEE_FLOOR,
                        max_priority_fee_per_gas: TRANSFER_PRIORITY_FEE_FLOOR,
                    },
                },
            )
            .await?;
        tracing::info!(target: "transfer", hash = %short_hash(hash), "Transfer sent");
        self.submitter.confirm(hash).await?;
        Ok(hash)
    }
}
