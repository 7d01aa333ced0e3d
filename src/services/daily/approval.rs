// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::fmt::short_hash;
use crate::daily::account::Account;
use crate::daily::submitter::{TxPlan, TxSubmitter};
use crate::domain::constants::{
    APPROVE_GAS_LIMIT, APPROVE_MAX_FEE_FLOOR, APPROVE_PRIORITY_FEE_FLOOR, token_symbol,
};
use crate::domain::error::AppError;
use crate::network::chain::{ChainClient, Erc20, FeeFloor};
use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use std::sync::Arc;

/// Makes sure a spender can move `amount` of the owner's tokens before a
/// value-moving call, approving on demand.
///
/// Approvals are unlimited (`U256::MAX`), so each (token, spender) pair costs
/// at most one on-chain write for the life of the process.
#[derive(Clone)]
pub struct ApprovalGuard {
    chain: Arc<dyn ChainClient>,
    submitter: TxSubmitter,
}

impl ApprovalGuard {
    pub fn new(chain: Arc<dyn ChainClient>, submitter: TxSubmitter) -> Self {
        Self { chain, submitter }
    }

    /// `Ok(false)` means the balance cannot cover `amount`; no approval is
    /// attempted in that case. `Ok(true)` means the allowance now suffices,
    /// including a freshly confirmed unlimited approval.
    pub async fn ensure_allowance(
        &self,
        account: &Account,
        token: Address,
        spender: Address,
        amount: U256,
        context: &str,
    ) -> Result<bool, AppError> {
        let symbol = token_symbol(token);

        let balance = self.chain.token_balance(token, account.address).await?;
        if balance < amount {
            tracing::warn!(
                target: "approval",
                context,
                token = symbol,
                balance = %balance,
                required = %amount,
                "Token balance below required amount"
            );
            return Ok(false);
        }

        let allowance = self
            .chain
            .allowance(token, account.address, spender)
            .await?;
        if allowance >= amount {
            return Ok(true);
        }

        tracing::info!(target: "approval", context, token = symbol, "Approving spender");
        let input = Erc20::approveCall {
            spender,
            amount: U256::MAX,
        }
        .abi_encode();

        let hash = self
            .submitter
            .send(
                account,
                TxPlan {
                    to: token,
                    value: U256::ZERO,
                    input: input.into(),
                    gas_limit: APPROVE_GAS_LIMIT,
                    fee_floor: FeeFloor {
                        max_fee_per_gas: APPROVE_MAX_FEE_FLOOR,
                        max_priority_fee_per_gas: APPROVE_PRIORITY_FEE_FLOOR,
                    },
                },
            )
            .await?;
        tracing::info!(
            target: "approval",
            context,
            token = symbol,
            hash = %short_hash(hash),
            "Approval submitted"
        );
        self.submitter.confirm(hash).await?;
        Ok(true)
    }
}
