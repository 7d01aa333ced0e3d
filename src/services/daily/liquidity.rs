// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::fmt::short_hash;
use crate::common::time::deadline;
use crate::daily::account::Account;
use crate::daily::approval::ApprovalGuard;
use crate::daily::submitter::{TxPlan, TxSubmitter};
use crate::domain::constants::{
    CALL_DEADLINE_SECS, DVM_POOL, LIQUIDITY_GAS_LIMIT, LP_BASE_IN_WEI, LP_BASE_MIN_WEI,
    LP_QUOTE_IN_UNITS, LP_QUOTE_MIN_UNITS, LP_ROUTER, STABLE_TOKEN, SWAP_MAX_FEE_FLOOR,
    SWAP_PRIORITY_FEE_FLOOR, WRAPPED_NATIVE,
};
use crate::domain::error::AppError;
use crate::network::chain::FeeFloor;
use alloy::primitives::{B256, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    contract DvmRouter {
        function addDVMLiquidity(
            address dvmAddress,
            uint256 baseInAmount,
            uint256 quoteInAmount,
            uint256 baseMinAmount,
            uint256 quoteMinAmount,
            uint8 flag,
            uint256 deadLine
        ) external payable returns (uint256, uint256, uint256);
    }
}

/// Fixed-ratio WPHRS/USDT deposit into the DVM pool. No quoting step; the
/// amounts are protocol constants and the minimums bound slippage.
pub struct LiquidityExecutor {
    approvals: ApprovalGuard,
    submitter: TxSubmitter,
}

impl LiquidityExecutor {
    pub fn new(approvals: ApprovalGuard, submitter: TxSubmitter) -> Self {
        Self {
            approvals,
            submitter,
        }
    }

    pub async fn add_liquidity(&self, account: &Account, round: u32, total: u32) -> bool {
        tracing::info!(target: "liquidity", round, total, "Preparing liquidity addition");
        match self.try_add(account).await {
            Ok(hash) => {
                tracing::info!(
                    target: "liquidity",
                    round,
                    total,
                    hash = %short_hash(hash),
                    "Liquidity added"
                );
                true
            }
            Err(e) => {
                tracing::warn!(target: "liquidity", round, total, error = %e, "Liquidity addition failed");
                false
            }
        }
    }

    async fn try_add(&self, account: &Account) -> Result<B256, AppError> {
        let base_in = U256::from(LP_BASE_IN_WEI);
        let quote_in = U256::from(LP_QUOTE_IN_UNITS);

        let base_ready = self
            .approvals
            .ensure_allowance(account, WRAPPED_NATIVE, LP_ROUTER, base_in, "liquidity")
            .await?;
        if !base_ready {
            return Err(AppError::Execution("WPHRS balance too low for deposit".into()));
        }
        let quote_ready = self
            .approvals
            .ensure_allowance(account, STABLE_TOKEN, LP_ROUTER, quote_in, "liquidity")
            .await?;
        if !quote_ready {
            return Err(AppError::Execution("USDT balance too low for deposit".into()));
        }

        let input = DvmRouter::addDVMLiquidityCall {
            dvmAddress: DVM_POOL,
            baseInAmount: base_in,
            quoteInAmount: quote_in,
            baseMinAmount: U256::from(LP_BASE_MIN_WEI),
            quoteMinAmount: U256::from(LP_QUOTE_MIN_UNITS),
            flag: 0,
            deadLine: U256::from(deadline(CALL_DEADLINE_SECS)),
        }
        .abi_encode();

        let hash = self
            .submitter
            .send(
                account,
                TxPlan {
                    to: LP_ROUTER,
                    value: U256::ZERO,
                    input: input.into(),
                    gas_limit: LIQUIDITY_GAS_LIMIT,
                    fee_floor: FeeFloor {
                        max_fee_per_gas: SWAP_MAX_FEE_FLOOR,
                        max_priority_fee_per_gas: SWAP_PRIORITY_FEE_FLOOR,
                    },
                },
            )
            .await?;
        tracing::info!(target: "liquidity", hash = %short_hash(hash), "Deposit transaction sent");
        self.submitter.confirm(hash).await?;
        Ok(hash)
    }
}
