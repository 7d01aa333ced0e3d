// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::api::route::RouteApi;
use crate::common::fmt::{short_hash, units_to_float};
use crate::daily::account::Account;
use crate::daily::approval::ApprovalGuard;
use crate::daily::submitter::{TxPlan, TxSubmitter};
use crate::domain::constants::{
    NATIVE_TOKEN, SWAP_GAS_LIMIT, SWAP_MAX_FEE_FLOOR, SWAP_PRIORITY_FEE_FLOOR, SWAP_ROUTER,
    token_decimals, token_symbol,
};
use crate::domain::error::AppError;
use crate::network::chain::FeeFloor;
use alloy::primitives::{Address, B256, U256};
use std::sync::Arc;

/// Quote, approve if needed, submit, confirm. Failures never escape the
/// executor; the cycle only sees a success flag.
pub struct SwapExecutor {
    routes: Arc<dyn RouteApi>,
    approvals: ApprovalGuard,
    submitter: TxSubmitter,
}

impl SwapExecutor {
    pub fn new(routes: Arc<dyn RouteApi>, approvals: ApprovalGuard, submitter: TxSubmitter) -> Self {
        Self {
            routes,
            approvals,
            submitter,
        }
    }

    pub async fn swap(
        &self,
        account: &Account,
        from_token: Address,
        to_token: Address,
        amount: U256,
        round: u32,
        total: u32,
    ) -> bool {
        tracing::info!(
            target: "swap",
            round,
            total,
            amount = units_to_float(amount, token_decimals(from_token)),
            from = token_symbol(from_token),
            to = token_symbol(to_token),
            "Preparing swap"
        );

        match self.try_swap(account, from_token, to_token, amount).await {
            Ok(hash) => {
                tracing::info!(
                    target: "swap",
                    round,
                    total,
                    hash = %short_hash(hash),
                    "Swap confirmed"
                );
                true
            }
            Err(e) => {
                tracing::warn!(target: "swap", round, total, error = %e, "Swap failed");
                false
            }
        }
    }

    async fn try_swap(
        &self,
        account: &Account,
        from_token: Address,
        to_token: Address,
        amount: U256,
    ) -> Result<B256, AppError> {
        let route = self
            .routes
            .quote(from_token, to_token, amount, account.address, account.proxy())
            .await?
            .ok_or_else(|| AppError::Execution("no usable swap route".into()))?;

        if from_token != NATIVE_TOKEN {
            let approved = self
                .approvals
                .ensure_allowance(account, from_token, SWAP_ROUTER, amount, "swap")
                .await?;
            if !approved {
                return Err(AppError::Execution(format!(
                    "{} balance too low for swap input",
                    token_symbol(from_token)
                )));
            }
        }

        let hash = self
            .submitter
            .send(
                account,
                TxPlan {
                    to: route.to,
                    value: route.value,
                    input: route.data,
                    gas_limit: SWAP_GAS_LIMIT,
                    fee_floor: FeeFloor {
                        max_fee_per_gas: SWAP_MAX_FEE_FLOOR,
                        max_priority_fee_per_gas: SWAP_PRIORITY_FEE_FLOOR,
                    },
                },
            )
            .await?;
        tracing::info!(target: "swap", hash = %short_hash(hash), "Swap transaction sent");
        self.submitter.confirm(hash).await?;
        Ok(hash)
    }
}
