// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::api::route::RouteApi;
use crate::common::fmt::short_address;
use crate::common::sampling::Sampler;
use crate::daily::account::Account;
use crate::daily::approval::ApprovalGuard;
use crate::daily::liquidity::LiquidityExecutor;
use crate::daily::session::SessionManager;
use crate::daily::submitter::TxSubmitter;
use crate::daily::swap::SwapExecutor;
use crate::daily::transfer::TransferExecutor;
use crate::domain::constants::{NATIVE_TOKEN, STABLE_TOKEN};
use crate::domain::error::AppError;
use crate::network::chain::ChainConnector;
use crate::network::nonce::NonceTracker;
use alloy::primitives::Address;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Pacing and repetition knobs for one cycle. Tests collapse the delays.
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub swap_repetitions: u32,
    pub liquidity_repetitions: u32,
    pub transfer_repetitions: u32,
    /// Randomized pause window after successful swap/liquidity repetitions.
    pub step_delay_min: Duration,
    pub step_delay_max: Duration,
    /// Fixed pause after each confirmed transfer.
    pub transfer_delay: Duration,
    /// Fixed pause between accounts.
    pub account_delay: Duration,
    /// Interval between whole cycles.
    pub cycle_interval: Duration,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            swap_repetitions: 10,
            liquidity_repetitions: 10,
            transfer_repetitions: 10,
            step_delay_min: Duration::from_secs(15),
            step_delay_max: Duration::from_secs(30),
            transfer_delay: Duration::from_secs(5),
            account_delay: Duration::from_secs(60),
            cycle_interval: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Aggregate outcome of one cycle across all accounts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub accounts_reached: u32,
    pub swaps: u32,
    pub liquidity_additions: u32,
    pub transfers: u32,
    pub check_ins: u32,
}

/// Drives every account through the daily step sequence, strictly one step
/// at a time, then re-arms itself after the configured interval.
///
/// Failures are contained per step or per account; the cycle always reaches
/// every account and always reschedules.
pub struct DailyEngine {
    connector: Arc<dyn ChainConnector>,
    routes: Arc<dyn RouteApi>,
    session: SessionManager,
    accounts: Vec<Account>,
    recipients: Vec<Address>,
    nonces: Arc<NonceTracker>,
    sampler: Mutex<Sampler>,
    settings: CycleSettings,
    shutdown: CancellationToken,
}

impl DailyEngine {
    pub fn new(
        connector: Arc<dyn ChainConnector>,
        routes: Arc<dyn RouteApi>,
        session: SessionManager,
        accounts: Vec<Account>,
        recipients: Vec<Address>,
        settings: CycleSettings,
        sampler: Sampler,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            connector,
            routes,
            session,
            accounts,
            recipients,
            nonces: Arc::new(NonceTracker::new()),
            sampler: Mutex::new(sampler),
            settings,
            shutdown,
        }
    }

    /// Resident loop: run a cycle, then sleep the fixed interval. The token
    /// is only observed between cycles; there is no mid-cycle cancellation.
    pub async fn run(&self) -> Result<(), AppError> {
        loop {
            let report = self.run_cycle().await;
            tracing::info!(
                target: "engine",
                accounts = report.accounts_reached,
                swaps = report.swaps,
                liquidity = report.liquidity_additions,
                transfers = report.transfers,
                check_ins = report.check_ins,
                next_run_hours = self.settings.cycle_interval.as_secs() / 3600,
                "Daily cycle complete; waiting for next run"
            );

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!(target: "engine", "Shutdown requested; daily loop stopped");
                    return Ok(());
                }
                _ = sleep(self.settings.cycle_interval) => {}
            }
        }
    }

    pub async fn run_cycle(&self) -> CycleReport {
        tracing::info!(
            target: "engine",
            accounts = self.accounts.len(),
            "Starting daily cycle"
        );
        let mut report = CycleReport::default();

        for (index, account) in self.accounts.iter().enumerate() {
            tracing::info!(
                target: "engine",
                account = index + 1,
                total = self.accounts.len(),
                address = %short_address(account.address),
                proxy = account.proxy().unwrap_or("none"),
                "Processing account"
            );

            let chain = match self.connector.connect(account.proxy()).await {
                Ok(chain) => chain,
                Err(e) => {
                    tracing::warn!(target: "engine", error = %e, "Endpoint unreachable; skipping account");
                    continue;
                }
            };

            if !self.session.login(account).await {
                tracing::warn!(target: "engine", "Login failed; skipping daily activity for account");
                continue;
            }
            report.accounts_reached += 1;

            let submitter = TxSubmitter::new(chain.clone(), self.nonces.clone());
            let approvals = ApprovalGuard::new(chain.clone(), submitter.clone());

            report.swaps += self
                .swap_phase(account, &approvals, &submitter)
                .await;
            report.liquidity_additions += self
                .liquidity_phase(account, &approvals, &submitter)
                .await;

            if self.recipients.is_empty() {
                tracing::info!(target: "engine", "No recipient list; skipping transfers");
            } else if self.settings.transfer_repetitions > 0 {
                let transfers = TransferExecutor::new(chain.clone(), submitter.clone());
                let confirmed = transfers
                    .run(
                        account,
                        &self.recipients,
                        self.settings.transfer_repetitions,
                        &self.session,
                        &self.sampler,
                        self.settings.transfer_delay,
                    )
                    .await;
                tracing::info!(target: "engine", confirmed, "Transfer phase finished");
                report.transfers += confirmed;
            }

            if self.session.check_in(account).await {
                report.check_ins += 1;
            }

            if index + 1 < self.accounts.len() {
                tracing::info!(
                    target: "engine",
                    delay_secs = self.settings.account_delay.as_secs(),
                    "Waiting before next account"
                );
                sleep(self.settings.account_delay).await;
            }
        }

        report
    }

    /// Alternating-direction swaps: odd rounds sell the native asset, even
    /// rounds sell the stable back.
    async fn swap_phase(
        &self,
        account: &Account,
        approvals: &ApprovalGuard,
        submitter: &TxSubmitter,
    ) -> u32 {
        let total = self.settings.swap_repetitions;
        let executor = SwapExecutor::new(
            self.routes.clone(),
            approvals.clone(),
            submitter.clone(),
        );

        let mut successful = 0;
        for round in 1..=total {
            let native_to_stable = round % 2 == 1;
            let (from_token, to_token) = if native_to_stable {
                (NATIVE_TOKEN, STABLE_TOKEN)
            } else {
                (STABLE_TOKEN, NATIVE_TOKEN)
            };
            let amount = self.sampler.lock().await.swap_amount(from_token);

            if executor
                .swap(account, from_token, to_token, amount, round, total)
                .await
            {
                successful += 1;
                if round < total {
                    self.pause_between_steps("swap").await;
                }
            }
        }

        tracing::info!(target: "engine", successful, total, "Swap phase finished");
        successful
    }

    async fn liquidity_phase(
        &self,
        account: &Account,
        approvals: &ApprovalGuard,
        submitter: &TxSubmitter,
    ) -> u32 {
        let total = self.settings.liquidity_repetitions;
        let executor = LiquidityExecutor::new(approvals.clone(), submitter.clone());

        let mut successful = 0;
        for round in 1..=total {
            if executor.add_liquidity(account, round, total).await {
                successful += 1;
                if round < total {
                    self.pause_between_steps("liquidity").await;
                }
            }
        }

        tracing::info!(target: "engine", successful, total, "Liquidity phase finished");
        successful
    }

    async fn pause_between_steps(&self, phase: &str) {
        let delay = self
            .sampler
            .lock()
            .await
            .step_delay(self.settings.step_delay_min, self.settings.step_delay_max);
        tracing::info!(
            target: "engine",
            phase,
            delay_secs = delay.as_secs(),
            "Pausing before next repetition"
        );
        sleep(delay).await;
    }
}
