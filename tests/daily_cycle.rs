// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

mod support;

use alloy::consensus::{Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{Address, U256};
use alloy::signers::local::PrivateKeySigner;
use pharos_daily::common::sampling::Sampler;
use pharos_daily::daily::account::Account;
use pharos_daily::daily::engine::{CycleSettings, DailyEngine};
use pharos_daily::daily::session::SessionManager;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use support::{MockChain, MockConnector, MockPlatform, MockRoutes};
use tokio_util::sync::CancellationToken;

fn fast_settings(swaps: u32, liquidity: u32, transfers: u32) -> CycleSettings {
    CycleSettings {
        swap_repetitions: swaps,
        liquidity_repetitions: liquidity,
        transfer_repetitions: transfers,
        step_delay_min: Duration::ZERO,
        step_delay_max: Duration::ZERO,
        transfer_delay: Duration::ZERO,
        account_delay: Duration::ZERO,
        cycle_interval: Duration::from_secs(24 * 60 * 60),
    }
}

fn test_accounts(n: usize) -> Vec<Account> {
    (0..n)
        .map(|_| Account::new(PrivateKeySigner::random(), None))
        .collect()
}

fn test_recipients(n: usize) -> Vec<Address> {
    (0..n).map(|i| Address::from([0x40 + i as u8; 20])).collect()
}

fn build_engine(
    chain: Arc<MockChain>,
    routes: Arc<MockRoutes>,
    platform: Arc<MockPlatform>,
    accounts: Vec<Account>,
    recipients: Vec<Address>,
    settings: CycleSettings,
) -> DailyEngine {
    DailyEngine::new(
        Arc::new(MockConnector::new(chain)),
        routes,
        SessionManager::new(platform),
        accounts,
        recipients,
        settings,
        Sampler::seeded(1234),
        CancellationToken::new(),
    )
}

#[tokio::test]
async fn full_cycle_hits_every_step_for_every_account() {
    let chain = Arc::new(MockChain::new());
    let routes = Arc::new(MockRoutes::new(true));
    let platform = Arc::new(MockPlatform::new());

    let engine = build_engine(
        chain.clone(),
        routes.clone(),
        platform.clone(),
        test_accounts(2),
        test_recipients(3),
        fast_settings(1, 0, 1),
    );
    let report = engine.run_cycle().await;

    assert_eq!(report.accounts_reached, 2);
    assert_eq!(report.swaps, 2);
    assert_eq!(report.liquidity_additions, 0);
    assert_eq!(report.transfers, 2);
    assert_eq!(report.check_ins, 2);

    assert_eq!(platform.logins.load(Ordering::SeqCst), 2);
    assert_eq!(platform.check_ins.load(Ordering::SeqCst), 2);
    assert_eq!(platform.reports.load(Ordering::SeqCst), 2);
    assert_eq!(routes.calls.load(Ordering::SeqCst), 2);

    // One swap and one transfer per account, no approvals (allowance is
    // already unlimited in the default mock).
    let sent = chain.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 4);

    // Accounts run strictly in sequence, so the decoded nonces come out as
    // each account's own 0, 1 progression.
    let nonces: Vec<u64> = sent
        .iter()
        .map(|raw| {
            let envelope = TxEnvelope::decode_2718(&mut raw.as_slice()).expect("decodable tx");
            envelope.nonce()
        })
        .collect();
    assert_eq!(nonces, vec![0, 1, 0, 1]);
}

#[tokio::test]
async fn missing_routes_only_disable_the_swap_phase() {
    let chain = Arc::new(MockChain::new());
    let routes = Arc::new(MockRoutes::new(false));
    let platform = Arc::new(MockPlatform::new());

    let engine = build_engine(
        chain.clone(),
        routes.clone(),
        platform.clone(),
        test_accounts(2),
        test_recipients(3),
        fast_settings(1, 0, 1),
    );
    let report = engine.run_cycle().await;

    assert_eq!(report.swaps, 0);
    assert_eq!(report.transfers, 2);
    assert_eq!(report.check_ins, 2);
    assert!(routes.calls.load(Ordering::SeqCst) >= 2);

    // Only the transfers reached the chain.
    assert_eq!(chain.sent_count(), 2);
}

#[tokio::test]
async fn low_native_balance_stops_transfers_without_touching_swaps() {
    let chain = Arc::new(MockChain::new());
    // Below the smallest possible transfer draw (0.0001 native).
    *chain.native_balance.lock().unwrap() = U256::from(1u64);
    let routes = Arc::new(MockRoutes::new(true));
    let platform = Arc::new(MockPlatform::new());

    let engine = build_engine(
        chain.clone(),
        routes,
        platform.clone(),
        test_accounts(2),
        test_recipients(3),
        fast_settings(1, 0, 5),
    );
    let report = engine.run_cycle().await;

    assert_eq!(report.swaps, 2);
    assert_eq!(report.transfers, 0);
    assert_eq!(platform.reports.load(Ordering::SeqCst), 0);
    // Two swap transactions, zero transfer transactions.
    assert_eq!(chain.sent_count(), 2);
}

#[tokio::test]
async fn one_failing_login_does_not_block_the_next_account() {
    let chain = Arc::new(MockChain::new());
    let routes = Arc::new(MockRoutes::new(true));
    let accounts = test_accounts(2);
    let platform = Arc::new(MockPlatform::failing_for([accounts[0].address]));

    let engine = build_engine(
        chain.clone(),
        routes,
        platform.clone(),
        accounts,
        test_recipients(3),
        fast_settings(1, 0, 1),
    );
    let report = engine.run_cycle().await;

    // Both logins attempted; only the second account ran its activity.
    assert_eq!(platform.logins.load(Ordering::SeqCst), 2);
    assert_eq!(report.accounts_reached, 1);
    assert_eq!(report.swaps, 1);
    assert_eq!(report.transfers, 1);
    assert_eq!(report.check_ins, 1);
    assert_eq!(chain.sent_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancellation_is_observed_between_cycles_not_inside_them() {
    let chain = Arc::new(MockChain::new());
    let routes = Arc::new(MockRoutes::new(true));
    let platform = Arc::new(MockPlatform::new());

    let shutdown = CancellationToken::new();
    // Cancelled before the loop even starts: the first cycle must still run
    // to completion, and only the re-arm is skipped.
    shutdown.cancel();

    let engine = DailyEngine::new(
        Arc::new(MockConnector::new(chain)),
        routes,
        SessionManager::new(platform.clone()),
        test_accounts(2),
        test_recipients(3),
        fast_settings(1, 0, 0),
        Sampler::seeded(9),
        shutdown,
    );

    engine.run().await.expect("clean shutdown");
    assert_eq!(platform.logins.load(Ordering::SeqCst), 2);
    assert_eq!(platform.check_ins.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unreachable_endpoint_skips_the_account_before_login() {
    let chain = Arc::new(MockChain::new());
    let routes = Arc::new(MockRoutes::new(true));
    let platform = Arc::new(MockPlatform::new());

    let mut connector = MockConnector::new(chain.clone());
    connector.reachable = false;
    let engine = DailyEngine::new(
        Arc::new(connector),
        routes,
        SessionManager::new(platform.clone()),
        test_accounts(2),
        test_recipients(3),
        fast_settings(1, 1, 1),
        Sampler::seeded(1),
        CancellationToken::new(),
    );
    let report = engine.run_cycle().await;

    assert_eq!(report.accounts_reached, 0);
    assert_eq!(platform.logins.load(Ordering::SeqCst), 0);
    assert_eq!(chain.sent_count(), 0);
}
