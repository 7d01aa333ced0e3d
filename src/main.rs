// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use clap::Parser;
use pharos_daily::api::client::ApiClient;
use pharos_daily::api::platform::{PharosClient, PlatformApi};
use pharos_daily::api::route::{DodoRouteClient, RouteApi};
use pharos_daily::app::config::{Settings, load_private_keys, load_proxies, load_recipients};
use pharos_daily::app::logging::setup_logging;
use pharos_daily::common::sampling::Sampler;
use pharos_daily::daily::account::Account;
use pharos_daily::daily::engine::DailyEngine;
use pharos_daily::daily::session::SessionManager;
use pharos_daily::domain::constants::PLATFORM_API_BASE;
use pharos_daily::domain::error::AppError;
use pharos_daily::network::chain::{ChainConnector, RpcConnector};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(author, version, about = "pharos daily activity driver")]
struct Cli {
    /// Path to config file (default: config.{toml,json,...})
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let settings = Settings::load_with_path(cli.config.as_deref())?;
    setup_logging(if settings.debug { "debug" } else { "info" }, false);

    let signers = load_private_keys(&settings.private_key_file);
    if signers.is_empty() {
        tracing::error!(
            path = %settings.private_key_file,
            "No usable private keys; nothing to do"
        );
        return Err(AppError::Config("no usable private keys".into()));
    }
    let proxies = load_proxies(&settings.proxy_file);
    let recipients = load_recipients(&settings.wallet_file);
    let accounts = Account::bind_proxies(signers, &proxies);

    let api = Arc::new(ApiClient::new());
    let routes: Arc<dyn RouteApi> = Arc::new(DodoRouteClient::new(api.clone()));
    let platform: Arc<dyn PlatformApi> = Arc::new(PharosClient::new(api, PLATFORM_API_BASE));
    let connector: Arc<dyn ChainConnector> = Arc::new(RpcConnector::new(
        settings.rpc_url.clone(),
        settings.receipt_poll(),
        settings.receipt_timeout(),
    ));

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received; stopping after the current cycle");
            signal_token.cancel();
        }
    });

    let engine = DailyEngine::new(
        connector,
        routes,
        SessionManager::new(platform),
        accounts,
        recipients,
        settings.cycle_settings(),
        Sampler::from_entropy(),
        shutdown,
    );

    engine.run().await
}
