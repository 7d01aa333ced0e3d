// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::domain::error::AppError;
use alloy::network::Ethereum;
use alloy::providers::RootProvider;
use alloy::transports::http::Http;
use alloy_rpc_client::RpcClient;
use std::time::Duration;
use url::Url;

pub type HttpProvider = RootProvider<Ethereum>;

const RPC_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ConnectionFactory;

impl ConnectionFactory {
    /// HTTP provider, optionally tunnelled through a per-account proxy.
    pub fn http(rpc_url: &str, proxy: Option<&str>) -> Result<HttpProvider, AppError> {
        let url =
            Url::parse(rpc_url).map_err(|e| AppError::Config(format!("Invalid RPC URL: {}", e)))?;

        let Some(proxy_uri) = proxy else {
            return Ok(RootProvider::new_http(url));
        };

        let proxy = reqwest::Proxy::all(proxy_uri)
            .map_err(|e| AppError::Config(format!("Invalid proxy URI {proxy_uri}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(RPC_TIMEOUT)
            .proxy(proxy)
            .build()
            .map_err(|e| AppError::Connection(format!("Proxied HTTP client build failed: {e}")))?;

        let transport = Http::with_client(client, url);
        Ok(RootProvider::new(RpcClient::new(transport, false)))
    }
}
