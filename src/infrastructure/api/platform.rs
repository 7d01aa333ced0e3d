// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::api::client::ApiClient;
use crate::domain::constants::{BROWSER_USER_AGENT, REPORT_TASK_ID};
use crate::domain::error::AppError;
use alloy::primitives::{Address, B256};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

// The transaction report rides a slower, more persistent policy than the
// default: the platform verifier can lag several blocks behind the chain.
const REPORT_MAX_RETRIES: u32 = 5;
const REPORT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Auth/session surface of the platform REST API.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Exchange a signed login message for a session token.
    async fn login(
        &self,
        address: Address,
        signature: &str,
        proxy: Option<&str>,
    ) -> Result<String, AppError>;

    async fn check_in(
        &self,
        address: Address,
        token: &str,
        proxy: Option<&str>,
    ) -> Result<(), AppError>;

    /// Report a finished transfer; returns the platform's verified flag.
    async fn report_transaction(
        &self,
        address: Address,
        token: &str,
        tx_hash: B256,
        proxy: Option<&str>,
    ) -> Result<bool, AppError>;
}

pub struct PharosClient {
    api: Arc<ApiClient>,
    base_url: String,
}

impl PharosClient {
    pub fn new(api: Arc<ApiClient>, base_url: impl Into<String>) -> Self {
        Self {
            api,
            base_url: base_url.into(),
        }
    }

    fn app_code(response: &Value) -> i64 {
        response.get("code").and_then(|c| c.as_i64()).unwrap_or(-1)
    }

    fn app_message(response: &Value) -> String {
        response
            .get("msg")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string()
    }
}

#[async_trait]
impl PlatformApi for PharosClient {
    async fn login(
        &self,
        address: Address,
        signature: &str,
        proxy: Option<&str>,
    ) -> Result<String, AppError> {
        let url = format!(
            "{}/user/login?address={}&signature={signature}",
            self.base_url,
            address.to_checksum(None)
        );
        let response = self.api.post(&url, Some(&json!({})), proxy, &[]).await?;

        if Self::app_code(&response) != 0 {
            return Err(AppError::Auth {
                address: address.to_checksum(None),
                reason: Self::app_message(&response),
            });
        }
        response
            .pointer("/data/jwt")
            .and_then(|j| j.as_str())
            .map(str::to_string)
            .ok_or_else(|| AppError::Auth {
                address: address.to_checksum(None),
                reason: "login response missing session token".into(),
            })
    }

    async fn check_in(
        &self,
        address: Address,
        token: &str,
        proxy: Option<&str>,
    ) -> Result<(), AppError> {
        let url = format!(
            "{}/sign/in?address={}",
            self.base_url,
            address.to_checksum(None)
        );
        let bearer = format!("Bearer {token}");
        let response = self
            .api
            .post(&url, Some(&json!({})), proxy, &[("Authorization", &bearer)])
            .await?;

        if Self::app_code(&response) != 0 {
            return Err(AppError::Auth {
                address: address.to_checksum(None),
                reason: Self::app_message(&response),
            });
        }
        Ok(())
    }

    async fn report_transaction(
        &self,
        address: Address,
        token: &str,
        tx_hash: B256,
        proxy: Option<&str>,
    ) -> Result<bool, AppError> {
        let url = format!(
            "{}/task/verify?address={}&task_id={REPORT_TASK_ID}&tx_hash={tx_hash:#x}",
            self.base_url,
            address.to_checksum(None)
        );
        let bearer = format!("Bearer {token}");
        let response = self
            .api
            .request(
                Method::POST,
                &url,
                None,
                proxy,
                &[
                    ("authorization", &bearer),
                    ("User-Agent", BROWSER_USER_AGENT),
                ],
                REPORT_MAX_RETRIES,
                REPORT_RETRY_DELAY,
            )
            .await?;

        let verified = Self::app_code(&response) == 0
            && response
                .pointer("/data/verified")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
        Ok(verified)
    }
}
