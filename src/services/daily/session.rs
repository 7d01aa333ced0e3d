// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::api::platform::PlatformApi;
use crate::common::fmt::{short_address, short_hash};
use crate::daily::account::Account;
use crate::domain::constants::LOGIN_MESSAGE;
use alloy::primitives::{Address, B256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Signature-based login and the per-address session token cache.
///
/// A failed login simply leaves the token absent; authenticated steps check
/// for it and skip themselves for the rest of the cycle (no mid-cycle
/// re-login).
pub struct SessionManager {
    platform: Arc<dyn PlatformApi>,
    tokens: Mutex<HashMap<Address, String>>,
}

impl SessionManager {
    pub fn new(platform: Arc<dyn PlatformApi>) -> Self {
        Self {
            platform,
            tokens: Mutex::new(HashMap::new()),
        }
    }

    pub async fn login(&self, account: &Account) -> bool {
        let signature = match account.sign_text(LOGIN_MESSAGE).await {
            Ok(signature) => signature,
            Err(e) => {
                tracing::warn!(target: "session", error = %e, "Login message signing failed");
                return false;
            }
        };

        match self
            .platform
            .login(account.address, &signature, account.proxy())
            .await
        {
            Ok(token) => {
                self.tokens.lock().await.insert(account.address, token);
                tracing::info!(
                    target: "session",
                    address = %short_address(account.address),
                    "Login succeeded"
                );
                true
            }
            Err(e) => {
                tracing::warn!(target: "session", error = %e, "Login failed");
                false
            }
        }
    }

    pub async fn token(&self, address: Address) -> Option<String> {
        self.tokens.lock().await.get(&address).cloned()
    }

    pub async fn check_in(&self, account: &Account) -> bool {
        let Some(token) = self.token(account.address).await else {
            tracing::debug!(target: "session", "No session token; skipping check-in");
            return false;
        };

        match self
            .platform
            .check_in(account.address, &token, account.proxy())
            .await
        {
            Ok(()) => {
                tracing::info!(target: "session", "Daily check-in recorded");
                true
            }
            Err(e) => {
                tracing::warn!(target: "session", error = %e, "Check-in failed");
                false
            }
        }
    }

    /// Best effort: report failures never affect the enclosing transfer.
    pub async fn report_transaction(&self, account: &Account, tx_hash: B256) -> bool {
        let Some(token) = self.token(account.address).await else {
            tracing::debug!(target: "session", "No session token; skipping transaction report");
            return false;
        };

        tracing::info!(
            target: "session",
            address = %short_address(account.address),
            hash = %short_hash(tx_hash),
            "Reporting transaction"
        );
        match self
            .platform
            .report_transaction(account.address, &token, tx_hash, account.proxy())
            .await
        {
            Ok(true) => {
                tracing::info!(target: "session", "Transaction report verified");
                true
            }
            Ok(false) => {
                tracing::warn!(target: "session", "Transaction report not verified");
                false
            }
            Err(e) => {
                tracing::warn!(target: "session", error = %e, "Transaction report failed");
                false
            }
        }
    }
}
